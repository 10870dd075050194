use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const MODEL: &str = "CVMH";

pub const CONFIG_FILE: &str = "config";

const MODEL_DATA_PATH: &str = "model_data_path";
const MODEL_DIR: &str = "model_dir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub remote_base_path: String,
    /// Also the directory name on the remote side.
    pub model_dir: String,
    pub local_dir: String,
}

impl ModelConfig {
    pub fn from_file(path: &Path, model: &str) -> Result<Self, ConfigError> {
        log::info!("Reading configuration from {:?}", path);

        let file = fs::File::open(path).map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file, model)
    }

    /// Parses `key = value` lines. Lines starting with `#` and lines without
    /// `=` are skipped, unknown keys are ignored, and a later assignment wins.
    pub fn from_reader<R: Read>(reader: R, model: &str) -> Result<Self, ConfigError> {
        let mut remote_base_path = None;
        let mut model_dir = None;

        for line in BufReader::new(reader).lines() {
            let line = line.map_err(ConfigError::Read)?;
            if line.starts_with('#') {
                continue;
            }
            let Some((variable, val)) = line.split_once('=') else {
                continue;
            };
            let (variable, val) = (variable.trim(), val.trim());

            match variable {
                MODEL_DATA_PATH => {
                    if val.is_empty() {
                        return Err(ConfigError::EmptyValue(MODEL_DATA_PATH));
                    }
                    remote_base_path =
                        Some(format!("{}/{}", val.trim_end_matches('/'), model));
                }
                MODEL_DIR => {
                    if val.is_empty() {
                        return Err(ConfigError::EmptyValue(MODEL_DIR));
                    }
                    model_dir = Some(val.to_string());
                }
                other => log::debug!("Ignoring config variable {:?}", other),
            }
        }

        let remote_base_path = remote_base_path.ok_or(ConfigError::MissingKey(MODEL_DATA_PATH))?;
        let model_dir = model_dir.ok_or(ConfigError::MissingKey(MODEL_DIR))?;
        let local_dir = format!("./{}", model_dir);

        log::info!(
            "Resolved remote base {} and local directory {}",
            remote_base_path,
            local_dir
        );

        Ok(Self {
            remote_base_path,
            model_dir,
            local_dir,
        })
    }

    /// `local_dir` under `root`. Stays under `root` even for an absolute `model_dir`.
    pub fn local_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.local_dir)
    }

    pub fn url_for(&self, relative: &str) -> String {
        format!("{}/{}/{}", self.remote_base_path, self.model_dir, relative)
    }

    pub fn destination_for(&self, relative: &str) -> String {
        format!("{}/{}", self.local_dir, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ModelConfig, ConfigError> {
        ModelConfig::from_reader(text.as_bytes(), MODEL)
    }

    #[test]
    fn parses_both_keys() {
        let cfg = parse("model_data_path = /data/x\nmodel_dir=out\n").unwrap();
        assert_eq!(cfg.remote_base_path, "/data/x/CVMH");
        assert_eq!(cfg.model_dir, "out");
        assert_eq!(cfg.local_dir, "./out");
    }

    #[test]
    fn skips_comments_and_lines_without_delimiter() {
        let text = "# comment\n#model_dir=wrong\nno delimiter here\n\nmodel_data_path=/d\nmodel_dir=m\n";
        let cfg = parse(text).unwrap();
        assert_eq!(cfg.remote_base_path, "/d/CVMH");
        assert_eq!(cfg.local_dir, "./m");
    }

    #[test]
    fn splits_on_first_delimiter_only() {
        let cfg = parse("model_data_path = http://host/a?b=c\nmodel_dir = m\n").unwrap();
        assert_eq!(cfg.remote_base_path, "http://host/a?b=c/CVMH");
    }

    #[test]
    fn ignores_unknown_variables() {
        let cfg = parse("version = 15.1\nmodel_data_path=/d\nmodel_dir=m\n").unwrap();
        assert_eq!(cfg.model_dir, "m");
    }

    #[test]
    fn later_assignment_wins() {
        let cfg = parse("model_dir=a\nmodel_data_path=/d\nmodel_dir=b\n").unwrap();
        assert_eq!(cfg.local_dir, "./b");
    }

    #[test]
    fn missing_data_path_is_an_error() {
        let err = parse("model_dir=m\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("model_data_path")));
    }

    #[test]
    fn missing_model_dir_is_an_error() {
        let err = parse("model_data_path=/d\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("model_dir")));
    }

    #[test]
    fn empty_value_is_an_error() {
        let err = parse("model_data_path=/d\nmodel_dir =   \n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue("model_dir")));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelConfig::from_file(&dir.path().join("config"), MODEL).unwrap_err();
        assert!(matches!(err, ConfigError::Open { .. }));
    }

    #[test]
    fn builds_urls_and_destinations() {
        let cfg = parse("model_data_path=http://host/path/\nmodel_dir=mdir\n").unwrap();
        assert_eq!(cfg.url_for("CVM_LR.vo"), "http://host/path/CVMH/mdir/CVM_LR.vo");
        assert_eq!(cfg.url_for("tsurf/a.ts"), "http://host/path/CVMH/mdir/tsurf/a.ts");
        assert_eq!(cfg.destination_for("CVM_LR.vo"), "./mdir/CVM_LR.vo");
        assert_eq!(cfg.destination_for("tsurf/a.ts"), "./mdir/tsurf/a.ts");
    }

    #[test]
    fn absolute_model_dir_stays_under_root() {
        let cfg = parse("model_data_path=/d\nmodel_dir=/abs\n").unwrap();
        assert_eq!(cfg.local_dir, ".//abs");
        let local = cfg.local_dir_in(Path::new("/work"));
        assert!(local.starts_with("/work"));
        assert_eq!(local, Path::new("/work/abs"));
    }
}
