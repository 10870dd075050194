use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use crate::error::ConfigError;

/// Manifest used when none is named on the command line.
pub const DEFAULT_MANIFEST: &str = "cvmh-15.1.1";

const BUILTIN: &[(&str, &str)] = &[
    ("cvmh-15.1.0", include_str!("../data/cvmh-15.1.0.json")),
    ("cvmh-15.1.1", include_str!("../data/cvmh-15.1.1.json")),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub model: String,
    #[serde(default)]
    pub version: String,
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub subdirectories: Vec<Subdirectory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub name: String,
}

/// Files that live under a directory of their own, e.g. `tsurf/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Subdirectory {
    pub name: String,
    pub files: Vec<FileEntry>,
}

impl Manifest {
    /// Names of the manifests compiled into the binary.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    pub fn builtin(name: &str) -> Option<Result<Self, ConfigError>> {
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, json)| Self::from_json(json))
    }

    /// Resolves a built-in manifest name, or failing that, a path to a JSON file.
    pub fn load(name_or_path: &str) -> Result<Self, ConfigError> {
        if let Some(manifest) = Self::builtin(name_or_path) {
            log::info!("Using built-in manifest {}", name_or_path);
            return manifest;
        }

        let path = Path::new(name_or_path);
        log::info!("Loading manifest from {:?}", path);
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let manifest: Manifest = serde_json::from_str(text).map_err(ConfigError::ManifestParse)?;
        manifest.validate()?;
        log::debug!(
            "Manifest validated: {} {} ({} files)",
            manifest.model,
            manifest.version,
            manifest.len()
        );
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(invalid("model is empty"));
        }

        if self.files.is_empty() {
            return Err(invalid("files list is empty"));
        }

        check_entries("top level", &self.files)?;

        let mut seen = HashSet::new();
        for subdir in &self.subdirectories {
            check_relative(&subdir.name)
                .map_err(|why| invalid(format!("subdirectory {:?} {}", subdir.name, why)))?;
            if !seen.insert(subdir.name.as_str()) {
                return Err(invalid(format!("subdirectory {:?} listed twice", subdir.name)));
            }
            check_entries(&subdir.name, &subdir.files)?;
        }

        Ok(())
    }

    /// Total number of files, subdirectories included.
    pub fn len(&self) -> usize {
        self.files.len() + self.subdirectories.iter().map(|s| s.files.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Relative paths in retrieval order: top-level files first, then each
    /// subdirectory in turn.
    pub fn relative_paths(&self) -> Vec<String> {
        let top = self.files.iter().map(|f| f.name.clone());
        let nested = self
            .subdirectories
            .iter()
            .flat_map(|s| s.files.iter().map(move |f| format!("{}/{}", s.name, f.name)));
        top.chain(nested).collect()
    }
}

fn invalid(why: impl Into<String>) -> ConfigError {
    ConfigError::InvalidManifest(why.into())
}

fn check_entries(scope: &str, files: &[FileEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for file in files {
        check_relative(&file.name)
            .map_err(|why| invalid(format!("{}: file {:?} {}", scope, file.name, why)))?;
        if !seen.insert(file.name.as_str()) {
            return Err(invalid(format!("{}: file {:?} listed twice", scope, file.name)));
        }
    }
    Ok(())
}

/// Entries must stay inside the model directory.
fn check_relative(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("has an empty name");
    }
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err("escapes the model directory"),
        }
    }
    Ok(())
}
