use std::path::PathBuf;

use clap::Parser;

use crate::config::CONFIG_FILE;
use crate::manifest::DEFAULT_MANIFEST;
use crate::scp::ScpRequest;

/// Retrieves the CVM-H model data files. They are very big.
///
/// With `-d` and `-u`, copies a dataset from the archive host over scp.
/// Without them, reads `model_data_path` and `model_dir` from the config
/// file and downloads every file of the manifest over HTTP.
#[derive(Debug, Parser)]
#[command(name = "cvmh-fetch", version)]
pub struct Cli {
    /// Dataset to retrieve over scp, e.g. cvmh1510.
    #[arg(short = 'd', long, value_name = "DATASET", requires = "user")]
    pub dataset: Option<String>,

    /// Username to do the scp retrieval with.
    #[arg(short = 'u', long, value_name = "USER", requires = "dataset")]
    pub user: Option<String>,

    /// Config file holding model_data_path and model_dir.
    #[arg(long, value_name = "PATH", default_value = CONFIG_FILE, conflicts_with = "dataset")]
    pub config: PathBuf,

    /// Built-in manifest name or path to a JSON manifest.
    #[arg(long, value_name = "NAME|PATH", default_value = DEFAULT_MANIFEST, conflicts_with = "dataset")]
    pub manifest: String,

    /// Print what would be retrieved without touching the network or disk.
    #[arg(long)]
    pub dry_run: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    Scp(ScpRequest),
    Http { config: PathBuf, manifest: String },
}

impl Cli {
    pub fn mode(&self) -> FetchMode {
        match (&self.dataset, &self.user) {
            (Some(dataset), Some(user)) => FetchMode::Scp(ScpRequest::new(dataset, user)),
            _ => FetchMode::Http {
                config: self.config.clone(),
                manifest: self.manifest.clone(),
            },
        }
    }
}
