//! Dataset retrieval over secure copy, as a named user on the archive host.

use std::ffi::OsString;
use std::process::Command;

use crate::config::MODEL;
use crate::error::FetchError;

pub const ARCHIVE_HOST: &str = "hypocenter.usc.edu";
pub const ARCHIVE_ROOT: &str = "/var/www/html/research/ucvmc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScpRequest {
    pub dataset: String,
    pub user: String,
}

impl ScpRequest {
    pub fn new(dataset: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            user: user.into(),
        }
    }

    /// Remote directory holding the dataset.
    pub fn remote_base_path(&self) -> String {
        format!("{}/{}/{}", ARCHIVE_ROOT, MODEL, self.dataset)
    }

    /// `user@host:path/*`, handed to scp as the source operand.
    pub fn source_spec(&self) -> String {
        format!("{}@{}:{}/*", self.user, ARCHIVE_HOST, self.remote_base_path())
    }

    /// Files land in the working directory.
    pub fn local_dir(&self) -> &'static str {
        "."
    }

    pub fn args(&self) -> Vec<OsString> {
        vec![self.source_spec().into(), self.local_dir().into()]
    }

    pub fn command_line(&self) -> String {
        format!("scp {} {}", self.source_spec(), self.local_dir())
    }

    /// Runs scp and waits for it. Its output goes straight to the terminal.
    pub fn run(&self) -> Result<(), FetchError> {
        log::info!("Running {}", self.command_line());

        let status = Command::new("scp")
            .args(self.args())
            .status()
            .map_err(FetchError::ScpSpawn)?;

        if !status.success() {
            log::error!("scp for dataset {} failed with {}", self.dataset, status);
            return Err(FetchError::ScpStatus(status));
        }

        log::info!("scp for dataset {} completed", self.dataset);
        Ok(())
    }
}
