use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Problems found while resolving the configuration or the manifest.
/// All of them are raised before any transfer starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open config file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file")]
    Read(#[source] io::Error),

    #[error("`{0}` is not set in the config file")]
    MissingKey(&'static str),

    #[error("`{0}` is set to an empty value")]
    EmptyValue(&'static str),

    #[error("failed to read manifest {path:?}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest")]
    ManifestParse(#[source] serde_json::Error),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

/// A failed retrieval. Any of these aborts the rest of the queue.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to open {url}")]
    Open {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read from {url}")]
    Read {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run scp")]
    ScpSpawn(#[source] io::Error),

    #[error("scp exited with {0}")]
    ScpStatus(ExitStatus),
}
