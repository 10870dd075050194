//! Retrieval of the CVM-H velocity model data files from the remote archive.

pub mod app;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod retrieve;
pub mod scp;

pub use config::ModelConfig;
pub use download::{HttpSource, RemoteSource};
pub use error::{ConfigError, FetchError};
pub use manifest::Manifest;
pub use retrieve::{RetrievalReport, RetrievalTarget, Retriever};
