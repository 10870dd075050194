use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ModelConfig;
use crate::download::{download_file, RemoteSource};
use crate::error::FetchError;
use crate::manifest::Manifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalTarget {
    /// e.g. `tsurf/base.ts`
    pub relative: String,
    pub url: String,
    pub destination: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrievalReport {
    pub files: usize,
    pub bytes: u64,
}

pub fn plan(config: &ModelConfig, manifest: &Manifest, root: &Path) -> Vec<RetrievalTarget> {
    let local_dir = config.local_dir_in(root);

    manifest
        .relative_paths()
        .into_iter()
        .map(|relative| RetrievalTarget {
            url: config.url_for(&relative),
            destination: config.destination_for(&relative),
            path: local_dir.join(&relative),
            relative,
        })
        .collect()
}

/// Fetches every file of a manifest, strictly one after another.
pub struct Retriever<S> {
    source: S,
    root: PathBuf,
}

impl<S: RemoteSource> Retriever<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            root: PathBuf::from("."),
        }
    }

    /// Resolves `local_dir` against `root` instead of the working directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn run(
        &self,
        config: &ModelConfig,
        manifest: &Manifest,
    ) -> Result<RetrievalReport, FetchError> {
        self.run_with(config, manifest, |_, _| {})
    }

    /// Creates the local directory tree, then downloads each target in
    /// manifest order, calling `on_file` after each one lands. The first
    /// failure aborts the rest; files already written are left in place.
    pub fn run_with<F>(
        &self,
        config: &ModelConfig,
        manifest: &Manifest,
        mut on_file: F,
    ) -> Result<RetrievalReport, FetchError>
    where
        F: FnMut(&RetrievalTarget, u64),
    {
        let targets = plan(config, manifest, &self.root);
        log::info!(
            "Retrieving {} files from {} into {}",
            targets.len(),
            config.remote_base_path,
            config.local_dir
        );

        self.prepare_directories(config, manifest, &targets)?;

        let mut report = RetrievalReport::default();
        for target in &targets {
            let bytes = download_file(&self.source, &target.url, &target.path).map_err(|e| {
                log::error!("Retrieval of {} failed, skipping the rest", target.relative);
                e
            })?;

            on_file(target, bytes);
            report.files += 1;
            report.bytes += bytes;
        }

        log::info!(
            "Retrieved {} files, {} bytes total",
            report.files,
            report.bytes
        );
        Ok(report)
    }

    fn prepare_directories(
        &self,
        config: &ModelConfig,
        manifest: &Manifest,
        targets: &[RetrievalTarget],
    ) -> Result<(), FetchError> {
        let local_dir = config.local_dir_in(&self.root);

        let mut dirs = BTreeSet::new();
        dirs.insert(local_dir.clone());
        for subdir in &manifest.subdirectories {
            dirs.insert(local_dir.join(&subdir.name));
        }
        for target in targets {
            if let Some(parent) = target.path.parent() {
                dirs.insert(parent.to_path_buf());
            }
        }

        for dir in dirs {
            log::debug!("Creating directory {:?}", dir);
            fs::create_dir_all(&dir).map_err(|source| FetchError::CreateDir { path: dir, source })?;
        }

        Ok(())
    }
}
