use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::FetchMode;
use crate::config::ModelConfig;
use crate::download::{HttpSource, RemoteSource};
use crate::manifest::Manifest;
use crate::retrieve::{plan, RetrievalReport, Retriever};
use crate::scp::ScpRequest;

/// One invocation of the tool, in either mode.
pub struct App {
    mode: FetchMode,
    root: PathBuf,
    dry_run: bool,
}

impl App {
    pub fn new(mode: FetchMode, dry_run: bool) -> Self {
        Self {
            mode,
            root: PathBuf::from("."),
            dry_run,
        }
    }

    /// Resolves the local directory against `root` instead of the working directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn run(&self) -> Result<()> {
        match &self.mode {
            FetchMode::Scp(request) => self.run_scp(request),
            FetchMode::Http { config, manifest } => {
                let source = HttpSource::new().context("Failed to set up HTTP client")?;
                self.run_http(source, config, manifest).map(|_| ())
            }
        }
    }

    fn run_scp(&self, request: &ScpRequest) -> Result<()> {
        log::info!(
            "Secure-copy mode: dataset {} as {}",
            request.dataset,
            request.user
        );

        if self.dry_run {
            println!("{}", request.command_line());
            return Ok(());
        }

        println!("\nDownloading model dataset\n");
        request
            .run()
            .with_context(|| format!("Failed to copy dataset {}", request.dataset))?;
        println!("\nDone!");
        Ok(())
    }

    /// Resolves the manifest and configuration, then retrieves every file
    /// through `source`. Returns `None` on a dry run.
    pub fn run_http<S: RemoteSource>(
        &self,
        source: S,
        config_path: &Path,
        manifest: &str,
    ) -> Result<Option<RetrievalReport>> {
        let manifest = Manifest::load(manifest).context("Failed to load manifest")?;
        log::info!(
            "Manifest {} {} lists {} files",
            manifest.model,
            manifest.version,
            manifest.len()
        );

        let config = ModelConfig::from_file(&self.root.join(config_path), &manifest.model)
            .context("Failed to resolve configuration")?;

        if self.dry_run {
            for target in plan(&config, &manifest, &self.root) {
                println!("{} -> {}", target.url, target.destination);
            }
            return Ok(None);
        }

        println!("\nDownloading model dataset\n");
        let report = Retriever::new(source)
            .with_root(&self.root)
            .run_with(&config, &manifest, |target, bytes| {
                println!("Retrieved {} ({} bytes)", target.destination, bytes)
            })
            .with_context(|| format!("Failed to retrieve dataset into {}", config.local_dir))?;

        println!(
            "\nDone! Retrieved {} files ({} bytes) into {}",
            report.files, report.bytes, config.local_dir
        );
        Ok(Some(report))
    }
}
