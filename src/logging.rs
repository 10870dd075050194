//! Log file under the local data dir, or stderr when that is unusable.

use anyhow::{Context, Result};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "cvmh-fetch";

/// `<local data dir>/cvmh-fetch/logs`.
pub fn log_dir() -> Result<PathBuf> {
    let dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
        .data_local_dir()
        .join(APP_DIR)
        .join("logs");
    Ok(dir)
}

/// Writes to a timestamped file in [`log_dir`]. Returns the file path.
pub fn setup_logging(level: LevelFilter) -> Result<PathBuf> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let log_file = log_dir.join(format!(
        "fetch_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    let file = fs::File::create(&log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;
    WriteLogger::init(level, config, file)?;

    Ok(log_file)
}

/// Fallback when the log file cannot be set up. Only warnings and worse
/// unless `level` asks for more, so progress output stays readable.
pub fn setup_stderr_logging(level: LevelFilter) {
    let level = if level >= LevelFilter::Debug {
        level
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = TermLogger::init(
        level,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
