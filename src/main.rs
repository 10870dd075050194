use clap::error::ErrorKind;
use clap::Parser;
use log::{error, info};
use simplelog::LevelFilter;

use cvmh_fetch::app::App;
use cvmh_fetch::cli::Cli;
use cvmh_fetch::logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match logging::setup_logging(level) {
        Ok(path) => info!("Logging to {:?}", path),
        Err(e) => {
            logging::setup_stderr_logging(level);
            log::warn!("File logging unavailable, using stderr: {:#}", e);
        }
    }

    info!("cvmh-fetch {} starting", env!("CARGO_PKG_VERSION"));

    let app = App::new(cli.mode(), cli.dry_run);
    if let Err(e) = app.run() {
        error!("Retrieval failed: {:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }

    info!("Retrieval completed successfully");
}
