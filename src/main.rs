//! Command-line front end for beatnorm.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beatnorm::{NormalizeOptions, run};

#[derive(Parser)]
#[command(
    name = "beatnorm",
    version,
    about = "Convert velocity fields from 0 -> 127 to floating point 0.0 -> 1.0"
)]
struct Cli {
    /// The file to process
    file: PathBuf,

    /// Do not create a .bak file
    #[arg(long)]
    no_backup: bool,

    /// Verbose mode
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins when set; --verbose otherwise lowers the filter to debug
    // so per-note rewrites show up.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let options = NormalizeOptions {
        path: cli.file,
        backup: !cli.no_backup,
    };
    match run(&options) {
        Ok(report) => {
            if let Some(backup) = &report.backup_path {
                tracing::debug!(backup = %backup.display(), "backup created");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("beatnorm: {err}");
            ExitCode::FAILURE
        }
    }
}
