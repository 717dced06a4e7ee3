//! Storefront CLI

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::{Cli, observability};

mod cli;

/// Storefront CLI entry point
pub fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(source) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for setup errors"
        )]
        {
            eprintln!("Failed to initialise logging: {source}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => {
            error!("{source}");

            ExitCode::FAILURE
        }
    }
}
