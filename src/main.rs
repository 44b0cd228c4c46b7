// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmlint - commit message linter.

use clap::Parser;
use cmlint::cli::{run, Cli};
use cmlint::LintError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.debug);

    match run(cli) {
        Ok(()) => {}
        // The report has already been printed
        Err(LintError::Lint { .. }) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Set up logging/tracing.
///
/// Logs go to stderr so that stdout stays clean for reports.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("cmlint=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_env("CMLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
