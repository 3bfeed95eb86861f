//! iaito-build - Meson build driver for iaito
//!
//! Entry point for the iaito-build command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iaito_build::cli::output::display_error;
use iaito_build::cli::Cli;
use iaito_build::error::BuildError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; RUST_LOG takes precedence
    let default_level = if cli.quiet { "warn" } else { "debug" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the build and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            let code = e.downcast_ref::<BuildError>().map_or(1, BuildError::exit_code);
            std::process::exit(code);
        }
    }
}
