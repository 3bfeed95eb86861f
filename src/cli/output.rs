//! Output formatting
//!
//! Status messages and error display for the terminal.

use crate::core::config::BuildConfig;
use crate::core::orchestrator::{BuildReport, Stage};

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Print an error and its cause chain to stderr
pub fn display_error(err: &anyhow::Error) {
    eprintln!("{} Error: {err}", status::ERROR);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Summary lines for a finished build
pub fn summary_lines(config: &BuildConfig, report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.reached(Stage::Compiled) {
        lines.push(format!("{} Build complete!", status::SUCCESS));
    } else {
        lines.push(format!("{} Configured (compile skipped)", status::SUCCESS));
    }
    lines.push(format!("  Backend: {}", config.backend));
    lines.push(format!("  Build directory: {}", config.build_dir.display()));

    if report.reached(Stage::ConfigSkipped) {
        lines.push(format!(
            "{} Existing configuration reused; pass --reconfigure to apply new options",
            status::INFO
        ));
    }
    if report.reached(Stage::DistStaged) {
        if let Some(dist) = &config.dist_dir {
            lines.push(format!("  Distribution: {}", dist.display()));
        }
    }
    lines
}

/// Print the build summary to stdout
pub fn print_summary(config: &BuildConfig, report: &BuildReport) {
    for line in summary_lines(config, report) {
        println!("{line}");
    }
}
