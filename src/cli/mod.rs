//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no build logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::defaults::DEFAULT_BUILD_DIR;
use crate::core::config::{Backend, BuildConfig};
use crate::core::orchestrator::{BuildReport, Orchestrator};
use crate::core::paths::absolutize;
use crate::core::settings::ProjectSettings;
use crate::error::{BuildError, ConfigError};
use crate::infra::meson::{BuildTool, MesonTool, RecordingTool};

/// Version string with build metadata
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VERGEN_GIT_SHA"),
    "\nbuilt: ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    "\ntarget: ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

/// Meson script for iaito
///
/// Configures the iaito source tree with Meson and builds it with Ninja or
/// MSBuild. On Windows the result is staged into a distribution directory
/// together with its Qt and radare2 runtime.
#[derive(Parser, Debug)]
#[command(name = "iaito-build")]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Choose build backend
    #[arg(long, value_enum, default_value_t = Backend::Ninja)]
    pub backend: Backend,

    /// Destination build directory
    #[arg(long, default_value = DEFAULT_BUILD_DIR)]
    pub dir: PathBuf,

    /// Enable Python support
    #[arg(long)]
    pub python: bool,

    /// Enable Python Bindings
    #[arg(long)]
    pub python_bindings: bool,

    /// Set the build as Release (remove debug info)
    #[arg(long)]
    pub release: bool,

    /// Only run meson and do not build
    #[arg(long)]
    pub nobuild: bool,

    /// Distribution directory (defaults to the build directory)
    #[cfg_attr(windows, arg(long))]
    #[cfg_attr(not(windows), arg(skip))]
    pub dist: Option<PathBuf>,

    /// Project root holding the iaito sources
    #[arg(long, env = "IAITO_ROOT")]
    pub root: Option<PathBuf>,

    /// Settings file (defaults to <root>/iaito-build.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run meson setup again on an existing build directory
    #[arg(long)]
    pub reconfigure: bool,

    /// Print the planned tool requests as JSON instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the build described by the arguments
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::WorkingDir {
            error: e.to_string(),
        })?;
        let root = self
            .root
            .as_deref()
            .map_or_else(|| cwd.clone(), |root| absolutize(root, &cwd));
        tracing::debug!("ROOT: {}", root.display());

        let settings_path = self.config.as_deref().map_or_else(
            || ProjectSettings::default_path(&root),
            |path| absolutize(path, &cwd),
        );
        let settings = ProjectSettings::load_from_path(&settings_path)
            .with_context(|| "Failed to load project settings")?;

        let config = self.build_config(&root, &settings);
        tracing::debug!("Arguments: {self:?}");

        if self.dry_run {
            let mut tool = RecordingTool::new();
            let report = execute(&mut tool, &settings, &config)?;
            let plan = serde_json::json!({
                "config": config,
                "requests": tool.requests(),
                "stages": report.stages,
            });
            println!("{}", serde_json::to_string_pretty(&plan)?);
            return Ok(());
        }

        let mut tool = MesonTool::new(settings.tools.clone());
        let report = execute(&mut tool, &settings, &config)?;
        if !self.quiet {
            output::print_summary(&config, &report);
        }
        Ok(())
    }

    /// Resolve the arguments into a [`BuildConfig`]
    pub fn build_config(&self, root: &Path, settings: &ProjectSettings) -> BuildConfig {
        let mut config =
            BuildConfig::new(root, &self.dir).with_source_dir(&settings.project.source_dir);
        config.product.clone_from(&settings.project.product);
        config.backend = self.backend;
        config.python = self.python;
        config.python_bindings = self.python_bindings;
        config.release = self.release;
        config.no_build = self.nobuild;
        config.reconfigure = self.reconfigure;

        if config.platform.is_windows() {
            let dist = self.dist.as_deref().unwrap_or(&self.dir);
            config = config.with_dist_dir(dist);
        }
        config
    }
}

fn execute<T: BuildTool>(
    tool: &mut T,
    settings: &ProjectSettings,
    config: &BuildConfig,
) -> Result<BuildReport, BuildError> {
    Orchestrator::new(tool, settings).run(config)
}
