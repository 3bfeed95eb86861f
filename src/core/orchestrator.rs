//! Build orchestration logic
//!
//! Decides which build steps a [`BuildConfig`] needs and issues them, in
//! order, through a [`BuildTool`]:
//!
//! ```text
//! Start -> Validated -> {Configured | ConfigSkipped}
//!       -> {Compiled | CompileSkipped} -> [DistStaged] -> Done
//! ```
//!
//! Any failing step ends the run. Nothing is retried or rolled back.

use std::path::Path;

use serde::Serialize;

use crate::config::defaults::MSBUILD_PARALLEL_FLAG;
use crate::core::config::BuildConfig;
use crate::core::options::configure_defines;
use crate::core::paths::PathTable;
use crate::core::settings::ProjectSettings;
use crate::error::BuildError;
use crate::infra::meson::{BuildTool, ConfigureRequest, InstallRequest};
use crate::infra::process::Invocation;

/// State reached during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Pre-flight checks passed
    Validated,
    /// `meson setup` ran
    Configured,
    /// Existing build directory reused
    ConfigSkipped,
    /// Backend compile ran
    Compiled,
    /// `--nobuild` given
    CompileSkipped,
    /// Distribution directory populated
    DistStaged,
    /// Run finished
    Done,
}

/// States reached by one run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Stages in the order they were reached
    pub stages: Vec<Stage>,
}

impl BuildReport {
    fn push(&mut self, stage: Stage) {
        tracing::debug!("Stage reached: {stage:?}");
        self.stages.push(stage);
    }

    /// Check if a stage was reached
    pub fn reached(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }
}

/// Drives a [`BuildTool`] through the steps of one build
pub struct Orchestrator<'a, T: BuildTool> {
    tool: &'a mut T,
    settings: &'a ProjectSettings,
}

impl<'a, T: BuildTool> Orchestrator<'a, T> {
    /// Create an orchestrator over `tool`
    pub fn new(tool: &'a mut T, settings: &'a ProjectSettings) -> Self {
        Self { tool, settings }
    }

    /// Validate, build and, on Windows with a distribution directory, stage
    pub fn run(&mut self, config: &BuildConfig) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        config.validate()?;
        report.push(Stage::Validated);

        self.build(config, &mut report)?;

        if let Some(dist) = config
            .dist_dir
            .as_deref()
            .filter(|_| config.stages_distribution())
        {
            self.stage_distribution(config, dist)?;
            report.push(Stage::DistStaged);
        }

        report.push(Stage::Done);
        Ok(report)
    }

    /// Configure if needed, then compile unless disabled
    ///
    /// An existing build directory is reused as-is unless a reconfigure was
    /// requested; flag changes since the last configure are not detected.
    pub fn build(
        &mut self,
        config: &BuildConfig,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let exists = config.build_dir.exists();

        if !exists || config.reconfigure {
            self.tool.configure(&ConfigureRequest {
                source_dir: config.source_dir.clone(),
                build_dir: config.build_dir.clone(),
                prefix: config.dist_dir.clone(),
                backend: config.backend,
                release: config.release,
                shared: false,
                reconfigure: exists,
                options: configure_defines(config, &self.settings.vendor),
            })?;
            report.push(Stage::Configured);
        } else {
            tracing::warn!(
                "{} already exists, reusing its configuration (pass --reconfigure to apply changed options)",
                config.build_dir.display()
            );
            report.push(Stage::ConfigSkipped);
        }

        if config.no_build {
            tracing::info!("Skipping compile (--nobuild)");
            report.push(Stage::CompileSkipped);
            return Ok(());
        }

        tracing::info!("Building {}", config.product);
        if config.backend.is_incremental() {
            self.tool.compile_fast(&config.build_dir)?;
        } else {
            self.tool
                .compile_ide(&config.solution_file(), &[MSBUILD_PARALLEL_FLAG])?;
        }
        report.push(Stage::Compiled);

        Ok(())
    }

    /// Populate the distribution directory `dist`
    ///
    /// Steps are not transactional: a failure leaves whatever was already
    /// copied in place.
    pub fn stage_distribution(
        &mut self,
        config: &BuildConfig,
        dist: &Path,
    ) -> Result<(), BuildError> {
        let defaults = PathTable::for_build(config);
        let exe_name = config.platform.executable_name(&config.product);

        self.tool.make_dir(dist)?;
        self.tool.copy(&config.built_executable(), dist, &defaults)?;

        tracing::debug!("Deploying Qt");
        self.tool.run_command(
            &Invocation::new(&self.settings.tools.windeployqt)
                .arg("--release")
                .path_arg(&dist.join(&exe_name)),
        )?;

        tracing::debug!("Deploying libr2");
        let paths = defaults.merged(&PathTable::radare2(&self.settings.vendor));
        self.tool.install(&InstallRequest {
            build_dir: config.build_dir.clone(),
            options: vec!["--no-rebuild".to_string()],
            paths,
        })?;

        Ok(())
    }
}
