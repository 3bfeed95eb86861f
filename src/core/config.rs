//! Build configuration
//!
//! The resolved, validated parameters of one build invocation.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::config::defaults::{PRODUCT_NAME, SOURCE_SUBDIR};
use crate::core::paths::absolutize;
use crate::error::ConfigError;

/// Build backend used to compile the configured tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Ninja, the fast incremental build tool
    #[default]
    #[value(name = "ninja")]
    Ninja,
    /// Visual Studio 2015 solution
    #[value(name = "vs2015")]
    Vs2015,
    /// Visual Studio 2017 solution
    #[value(name = "vs2017")]
    Vs2017,
    /// Visual Studio 2019 solution
    #[value(name = "vs2019")]
    Vs2019,
    /// Visual Studio 2022 solution
    #[value(name = "vs2022")]
    Vs2022,
}

impl Backend {
    /// All supported backends
    pub const ALL: [Self; 5] = [
        Self::Ninja,
        Self::Vs2015,
        Self::Vs2017,
        Self::Vs2019,
        Self::Vs2022,
    ];

    /// Identifier understood by `meson setup --backend`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ninja => "ninja",
            Self::Vs2015 => "vs2015",
            Self::Vs2017 => "vs2017",
            Self::Vs2019 => "vs2019",
            Self::Vs2022 => "vs2022",
        }
    }

    /// Whether this backend compiles through Ninja rather than a Visual Studio solution
    pub fn is_incremental(self) -> bool {
        self == Self::Ninja
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host platform, as far as the build cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    /// Windows: vendored radare2, Unicode defines, distribution staging
    Windows,
    /// Everything else
    Other,
}

impl HostPlatform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Other
        }
    }

    /// Check if this is Windows
    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }

    /// File name of an executable called `stem` on this platform
    pub fn executable_name(self, stem: &str) -> String {
        match self {
            Self::Windows => format!("{stem}.exe"),
            Self::Other => stem.to_string(),
        }
    }
}

/// Resolved set of build parameters
///
/// Constructed once per invocation and never modified afterwards.
/// Directories are always absolute.
#[derive(Debug, Clone, Serialize)]
pub struct BuildConfig {
    /// Project root
    pub root: PathBuf,
    /// Directory holding the top-level `meson.build`
    pub source_dir: PathBuf,
    /// Backend to configure and compile with
    pub backend: Backend,
    /// Meson build directory
    pub build_dir: PathBuf,
    /// Distribution directory (Windows only)
    pub dist_dir: Option<PathBuf>,
    /// Enable Python support
    pub python: bool,
    /// Enable the Python bindings
    pub python_bindings: bool,
    /// Release build type
    pub release: bool,
    /// Only configure, do not compile
    pub no_build: bool,
    /// Reconfigure even if the build directory already exists
    pub reconfigure: bool,
    /// Platform the build runs on
    pub platform: HostPlatform,
    /// Product name (executable and solution stem)
    pub product: String,
}

impl BuildConfig {
    /// Create a configuration with default flags
    ///
    /// `build_dir` is resolved against `root` when relative.
    pub fn new(root: &Path, build_dir: &Path) -> Self {
        let root = absolutize(root, Path::new("/"));
        Self {
            source_dir: root.join(SOURCE_SUBDIR),
            build_dir: absolutize(build_dir, &root),
            root,
            backend: Backend::default(),
            dist_dir: None,
            python: false,
            python_bindings: false,
            release: false,
            no_build: false,
            reconfigure: false,
            platform: HostPlatform::current(),
            product: PRODUCT_NAME.to_string(),
        }
    }

    /// Set the host platform
    #[must_use]
    pub fn with_platform(mut self, platform: HostPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the distribution directory, resolved against the root
    #[must_use]
    pub fn with_dist_dir(mut self, dist_dir: &Path) -> Self {
        self.dist_dir = Some(absolutize(dist_dir, &self.root));
        self
    }

    /// Set the source directory, resolved against the root
    #[must_use]
    pub fn with_source_dir(mut self, source_dir: &Path) -> Self {
        self.source_dir = absolutize(source_dir, &self.root);
        self
    }

    /// Pre-flight validation, run before any build action
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DistDirExists` if a distribution directory is set
    /// and already present on disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dist) = &self.dist_dir {
            if dist.exists() {
                return Err(ConfigError::DistDirExists { path: dist.clone() });
            }
        }
        Ok(())
    }

    /// Whether a distribution should be staged after the build
    pub fn stages_distribution(&self) -> bool {
        self.platform.is_windows() && self.dist_dir.is_some()
    }

    /// Path of the built executable inside the build directory
    pub fn built_executable(&self) -> PathBuf {
        self.build_dir.join(self.platform.executable_name(&self.product))
    }

    /// Visual Studio solution generated by the IDE backends
    pub fn solution_file(&self) -> PathBuf {
        self.build_dir.join(format!("{}.sln", self.product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relative_dirs_resolve_against_root() {
        let config = BuildConfig::new(Path::new("/work/iaito"), Path::new("build"))
            .with_dist_dir(Path::new("../dist"));

        assert_eq!(config.build_dir, PathBuf::from("/work/iaito/build"));
        assert_eq!(config.dist_dir, Some(PathBuf::from("/work/dist")));
        assert_eq!(config.source_dir, PathBuf::from("/work/iaito/src"));
    }

    #[test]
    fn test_absolute_build_dir_kept() {
        let config = BuildConfig::new(Path::new("/work/iaito"), Path::new("/tmp/b"));
        assert_eq!(config.build_dir, PathBuf::from("/tmp/b"));
    }

    #[test]
    fn test_validate_rejects_existing_dist() {
        let temp = TempDir::new().unwrap();
        let config = BuildConfig::new(temp.path(), Path::new("build"))
            .with_platform(HostPlatform::Windows)
            .with_dist_dir(temp.path());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DistDirExists { .. }));
    }

    #[test]
    fn test_validate_accepts_missing_dist() {
        let temp = TempDir::new().unwrap();
        let config = BuildConfig::new(temp.path(), Path::new("build"))
            .with_platform(HostPlatform::Windows)
            .with_dist_dir(Path::new("dist"));

        assert!(config.validate().is_ok());
        assert!(config.stages_distribution());
    }

    #[test]
    fn test_no_staging_off_windows() {
        let config = BuildConfig::new(Path::new("/work"), Path::new("build"))
            .with_platform(HostPlatform::Other)
            .with_dist_dir(Path::new("dist"));
        assert!(!config.stages_distribution());
    }

    #[test]
    fn test_artifact_names() {
        let config = BuildConfig::new(Path::new("/work"), Path::new("build"))
            .with_platform(HostPlatform::Windows);
        assert_eq!(config.built_executable(), PathBuf::from("/work/build/iaito.exe"));
        assert_eq!(config.solution_file(), PathBuf::from("/work/build/iaito.sln"));

        let config = config.with_platform(HostPlatform::Other);
        assert_eq!(config.built_executable(), PathBuf::from("/work/build/iaito"));
    }

    #[test]
    fn test_backend_identifiers() {
        assert_eq!(Backend::default(), Backend::Ninja);
        assert!(Backend::Ninja.is_incremental());
        for backend in Backend::ALL.iter().skip(1) {
            assert!(!backend.is_incremental());
            assert!(backend.as_str().starts_with("vs"));
        }
    }
}
