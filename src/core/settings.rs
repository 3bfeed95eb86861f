//! Project settings
//!
//! Reads optional overrides from `iaito-build.toml` in the project root:
//! product name, source directory, tool executables and the vendored
//! radare2 layout used on Windows.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::{self, tools};
use crate::error::ConfigError;

/// Project settings file contents
///
/// Every section is optional; missing keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Project layout
    pub project: ProjectSection,

    /// Tool executables
    pub tools: ToolSettings,

    /// Vendored radare2 paths (Windows)
    pub vendor: VendorSettings,
}

/// Project layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Product name; names the executable and the Visual Studio solution
    pub product: String,

    /// Directory holding the top-level `meson.build`, relative to the root
    pub source_dir: PathBuf,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            product: defaults::PRODUCT_NAME.to_string(),
            source_dir: PathBuf::from(defaults::SOURCE_SUBDIR),
        }
    }
}

/// Tool executables, as names looked up in PATH or as explicit paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Meson
    pub meson: String,
    /// Ninja
    pub ninja: String,
    /// MSBuild
    pub msbuild: String,
    /// Qt deployment tool
    pub windeployqt: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            meson: tools::MESON.to_string(),
            ninja: tools::NINJA.to_string(),
            msbuild: tools::MSBUILD.to_string(),
            windeployqt: tools::WINDEPLOYQT.to_string(),
        }
    }
}

/// Vendored radare2 directories handed to the `radare2` subproject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorSettings {
    /// Include directory
    pub incdir: String,
    /// Library directory
    pub libdir: String,
    /// Data directory
    pub datdir: String,
}

impl Default for VendorSettings {
    fn default() -> Self {
        Self {
            incdir: defaults::R2_INCDIR.to_string(),
            libdir: defaults::R2_LIBDIR.to_string(),
            datdir: defaults::R2_DATDIR.to_string(),
        }
    }
}

impl ProjectSettings {
    /// Default settings file location for a project root
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(defaults::SETTINGS_FILE)
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseSettings` if the file exists but is not
    /// valid TOML, and `ConfigError::ReadSettings` if it cannot be read.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadSettings {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseSettings {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings =
            ProjectSettings::load_from_path(&ProjectSettings::default_path(temp.path())).unwrap();

        assert_eq!(settings, ProjectSettings::default());
        assert_eq!(settings.project.product, "iaito");
        assert_eq!(settings.tools.meson, "meson");
        assert_eq!(settings.vendor.incdir, "radare2/include");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("iaito-build.toml");
        fs::write(
            &path,
            r#"
[tools]
meson = "C:/Python311/Scripts/meson.exe"

[vendor]
libdir = "r2-dist/lib"
"#,
        )
        .unwrap();

        let settings = ProjectSettings::load_from_path(&path).unwrap();

        assert_eq!(settings.tools.meson, "C:/Python311/Scripts/meson.exe");
        assert_eq!(settings.tools.ninja, "ninja");
        assert_eq!(settings.vendor.libdir, "r2-dist/lib");
        assert_eq!(settings.vendor.datdir, "radare2/share");
        assert_eq!(settings.project.source_dir, PathBuf::from("src"));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("iaito-build.toml");
        fs::write(&path, "[tools\nmeson = ").unwrap();

        let err = ProjectSettings::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseSettings { .. }));
        assert!(err.to_string().contains("iaito-build.toml"));
    }
}
