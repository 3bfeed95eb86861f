//! Meson project options
//!
//! Builds the `-D` definitions passed to `meson setup` from a
//! [`BuildConfig`].

use crate::config::defaults::{OPTION_PYTHON, OPTION_PYTHON_BINDINGS, WIN_UNICODE_C_ARGS};
use crate::core::config::BuildConfig;
use crate::core::settings::VendorSettings;

/// Format a project option definition
pub fn define(name: &str, value: &str) -> String {
    format!("-D{name}={value}")
}

/// Meson spelling of a boolean
pub fn meson_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Feature toggles derived from the enable flags
pub fn feature_defines(config: &BuildConfig) -> Vec<String> {
    vec![
        define(OPTION_PYTHON, meson_bool(config.python)),
        define(OPTION_PYTHON_BINDINGS, meson_bool(config.python_bindings)),
    ]
}

/// Windows-only definitions: vendored radare2 paths and Unicode Win32 API
pub fn windows_defines(vendor: &VendorSettings) -> Vec<String> {
    vec![
        define("radare2:r2_incdir", &vendor.incdir),
        define("radare2:r2_libdir", &vendor.libdir),
        define("radare2:r2_datdir", &vendor.datdir),
        define("c_args", WIN_UNICODE_C_ARGS),
    ]
}

/// All definitions for a configure request
pub fn configure_defines(config: &BuildConfig, vendor: &VendorSettings) -> Vec<String> {
    let mut defines = feature_defines(config);
    if config.platform.is_windows() {
        defines.extend(windows_defines(vendor));
    }
    defines
}
