//! Default configuration values

/// Product name, used for the executable and the Visual Studio solution
pub const PRODUCT_NAME: &str = "iaito";

/// Source sub-directory holding the top-level `meson.build`
pub const SOURCE_SUBDIR: &str = "src";

/// Default build directory, relative to the project root
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Project settings file name, looked up in the project root
pub const SETTINGS_FILE: &str = "iaito-build.toml";

/// Flag handed to MSBuild to enable parallel project builds
pub const MSBUILD_PARALLEL_FLAG: &str = "/m";

/// Meson project option toggling Python support
pub const OPTION_PYTHON: &str = "enable_python";

/// Meson project option toggling the Python bindings
pub const OPTION_PYTHON_BINDINGS: &str = "enable_python_bindings";

/// Vendored radare2 include directory (Windows)
pub const R2_INCDIR: &str = "radare2/include";

/// Vendored radare2 library directory (Windows)
pub const R2_LIBDIR: &str = "radare2/lib";

/// Vendored radare2 data directory (Windows)
pub const R2_DATDIR: &str = "radare2/share";

/// C compiler arguments enabling the wide-character Win32 API
pub const WIN_UNICODE_C_ARGS: &str = "-D_UNICODE -DUNICODE";

/// Default tool executables
pub mod tools {
    /// Meson build system
    pub const MESON: &str = "meson";

    /// Ninja build tool
    pub const NINJA: &str = "ninja";

    /// Microsoft Build Engine
    pub const MSBUILD: &str = "msbuild";

    /// Qt deployment tool
    pub const WINDEPLOYQT: &str = "windeployqt";
}
