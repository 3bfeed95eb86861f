//! External process execution
//!
//! Every tool invocation goes through [`run`]: resolve the executable,
//! run it to completion with inherited stdio, and map a non-zero exit
//! into [`ToolError::Failed`].

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Serialize, Serializer};

use crate::error::ToolError;

/// A single external command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Program name or path
    pub program: String,
    /// Arguments, passed to the process unchanged
    #[serde(serialize_with = "serialize_lossy")]
    pub args: Vec<OsString>,
    /// Working directory, inherited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation of `program` without arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Arguments are shown lossily in dry-run plans
fn serialize_lossy<S: Serializer>(args: &[OsString], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(args.iter().map(|arg| arg.to_string_lossy()))
}

/// Locate an executable in PATH, or check an explicit path
pub fn resolve_program(program: &str) -> Result<PathBuf, ToolError> {
    which::which(program).map_err(|_| ToolError::NotFound {
        tool: program.to_string(),
        hint: install_hint(program).to_string(),
    })
}

fn install_hint(program: &str) -> &'static str {
    let stem = Path::new(program)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(program)
        .to_ascii_lowercase();
    match stem.as_str() {
        "meson" => "Install Meson (pip install meson) or set [tools] meson in iaito-build.toml.",
        "ninja" => "Install Ninja (pip install ninja) or set [tools] ninja in iaito-build.toml.",
        "msbuild" => "Run from a Visual Studio developer prompt or set [tools] msbuild.",
        "windeployqt" => "Add the Qt bin directory to PATH or set [tools] windeployqt.",
        _ => "Check that it is installed and in PATH.",
    }
}

/// Run an invocation to completion
///
/// Blocks until the process exits. There is no timeout.
pub fn run(invocation: &Invocation) -> Result<(), ToolError> {
    let program = resolve_program(&invocation.program)?;
    tracing::debug!("Running: {invocation}");

    let mut cmd = Command::new(&program);
    cmd.args(&invocation.args);
    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }

    let status = cmd.status().map_err(|e| ToolError::Spawn {
        command: invocation.to_string(),
        error: e.to_string(),
    })?;

    if !status.success() {
        return Err(ToolError::Failed {
            command: invocation.to_string(),
            code: status.code(),
        });
    }

    Ok(())
}
