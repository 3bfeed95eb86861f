//! Meson build-tool adapter
//!
//! [`BuildTool`] is the set of primitive operations the orchestrator
//! drives: configure, compile, copy, install and arbitrary commands.
//! [`MesonTool`] runs them for real; [`RecordingTool`] only records what
//! would run, for dry runs and tests.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::config::Backend;
use crate::core::paths::PathTable;
use crate::core::settings::ToolSettings;
use crate::error::BuildError;
use crate::infra::filesystem;
use crate::infra::process::{self, Invocation};

/// `meson setup` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigureRequest {
    /// Directory with the top-level `meson.build`
    pub source_dir: PathBuf,
    /// Build directory to generate
    pub build_dir: PathBuf,
    /// Install prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    /// Backend to generate files for
    pub backend: Backend,
    /// Release build type
    pub release: bool,
    /// Build shared libraries
    pub shared: bool,
    /// Regenerate an existing build directory
    pub reconfigure: bool,
    /// Project option definitions (`-Dname=value`)
    pub options: Vec<String>,
}

impl ConfigureRequest {
    /// Arguments following `meson`
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("setup")];
        if self.reconfigure {
            args.push("--reconfigure".into());
        }
        if let Some(prefix) = &self.prefix {
            let mut arg = OsString::from("--prefix=");
            arg.push(prefix);
            args.push(arg);
        }
        args.push(format!("--backend={}", self.backend).into());
        args.push(
            format!(
                "--buildtype={}",
                if self.release { "release" } else { "debug" }
            )
            .into(),
        );
        args.push(
            format!(
                "--default-library={}",
                if self.shared { "shared" } else { "static" }
            )
            .into(),
        );
        args.extend(self.options.iter().map(OsString::from));
        args.push(self.build_dir.clone().into_os_string());
        args.push(self.source_dir.clone().into_os_string());
        args
    }
}

/// `meson install` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallRequest {
    /// Build directory to install from
    pub build_dir: PathBuf,
    /// Extra options, may contain `{KEY}` placeholders
    pub options: Vec<String>,
    /// Table used to expand placeholders
    pub paths: PathTable,
}

impl InstallRequest {
    /// Arguments following `meson`, placeholders expanded
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("install"),
            OsString::from("-C"),
            self.build_dir.clone().into_os_string(),
        ];
        args.extend(
            self.options
                .iter()
                .map(|opt| OsString::from(self.paths.expand(opt))),
        );
        args
    }
}

/// One request made to a [`BuildTool`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ToolRequest {
    /// `meson setup`
    Configure(ConfigureRequest),
    /// `ninja -C <build_dir>`
    CompileFast { build_dir: PathBuf },
    /// `msbuild <project> <flags>`
    CompileIde { project: PathBuf, flags: Vec<String> },
    /// Create a directory
    MakeDir { path: PathBuf },
    /// Copy a file or tree into a directory
    Copy { src: PathBuf, dest_dir: PathBuf },
    /// Any other command
    RunCommand(Invocation),
    /// `meson install`
    Install(InstallRequest),
}

/// Primitive build-tool operations
///
/// Every call blocks until the operation finished. Failures are returned
/// as-is; implementations never retry.
pub trait BuildTool {
    /// Generate a build directory
    fn configure(&mut self, request: &ConfigureRequest) -> Result<(), BuildError>;

    /// Compile with Ninja
    fn compile_fast(&mut self, build_dir: &Path) -> Result<(), BuildError>;

    /// Compile a Visual Studio solution with MSBuild
    fn compile_ide(&mut self, project: &Path, flags: &[&str]) -> Result<(), BuildError>;

    /// Create a single directory, failing if it exists
    fn make_dir(&mut self, path: &Path) -> Result<(), BuildError>;

    /// Copy `src` into `dest_dir`, expanding placeholders from `paths`
    fn copy(&mut self, src: &Path, dest_dir: &Path, paths: &PathTable) -> Result<(), BuildError>;

    /// Run an arbitrary command
    fn run_command(&mut self, invocation: &Invocation) -> Result<(), BuildError>;

    /// Install the build directory's targets
    fn install(&mut self, request: &InstallRequest) -> Result<(), BuildError>;
}

/// Adapter running the real tools
#[derive(Debug, Clone, Default)]
pub struct MesonTool {
    tools: ToolSettings,
}

impl MesonTool {
    /// Create an adapter using the given executables
    pub fn new(tools: ToolSettings) -> Self {
        Self { tools }
    }

    fn meson(&self, args: Vec<OsString>) -> Invocation {
        Invocation::new(&self.tools.meson).args(args)
    }
}

impl BuildTool for MesonTool {
    fn configure(&mut self, request: &ConfigureRequest) -> Result<(), BuildError> {
        tracing::info!(
            "Configuring {} ({} backend)",
            request.build_dir.display(),
            request.backend
        );
        process::run(&self.meson(request.to_args()))?;
        Ok(())
    }

    fn compile_fast(&mut self, build_dir: &Path) -> Result<(), BuildError> {
        process::run(
            &Invocation::new(&self.tools.ninja)
                .arg("-C")
                .path_arg(build_dir),
        )?;
        Ok(())
    }

    fn compile_ide(&mut self, project: &Path, flags: &[&str]) -> Result<(), BuildError> {
        process::run(
            &Invocation::new(&self.tools.msbuild)
                .path_arg(project)
                .args(flags.iter().copied()),
        )?;
        Ok(())
    }

    fn make_dir(&mut self, path: &Path) -> Result<(), BuildError> {
        tracing::debug!("Creating {}", path.display());
        filesystem::create_dir(path)?;
        Ok(())
    }

    fn copy(&mut self, src: &Path, dest_dir: &Path, paths: &PathTable) -> Result<(), BuildError> {
        let src = paths.expand_path(src);
        let dest_dir = paths.expand_path(dest_dir);
        tracing::debug!("Copying {} to {}", src.display(), dest_dir.display());
        filesystem::copy_into(&src, &dest_dir)?;
        Ok(())
    }

    fn run_command(&mut self, invocation: &Invocation) -> Result<(), BuildError> {
        process::run(invocation)?;
        Ok(())
    }

    fn install(&mut self, request: &InstallRequest) -> Result<(), BuildError> {
        process::run(&self.meson(request.to_args()))?;
        Ok(())
    }
}

/// Adapter that records requests instead of running them
#[derive(Debug, Default)]
pub struct RecordingTool {
    requests: Vec<ToolRequest>,
}

impl RecordingTool {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests recorded so far, in order
    pub fn requests(&self) -> &[ToolRequest] {
        &self.requests
    }

    /// Consume the recorder and return its requests
    pub fn into_requests(self) -> Vec<ToolRequest> {
        self.requests
    }
}

impl BuildTool for RecordingTool {
    fn configure(&mut self, request: &ConfigureRequest) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::Configure(request.clone()));
        Ok(())
    }

    fn compile_fast(&mut self, build_dir: &Path) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::CompileFast {
            build_dir: build_dir.to_path_buf(),
        });
        Ok(())
    }

    fn compile_ide(&mut self, project: &Path, flags: &[&str]) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::CompileIde {
            project: project.to_path_buf(),
            flags: flags.iter().map(ToString::to_string).collect(),
        });
        Ok(())
    }

    fn make_dir(&mut self, path: &Path) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::MakeDir {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn copy(&mut self, src: &Path, dest_dir: &Path, paths: &PathTable) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::Copy {
            src: paths.expand_path(src),
            dest_dir: paths.expand_path(dest_dir),
        });
        Ok(())
    }

    fn run_command(&mut self, invocation: &Invocation) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::RunCommand(invocation.clone()));
        Ok(())
    }

    fn install(&mut self, request: &InstallRequest) -> Result<(), BuildError> {
        self.requests.push(ToolRequest::Install(request.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ConfigureRequest {
        ConfigureRequest {
            source_dir: PathBuf::from("/src/iaito/src"),
            build_dir: PathBuf::from("/tmp/b"),
            prefix: None,
            backend: Backend::Ninja,
            release: false,
            shared: false,
            reconfigure: false,
            options: vec!["-Denable_python=false".to_string()],
        }
    }

    #[test]
    fn test_configure_args_order() {
        assert_eq!(
            request().to_args(),
            vec![
                "setup",
                "--backend=ninja",
                "--buildtype=debug",
                "--default-library=static",
                "-Denable_python=false",
                "/tmp/b",
                "/src/iaito/src",
            ]
        );
    }

    #[test]
    fn test_configure_args_with_prefix_release_reconfigure() {
        let mut req = request();
        req.prefix = Some(PathBuf::from("/opt/dist"));
        req.release = true;
        req.reconfigure = true;
        req.backend = Backend::Vs2019;

        let args = req.to_args();
        assert_eq!(args[1], "--reconfigure");
        assert_eq!(args[2], "--prefix=/opt/dist");
        assert!(args.iter().any(|a| a == "--backend=vs2019"));
        assert!(args.iter().any(|a| a == "--buildtype=release"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_dirs_reach_meson_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let build = PathBuf::from(OsStr::from_bytes(b"/tmp/build-\xff"));
        let mut req = request();
        req.build_dir = build.clone();
        req.prefix = Some(build.join("dist"));

        let args = req.to_args();
        assert_eq!(args[args.len() - 2], build.as_os_str());
        assert_eq!(args[1].as_bytes(), b"--prefix=/tmp/build-\xff/dist");

        let install = InstallRequest {
            build_dir: build.clone(),
            options: vec!["--no-rebuild".to_string()],
            paths: PathTable::new(),
        };
        assert_eq!(install.to_args()[2], build.as_os_str());
    }

    #[test]
    fn test_install_args_expand_placeholders() {
        let req = InstallRequest {
            build_dir: PathBuf::from("/tmp/b"),
            options: vec!["--no-rebuild".to_string(), "--destdir={STAGE}".to_string()],
            paths: PathTable::new().with("STAGE", "/tmp/stage"),
        };
        assert_eq!(
            req.to_args(),
            vec!["install", "-C", "/tmp/b", "--no-rebuild", "--destdir=/tmp/stage"]
        );
    }

    #[test]
    fn test_recording_tool_keeps_order() {
        let mut tool = RecordingTool::new();
        tool.configure(&request()).unwrap();
        tool.compile_fast(Path::new("/tmp/b")).unwrap();
        tool.compile_ide(Path::new("/tmp/b/iaito.sln"), &["/m"]).unwrap();

        let requests = tool.into_requests();
        assert_eq!(requests.len(), 3);
        assert!(matches!(requests[0], ToolRequest::Configure(_)));
        assert_eq!(
            requests[1],
            ToolRequest::CompileFast {
                build_dir: PathBuf::from("/tmp/b")
            }
        );
        assert_eq!(
            requests[2],
            ToolRequest::CompileIde {
                project: PathBuf::from("/tmp/b/iaito.sln"),
                flags: vec!["/m".to_string()],
            }
        );
    }

    #[test]
    fn test_request_serializes_with_op_tag() {
        let json = serde_json::to_value(ToolRequest::CompileFast {
            build_dir: PathBuf::from("/tmp/b"),
        })
        .unwrap();
        assert_eq!(json["op"], "compile_fast");
        assert_eq!(json["build_dir"], "/tmp/b");

        let json = serde_json::to_value(ToolRequest::Configure(request())).unwrap();
        assert_eq!(json["op"], "configure");
        assert_eq!(json["backend"], "ninja");
        assert_eq!(json["shared"], false);
    }

    #[test]
    fn test_meson_tool_copy_expands_table() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("iaito.exe"), b"MZ").unwrap();
        let dist = temp.path().join("dist");
        std::fs::create_dir(&dist).unwrap();
        let table = PathTable::new().with("BUILDDIR", temp.path());

        let mut tool = MesonTool::default();
        tool.copy(Path::new("{BUILDDIR}/iaito.exe"), &dist, &table)
            .unwrap();

        assert!(dist.join("iaito.exe").is_file());
    }
}
