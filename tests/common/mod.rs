//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use assert_fs::prelude::*;
use assert_fs::TempDir;

/// Test project context
///
/// Creates a temporary iaito source tree and runs `iaito-build` against it.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project with an empty `src/meson.build`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        dir.child("src/meson.build")
            .write_str("project('iaito', 'cpp')\n")
            .expect("Failed to write meson.build");
        Self { dir }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    #[allow(dead_code)]
    pub fn create_file(&self, name: &str, content: &str) {
        self.dir
            .child(name)
            .write_str(content)
            .expect("Failed to write file");
    }

    /// Create a directory in the test project
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        self.dir
            .child(name)
            .create_dir_all()
            .expect("Failed to create directory");
    }

    /// Create an executable shell script (Unix only)
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn create_script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Run iaito-build with `--root` pointing at this project
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    /// Run iaito-build with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &Path)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_iaito-build"));
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("IAITO_ROOT")
            .arg("--root")
            .arg(self.dir.path());
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.args(args);
        cmd.output().expect("Failed to execute iaito-build")
    }

    /// Run with `--dry-run` and parse the printed plan
    #[allow(dead_code)]
    pub fn plan(&self, args: &[&str]) -> serde_json::Value {
        let mut all = vec!["--dry-run"];
        all.extend_from_slice(args);
        let output = self.run(&all);
        assert!(
            output.status.success(),
            "dry run failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("dry run did not print JSON")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Operation names of the requests in a plan
#[allow(dead_code)]
pub fn ops(plan: &serde_json::Value) -> Vec<String> {
    plan["requests"]
        .as_array()
        .expect("requests array")
        .iter()
        .map(|r| r["op"].as_str().expect("op").to_string())
        .collect()
}
