//! Error types for iaito-build
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and pre-flight validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Distribution directory must not exist before staging
    #[error("{path} already exists")]
    DistDirExists { path: PathBuf },

    /// Current directory could not be determined
    #[error("Cannot resolve working directory: {error}")]
    WorkingDir { error: String },

    /// Settings file could not be read
    #[error("Failed to read settings file '{path}': {error}")]
    ReadSettings { path: PathBuf, error: String },

    /// Settings file is not valid TOML
    #[error("Failed to parse settings file '{path}': {error}")]
    ParseSettings { path: PathBuf, error: String },
}

/// External tool errors
#[derive(Error, Debug)]
pub enum ToolError {
    /// Executable not found in PATH
    #[error("'{tool}' not found in PATH. {hint}")]
    NotFound { tool: String, hint: String },

    /// Process could not be started
    #[error("Failed to run '{command}': {error}")]
    Spawn { command: String, error: String },

    /// Process exited unsuccessfully
    #[error("'{command}' failed with {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to copy a file or directory
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Copy source does not exist
    #[error("Copy source not found: {path}")]
    SourceNotFound { path: PathBuf },
}

/// Top-level build error type
#[derive(Error, Debug)]
pub enum BuildError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Tool error
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

impl BuildError {
    /// Process exit code for this error
    ///
    /// A failing tool hands its own exit status through; everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Tool(ToolError::Failed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}
