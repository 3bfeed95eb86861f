//! iaito-build - Meson build driver for iaito
//!
//! This library configures and builds the iaito sources with Meson and,
//! on Windows, stages a self-contained distribution directory.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Build decisions (no process execution)
//! - [`infra`] - Infrastructure layer (filesystem, processes, Meson adapter)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
