//! Core build logic module
//!
//! This module decides what to build and in which order. It never spawns
//! processes itself - those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`config`] - Resolved build configuration and backends
//! - [`options`] - Meson `-D` definitions
//! - [`orchestrator`] - Configure / compile / stage sequencing
//! - [`paths`] - Path normalization and path tables
//! - [`settings`] - Project settings file

pub mod config;
pub mod options;
pub mod orchestrator;
pub mod paths;
pub mod settings;
