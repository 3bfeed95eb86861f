//! Configuration constants
//!
//! Compile-time defaults shared by the CLI, the orchestrator and the
//! Meson adapter.

pub mod defaults;
