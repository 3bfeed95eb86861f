//! Path handling
//!
//! Lexical path normalization and the named path tables handed to the
//! Meson adapter.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::core::config::BuildConfig;
use crate::core::settings::VendorSettings;

/// Resolve `path` against `base` and normalize it lexically
///
/// `.` components are dropped and `..` pops the previous component. The
/// filesystem is never consulted, so the path does not need to exist.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, as with `cd /..`
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Named table of paths
///
/// Values are substituted for `{KEY}` placeholders in adapter arguments.
/// Tables are plain values: combining two of them yields a new table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathTable {
    entries: BTreeMap<String, PathBuf>,
}

impl PathTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    #[must_use]
    pub fn with(mut self, key: &str, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(key.to_string(), path.into());
        self
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combine two tables; entries of `other` win on key collisions
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(
            other
                .entries
                .iter()
                .map(|(key, path)| (key.clone(), path.clone())),
        );
        Self { entries }
    }

    /// Replace every `{KEY}` placeholder known to this table
    ///
    /// Unknown placeholders are left untouched.
    pub fn expand(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = &after[..close];
                    match self.entries.get(key) {
                        Some(path) => out.push_str(&path.to_string_lossy()),
                        None => {
                            out.push('{');
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Expand placeholders in a path
    pub fn expand_path(&self, path: &Path) -> PathBuf {
        PathBuf::from(self.expand(&path.to_string_lossy()))
    }

    /// Default table: the directories of the current build
    pub fn for_build(config: &BuildConfig) -> Self {
        let mut table = Self::new()
            .with("ROOT", &config.root)
            .with("SRCDIR", &config.source_dir)
            .with("BUILDDIR", &config.build_dir);
        if let Some(dist) = &config.dist_dir {
            table = table.with("DISTDIR", dist);
        }
        table
    }

    /// radare2 runtime layout, relative to the install prefix
    pub fn radare2(vendor: &VendorSettings) -> Self {
        Self::new()
            .with("R2_INCDIR", &vendor.incdir)
            .with("R2_LIBDIR", &vendor.libdir)
            .with("R2_DATDIR", &vendor.datdir)
    }
}
