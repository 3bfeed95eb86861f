//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::config::Backend;

    /// Generate any supported backend
    pub fn backend() -> impl Strategy<Value = Backend> {
        proptest::sample::select(Backend::ALL.to_vec())
    }

    /// Generate a directory name (lowercase alphanumeric with hyphens)
    pub fn dir_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,15}"
    }

    /// Generate a relative path made of names, `.` and `..`
    pub fn relative_path() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(
            prop_oneof![Just("..".to_string()), Just(".".to_string()), dir_name()],
            0..8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_dir_name_generator(name in dir_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_backend_generator(backend in backend()) {
            prop_assert!(!backend.as_str().is_empty());
        }
    }
}
