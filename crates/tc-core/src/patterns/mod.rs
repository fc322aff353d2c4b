//! Patterns sub-module.

/// Process-wide read-only singletons.
pub mod singleton;
