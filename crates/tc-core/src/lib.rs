//! # tc-core
//!
//! Error definitions and shared patterns for the tradecal workspace.
//!
//! Every other crate in the workspace reports failures through
//! [`errors::Error`] and declares its global state with
//! [`define_singleton!`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Design patterns: singleton.
pub mod patterns;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
