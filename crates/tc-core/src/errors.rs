//! Error types for the tradecal workspace.
//!
//! A single `thiserror`-derived enum covers every failure the calendar
//! engine can report. Most variants belong to the *configuration* family:
//! they are raised while an exchange calendar is being assembled and are
//! fatal (a calendar that fails to build must not be used). The remaining
//! variants describe bad query arguments.
//!
//! The `ensure!` and `fail!` macros defined here are the shorthand used
//! throughout the workspace for precondition checks.

use thiserror::Error;

/// The top-level error type used throughout tradecal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid or out-of-range calendar date.
    #[error("date error: {0}")]
    Date(String),

    /// A holiday or special-time rule was built with malformed parameters.
    #[error("invalid rule `{rule}`: {reason}")]
    InvalidRule {
        /// Name of the offending rule.
        rule: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The timezone identifier is not in the IANA database.
    #[error("unknown timezone identifier `{0}`")]
    UnknownTimezone(String),

    /// A session resolved to an open instant at or after its close instant.
    #[error("session {date} resolves to open {open} which is not before close {close}")]
    InvertedSession {
        /// Nominal session date.
        date: String,
        /// Resolved UTC open instant.
        open: String,
        /// Resolved UTC close instant.
        close: String,
    },

    /// The exchange configuration is incomplete or inconsistent.
    #[error("invalid exchange configuration: {0}")]
    Configuration(String),

    /// A query fell outside the range a calendar supports.
    #[error("{value} is outside the supported range [{first}, {last}]")]
    OutOfBounds {
        /// The requested value.
        value: String,
        /// First supported value.
        first: String,
        /// Last supported value.
        last: String,
    },

    /// No calendar is registered under the given name.
    #[error("no exchange calendar registered as `{0}`")]
    UnknownExchange(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Return `true` for the fatal configuration family (malformed rules,
    /// inverted sessions, unknown timezones, incomplete configuration).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidRule { .. }
                | Error::UnknownTimezone(_)
                | Error::InvertedSession { .. }
                | Error::Configuration(_)
        )
    }

    /// Shorthand for building an [`Error::InvalidRule`].
    pub fn invalid_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

/// Shorthand `Result` type used throughout tradecal.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tc_core::{ensure, errors::Error};
/// fn positive(x: i32) -> tc_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(matches!(positive(-1), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use tc_core::{fail, errors::Error};
/// fn always_err() -> tc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
