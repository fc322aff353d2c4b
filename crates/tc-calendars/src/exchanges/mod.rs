//! Built-in exchange configurations.
//!
//! Each function assembles an [`ExchangeCalendar`](crate::ExchangeCalendar)
//! from the holiday catalog. They are plain constructors; the
//! [`registry`](crate::registry) builds each one once for the process.

/// CME Group (Chicago).
pub mod cme;

/// ICE Futures U.S.
pub mod ice;

pub use cme::cme;
pub use ice::ice;
