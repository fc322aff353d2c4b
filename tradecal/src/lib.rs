//! # tradecal
//!
//! Exchange trading calendars: which days an exchange trades, and the exact
//! UTC instants each session opens and closes at, across holidays, early
//! closes and daylight-saving transitions.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `tc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use tradecal::calendars::get_calendar;
//! use tradecal::time::Date;
//!
//! let cme = get_calendar("CME").unwrap();
//! let start = Date::from_ymd(2016, 12, 19).unwrap();
//! let end = Date::from_ymd(2016, 12, 30).unwrap();
//! let schedule = cme.sessions(start, end).unwrap();
//!
//! // Christmas 2016 falls on a Sunday and is observed on Monday the 26th.
//! assert!(!schedule.is_session(Date::from_ymd(2016, 12, 26).unwrap()));
//! assert_eq!(schedule.len(), 9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and shared patterns.
pub use tc_core as core;

/// Date, weekday, month, Easter and timezone localization.
pub use tc_time as time;

/// Holiday rules, exchange calendars and sessions.
pub use tc_calendars as calendars;

pub use tc_calendars::{get_calendar, ExchangeCalendar, Schedule, Session};
pub use tc_core::{Error, Result};
pub use tc_time::Date;
