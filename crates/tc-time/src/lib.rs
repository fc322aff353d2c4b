//! # tc-time
//!
//! Date, weekday, month, Easter and timezone-localization types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// Gregorian Easter computation.
pub mod easter;

/// Timezone lookup and local → UTC resolution.
pub mod localize;

/// `Month` — month of the year.
pub mod month;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use chrono_tz::Tz;
pub use date::Date;
pub use easter::easter_sunday;
pub use localize::{localize, parse_timezone};
pub use month::Month;
pub use weekday::Weekday;
