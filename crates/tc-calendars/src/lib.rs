//! # tc-calendars
//!
//! Holiday rules, early closes and late opens, and the engine that turns an
//! exchange configuration into DST-correct trading sessions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Static holiday rule data.
pub mod catalog;

/// Session assembly over a date range.
pub mod engine;

/// `ExchangeCalendar` and its builder.
pub mod exchange_calendar;

/// Built-in exchange configurations.
pub mod exchanges;

/// `HolidayRule` — one recurring or one-off holiday.
pub mod holiday_rule;

/// `HolidaySet` — the cached union of many rules.
pub mod holiday_set;

/// Process-wide exchange lookup.
pub mod registry;

/// `Schedule` — collected sessions with lookup queries.
pub mod schedule;

/// `Session` — one trading session.
pub mod session;

/// Regular session hours and their UTC resolution.
pub mod session_spec;

/// Ordered early-close and late-open overrides.
pub mod special_times;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use engine::{iter_sessions, sessions, SessionIter};
pub use exchange_calendar::{ExchangeCalendar, ExchangeCalendarBuilder};
pub use holiday_rule::{Anchor, HolidayRule, HolidayRuleBuilder, Observance};
pub use holiday_set::HolidaySet;
pub use registry::{exchange_names, get_calendar, Registry, REGISTRY};
pub use schedule::Schedule;
pub use session::Session;
pub use session_spec::{local_time, SessionTimeSpec};
pub use special_times::{EarlyCloseOverride, EarlyCloseSet, SpecialTime, SpecialTimeSet};
