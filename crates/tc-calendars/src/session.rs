//! `Session` — one trading session of an exchange.

use chrono::{DateTime, Duration, Utc};
use tc_time::Date;

/// A trading session: its nominal date and the UTC instants it opens and
/// closes at. The session covers the half-open interval `[open, close)`.
///
/// Sessions are only produced by the calendar engine and are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    date: Date,
    open: DateTime<Utc>,
    close: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(date: Date, open: DateTime<Utc>, close: DateTime<Utc>) -> Self {
        debug_assert!(open < close, "session {date} opens at or after its close");
        Self { date, open, close }
    }

    /// Nominal session date.
    pub fn date(&self) -> Date {
        self.date
    }

    /// UTC open instant.
    pub fn open(&self) -> DateTime<Utc> {
        self.open
    }

    /// UTC close instant.
    pub fn close(&self) -> DateTime<Utc> {
        self.close
    }

    /// Length of the session.
    pub fn duration(&self) -> Duration {
        self.close - self.open
    }

    /// `true` if `instant` lies in `[open, close)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.open <= instant && instant < self.close
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{} .. {})",
            self.date,
            self.open.format("%Y-%m-%dT%H:%MZ"),
            self.close.format("%Y-%m-%dT%H:%MZ")
        )
    }
}
