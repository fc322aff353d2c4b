//! `Schedule` — an ordered, materialized run of sessions.
//!
//! A schedule is what a backtest consumes: it answers "is the market open
//! at instant T", "which session is T in" and "what is the next session
//! after date D" with binary searches over sessions sorted by date (and,
//! because sessions never overlap, by open instant too).

use chrono::{DateTime, Utc};
use tc_time::Date;

use crate::session::Session;

/// Sessions of one exchange, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    sessions: Vec<Session>,
}

impl Schedule {
    pub(crate) fn new(sessions: Vec<Session>) -> Self {
        debug_assert!(
            sessions
                .windows(2)
                .all(|w| w[0].date() < w[1].date() && w[0].close() <= w[1].open()),
            "sessions must be ordered and non-overlapping"
        );
        Self { sessions }
    }

    /// All sessions.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// `true` if the range held no trading days.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterate over the sessions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.sessions.iter()
    }

    /// The first session.
    pub fn first(&self) -> Option<&Session> {
        self.sessions.first()
    }

    /// The last session.
    pub fn last(&self) -> Option<&Session> {
        self.sessions.last()
    }

    /// Session dates, in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.sessions.iter().map(Session::date)
    }

    /// The session whose nominal date is `date`.
    pub fn session(&self, date: Date) -> Option<&Session> {
        self.sessions
            .binary_search_by_key(&date, Session::date)
            .ok()
            .map(|i| &self.sessions[i])
    }

    /// `true` if `date` is a trading day in this schedule.
    pub fn is_session(&self, date: Date) -> bool {
        self.session(date).is_some()
    }

    /// The session containing `instant`, if the market is open then.
    pub fn session_at(&self, instant: DateTime<Utc>) -> Option<&Session> {
        let idx = self.sessions.partition_point(|s| s.open() <= instant);
        idx.checked_sub(1)
            .map(|i| &self.sessions[i])
            .filter(|s| s.contains(instant))
    }

    /// `true` if some session is open at `instant`.
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        self.session_at(instant).is_some()
    }

    /// The first session strictly after `date`.
    pub fn next_session_after(&self, date: Date) -> Option<&Session> {
        let idx = self.sessions.partition_point(|s| s.date() <= date);
        self.sessions.get(idx)
    }

    /// The last session strictly before `date`.
    pub fn previous_session_before(&self, date: Date) -> Option<&Session> {
        let idx = self.sessions.partition_point(|s| s.date() < date);
        idx.checked_sub(1).map(|i| &self.sessions[i])
    }

    /// The first open instant strictly after `instant`.
    pub fn next_open_after(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let idx = self.sessions.partition_point(|s| s.open() <= instant);
        self.sessions.get(idx).map(Session::open)
    }

    /// The first close instant strictly after `instant`.
    pub fn next_close_after(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let idx = self.sessions.partition_point(|s| s.close() <= instant);
        self.sessions.get(idx).map(Session::close)
    }

    /// Sessions whose dates fall in `start ..= end`.
    pub fn sessions_in_range(&self, start: Date, end: Date) -> &[Session] {
        let lo = self.sessions.partition_point(|s| s.date() < start);
        let hi = self.sessions.partition_point(|s| s.date() <= end);
        &self.sessions[lo..hi.max(lo)]
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Session;
    type IntoIter = std::slice::Iter<'a, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Schedule {
    type Item = Session;
    type IntoIter = std::vec::IntoIter<Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.into_iter()
    }
}
