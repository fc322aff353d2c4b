//! Special opens and closes.
//!
//! An exchange may close early (or open late) on qualifying days. Each
//! [`SpecialTime`] pairs a local time of day with the [`HolidaySet`] of days
//! it applies to. A [`SpecialTimeSet`] keeps them in priority order: when
//! several sets match the same day, the one configured first wins. Overlaps
//! are expected (a generic "day before a holiday" rule and a more specific
//! one can both match) and are not an error.

use chrono::NaiveTime;
use tc_time::Date;

use crate::holiday_set::HolidaySet;

/// One override: a time of day and the days it applies to.
#[derive(Debug, Clone)]
pub struct SpecialTime {
    time: NaiveTime,
    dates: HolidaySet,
}

impl SpecialTime {
    /// Create an override applying `time` on every date of `dates`.
    pub fn new(time: NaiveTime, dates: HolidaySet) -> Self {
        Self { time, dates }
    }

    /// The local time of day that replaces the regular one.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The days this override applies to.
    pub fn dates(&self) -> &HolidaySet {
        &self.dates
    }
}

/// An early-close override: a close time-of-day and its days.
pub type EarlyCloseOverride = SpecialTime;

/// Ordered overrides; lower index means higher priority.
#[derive(Debug, Clone, Default)]
pub struct SpecialTimeSet {
    entries: Vec<SpecialTime>,
}

/// The ordered early-close overrides of an exchange.
pub type EarlyCloseSet = SpecialTimeSet;

impl SpecialTimeSet {
    /// An empty set (no day is special).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an override with the lowest priority so far.
    pub fn push(&mut self, special: SpecialTime) {
        self.entries.push(special);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, time: NaiveTime, dates: HolidaySet) -> Self {
        self.push(SpecialTime::new(time, dates));
        self
    }

    /// The override for `date`, with its priority index, if any applies.
    pub fn override_for(&self, date: Date) -> Option<(NaiveTime, usize)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, special)| special.dates.contains(date))
            .map(|(priority, special)| (special.time, priority))
    }

    /// The overrides in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, SpecialTime> {
        self.entries.iter()
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SpecialTime> for SpecialTimeSet {
    fn from_iter<I: IntoIterator<Item = SpecialTime>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SpecialTimeSet {
    type Item = &'a SpecialTime;
    type IntoIter = std::slice::Iter<'a, SpecialTime>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
