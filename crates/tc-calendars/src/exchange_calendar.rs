//! `ExchangeCalendar` — the full configuration of one exchange.
//!
//! An exchange is a value, not a type: a timezone, regular hours, the
//! holidays it closes on and the days it opens late or closes early. All of
//! it is assembled through [`ExchangeCalendarBuilder`], which validates every
//! parameter and then resolves every session in the supported range once, so
//! a calendar that builds can always produce its sessions.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};
use tc_core::errors::{Error, Result};
use tc_time::{parse_timezone, Date, Tz};
use tracing::debug;

use crate::engine::{self, SessionIter};
use crate::holiday_set::HolidaySet;
use crate::schedule::Schedule;
use crate::session::Session;
use crate::session_spec::SessionTimeSpec;
use crate::special_times::{SpecialTime, SpecialTimeSet};

/// First year of the default supported range.
pub const DEFAULT_FIRST_YEAR: u16 = 1990;
/// Last year of the default supported range.
pub const DEFAULT_LAST_YEAR: u16 = 2030;

/// A validated exchange trading calendar.
#[derive(Debug, Clone)]
pub struct ExchangeCalendar {
    name: String,
    pub(crate) timezone: Tz,
    pub(crate) hours: SessionTimeSpec,
    regular_holidays: HolidaySet,
    ad_hoc_holidays: BTreeSet<Date>,
    pub(crate) closures: HolidaySet,
    pub(crate) early_closes: SpecialTimeSet,
    pub(crate) late_opens: SpecialTimeSet,
    first_date: Date,
    last_date: Date,
}

impl ExchangeCalendar {
    /// Start configuring an exchange called `name`.
    pub fn builder(name: impl Into<String>) -> ExchangeCalendarBuilder {
        ExchangeCalendarBuilder::new(name)
    }

    /// Exchange name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exchange timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Regular session hours.
    pub fn hours(&self) -> &SessionTimeSpec {
        &self.hours
    }

    /// Rule-based holidays.
    pub fn regular_holidays(&self) -> &HolidaySet {
        &self.regular_holidays
    }

    /// One-off closures.
    pub fn ad_hoc_holidays(&self) -> &BTreeSet<Date> {
        &self.ad_hoc_holidays
    }

    /// Early-close overrides in priority order.
    pub fn early_closes(&self) -> &SpecialTimeSet {
        &self.early_closes
    }

    /// Late-open overrides in priority order.
    pub fn late_opens(&self) -> &SpecialTimeSet {
        &self.late_opens
    }

    /// First supported session date.
    pub fn first_date(&self) -> Date {
        self.first_date
    }

    /// Last supported session date.
    pub fn last_date(&self) -> Date {
        self.last_date
    }

    /// `true` if `date` is a regular or ad-hoc holiday. Weekends are not
    /// holidays.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.closures.contains(date)
    }

    /// The early close time of day on `date`, if it closes early. Holidays
    /// never close early.
    pub fn early_close(&self, date: Date) -> Option<NaiveTime> {
        if date.is_weekend() || self.is_holiday(date) {
            return None;
        }
        self.early_closes.override_for(date).map(|(time, _)| time)
    }

    /// The late open time of day on `date`, if it opens late.
    pub fn late_open(&self, date: Date) -> Option<NaiveTime> {
        if date.is_weekend() || self.is_holiday(date) {
            return None;
        }
        self.late_opens.override_for(date).map(|(time, _)| time)
    }

    /// `true` if the exchange trades on `date`.
    pub fn is_session(&self, date: Date) -> Result<bool> {
        self.check_bounds(date)?;
        Ok(!date.is_weekend() && !self.is_holiday(date))
    }

    /// The session on `date`, or `None` on weekends and holidays.
    pub fn session(&self, date: Date) -> Result<Option<Session>> {
        self.check_bounds(date)?;
        engine::build_session(self, date)
    }

    /// The first session strictly after `date`, or `None` past the last
    /// supported date.
    pub fn next_session_after(&self, date: Date) -> Result<Option<Session>> {
        self.check_bounds(date)?;
        if date == self.last_date {
            return Ok(None);
        }
        engine::iter_sessions(self, date.succ()?, self.last_date)?
            .next()
            .transpose()
    }

    /// The last session strictly before `date`, or `None` before the first
    /// supported date.
    pub fn previous_session_before(&self, date: Date) -> Result<Option<Session>> {
        self.check_bounds(date)?;
        let mut day = date;
        while day > self.first_date {
            day = day.pred()?;
            if let Some(session) = engine::build_session(self, day)? {
                return Ok(Some(session));
            }
        }
        Ok(None)
    }

    /// The session trading at `instant`, if any.
    pub fn session_at(&self, instant: DateTime<Utc>) -> Result<Option<Session>> {
        let local = Date::from_naive(instant.with_timezone(&self.timezone).date_naive())?;
        // Offsets are -1 or 0, so only the local date and the next one can
        // hold a session open at this instant.
        let candidates: Vec<Date> = [Some(local), local.succ().ok()]
            .into_iter()
            .flatten()
            .filter(|d| self.check_bounds(*d).is_ok())
            .collect();
        if candidates.is_empty() {
            self.check_bounds(local)?;
        }
        for candidate in candidates {
            if let Some(session) = engine::build_session(self, candidate)? {
                if session.contains(instant) {
                    return Ok(Some(session));
                }
            }
        }
        Ok(None)
    }

    /// `true` if a session is open at `instant`.
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> Result<bool> {
        Ok(self.session_at(instant)?.is_some())
    }

    /// All sessions with dates in `start ..= end`, collected. Fails as a
    /// whole if any session fails to resolve.
    pub fn sessions(&self, start: Date, end: Date) -> Result<Schedule> {
        engine::sessions(self, start, end)
    }

    /// Lazily produce the sessions in `start ..= end`.
    pub fn iter_sessions(&self, start: Date, end: Date) -> Result<SessionIter<'_>> {
        engine::iter_sessions(self, start, end)
    }

    pub(crate) fn check_bounds(&self, date: Date) -> Result<()> {
        if date < self.first_date || date > self.last_date {
            return Err(Error::OutOfBounds {
                value: date.to_string(),
                first: self.first_date.to_string(),
                last: self.last_date.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`ExchangeCalendar`].
#[derive(Debug, Clone)]
pub struct ExchangeCalendarBuilder {
    name: String,
    timezone: Option<String>,
    open_time: Option<NaiveTime>,
    close_time: Option<NaiveTime>,
    open_day_offset: i8,
    close_day_offset: i8,
    regular_holidays: HolidaySet,
    ad_hoc_holidays: BTreeSet<Date>,
    early_closes: SpecialTimeSet,
    late_opens: SpecialTimeSet,
    bounds: Option<(Date, Date)>,
}

impl ExchangeCalendarBuilder {
    /// Begin configuring an exchange called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: None,
            open_time: None,
            close_time: None,
            open_day_offset: 0,
            close_day_offset: 0,
            regular_holidays: HolidaySet::empty(),
            ad_hoc_holidays: BTreeSet::new(),
            early_closes: SpecialTimeSet::new(),
            late_opens: SpecialTimeSet::new(),
            bounds: None,
        }
    }

    /// IANA timezone identifier, e.g. `"America/Chicago"`.
    pub fn with_timezone(mut self, id: impl Into<String>) -> Self {
        self.timezone = Some(id.into());
        self
    }

    /// Regular local open time.
    pub fn with_open_time(mut self, time: NaiveTime) -> Self {
        self.open_time = Some(time);
        self
    }

    /// Regular local close time.
    pub fn with_close_time(mut self, time: NaiveTime) -> Self {
        self.close_time = Some(time);
        self
    }

    /// Day offset of the open (`-1` opens the evening before).
    pub fn with_open_day_offset(mut self, offset: i8) -> Self {
        self.open_day_offset = offset;
        self
    }

    /// Day offset of the close.
    pub fn with_close_day_offset(mut self, offset: i8) -> Self {
        self.close_day_offset = offset;
        self
    }

    /// Rule-based holidays.
    pub fn with_regular_holidays(mut self, holidays: HolidaySet) -> Self {
        self.regular_holidays = holidays;
        self
    }

    /// Add one-off closures.
    pub fn with_ad_hoc_holidays(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.ad_hoc_holidays.extend(dates);
        self
    }

    /// Append an early close at `time` on every date of `dates`. Earlier
    /// calls take priority over later ones.
    pub fn with_early_close(mut self, time: NaiveTime, dates: HolidaySet) -> Self {
        self.early_closes.push(SpecialTime::new(time, dates));
        self
    }

    /// Append a late open at `time` on every date of `dates`. Earlier calls
    /// take priority over later ones.
    pub fn with_late_open(mut self, time: NaiveTime, dates: HolidaySet) -> Self {
        self.late_opens.push(SpecialTime::new(time, dates));
        self
    }

    /// Supported session dates (defaults to 1990-01-01 ..= 2030-12-31).
    pub fn with_bounds(mut self, first: Date, last: Date) -> Self {
        self.bounds = Some((first, last));
        self
    }

    /// Validate the configuration and build the calendar.
    ///
    /// # Errors
    /// A configuration-family error (see [`Error::is_configuration`]) for a
    /// missing field, an unknown timezone, inconsistent hours, an override
    /// time that cannot produce a positive session, or any session in the
    /// supported range that fails to resolve.
    pub fn build(self) -> Result<ExchangeCalendar> {
        if self.name.trim().is_empty() {
            return Err(Error::Configuration("exchange name is empty".into()));
        }
        let missing = |field: &str| Error::Configuration(format!("{}: {field} not set", self.name));
        let timezone = parse_timezone(self.timezone.as_deref().ok_or_else(|| missing("timezone"))?)?;
        let open = self.open_time.ok_or_else(|| missing("open time"))?;
        let close = self.close_time.ok_or_else(|| missing("close time"))?;
        let hours = SessionTimeSpec::new(open, close, self.open_day_offset, self.close_day_offset)?;

        for special in &self.early_closes {
            hours.validate_close(special.time()).map_err(|e| {
                Error::Configuration(format!("{}: early close {}: {e}", self.name, special.time()))
            })?;
        }
        for special in &self.late_opens {
            hours.validate_open(special.time()).map_err(|e| {
                Error::Configuration(format!("{}: late open {}: {e}", self.name, special.time()))
            })?;
        }

        let (first_date, last_date) = match self.bounds {
            Some(bounds) => bounds,
            None => (
                Date::from_ymd(DEFAULT_FIRST_YEAR, 1, 1)?,
                Date::from_ymd(DEFAULT_LAST_YEAR, 12, 31)?,
            ),
        };
        if first_date > last_date {
            return Err(Error::Configuration(format!(
                "{}: bounds {first_date} ..= {last_date} are empty",
                self.name
            )));
        }

        let closures = self
            .regular_holidays
            .union(&HolidaySet::empty().with_ad_hoc(self.ad_hoc_holidays.iter().copied()));

        let calendar = ExchangeCalendar {
            name: self.name,
            timezone,
            hours,
            regular_holidays: self.regular_holidays,
            ad_hoc_holidays: self.ad_hoc_holidays,
            closures,
            early_closes: self.early_closes,
            late_opens: self.late_opens,
            first_date,
            last_date,
        };

        let mut count = 0usize;
        let mut previous: Option<Session> = None;
        for session in engine::iter_sessions(&calendar, first_date, last_date)? {
            let session = session?;
            if let Some(prev) = previous.filter(|prev| prev.close() > session.open()) {
                return Err(Error::Configuration(format!(
                    "{}: session {prev} overlaps session {session}",
                    calendar.name
                )));
            }
            previous = Some(session);
            count += 1;
        }
        debug!(
            exchange = %calendar.name,
            timezone = %timezone,
            %first_date,
            %last_date,
            sessions = count,
            "exchange calendar built"
        );
        Ok(calendar)
    }
}
