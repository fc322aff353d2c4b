//! `Date` type — a timezone-naive calendar day.
//!
//! `Date` wraps a [`chrono::NaiveDate`] restricted to the supported range
//! 1900-01-01 ..= 2199-12-31. Every constructor and every piece of
//! arithmetic re-checks the range, so a `Date` that exists is always valid.

use crate::month::Month;
use crate::weekday::Weekday;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tc_core::errors::{Error, Result};

/// First supported year.
pub const MIN_YEAR: u16 = 1900;

/// Last supported year.
pub const MAX_YEAR: u16 = 2199;

/// A calendar date with no timezone attached.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "NaiveDate", into = "NaiveDate")
)]
pub struct Date(NaiveDate);

impl Date {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [{MIN_YEAR}, {MAX_YEAR}]"
            )));
        }
        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .map(Date)
            .ok_or_else(|| {
                Error::Date(format!("{year:04}-{month:02}-{day:02} is not a valid date"))
            })
    }

    /// Wrap a chrono date, checking the supported range.
    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        let year = date.year();
        if year < MIN_YEAR as i32 || year > MAX_YEAR as i32 {
            return Err(Error::Date(format!(
                "{date} out of range [{MIN_YEAR}, {MAX_YEAR}]"
            )));
        }
        Ok(Date(date))
    }

    /// The earliest supported date, 1900-01-01.
    pub fn first_supported() -> Self {
        Date(NaiveDate::from_ymd_opt(MIN_YEAR as i32, 1, 1).expect("1900-01-01 is valid"))
    }

    /// The latest supported date, 2199-12-31.
    pub fn last_supported() -> Self {
        Date(NaiveDate::from_ymd_opt(MAX_YEAR as i32, 12, 31).expect("2199-12-31 is valid"))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the underlying chrono date.
    pub fn to_naive(self) -> NaiveDate {
        self.0
    }

    /// Combine with a time of day into a local (naive) date-time.
    pub fn and_time(self, time: NaiveTime) -> NaiveDateTime {
        self.0.and_time(time)
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    /// Return the month number (1–12).
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    /// Return the month as a [`Month`].
    pub fn month_of_year(&self) -> Month {
        Month::from_number(self.month()).expect("chrono months are 1..=12")
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.0.day() as u8
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        self.0.ordinal() as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday().into()
    }

    /// Return `true` on Saturdays and Sundays.
    pub fn is_weekend(&self) -> bool {
        self.weekday().is_weekend()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let moved = self
            .0
            .checked_add_signed(Duration::days(n as i64))
            .ok_or_else(|| Error::Date(format!("{self} + {n} days overflows")))?;
        Self::from_naive(moved)
    }

    /// The following day.
    pub fn succ(self) -> Result<Self> {
        self.add_days(1)
    }

    /// The preceding day.
    pub fn pred(self) -> Result<Self> {
        self.add_days(-1)
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        (other.0 - self.0).num_days() as i32
    }

    /// The first date on or after `self` that falls on `weekday`.
    pub fn next_weekday(self, weekday: Weekday) -> Result<Self> {
        self.add_days(self.weekday().days_until(weekday) as i32)
    }

    /// The last date on or before `self` that falls on `weekday`.
    pub fn previous_weekday(self, weekday: Weekday) -> Result<Self> {
        self.add_days(-(weekday.days_until(self.weekday()) as i32))
    }

    /// Return the *n*-th occurrence of `weekday` in `month` of `year`.
    ///
    /// For example, `nth_weekday(4, Weekday::Thursday, 2016, Month::November)`
    /// returns Thanksgiving 2016 (2016-11-24).
    ///
    /// # Errors
    /// Returns an error if `n` is zero or larger than the number of such
    /// weekdays in the month, or if the year is out of range.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: Month) -> Result<Self> {
        if n == 0 {
            return Err(Error::Date("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month.number(), 1)?;
        let day = 1 + first.weekday().days_until(weekday) + 7 * (n - 1);
        if day > month.days_in(year) {
            return Err(Error::Date(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{:02}",
                month.number()
            )));
        }
        Date::from_ymd(year, month.number(), day)
    }

    /// Return the last occurrence of `weekday` in `month` of `year`.
    pub fn last_weekday(weekday: Weekday, year: u16, month: Month) -> Result<Self> {
        let last = Date::from_ymd(year, month.number(), month.days_in(year))?;
        last.previous_weekday(weekday)
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Date::from_naive(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    /// Parse an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| Error::Date(format!("cannot parse `{s}`: {e}")))?;
        Date::from_naive(parsed)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i32> for Date {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        rhs.days_between(self)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({})", self.0.format("%Y-%m-%d"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
