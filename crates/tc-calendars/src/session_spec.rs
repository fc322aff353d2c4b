//! Regular session hours and their resolution to UTC instants.
//!
//! A [`SessionTimeSpec`] holds the local open and close times of an
//! exchange together with day offsets relative to the nominal session date.
//! An exchange that opens at 17:00 the evening before the session it trades
//! has `open_day_offset = -1`.
//!
//! Open and close are localized independently, so a session whose open falls
//! before a DST switch and whose close falls after it gets the right offset
//! on each side.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike, Utc};
use tc_core::errors::{Error, Result};
use tc_time::{localize, Date, Tz};

/// Build a local time of day, failing with a configuration error when the
/// hour or minute is out of range.
pub fn local_time(hour: u32, minute: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        Error::Configuration(format!("{hour:02}:{minute:02} is not a valid time of day"))
    })
}

/// Regular local session hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTimeSpec {
    open: NaiveTime,
    close: NaiveTime,
    open_day_offset: i8,
    close_day_offset: i8,
}

impl SessionTimeSpec {
    /// Create the spec, checking the offsets are `-1` or `0` and that the
    /// close comes after the open, at most one day later, on the local wall
    /// clock.
    pub fn new(
        open: NaiveTime,
        close: NaiveTime,
        open_day_offset: i8,
        close_day_offset: i8,
    ) -> Result<Self> {
        for (side, offset) in [("open", open_day_offset), ("close", close_day_offset)] {
            if !(-1..=0).contains(&offset) {
                return Err(Error::Configuration(format!(
                    "{side} day offset must be -1 or 0, got {offset}"
                )));
            }
        }
        let spec = Self {
            open,
            close,
            open_day_offset,
            close_day_offset,
        };
        spec.check_wall_clock(open, close)?;
        Ok(spec)
    }

    /// Open and close on the nominal date itself.
    pub fn same_day(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        Self::new(open, close, 0, 0)
    }

    /// Open the evening before the nominal date, close on it.
    pub fn overnight(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        Self::new(open, close, -1, 0)
    }

    /// Regular local open time.
    pub fn open(&self) -> NaiveTime {
        self.open
    }

    /// Regular local close time.
    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Calendar-day offset of the open relative to the session date.
    pub fn open_day_offset(&self) -> i8 {
        self.open_day_offset
    }

    /// Calendar-day offset of the close relative to the session date.
    pub fn close_day_offset(&self) -> i8 {
        self.close_day_offset
    }

    /// Check that an override close time still closes after the open.
    pub fn validate_close(&self, close: NaiveTime) -> Result<()> {
        self.check_wall_clock(self.open, close)
    }

    /// Check that an override open time still opens before the close.
    pub fn validate_open(&self, open: NaiveTime) -> Result<()> {
        self.check_wall_clock(open, self.close)
    }

    /// Local wall-clock open for the session on `date`.
    pub fn local_open(&self, date: Date, open: Option<NaiveTime>) -> Result<NaiveDateTime> {
        Ok(date
            .add_days(self.open_day_offset as i32)?
            .and_time(open.unwrap_or(self.open)))
    }

    /// Local wall-clock close for the session on `date`.
    pub fn local_close(&self, date: Date, close: Option<NaiveTime>) -> Result<NaiveDateTime> {
        Ok(date
            .add_days(self.close_day_offset as i32)?
            .and_time(close.unwrap_or(self.close)))
    }

    /// Resolve the regular session on `date` to UTC `(open, close)`.
    pub fn resolve(&self, tz: Tz, date: Date) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        self.resolve_with(tz, date, None, None)
    }

    /// Resolve the session on `date`, optionally replacing the open and/or
    /// close time of day.
    ///
    /// # Errors
    /// [`Error::InvertedSession`] if the open instant is not strictly before
    /// the close instant (possible when both ends fall in the same DST gap).
    pub fn resolve_with(
        &self,
        tz: Tz,
        date: Date,
        open: Option<NaiveTime>,
        close: Option<NaiveTime>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let utc_open = localize(tz, self.local_open(date, open)?)?;
        let utc_close = localize(tz, self.local_close(date, close)?)?;
        if utc_open >= utc_close {
            return Err(Error::InvertedSession {
                date: date.to_string(),
                open: utc_open.to_rfc3339(),
                close: utc_close.to_rfc3339(),
            });
        }
        Ok((utc_open, utc_close))
    }

    fn check_wall_clock(&self, open: NaiveTime, close: NaiveTime) -> Result<()> {
        let open_secs = self.open_day_offset as i64 * 86_400 + seconds_of_day(open);
        let close_secs = self.close_day_offset as i64 * 86_400 + seconds_of_day(close);
        if open_secs >= close_secs {
            return Err(Error::Configuration(format!(
                "open {open} (day {:+}) is not before close {close} (day {:+})",
                self.open_day_offset, self.close_day_offset
            )));
        }
        if close_secs - open_secs > 86_400 {
            return Err(Error::Configuration(format!(
                "open {open} (day {:+}) to close {close} (day {:+}) is longer than a day, \
                 so consecutive sessions would overlap",
                self.open_day_offset, self.close_day_offset
            )));
        }
        Ok(())
    }
}

fn seconds_of_day(t: NaiveTime) -> i64 {
    t.num_seconds_from_midnight() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        local_time(h, m).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn overnight_session_in_fixed_offset_zone() {
        // Etc/GMT+5 is a fixed UTC-05:00 zone.
        let tz: Tz = "Etc/GMT+5".parse().unwrap();
        let spec = SessionTimeSpec::overnight(hm(17, 0), hm(16, 0)).unwrap();
        let (open, close) = spec.resolve(tz, date(2020, 3, 10)).unwrap();
        assert_eq!(open, utc(2020, 3, 9, 22, 0));
        assert_eq!(close, utc(2020, 3, 10, 21, 0));
    }

    #[test]
    fn open_and_close_straddle_dst_switch() {
        // US DST started at 02:00 on Sunday 2020-03-08. The session dated
        // that Sunday opens Saturday 17:00 CST (UTC-6) and closes Sunday
        // 16:00 CDT (UTC-5): 22 hours, not 23.
        let chicago = chrono_tz::America::Chicago;
        let spec = SessionTimeSpec::overnight(hm(17, 0), hm(16, 0)).unwrap();
        let (open, close) = spec.resolve(chicago, date(2020, 3, 8)).unwrap();
        assert_eq!(open, utc(2020, 3, 7, 23, 0));
        assert_eq!(close, utc(2020, 3, 8, 21, 0));
        assert_eq!(close - open, chrono::Duration::hours(22));

        // The next day both ends are CDT.
        let (open, close) = spec.resolve(chicago, date(2020, 3, 9)).unwrap();
        assert_eq!(open, utc(2020, 3, 8, 22, 0));
        assert_eq!(close, utc(2020, 3, 9, 21, 0));
    }

    #[test]
    fn close_override_is_resolved_the_same_way() {
        let ny = chrono_tz::America::New_York;
        let spec = SessionTimeSpec::same_day(hm(9, 30), hm(16, 0)).unwrap();
        let (_, close) = spec
            .resolve_with(ny, date(2016, 11, 25), None, Some(hm(13, 0)))
            .unwrap();
        assert_eq!(close, utc(2016, 11, 25, 18, 0));
    }

    #[test]
    fn times_inside_spring_forward_gap_resolve() {
        let ny = chrono_tz::America::New_York;
        let spec = SessionTimeSpec::same_day(hm(2, 30), hm(16, 0)).unwrap();
        let (open, close) = spec.resolve(ny, date(2021, 3, 14)).unwrap();
        assert_eq!(open, utc(2021, 3, 14, 7, 0));
        assert_eq!(close, utc(2021, 3, 14, 20, 0));
    }

    #[test]
    fn session_collapsing_in_a_gap_is_inverted() {
        let ny = chrono_tz::America::New_York;
        let spec = SessionTimeSpec::same_day(hm(2, 10), hm(2, 50)).unwrap();
        let err = spec.resolve(ny, date(2021, 3, 14)).unwrap_err();
        assert!(matches!(err, Error::InvertedSession { .. }), "{err}");
        assert!(err.is_configuration());
        // Any other day is fine.
        assert!(spec.resolve(ny, date(2021, 3, 15)).is_ok());
    }

    #[test]
    fn wall_clock_validation() {
        assert!(SessionTimeSpec::same_day(hm(16, 0), hm(9, 30)).is_err());
        assert!(SessionTimeSpec::same_day(hm(9, 30), hm(9, 30)).is_err());
        assert!(SessionTimeSpec::new(hm(9, 30), hm(16, 0), 1, 0).is_err());
        assert!(SessionTimeSpec::new(hm(9, 30), hm(16, 0), 0, -1).is_err());
        assert!(SessionTimeSpec::new(hm(9, 30), hm(16, 0), -1, -1).is_ok());

        let cme = SessionTimeSpec::overnight(hm(17, 0), hm(16, 0)).unwrap();
        assert!(cme.validate_close(hm(12, 0)).is_ok());
        assert!(cme.validate_open(hm(8, 0)).is_ok());
        let nyse = SessionTimeSpec::same_day(hm(9, 30), hm(16, 0)).unwrap();
        assert!(nyse.validate_close(hm(9, 0)).is_err());
        assert!(nyse.validate_open(hm(16, 30)).is_err());
        assert!(local_time(24, 0).is_err());
    }

    #[test]
    fn sessions_longer_than_a_day_are_rejected() {
        let err = SessionTimeSpec::new(hm(8, 0), hm(20, 0), -1, 0).unwrap_err();
        assert!(err.is_configuration(), "{err}");
        assert!(err.to_string().contains("overlap"), "{err}");
        // Exactly one day leaves the close touching the next open.
        assert!(SessionTimeSpec::new(hm(17, 0), hm(17, 0), -1, 0).is_ok());

        let cme = SessionTimeSpec::overnight(hm(17, 0), hm(16, 0)).unwrap();
        assert!(cme.validate_open(hm(15, 0)).is_err());
        assert!(cme.validate_close(hm(17, 30)).is_err());
    }
}
