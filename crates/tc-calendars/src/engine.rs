//! Session assembly.
//!
//! Walks nominal dates in order, drops weekends and closures, applies the
//! late-open and early-close overrides and resolves what is left to UTC.
//! A closure always wins over an override for the same date: the date is
//! skipped before overrides are consulted.

use tc_core::ensure;
use tc_core::errors::Result;
use tc_time::Date;
use tracing::{debug, trace};

use crate::exchange_calendar::ExchangeCalendar;
use crate::schedule::Schedule;
use crate::session::Session;

/// Build the session for one nominal date, or `None` if the exchange does
/// not trade that day. Does not check the calendar's bounds.
pub(crate) fn build_session(calendar: &ExchangeCalendar, date: Date) -> Result<Option<Session>> {
    if date.is_weekend() || calendar.closures.contains(date) {
        return Ok(None);
    }
    let open = calendar.late_opens.override_for(date).map(|(time, priority)| {
        trace!(%date, %time, priority, "late open");
        time
    });
    let close = calendar.early_closes.override_for(date).map(|(time, priority)| {
        trace!(%date, %time, priority, "early close");
        time
    });
    let (open, close) = calendar
        .hours
        .resolve_with(calendar.timezone, date, open, close)?;
    Ok(Some(Session::new(date, open, close)))
}

/// Lazy, restartable iterator over the sessions of a date range.
///
/// Cloning the iterator forks the walk at its current position, so a clone
/// taken before iteration replays the whole range. After an error the
/// iterator is exhausted.
#[derive(Debug, Clone)]
pub struct SessionIter<'a> {
    calendar: &'a ExchangeCalendar,
    next: Option<Date>,
    end: Date,
}

impl Iterator for SessionIter<'_> {
    type Item = Result<Session>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(date) = self.next.filter(|d| *d <= self.end) {
            self.next = date.succ().ok();
            match build_session(self.calendar, date) {
                Ok(Some(session)) => return Some(Ok(session)),
                Ok(None) => {}
                Err(e) => {
                    self.next = None;
                    return Some(Err(e));
                }
            }
        }
        self.next = None;
        None
    }
}

impl std::iter::FusedIterator for SessionIter<'_> {}

fn check_range(calendar: &ExchangeCalendar, start: Date, end: Date) -> Result<()> {
    ensure!(start <= end, "start date {start} is after end date {end}");
    calendar.check_bounds(start)?;
    calendar.check_bounds(end)
}

/// Sessions of `calendar` with nominal dates in `start ..= end`, produced
/// lazily.
///
/// # Errors
/// `Precondition` if `start > end`, `OutOfBounds` if either end lies outside
/// the calendar's supported range.
pub fn iter_sessions(calendar: &ExchangeCalendar, start: Date, end: Date) -> Result<SessionIter<'_>> {
    check_range(calendar, start, end)?;
    Ok(SessionIter {
        calendar,
        next: Some(start),
        end,
    })
}

/// Sessions of `calendar` with nominal dates in `start ..= end`, collected
/// into a [`Schedule`]. Any resolution failure fails the whole call.
pub fn sessions(calendar: &ExchangeCalendar, start: Date, end: Date) -> Result<Schedule> {
    let sessions = iter_sessions(calendar, start, end)?.collect::<Result<Vec<_>>>()?;
    debug!(
        exchange = calendar.name(),
        %start,
        %end,
        sessions = sessions.len(),
        "sessions assembled"
    );
    Ok(Schedule::new(sessions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday_rule::{Anchor, HolidayRule, Observance};
    use crate::holiday_set::HolidaySet;
    use crate::session_spec::local_time;
    use chrono::{DateTime, NaiveTime, TimeZone, Utc};
    use tc_core::errors::Error;
    use tc_time::{Month, Weekday};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        local_time(h, m).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn equities() -> ExchangeCalendar {
        let black_friday = HolidayRule::floating(
            "Black Friday",
            Anchor::NthWeekday {
                n: 4,
                weekday: Weekday::Thursday,
                month: Month::November,
            },
        )
        .offset_days(1)
        .build()
        .unwrap();
        let thanksgiving = HolidayRule::floating(
            "Thanksgiving",
            Anchor::NthWeekday {
                n: 4,
                weekday: Weekday::Thursday,
                month: Month::November,
            },
        )
        .build()
        .unwrap();
        let christmas = HolidayRule::fixed("Christmas", Month::December, 25)
            .observance(Observance::NearestWeekday)
            .build()
            .unwrap();
        let first_monday = HolidayRule::floating(
            "First Monday of December",
            Anchor::NthWeekday {
                n: 1,
                weekday: Weekday::Monday,
                month: Month::December,
            },
        )
        .build()
        .unwrap();

        ExchangeCalendar::builder("EQ")
            .with_timezone("America/New_York")
            .with_open_time(hm(9, 30))
            .with_close_time(hm(16, 0))
            .with_regular_holidays(HolidaySet::new([thanksgiving, christmas]))
            .with_early_close(hm(13, 0), HolidaySet::new([black_friday]))
            .with_late_open(hm(11, 0), HolidaySet::new([first_monday]))
            .with_bounds(date(2016, 1, 1), date(2016, 12, 31))
            .build()
            .unwrap()
    }

    #[test]
    fn weekends_and_holidays_are_skipped() {
        let cal = equities();
        let schedule = sessions(&cal, date(2016, 11, 21), date(2016, 11, 28)).unwrap();
        let dates: Vec<Date> = schedule.dates().collect();
        assert_eq!(
            dates,
            vec![
                date(2016, 11, 21),
                date(2016, 11, 22),
                date(2016, 11, 23),
                date(2016, 11, 25),
                date(2016, 11, 28),
            ]
        );
    }

    #[test]
    fn overrides_replace_one_side() {
        let cal = equities();
        let friday = cal.session(date(2016, 11, 25)).unwrap().unwrap();
        assert_eq!(friday.open(), utc(2016, 11, 25, 14, 30));
        assert_eq!(friday.close(), utc(2016, 11, 25, 18, 0));

        let monday = cal.session(date(2016, 12, 5)).unwrap().unwrap();
        assert_eq!(monday.open(), utc(2016, 12, 5, 16, 0));
        assert_eq!(monday.close(), utc(2016, 12, 5, 21, 0));
    }

    #[test]
    fn regular_session_follows_dst() {
        let cal = equities();
        // EST in January, EDT in July.
        let jan = cal.session(date(2016, 1, 4)).unwrap().unwrap();
        assert_eq!(jan.open(), utc(2016, 1, 4, 14, 30));
        let jul = cal.session(date(2016, 7, 5)).unwrap().unwrap();
        assert_eq!(jul.open(), utc(2016, 7, 5, 13, 30));
        assert_eq!(jul.close(), utc(2016, 7, 5, 20, 0));
    }

    #[test]
    fn empty_range_is_not_an_error() {
        let cal = equities();
        let schedule = sessions(&cal, date(2016, 12, 24), date(2016, 12, 26)).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn reversed_and_out_of_bounds_ranges_fail() {
        let cal = equities();
        assert!(matches!(
            sessions(&cal, date(2016, 3, 2), date(2016, 3, 1)),
            Err(Error::Precondition(_))
        ));
        assert!(matches!(
            sessions(&cal, date(2016, 12, 1), date(2017, 1, 3)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn lazy_and_collected_forms_agree() {
        let cal = equities();
        let start = date(2016, 1, 1);
        let end = date(2016, 12, 31);
        let lazy = iter_sessions(&cal, start, end).unwrap();
        let forked = lazy.clone();
        let a: Vec<Session> = lazy.map(Result::unwrap).collect();
        let b: Vec<Session> = forked.map(Result::unwrap).collect();
        let c = sessions(&cal, start, end).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_slice(), c.sessions());
        // 366 days, 105 weekend days, Thanksgiving and Christmas (Monday 26th).
        assert_eq!(c.len(), 366 - 105 - 2);
    }
}
