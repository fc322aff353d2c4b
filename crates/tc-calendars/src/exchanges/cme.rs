//! CME Group calendar.
//!
//! Open 17:00 the previous evening, close 16:00, America/Chicago.
//!
//! Holidays:
//! * New Year's Day (if Sun → Mon)
//! * Christmas (nearest weekday)
//! * National days of mourning
//!
//! Early closes at 12:00:
//! * July 3rd on a Monday, Tuesday or Thursday (from 1995)
//! * July 5th on a Friday (from 1995, except 2013)
//! * Black Friday (from 1993)
//! * Christmas Eve, Monday to Thursday
//!
//! Columbus Day and Veterans Day close only some CME products and are
//! treated as regular sessions. Independence Day itself is treated as a
//! regular session as well.

use tc_core::errors::Result;

use crate::catalog::us;
use crate::exchange_calendar::ExchangeCalendar;
use crate::holiday_set::HolidaySet;
use crate::session_spec::local_time;

/// Build the CME calendar.
pub fn cme() -> Result<ExchangeCalendar> {
    let regular = HolidaySet::new([us::new_years_day()?, us::christmas()?]);
    let early_closes = HolidaySet::new([
        us::mon_tue_thu_before_independence_day()?,
        us::friday_after_independence_day()?,
        us::black_friday()?,
        us::christmas_eve_before_1993()?,
        us::christmas_eve_from_1993()?,
    ]);

    ExchangeCalendar::builder("CME")
        .with_timezone("America/Chicago")
        .with_open_time(local_time(17, 0)?)
        .with_close_time(local_time(16, 0)?)
        .with_open_day_offset(-1)
        .with_regular_holidays(regular)
        .with_ad_hoc_holidays(us::national_days_of_mourning()?)
        .with_early_close(local_time(12, 0)?, early_closes)
        .build()
}
