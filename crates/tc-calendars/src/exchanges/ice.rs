//! ICE Futures U.S. calendar.
//!
//! Open 20:00 the previous evening, close 18:00, America/New_York.
//!
//! Holidays:
//! * New Year's Day (if Sun → Mon)
//! * Good Friday
//! * Christmas (nearest weekday)

use tc_core::errors::Result;

use crate::catalog::us;
use crate::exchange_calendar::ExchangeCalendar;
use crate::holiday_set::HolidaySet;
use crate::session_spec::local_time;

/// Build the ICE calendar.
pub fn ice() -> Result<ExchangeCalendar> {
    let regular = HolidaySet::new([us::new_years_day()?, us::good_friday()?, us::christmas()?]);

    ExchangeCalendar::builder("ICE")
        .with_timezone("America/New_York")
        .with_open_time(local_time(20, 0)?)
        .with_close_time(local_time(18, 0)?)
        .with_open_day_offset(-1)
        .with_regular_holidays(regular)
        .build()
}
