//! United States holiday and early-close rules used by US exchanges.
//!
//! Holidays:
//! * New Year's Day (Jan 1; if Sun → Mon)
//! * Good Friday (two days before Easter Sunday)
//! * Christmas Day (Dec 25; if Sat → Fri, if Sun → Mon)
//! * National days of mourning (one-off closures)
//!
//! Early closes:
//! * July 3rd when it is a Monday, Tuesday or Thursday (from 1995)
//! * July 5th when it is a Friday (from 1995, except 2013)
//! * The day after Thanksgiving (from 1993)
//! * Christmas Eve, Monday to Thursday (before 1993, and from 1993)

use tc_core::errors::Result;
use tc_time::{Date, Month, Weekday};

use crate::holiday_rule::{Anchor, HolidayRule, Observance};

/// Presidential funerals and other national days of mourning.
const NATIONAL_DAYS_OF_MOURNING: [(u16, u8, u8); 9] = [
    (1963, 11, 25), // Kennedy
    (1968, 4, 9),   // King
    (1969, 3, 31),  // Eisenhower
    (1972, 12, 28), // Truman
    (1973, 1, 25),  // Johnson
    (1994, 4, 27),  // Nixon
    (2004, 6, 11),  // Reagan
    (2007, 1, 2),   // Ford
    (2018, 12, 5),  // G. H. W. Bush
];

const FOURTH_THURSDAY_OF_NOVEMBER: Anchor = Anchor::NthWeekday {
    n: 4,
    weekday: Weekday::Thursday,
    month: Month::November,
};

const MONDAY_TO_THURSDAY: [Weekday; 4] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
];

/// January 1st, moved to Monday when it falls on a Sunday.
pub fn new_years_day() -> Result<HolidayRule> {
    HolidayRule::fixed("New Year's Day", Month::January, 1)
        .observance(Observance::SundayToMonday)
        .build()
}

/// Two days before Easter Sunday.
pub fn good_friday() -> Result<HolidayRule> {
    HolidayRule::floating("Good Friday", Anchor::EasterSunday)
        .offset_days(-2)
        .build()
}

/// December 25th, observed on the nearest weekday.
pub fn christmas() -> Result<HolidayRule> {
    HolidayRule::fixed("Christmas", Month::December, 25)
        .observance(Observance::NearestWeekday)
        .build()
}

/// One-off closures for national days of mourning.
pub fn national_days_of_mourning() -> Result<Vec<Date>> {
    NATIONAL_DAYS_OF_MOURNING
        .iter()
        .map(|&(y, m, d)| Date::from_ymd(y, m, d))
        .collect()
}

/// July 3rd on a Monday, Tuesday or Thursday, from 1995.
pub fn mon_tue_thu_before_independence_day() -> Result<HolidayRule> {
    HolidayRule::fixed(
        "Monday, Tuesday or Thursday before Independence Day",
        Month::July,
        3,
    )
    .on_weekdays([Weekday::Monday, Weekday::Tuesday, Weekday::Thursday])
    .from_year(1995)
    .build()
}

/// July 5th on a Friday, from 1995, except 2013.
pub fn friday_after_independence_day() -> Result<HolidayRule> {
    HolidayRule::fixed("Friday after Independence Day", Month::July, 5)
        .on_weekdays([Weekday::Friday])
        .from_year(1995)
        .except_years([2013])
        .build()
}

/// The day after Thanksgiving, from 1993.
pub fn black_friday() -> Result<HolidayRule> {
    HolidayRule::floating("Black Friday", FOURTH_THURSDAY_OF_NOVEMBER)
        .offset_days(1)
        .from_year(1993)
        .build()
}

/// Christmas Eve on a weekday other than Friday, until 1992.
pub fn christmas_eve_before_1993() -> Result<HolidayRule> {
    HolidayRule::fixed("Christmas Eve before 1993", Month::December, 24)
        .on_weekdays(MONDAY_TO_THURSDAY)
        .until_year(1992)
        .build()
}

/// Christmas Eve on a weekday other than Friday, from 1993.
pub fn christmas_eve_from_1993() -> Result<HolidayRule> {
    HolidayRule::fixed("Christmas Eve", Month::December, 24)
        .on_weekdays(MONDAY_TO_THURSDAY)
        .from_year(1993)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn dates(rule: &HolidayRule, year: u16) -> Vec<Date> {
        rule.dates_in_year(year).into_iter().collect()
    }

    #[test]
    fn new_years_day_moves_off_sunday_only() {
        let rule = new_years_day().unwrap();
        assert_eq!(dates(&rule, 2017), vec![date(2017, 1, 2)]);
        // Saturday 2022-01-01 stays put; nothing is observed in 2021.
        assert_eq!(dates(&rule, 2022), vec![date(2022, 1, 1)]);
        assert!(dates(&rule, 2021).iter().all(|d| d.month() == 1));
    }

    #[test]
    fn good_friday_dates() {
        let rule = good_friday().unwrap();
        assert_eq!(dates(&rule, 2016), vec![date(2016, 3, 25)]);
        assert_eq!(dates(&rule, 2019), vec![date(2019, 4, 19)]);
    }

    #[test]
    fn christmas_nearest_weekday() {
        let rule = christmas().unwrap();
        assert_eq!(dates(&rule, 2016), vec![date(2016, 12, 26)]);
        assert_eq!(dates(&rule, 2021), vec![date(2021, 12, 24)]);
        assert_eq!(dates(&rule, 2019), vec![date(2019, 12, 25)]);
    }

    #[test]
    fn independence_day_neighbours() {
        let before = mon_tue_thu_before_independence_day().unwrap();
        // 2017-07-03 is a Monday, 2019-07-03 a Wednesday.
        assert_eq!(dates(&before, 2017), vec![date(2017, 7, 3)]);
        assert!(dates(&before, 2019).is_empty());
        // 1990-07-03 is a Tuesday but the rule starts in 1995.
        assert!(dates(&before, 1990).is_empty());

        let after = friday_after_independence_day().unwrap();
        assert_eq!(dates(&after, 2019), vec![date(2019, 7, 5)]);
        assert!(dates(&after, 2013).is_empty());
    }

    #[test]
    fn black_friday_and_christmas_eve() {
        let bf = black_friday().unwrap();
        assert_eq!(dates(&bf, 2016), vec![date(2016, 11, 25)]);
        assert!(dates(&bf, 1992).is_empty());

        let eve = christmas_eve_from_1993().unwrap();
        assert_eq!(dates(&eve, 2014), vec![date(2014, 12, 24)]);
        // Friday.
        assert!(dates(&eve, 2021).is_empty());
        assert!(dates(&eve, 1992).is_empty());

        let old_eve = christmas_eve_before_1993().unwrap();
        assert_eq!(dates(&old_eve, 1992), vec![date(1992, 12, 24)]);
        assert!(dates(&old_eve, 1993).is_empty());
    }

    #[test]
    fn mourning_dates_are_weekdays() {
        let days = national_days_of_mourning().unwrap();
        assert_eq!(days.len(), NATIONAL_DAYS_OF_MOURNING.len());
        assert!(days.iter().all(|d| !d.is_weekend()));
        assert!(days.contains(&date(2007, 1, 2)));
    }
}
