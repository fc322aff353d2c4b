//! Invariants every produced schedule must satisfy, checked over random
//! date ranges of the built-in exchanges.

use proptest::prelude::*;
use tc_calendars::{get_calendar, ExchangeCalendar};
use tc_time::{localize, Date};

fn calendars() -> Vec<std::sync::Arc<ExchangeCalendar>> {
    ["CME", "ICE"]
        .into_iter()
        .map(|name| get_calendar(name).unwrap())
        .collect()
}

/// A range `start ..= end` inside 1990–2030 spanning at most ~16 months.
fn range_strategy() -> impl Strategy<Value = (Date, Date)> {
    let first = Date::from_ymd(1990, 1, 1).unwrap();
    let last = Date::from_ymd(2030, 12, 31).unwrap();
    (0i32..=(last - first), 0i32..500).prop_map(move |(offset, len)| {
        let start = first + offset;
        let end = if last - start < len { last } else { start + len };
        (start, end)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sessions_are_ordered_and_disjoint((start, end) in range_strategy()) {
        for cal in calendars() {
            let schedule = cal.sessions(start, end).unwrap();
            for s in &schedule {
                prop_assert!(s.open() < s.close(), "{}: {s}", cal.name());
                prop_assert!(s.date() >= start && s.date() <= end);
            }
            for w in schedule.sessions().windows(2) {
                prop_assert!(w[0].date() < w[1].date());
                prop_assert!(w[0].close() <= w[1].open(), "{}: {} / {}", cal.name(), w[0], w[1]);
            }
        }
    }

    #[test]
    fn exactly_the_trading_days_become_sessions((start, end) in range_strategy()) {
        for cal in calendars() {
            let schedule = cal.sessions(start, end).unwrap();
            let mut d = start;
            while d <= end {
                let trading = !d.is_weekend() && !cal.is_holiday(d);
                prop_assert_eq!(schedule.is_session(d), trading, "{} {}", cal.name(), d);
                d += 1;
            }
        }
    }

    #[test]
    fn sessions_are_idempotent_and_lazy_matches((start, end) in range_strategy()) {
        for cal in calendars() {
            let a = cal.sessions(start, end).unwrap();
            let b = cal.sessions(start, end).unwrap();
            prop_assert_eq!(&a, &b);
            let lazy: Vec<_> = cal
                .iter_sessions(start, end)
                .unwrap()
                .collect::<tc_core::errors::Result<_>>()
                .unwrap();
            prop_assert_eq!(a.sessions(), lazy.as_slice());
        }
    }

    #[test]
    fn early_close_matches_override((start, end) in range_strategy()) {
        for cal in calendars() {
            for s in &cal.sessions(start, end).unwrap() {
                let hours = cal.hours();
                let close_time = cal.early_close(s.date()).unwrap_or(hours.close());
                let expected = localize(
                    cal.timezone(),
                    hours.local_close(s.date(), Some(close_time)).unwrap(),
                )
                .unwrap();
                prop_assert_eq!(s.close(), expected, "{} {}", cal.name(), s.date());
            }
        }
    }

    #[test]
    fn instants_map_back_to_their_session((start, end) in range_strategy()) {
        for cal in calendars() {
            for s in &cal.sessions(start, end).unwrap() {
                prop_assert_eq!(cal.session_at(s.open()).unwrap(), Some(*s));
                let before_close = s.close() - chrono::Duration::minutes(1);
                prop_assert_eq!(cal.session_at(before_close).unwrap(), Some(*s));
            }
        }
    }
}
