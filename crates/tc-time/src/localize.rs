//! Timezone lookup and local to UTC resolution.
//!
//! Exchange hours are configured as local wall-clock times. Turning them
//! into absolute instants needs two policies for daylight-saving
//! transitions:
//!
//! * **Spring forward** (the local time does not exist): resolve to the first
//!   valid instant after the gap, i.e. the transition instant itself.
//! * **Fall back** (the local time happens twice): resolve to the earlier of
//!   the two instants and emit a `tracing` warning.
//!
//! The timezone database itself comes from `chrono-tz`.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use tc_core::errors::{Error, Result};
use tc_core::fail;
use tracing::{debug, warn};

/// Longest clock skip searched when a local time falls in a gap.
///
/// Covers a whole skipped calendar day (Pacific/Apia, 2011-12-30) plus margin.
const MAX_GAP_MINUTES: i64 = 26 * 60;

/// Look up an IANA timezone identifier (e.g. `"America/Chicago"`).
pub fn parse_timezone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| Error::UnknownTimezone(id.to_string()))
}

/// Resolve a local wall-clock time in `tz` to a UTC instant.
///
/// See the module documentation for the gap and ambiguity policies.
pub fn localize(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(a, b) => {
            let earlier = a.min(b).with_timezone(&Utc);
            let later = a.max(b).with_timezone(&Utc);
            warn!(
                timezone = tz.name(),
                %local,
                %earlier,
                %later,
                "ambiguous local time, using the earlier instant"
            );
            Ok(earlier)
        }
        LocalResult::None => first_instant_after_gap(tz, local),
    }
}

/// Walk forward minute by minute from `local` until the wall clock exists
/// again, then back up second by second within that minute, and return the
/// first instant that exists.
fn first_instant_after_gap(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>> {
    let start = local
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(local);
    for step in 1..=MAX_GAP_MINUTES {
        let minute = start + Duration::minutes(step);
        if tz.from_local_datetime(&minute).earliest().is_none() {
            continue;
        }
        let previous = minute - Duration::minutes(1);
        let found = (1..=60)
            .map(|s| previous + Duration::seconds(s))
            .filter(|t| *t > local)
            .find_map(|t| tz.from_local_datetime(&t).earliest().map(|dt| (t, dt)));
        if let Some((candidate, dt)) = found {
            debug!(
                timezone = tz.name(),
                %local,
                resolved_local = %candidate,
                "local time falls in a DST gap, moved to the end of the gap"
            );
            return Ok(dt.with_timezone(&Utc));
        }
    }
    fail!(
        "local time {local} in {} does not exist and no valid time follows within {} hours",
        tz.name(),
        MAX_GAP_MINUTES / 60
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&local(y, m, d, h, min))
    }

    #[test]
    fn unknown_timezone_is_a_configuration_error() {
        let err = parse_timezone("America/Atlantis").unwrap_err();
        assert_eq!(err, Error::UnknownTimezone("America/Atlantis".into()));
        assert!(err.is_configuration());
        assert_eq!(parse_timezone("America/Chicago").unwrap(), chrono_tz::America::Chicago);
    }

    #[test]
    fn ordinary_times_use_the_current_offset() {
        let ny = chrono_tz::America::New_York;
        // EST (UTC-5) in January, EDT (UTC-4) in July.
        assert_eq!(localize(ny, local(2020, 1, 15, 9, 30)).unwrap(), utc(2020, 1, 15, 14, 30));
        assert_eq!(localize(ny, local(2020, 7, 15, 9, 30)).unwrap(), utc(2020, 7, 15, 13, 30));
    }

    #[test]
    fn spring_forward_gap_moves_to_transition_instant() {
        let ny = chrono_tz::America::New_York;
        // 2021-03-14 02:00 EST jumps to 03:00 EDT (07:00 UTC).
        for minute in [0, 1, 30, 59] {
            let resolved = localize(ny, local(2021, 3, 14, 2, minute)).unwrap();
            assert_eq!(resolved, utc(2021, 3, 14, 7, 0), "02:{minute:02}");
        }
        // The first minute after the gap is unaffected.
        assert_eq!(localize(ny, local(2021, 3, 14, 3, 0)).unwrap(), utc(2021, 3, 14, 7, 0));
    }

    #[test]
    fn fall_back_ambiguity_takes_the_earlier_instant() {
        let chicago = chrono_tz::America::Chicago;
        // 2021-11-07 01:30 happens at 06:30 UTC (CDT) and 07:30 UTC (CST).
        let resolved = localize(chicago, local(2021, 11, 7, 1, 30)).unwrap();
        assert_eq!(resolved, utc(2021, 11, 7, 6, 30));
    }

    #[test]
    fn gaps_ending_mid_minute_resolve_to_the_second() {
        // Amsterdam moved from +01:19:32 to +01:20 on 1937-07-01, skipping
        // 28 seconds after midnight.
        let amsterdam = chrono_tz::Europe::Amsterdam;
        let skipped = local(1937, 7, 1, 0, 0) + Duration::seconds(10);
        let resolved = localize(amsterdam, skipped).unwrap();
        let back = resolved.with_timezone(&amsterdam).naive_local();
        assert!(back >= skipped);
        assert!(back - skipped < Duration::minutes(1), "{skipped} -> {back}");
        let just_before = back - Duration::seconds(1);
        assert!(
            just_before <= skipped
                || amsterdam.from_local_datetime(&just_before).earliest().is_none(),
            "{skipped} -> {back}"
        );
    }

    #[test]
    fn skipped_calendar_day() {
        // Samoa skipped 2011-12-30 entirely when it crossed the date line.
        let apia = chrono_tz::Pacific::Apia;
        let resolved = localize(apia, local(2011, 12, 30, 12, 0)).unwrap();
        // 2011-12-31 00:00 at UTC+14 == 2011-12-30 10:00 UTC.
        assert_eq!(resolved, utc(2011, 12, 30, 10, 0));
    }
}
