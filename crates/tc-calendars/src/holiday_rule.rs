//! Holiday rules.
//!
//! A [`HolidayRule`] turns a year into the set of dates it closes (or, inside
//! a special-time set, the dates it applies to). Three kinds exist:
//!
//! * **fixed**: the same month/day every year, shifted by an
//!   [`Observance`] policy when it lands on a weekend;
//! * **floating**: derived from an [`Anchor`] (Nth weekday of a month, last
//!   weekday of a month, Easter Sunday, or a fixed day) plus a day offset;
//! * **ad-hoc**: a literal list of one-off dates.
//!
//! Every rule can be restricted to a window of years, to certain weekdays,
//! and can skip individual years. All parameters are validated when the rule
//! is built; evaluating a built rule cannot fail.

use std::collections::BTreeSet;

use tc_core::errors::{Error, Result};
use tc_time::date::{MAX_YEAR, MIN_YEAR};
use tc_time::{easter_sunday, Date, Month, Weekday};

/// How a fixed-date holiday moves when it falls on a weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Observance {
    /// Observed on the calendar date, even on weekends.
    #[default]
    None,
    /// Saturday → preceding Friday, Sunday → following Monday.
    NearestWeekday,
    /// Sunday → following Monday; Saturday is not moved.
    SundayToMonday,
    /// Saturday or Sunday → following Monday.
    NextMonday,
    /// Saturday or Sunday → preceding Friday.
    PreviousFriday,
    /// Saturday → Monday, Sunday or Monday → Tuesday (second day of a
    /// two-day holiday such as Boxing Day).
    NextMondayOrTuesday,
}

impl Observance {
    /// Apply the policy to a raw holiday date.
    pub fn apply(self, date: Date) -> Result<Date> {
        let shift = match (self, date.weekday()) {
            (Observance::NearestWeekday, Weekday::Saturday) => -1,
            (Observance::NearestWeekday, Weekday::Sunday) => 1,
            (Observance::SundayToMonday, Weekday::Sunday) => 1,
            (Observance::NextMonday, Weekday::Saturday) => 2,
            (Observance::NextMonday, Weekday::Sunday) => 1,
            (Observance::PreviousFriday, Weekday::Saturday) => -1,
            (Observance::PreviousFriday, Weekday::Sunday) => -2,
            (Observance::NextMondayOrTuesday, Weekday::Saturday) => 2,
            (Observance::NextMondayOrTuesday, Weekday::Sunday) => 2,
            (Observance::NextMondayOrTuesday, Weekday::Monday) => 1,
            _ => 0,
        };
        date.add_days(shift)
    }
}

/// Reference date a floating rule is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// A fixed month/day (useful with an offset, e.g. "day after July 4th").
    Fixed {
        /// Month of the reference date.
        month: Month,
        /// Day of the month.
        day: u8,
    },
    /// The `n`-th (1–5) `weekday` of `month`.
    NthWeekday {
        /// Occurrence, 1-based.
        n: u8,
        /// Day of the week.
        weekday: Weekday,
        /// Month to search.
        month: Month,
    },
    /// The last `weekday` of `month`.
    LastWeekday {
        /// Day of the week.
        weekday: Weekday,
        /// Month to search.
        month: Month,
    },
    /// Western Easter Sunday.
    EasterSunday,
}

impl Anchor {
    /// Resolve the anchor in `year`. `None` when the anchor does not occur
    /// that year (February 29th outside leap years, a missing 5th weekday).
    fn resolve(&self, year: u16) -> Option<Date> {
        match *self {
            Anchor::Fixed { month, day } => Date::from_ymd(year, month.number(), day).ok(),
            Anchor::NthWeekday { n, weekday, month } => {
                Date::nth_weekday(n, weekday, year, month).ok()
            }
            Anchor::LastWeekday { weekday, month } => Date::last_weekday(weekday, year, month).ok(),
            Anchor::EasterSunday => easter_sunday(year).ok(),
        }
    }

    fn validate(&self, rule: &str) -> Result<()> {
        match *self {
            Anchor::Fixed { month, day } => validate_day(rule, month, day),
            Anchor::NthWeekday { n, .. } if !(1..=5).contains(&n) => Err(Error::invalid_rule(
                rule,
                format!("weekday occurrence {n} is outside 1..=5"),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleKind {
    Fixed {
        month: Month,
        day: u8,
    },
    Floating {
        anchor: Anchor,
        offset_days: i32,
        on_or_after: Option<Weekday>,
    },
    AdHoc {
        dates: BTreeSet<Date>,
    },
}

/// A single, immutable holiday rule.
///
/// Built with [`HolidayRule::fixed`], [`HolidayRule::floating`] or
/// [`HolidayRule::ad_hoc`] followed by [`HolidayRuleBuilder::build`].
///
/// ```
/// use tc_calendars::{HolidayRule, Observance};
/// use tc_time::{Date, Month};
///
/// let christmas = HolidayRule::fixed("Christmas", Month::December, 25)
///     .observance(Observance::NearestWeekday)
///     .build()
///     .unwrap();
/// // December 25th 2016 was a Sunday.
/// let observed = christmas.dates_in_year(2016);
/// assert!(observed.contains(&Date::from_ymd(2016, 12, 26).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRule {
    name: String,
    kind: RuleKind,
    observance: Observance,
    from_year: Option<u16>,
    until_year: Option<u16>,
    weekdays: Option<BTreeSet<Weekday>>,
    except_years: BTreeSet<u16>,
}

impl HolidayRule {
    /// Start a fixed-date rule (same month/day every year).
    pub fn fixed(name: impl Into<String>, month: Month, day: u8) -> HolidayRuleBuilder {
        HolidayRuleBuilder::new(name.into(), RuleKind::Fixed { month, day })
    }

    /// Start a floating rule computed from `anchor`.
    pub fn floating(name: impl Into<String>, anchor: Anchor) -> HolidayRuleBuilder {
        HolidayRuleBuilder::new(
            name.into(),
            RuleKind::Floating {
                anchor,
                offset_days: 0,
                on_or_after: None,
            },
        )
    }

    /// Start an ad-hoc rule listing literal dates.
    pub fn ad_hoc(
        name: impl Into<String>,
        dates: impl IntoIterator<Item = Date>,
    ) -> HolidayRuleBuilder {
        HolidayRuleBuilder::new(
            name.into(),
            RuleKind::AdHoc {
                dates: dates.into_iter().collect(),
            },
        )
    }

    /// Human-readable rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` for literal date lists.
    pub fn is_ad_hoc(&self) -> bool {
        matches!(self.kind, RuleKind::AdHoc { .. })
    }

    /// Observed dates of this rule that fall in `year`.
    ///
    /// Observance can move a date across a year boundary (January 1st on a
    /// Saturday observed on December 31st), so the neighbouring years are
    /// evaluated too and only dates landing in `year` are kept.
    pub fn dates_in_year(&self, year: u16) -> BTreeSet<Date> {
        if let RuleKind::AdHoc { dates } = &self.kind {
            return dates
                .iter()
                .copied()
                .filter(|d| d.year() == year && self.accepts(*d))
                .collect();
        }
        let first = year.saturating_sub(1).max(MIN_YEAR);
        let last = year.saturating_add(1).min(MAX_YEAR);
        (first..=last)
            .filter_map(|raw_year| self.observed(raw_year))
            .filter(|d| d.year() == year && self.accepts(*d))
            .collect()
    }

    /// `true` if `date` is one of this rule's observed dates.
    pub fn contains(&self, date: Date) -> bool {
        self.dates_in_year(date.year()).contains(&date)
    }

    /// Raw date for `year` with offset and observance applied.
    fn observed(&self, year: u16) -> Option<Date> {
        let raw = match &self.kind {
            RuleKind::Fixed { month, day } => Date::from_ymd(year, month.number(), *day).ok()?,
            RuleKind::Floating {
                anchor,
                offset_days,
                on_or_after,
            } => {
                let shifted = anchor.resolve(year)?.add_days(*offset_days).ok()?;
                match on_or_after {
                    Some(w) => shifted.next_weekday(*w).ok()?,
                    None => shifted,
                }
            }
            RuleKind::AdHoc { .. } => return None,
        };
        self.observance.apply(raw).ok()
    }

    /// Window, weekday and exception filters, applied to observed dates.
    fn accepts(&self, date: Date) -> bool {
        let year = date.year();
        if self.from_year.is_some_and(|from| year < from)
            || self.until_year.is_some_and(|until| year > until)
            || self.except_years.contains(&year)
        {
            return false;
        }
        self.weekdays
            .as_ref()
            .map_or(true, |days| days.contains(&date.weekday()))
    }
}

/// Builder for [`HolidayRule`]; every parameter is checked in
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct HolidayRuleBuilder {
    name: String,
    kind: RuleKind,
    observance: Observance,
    offset_days: i32,
    on_or_after: Option<Weekday>,
    from_year: Option<u16>,
    until_year: Option<u16>,
    weekdays: Option<BTreeSet<Weekday>>,
    except_years: BTreeSet<u16>,
}

impl HolidayRuleBuilder {
    fn new(name: String, kind: RuleKind) -> Self {
        Self {
            name,
            kind,
            observance: Observance::None,
            offset_days: 0,
            on_or_after: None,
            from_year: None,
            until_year: None,
            weekdays: None,
            except_years: BTreeSet::new(),
        }
    }

    /// Weekend observance policy (fixed and floating rules).
    pub fn observance(mut self, observance: Observance) -> Self {
        self.observance = observance;
        self
    }

    /// Signed day offset from the anchor (floating rules only).
    pub fn offset_days(mut self, days: i32) -> Self {
        self.offset_days = days;
        self
    }

    /// After applying the offset, move forward to the first `weekday` on or
    /// after the result (floating rules only).
    pub fn on_or_after(mut self, weekday: Weekday) -> Self {
        self.on_or_after = Some(weekday);
        self
    }

    /// First year (inclusive) the rule applies to.
    pub fn from_year(mut self, year: u16) -> Self {
        self.from_year = Some(year);
        self
    }

    /// Last year (inclusive) the rule applies to.
    pub fn until_year(mut self, year: u16) -> Self {
        self.until_year = Some(year);
        self
    }

    /// Only yield observed dates falling on one of `days`.
    pub fn on_weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = Some(days.into_iter().collect());
        self
    }

    /// Skip the listed years.
    pub fn except_years(mut self, years: impl IntoIterator<Item = u16>) -> Self {
        self.except_years.extend(years);
        self
    }

    /// Validate the parameters and build the rule.
    pub fn build(self) -> Result<HolidayRule> {
        let rule = self.name.as_str();
        if rule.trim().is_empty() {
            return Err(Error::invalid_rule(rule, "rule name is empty"));
        }

        if !matches!(self.kind, RuleKind::Floating { .. }) {
            self.reject_floating_params()?;
        }
        if matches!(self.kind, RuleKind::AdHoc { .. }) && self.observance != Observance::None {
            return Err(Error::invalid_rule(
                rule,
                "ad-hoc dates are literal and take no observance",
            ));
        }

        let kind = match self.kind {
            RuleKind::Fixed { month, day } => {
                validate_day(rule, month, day)?;
                RuleKind::Fixed { month, day }
            }
            RuleKind::Floating { anchor, .. } => {
                anchor.validate(rule)?;
                if self.offset_days.abs() > 366 {
                    return Err(Error::invalid_rule(
                        rule,
                        format!("offset of {} days exceeds one year", self.offset_days),
                    ));
                }
                RuleKind::Floating {
                    anchor,
                    offset_days: self.offset_days,
                    on_or_after: self.on_or_after,
                }
            }
            RuleKind::AdHoc { dates } => {
                if dates.is_empty() {
                    return Err(Error::invalid_rule(rule, "ad-hoc rule lists no dates"));
                }
                RuleKind::AdHoc { dates }
            }
        };

        for year in [self.from_year, self.until_year].into_iter().flatten() {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(Error::invalid_rule(
                    rule,
                    format!("year {year} is outside [{MIN_YEAR}, {MAX_YEAR}]"),
                ));
            }
        }
        if let (Some(from), Some(until)) = (self.from_year, self.until_year) {
            if from > until {
                return Err(Error::invalid_rule(
                    rule,
                    format!("validity window {from}..={until} is empty"),
                ));
            }
        }
        if self.weekdays.as_ref().is_some_and(BTreeSet::is_empty) {
            return Err(Error::invalid_rule(rule, "weekday filter is empty"));
        }

        Ok(HolidayRule {
            name: self.name,
            kind,
            observance: self.observance,
            from_year: self.from_year,
            until_year: self.until_year,
            weekdays: self.weekdays,
            except_years: self.except_years,
        })
    }

    fn reject_floating_params(&self) -> Result<()> {
        if self.offset_days != 0 || self.on_or_after.is_some() {
            return Err(Error::invalid_rule(
                &self.name,
                "day offsets only apply to floating rules",
            ));
        }
        Ok(())
    }
}

fn validate_day(rule: &str, month: Month, day: u8) -> Result<()> {
    if day == 0 || day > month.max_days() {
        return Err(Error::invalid_rule(
            rule,
            format!("{month} has no day {day}"),
        ));
    }
    Ok(())
}
