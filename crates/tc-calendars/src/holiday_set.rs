//! Holiday sets: the merged output of many rules.
//!
//! A [`HolidaySet`] owns an ordered list of [`HolidayRule`]s plus a list of
//! ad-hoc dates and answers "is this date in the set?". The union for a
//! year is computed once and cached: rule evaluation is deterministic, so
//! the cache is populated idempotently. Two threads racing on the same
//! year both compute it and the first insert wins.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use tc_time::Date;
use tracing::trace;

use crate::holiday_rule::HolidayRule;

/// A deduplicated union of holiday rules and literal dates.
pub struct HolidaySet {
    rules: Vec<HolidayRule>,
    ad_hoc: BTreeSet<Date>,
    cache: RwLock<HashMap<u16, Arc<BTreeSet<Date>>>>,
}

impl HolidaySet {
    /// Create a set from an ordered list of rules.
    pub fn new(rules: impl IntoIterator<Item = HolidayRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            ad_hoc: BTreeSet::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// A set containing no dates.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Add literal dates to the set.
    pub fn with_ad_hoc(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.ad_hoc.extend(dates);
        self.clear_cache();
        self
    }

    /// The rules, in configuration order.
    pub fn rules(&self) -> &[HolidayRule] {
        &self.rules
    }

    /// The literal dates.
    pub fn ad_hoc(&self) -> &BTreeSet<Date> {
        &self.ad_hoc
    }

    /// `true` if the set has neither rules nor literal dates.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.ad_hoc.is_empty()
    }

    /// A new set holding the rules and literal dates of both `self` and
    /// `other` (the union of their holidays).
    pub fn union(&self, other: &HolidaySet) -> HolidaySet {
        HolidaySet::new(self.rules.iter().chain(&other.rules).cloned())
            .with_ad_hoc(self.ad_hoc.iter().chain(&other.ad_hoc).copied())
    }

    /// All dates of the set falling in `year`.
    pub fn dates_in_year(&self, year: u16) -> Arc<BTreeSet<Date>> {
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&year)
        {
            return Arc::clone(hit);
        }

        let computed: BTreeSet<Date> = self
            .rules
            .iter()
            .flat_map(|rule| rule.dates_in_year(year))
            .chain(self.ad_hoc.iter().copied().filter(|d| d.year() == year))
            .collect();
        trace!(year, holidays = computed.len(), "holiday set year computed");

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(year).or_insert_with(|| Arc::new(computed)))
    }

    /// All dates of the set in the inclusive year range.
    pub fn dates_in_range(&self, start_year: u16, end_year: u16) -> BTreeSet<Date> {
        (start_year..=end_year)
            .flat_map(|year| self.dates_in_year(year).iter().copied().collect::<Vec<_>>())
            .collect()
    }

    /// `true` if `date` is in the set.
    pub fn contains(&self, date: Date) -> bool {
        self.dates_in_year(date.year()).contains(&date)
    }

    /// Names of the rules (and `"ad-hoc"` for literal dates) producing `date`.
    pub fn reasons(&self, date: Date) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .iter()
            .filter(|rule| rule.contains(date))
            .map(HolidayRule::name)
            .collect();
        if self.ad_hoc.contains(&date) {
            names.push("ad-hoc");
        }
        names
    }

    fn clear_cache(&mut self) {
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for HolidaySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for HolidaySet {
    fn clone(&self) -> Self {
        HolidaySet::new(self.rules.clone()).with_ad_hoc(self.ad_hoc.iter().copied())
    }
}

impl std::fmt::Debug for HolidaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(HolidayRule::name).collect();
        f.debug_struct("HolidaySet")
            .field("rules", &names)
            .field("ad_hoc", &self.ad_hoc.len())
            .finish()
    }
}

impl FromIterator<HolidayRule> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = HolidayRule>>(iter: I) -> Self {
        HolidaySet::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday_rule::Observance;
    use tc_time::Month;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn christmas() -> HolidayRule {
        HolidayRule::fixed("Christmas", Month::December, 25)
            .observance(Observance::NearestWeekday)
            .build()
            .unwrap()
    }

    fn boxing_day_literal() -> HolidayRule {
        HolidayRule::fixed("December 26th", Month::December, 26)
            .build()
            .unwrap()
    }

    #[test]
    fn union_is_deduplicated() {
        // In 2016 Christmas is observed on the 26th, which the second rule
        // also yields.
        let set = HolidaySet::new([christmas(), boxing_day_literal()]);
        let dates = set.dates_in_year(2016);
        assert_eq!(dates.iter().copied().collect::<Vec<_>>(), vec![date(2016, 12, 26)]);
    }

    #[test]
    fn ad_hoc_dates_are_merged() {
        let set = HolidaySet::new([christmas()]).with_ad_hoc([date(2004, 6, 11)]);
        assert!(set.contains(date(2004, 6, 11)));
        assert!(set.contains(date(2004, 12, 24)));
        assert!(!set.contains(date(2004, 6, 10)));
        assert_eq!(set.reasons(date(2004, 6, 11)), vec!["ad-hoc"]);
        assert_eq!(set.reasons(date(2004, 12, 24)), vec!["Christmas"]);
    }

    #[test]
    fn range_spans_years() {
        let set = HolidaySet::new([christmas()]);
        let dates = set.dates_in_range(2015, 2017);
        assert_eq!(
            dates.into_iter().collect::<Vec<_>>(),
            vec![date(2015, 12, 25), date(2016, 12, 26), date(2017, 12, 25)]
        );
    }

    #[test]
    fn cache_returns_the_same_allocation() {
        let set = HolidaySet::new([christmas()]);
        let a = set.dates_in_year(2020);
        let b = set.dates_in_year(2020);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn clone_and_union_keep_everything() {
        let a = HolidaySet::new([christmas()]);
        let b = HolidaySet::empty().with_ad_hoc([date(2007, 1, 2)]);
        let merged = a.union(&b);
        assert_eq!(merged.rules().len(), 1);
        assert!(merged.contains(date(2007, 1, 2)));
        assert!(merged.clone().contains(date(2007, 12, 25)));
        assert!(HolidaySet::empty().is_empty());
    }

    #[test]
    fn concurrent_readers_agree() {
        let set = Arc::new(HolidaySet::new([christmas()]));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let set = Arc::clone(&set);
                std::thread::spawn(move || set.dates_in_range(1990, 2030).len())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 41);
        }
    }
}
