//! Exchange calendar registry.
//!
//! [`REGISTRY`] holds the built-in exchanges. It is built on first access
//! and read-only afterwards, so lookups need no locking. Names are matched
//! case-insensitively. A built-in exchange whose configuration fails to
//! build is kept as its error and reported on every lookup.
//!
//! Custom sets of calendars can be kept in an owned [`Registry`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tc_core::define_singleton;
use tc_core::errors::{Error, Result};
use tracing::{debug, warn};

use crate::exchange_calendar::ExchangeCalendar;
use crate::exchanges;

/// A lookup table from exchange name to calendar.
#[derive(Debug, Default)]
pub struct Registry {
    calendars: BTreeMap<String, Result<Arc<ExchangeCalendar>>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in exchange.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("CME", exchanges::cme());
        registry.insert("ICE", exchanges::ice());
        debug!(exchanges = registry.calendars.len(), "exchange registry initialised");
        registry
    }

    /// Add (or replace) a calendar under its own name.
    pub fn register(&mut self, calendar: ExchangeCalendar) {
        let name = calendar.name().to_string();
        self.insert(&name, Ok(calendar));
    }

    fn insert(&mut self, name: &str, calendar: Result<ExchangeCalendar>) {
        if let Err(e) = &calendar {
            warn!(exchange = name, error = %e, "exchange calendar failed to build");
        }
        self.calendars
            .insert(name.to_ascii_uppercase(), calendar.map(Arc::new));
    }

    /// Look up a calendar by name, ignoring case.
    ///
    /// # Errors
    /// [`Error::UnknownExchange`] if nothing is registered under `name`, or
    /// the configuration error the calendar failed to build with.
    pub fn get(&self, name: &str) -> Result<Arc<ExchangeCalendar>> {
        match self.calendars.get(&name.to_ascii_uppercase()) {
            Some(Ok(calendar)) => Ok(Arc::clone(calendar)),
            Some(Err(e)) => Err(e.clone()),
            None => Err(Error::UnknownExchange(name.to_string())),
        }
    }

    /// `true` if a calendar is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.calendars.contains_key(&name.to_ascii_uppercase())
    }

    /// Registered names (upper case), sorted.
    pub fn names(&self) -> Vec<&str> {
        self.calendars.keys().map(String::as_str).collect()
    }
}

define_singleton!(
    /// The built-in exchanges, built on first access.
    REGISTRY,
    Registry,
    Registry::builtin()
);

/// Look up a built-in exchange calendar by name, ignoring case.
///
/// ```
/// let cme = tc_calendars::get_calendar("cme").unwrap();
/// assert_eq!(cme.name(), "CME");
/// assert!(tc_calendars::get_calendar("XNYS").is_err());
/// ```
pub fn get_calendar(name: &str) -> Result<Arc<ExchangeCalendar>> {
    REGISTRY.get(name)
}

/// Names of the built-in exchanges.
pub fn exchange_names() -> Vec<&'static str> {
    REGISTRY.names()
}
