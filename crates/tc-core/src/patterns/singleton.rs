//! Process-wide singletons.
//!
//! Global read-only state (such as the exchange registry) is held in a
//! `std::sync::LazyLock`: it is built on first access and never mutated
//! afterwards. [`define_singleton!`] declares such a static.

/// Re-export `LazyLock` as the canonical singleton container.
pub use std::sync::LazyLock;

/// Define a lazily-initialised, read-only global instance of type `$ty`.
///
/// # Example
/// ```
/// use tc_core::define_singleton;
///
/// struct Registry { names: Vec<&'static str> }
/// define_singleton!(REGISTRY, Registry, Registry { names: vec!["CME"] });
///
/// assert_eq!(REGISTRY.names, ["CME"]);
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $init:expr) => {
        $(#[$meta])*
        pub static $name: $crate::patterns::singleton::LazyLock<$ty> =
            $crate::patterns::singleton::LazyLock::new(|| $init);
    };
}
