//! Static holiday rule data, grouped by country.

/// United States holidays and early closes.
pub mod us;
