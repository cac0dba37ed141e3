use chrono::NaiveDate;
use watch_core::TokenSums;

/// Row filter for aggregate queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    Lifetime,
    /// Rows whose timestamp starts with this `YYYY-MM-DD` prefix.
    Day(String),
}

impl Window {
    pub fn day(date: NaiveDate) -> Self {
        Self::Day(date.format("%Y-%m-%d").to_string())
    }
}

/// Summed token fields and matching row count for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub sums: TokenSums,
    pub count: u64,
}
