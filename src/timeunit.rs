use chrono::{Duration, NaiveDate};
use std::fmt;

/// Signed number of calendar days from `a` to `b` (negative when `b` precedes `a`).
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A date string the board refused to interpret. Carries the raw input so
/// callers can surface it; nothing is ever silently coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
    input: String,
}

impl InvalidDate {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date '{}'", self.input)
    }
}

impl std::error::Error for InvalidDate {}

pub fn parse_iso_date(input: &str) -> Result<NaiveDate, InvalidDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| InvalidDate::new(input))
}

/// An inclusive day interval. `start` and `end` may coincide (a one-day span).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Inclusive day count: an interval whose start equals its end spans one day.
    pub fn duration_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }
}
