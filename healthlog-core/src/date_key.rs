//! Calendar date keys.
//!
//! Every record in the store is keyed by a calendar date with no time or
//! timezone component. [`DateKey::parse`] is the single normalisation point:
//! it accepts a bare `YYYY-MM-DD` or a full ISO timestamp and keeps only the
//! date part, so `2024-03-05` and `2024-03-05T23:10:00Z` name the same day.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical textual format of a date key
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when normalising text into a date key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidFormat(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// A calendar date used as the sole key of the record store.
///
/// Ordering is chronological, which is also the order of the canonical
/// `YYYY-MM-DD` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year/month/day, if that date exists.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Normalise text into a key.
    ///
    /// Anything after a `T` or a space is treated as a time component and
    /// dropped.
    pub fn parse(s: &str) -> Result<Self, DateKeyError> {
        let trimmed = s.trim();
        let date_part = trimmed
            .split(['T', ' '])
            .next()
            .unwrap_or(trimmed);

        NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError::InvalidFormat(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The key `days` away from this one (negative goes back in time).
    pub fn offset_days(&self, days: i64) -> Result<Self, DateKeyError> {
        Duration::try_days(days)
            .and_then(|d| self.0.checked_add_signed(d))
            .map(Self)
            .ok_or_else(|| DateKeyError::OutOfRange(format!("{} {:+} days", self, days)))
    }

    /// Banner label for the selected day, e.g. `2024년 3월 5일`.
    pub fn long_label(&self) -> String {
        format!("{}년 {}월 {}일", self.0.year(), self.0.month(), self.0.day())
    }

    /// Chart axis label, e.g. `3월 5일`.
    pub fn short_label(&self) -> String {
        format!("{}월 {}일", self.0.month(), self.0.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
