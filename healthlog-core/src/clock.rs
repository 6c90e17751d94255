//! Wall-clock access.
//!
//! The only time-dependent operations in the core are completion stamps and
//! "today". Both go through [`Clock`] so sessions can be replayed with a
//! fixed time in tests.

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date_key::DateKey;

/// How completion times are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// `14:05`
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    /// `오후 02:05`
    #[serde(rename = "12h")]
    TwelveHour,
}

impl ClockFormat {
    pub fn format(&self, time: NaiveTime) -> String {
        match self {
            ClockFormat::TwentyFourHour => time.format("%H:%M").to_string(),
            ClockFormat::TwelveHour => {
                let (pm, hour) = time.hour12();
                let period = if pm { "오후" } else { "오전" };
                format!("{} {:02}:{:02}", period, hour, time.minute())
            }
        }
    }
}

impl fmt::Display for ClockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockFormat::TwentyFourHour => write!(f, "24h"),
            ClockFormat::TwelveHour => write!(f, "12h"),
        }
    }
}

impl FromStr for ClockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "24" => Ok(ClockFormat::TwentyFourHour),
            "12h" | "12" => Ok(ClockFormat::TwelveHour),
            _ => Err(format!(
                "Invalid clock format '{}'. Valid options: 24h, 12h",
                s
            )),
        }
    }
}

/// Source of the current date and display time.
pub trait Clock {
    /// Current local time, formatted for display next to a completed slot.
    fn now_display(&self) -> String;

    /// Current local calendar day.
    fn today(&self) -> DateKey;
}

/// The process's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    format: ClockFormat,
}

impl SystemClock {
    pub fn new(format: ClockFormat) -> Self {
        Self { format }
    }
}

impl Clock for SystemClock {
    fn now_display(&self) -> String {
        self.format.format(Local::now().time())
    }

    fn today(&self) -> DateKey {
        DateKey::new(Local::now().date_naive())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
    format: ClockFormat,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            format: ClockFormat::default(),
        }
    }

    pub fn with_format(mut self, format: ClockFormat) -> Self {
        self.format = format;
        self
    }
}

impl Clock for FixedClock {
    fn now_display(&self) -> String {
        self.format.format(self.now.time())
    }

    fn today(&self) -> DateKey {
        DateKey::new(self.now.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_twenty_four_hour_format() {
        let clock = FixedClock::new(at(14, 5));
        assert_eq!(clock.now_display(), "14:05");
        assert_eq!(clock.today().to_string(), "2024-03-05");
    }

    #[test]
    fn test_twelve_hour_format() {
        let clock = FixedClock::new(at(14, 5)).with_format(ClockFormat::TwelveHour);
        assert_eq!(clock.now_display(), "오후 02:05");

        let morning = FixedClock::new(at(0, 30)).with_format(ClockFormat::TwelveHour);
        assert_eq!(morning.now_display(), "오전 12:30");
    }

    #[test]
    fn test_clock_format_from_str() {
        assert_eq!(
            ClockFormat::from_str("24h").unwrap(),
            ClockFormat::TwentyFourHour
        );
        assert_eq!(ClockFormat::from_str("12H").unwrap(), ClockFormat::TwelveHour);
        assert!(ClockFormat::from_str("military").is_err());
    }

    #[test]
    fn test_system_clock_is_never_empty() {
        assert!(!SystemClock::default().now_display().is_empty());
    }
}
