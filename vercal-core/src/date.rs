//! Date and clock helpers shared across the crate.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::error::{VercalError, VercalResult};

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> VercalResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| VercalError::InvalidDate(value.to_string()))
}

/// Parse one of the fixed weekday symbols, case-insensitively.
pub fn parse_weekday(value: &str) -> VercalResult<Weekday> {
    match value.trim().to_ascii_lowercase().as_str() {
        "mon" => Ok(Weekday::Mon),
        "tue" => Ok(Weekday::Tue),
        "wed" => Ok(Weekday::Wed),
        "thu" => Ok(Weekday::Thu),
        "fri" => Ok(Weekday::Fri),
        "sat" => Ok(Weekday::Sat),
        "sun" => Ok(Weekday::Sun),
        _ => Err(VercalError::InvalidWeekday(value.to_string())),
    }
}

/// Lowercase three-letter weekday label used in day headers.
pub fn weekday_abbr(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// A wall-clock time of day, parsed from `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    /// Fractional hours since midnight (`10:30` becomes 10.5).
    pub fn to_hours(self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }
}

impl FromStr for ClockTime {
    type Err = VercalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || VercalError::InvalidClock(value.to_string());
        let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        if hour > 24 || minute > 59 || (hour == 24 && minute > 0) {
            return Err(invalid());
        }
        Ok(ClockTime { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
