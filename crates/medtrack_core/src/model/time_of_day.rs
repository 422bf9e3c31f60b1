//! Wall-clock time-of-day value used for medicine schedules.
//!
//! # Invariants
//! - `hour` is in `0..=23`, `minute` is in `0..=59`.
//! - Wire form is always zero-padded `HH:MM`.
//! - Stored values with a single-digit hour (`H:MM`) are still accepted on
//!   deserialization and re-serialized padded.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Hour and minute of a day, not tied to any calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

/// Parse failure for `HH:MM` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOfDayParseError {
    /// Input is not two digits, a colon, and two digits.
    Malformed(String),
    /// Hour or minute is outside the valid range.
    OutOfRange { hour: u8, minute: u8 },
}

impl Display for TimeOfDayParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "time must be formatted as HH:MM, got `{value}`"),
            Self::OutOfRange { hour, minute } => {
                write!(f, "time {hour:02}:{minute:02} is outside 00:00..23:59")
            }
        }
    }
}

impl Error for TimeOfDayParseError {}

impl TimeOfDay {
    /// Builds a time-of-day, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeOfDayParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeOfDayParseError::OutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeOfDayParseError::Malformed(value.to_string());
        let (hour_text, minute_text) = value.split_once(':').ok_or_else(malformed)?;
        if hour_text.len() != 2 || minute_text.len() != 2 {
            return Err(malformed());
        }
        if !hour_text
            .bytes()
            .chain(minute_text.bytes())
            .all(|byte| byte.is_ascii_digit())
        {
            return Err(malformed());
        }

        let hour = hour_text.parse::<u8>().map_err(|_| malformed())?;
        let minute = minute_text.parse::<u8>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let padded = match raw.split_once(':') {
            Some((hour, _)) if hour.len() == 1 => format!("0{raw}"),
            _ => raw,
        };
        padded.parse().map_err(serde::de::Error::custom)
    }
}
