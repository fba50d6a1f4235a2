//! Clock-time value type for hour-grid scheduling.
//!
//! # Responsibility
//! - Represent the `HH:MM` times of day shared by time boxes and time logs.
//! - Provide interval arithmetic in fractional hours.
//!
//! # Invariants
//! - `hour` is 0-23 and `minute` is 0-59; every constructor enforces both.
//! - Textual form is zero-padded `HH:MM` and round-trips through `FromStr`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Errors from clock-time construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockTimeError {
    /// Input text is not of the `HH:MM` shape.
    InvalidFormat(String),
    /// Hour component is outside 0-23.
    HourOutOfRange(u8),
    /// Minute component is outside 0-59.
    MinuteOutOfRange(u8),
}

impl Display for ClockTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(text) => write!(f, "invalid clock time `{text}`; expected HH:MM"),
            Self::HourOutOfRange(hour) => write!(f, "clock hour {hour} is outside 0-23"),
            Self::MinuteOutOfRange(minute) => write!(f, "clock minute {minute} is outside 0-59"),
        }
    }
}

impl Error for ClockTimeError {}

/// Minute-resolution time of day used by templates and logged intervals.
///
/// Ordering is chronological (hour first, then minute), so interval checks
/// like "end strictly after start" are plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Creates a clock time, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockTimeError> {
        if hour > 23 {
            return Err(ClockTimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockTimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since 00:00 (0-1439).
    pub fn minutes_from_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour_text, minute_text) = s
            .split_once(':')
            .ok_or_else(|| ClockTimeError::InvalidFormat(s.to_string()))?;
        let hour = hour_text
            .trim()
            .parse::<u8>()
            .map_err(|_| ClockTimeError::InvalidFormat(s.to_string()))?;
        let minute = minute_text
            .trim()
            .parse::<u8>()
            .map_err(|_| ClockTimeError::InvalidFormat(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

/// Signed interval length in fractional hours.
///
/// The result is negative or zero when `end` is not after `start`; interval
/// ordering is validated by callers that require it, not here.
pub fn duration_hours(start: ClockTime, end: ClockTime) -> f64 {
    let minutes =
        i32::from(end.minutes_from_midnight()) - i32::from(start.minutes_from_midnight());
    f64::from(minutes) / 60.0
}
