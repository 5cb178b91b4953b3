//! Work shift types.

use std::fmt;
use std::str::FromStr;

use atelier_shared::types::WorkShiftId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ShiftError;

/// Minutes in a day.
const DAY_MINUTES: u16 = 24 * 60;

/// A time of day at minute granularity.
///
/// Parsed from `HH:MM` (a trailing `:SS` is accepted and ignored) and
/// written back as `HH:MM`. `24:00` is accepted as the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftTime(u16);

impl ShiftTime {
    /// Builds a time from hours and minutes.
    ///
    /// # Errors
    /// Returns `InvalidTime` outside `00:00..=24:00`.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self, ShiftError> {
        let invalid = || ShiftError::InvalidTime(format!("{hours:02}:{minutes:02}"));
        if hours > 24 || minutes >= 60 {
            return Err(invalid());
        }
        let total = hours * 60 + minutes;
        if total > DAY_MINUTES {
            return Err(invalid());
        }
        Ok(Self(total))
    }

    /// Minute of the day.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ShiftTime {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShiftError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');
        let hours = parts
            .next()
            .and_then(|h| h.parse::<u16>().ok())
            .ok_or_else(invalid)?;
        let minutes = parts
            .next()
            .and_then(|m| m.parse::<u16>().ok())
            .ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            seconds.parse::<u16>().map_err(|_| invalid())?;
        }
        if parts.next().is_some() || hours > 24 {
            return Err(invalid());
        }
        Self::from_hm(hours, minutes).map_err(|_| invalid())
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ShiftTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShiftTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A half-open `[start, end)` interval of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Inclusive start.
    pub start: ShiftTime,
    /// Exclusive end.
    pub end: ShiftTime,
}

impl ShiftWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(start: ShiftTime, end: ShiftTime) -> Self {
        Self { start, end }
    }

    /// Parses a window from two `HH:MM` strings.
    ///
    /// # Errors
    /// Returns `InvalidTime` if either side fails to parse.
    pub fn parse(start: &str, end: &str) -> Result<Self, ShiftError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Returns true if the two windows share any minute.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A named work shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkShift {
    /// Backend id.
    pub id: WorkShiftId,
    /// Display name ("Ca sáng").
    pub name: String,
    /// Start time.
    pub start: ShiftTime,
    /// End time.
    pub end: ShiftTime,
    /// Free-text description.
    pub description: Option<String>,
}

impl WorkShift {
    /// The shift's time window.
    #[must_use]
    pub const fn window(&self) -> ShiftWindow {
        ShiftWindow::new(self.start, self.end)
    }
}
