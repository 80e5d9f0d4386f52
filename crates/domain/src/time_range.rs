// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-of-day values and half-open time ranges.
//!
//! All conflict detection in the system reduces to the overlap predicate
//! defined here. Times are wall-clock `HH:MM` values compared as minutes
//! since midnight; ranges are half-open `[start, end)`, so a booking that
//! ends at 10:00 does not conflict with one that starts at 10:00.

use crate::error::DomainError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in a calendar day.
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision.
///
/// Stored as minutes since midnight. Serializes as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Creates a `TimeOfDay` from hour and minute components.
    ///
    /// # Errors
    ///
    /// Returns an error if `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidTime(format!(
                "{hour:02}:{minute:02} is not a valid 24-hour time"
            )));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Creates a `TimeOfDay` directly from minutes since midnight.
    ///
    /// Callers must pass a value below 1440; this is intended for
    /// compile-time constants such as the business-hours bounds.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Self {
        Self {
            minutes: minutes % MINUTES_PER_DAY,
        }
    }

    /// Parses a `"HH:MM"` 24-hour time string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `HH:MM` time.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let mut parts = value.split(':');
        let (Some(hour_str), Some(minute_str), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DomainError::InvalidTime(format!(
                "'{value}' is not in HH:MM format"
            )));
        };

        let hour: u8 = hour_str.parse().map_err(|_| {
            DomainError::InvalidTime(format!("'{value}' has a non-numeric hour component"))
        })?;
        let minute: u8 = minute_str.parse().map_err(|_| {
            DomainError::InvalidTime(format!("'{value}' has a non-numeric minute component"))
        })?;

        Self::new(hour, minute)
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.minutes
    }

    /// The hour component (0-23).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    /// The minute component (0-59).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: String = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// A half-open `[start, end)` range of wall-clock time within one day.
///
/// Serializes as `"HH:MM-HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    /// Creates a range, enforcing `start < end`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start >= end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range without revalidating `start < end`.
    ///
    /// For values whose invariant is already enforced elsewhere (persisted
    /// booking rows, the business-hours constants).
    #[must_use]
    pub const fn from_parts(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// The start of the range (inclusive).
    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// The end of the range (exclusive).
    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Range length in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Half-open overlap test: `[s1,e1)` and `[s2,e2)` overlap iff
    /// `s1 < e2 && s2 < e1`.
    ///
    /// This predicate is the single source of truth for booking conflict
    /// detection. Touching boundaries do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: String = String::deserialize(deserializer)?;
        let (start_str, end_str) = value.split_once('-').ok_or_else(|| {
            D::Error::custom(format!("'{value}' is not in HH:MM-HH:MM format"))
        })?;
        let start: TimeOfDay = TimeOfDay::parse(start_str).map_err(D::Error::custom)?;
        let end: TimeOfDay = TimeOfDay::parse(end_str).map_err(D::Error::custom)?;
        Self::new(start, end).map_err(D::Error::custom)
    }
}
