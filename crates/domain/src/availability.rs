// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability classification for a room on one calendar day.
//!
//! Both operations work over the bookings the day query returned for the
//! room and date (already filtered to statuses that block the slot). They
//! are pure: the caller fetches, this module classifies.
//!
//! ## Invariants
//!
//! - A full-day booking blocks every request for that date, regardless of
//!   the requested window.
//! - Conflict detection uses the half-open overlap predicate from
//!   [`crate::time_range`] and nothing else.
//! - At the day level "partially booked" still reports `available: true`:
//!   some slots remain free. A time-slot check that hits a conflict reports
//!   `available: false`.

use crate::time_range::TimeRange;
use crate::types::Booking;
use serde::{Deserialize, Serialize};

/// How a day or requested slot is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityKind {
    /// Nothing booked; the request can proceed.
    Available,
    /// Some windows are taken.
    PartiallyBooked,
    /// A full-day booking owns the date.
    FullyBooked,
    /// The status could not be determined (bad input, store failure).
    Unavailable,
}

impl AvailabilityKind {
    /// The wire representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::PartiallyBooked => "partially_booked",
            Self::FullyBooked => "fully_booked",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for AvailabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The uniform result of an availability evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityStatus {
    /// Whether the evaluated request (or day) can accept a booking.
    pub available: bool,
    /// Classification of the day or slot.
    pub kind: AvailabilityKind,
    /// The booked ranges relevant to the verdict, sorted by start time.
    pub conflicts: Vec<TimeRange>,
    /// Human-readable summary.
    pub message: String,
}

impl AvailabilityStatus {
    /// A free day or slot.
    #[must_use]
    pub fn available() -> Self {
        Self {
            available: true,
            kind: AvailabilityKind::Available,
            conflicts: Vec::new(),
            message: String::from("Room is available"),
        }
    }

    /// A date owned by a full-day booking.
    #[must_use]
    pub fn fully_booked() -> Self {
        Self {
            available: false,
            kind: AvailabilityKind::FullyBooked,
            conflicts: Vec::new(),
            message: String::from("Room is fully booked for this date"),
        }
    }

    /// An undeterminable status, reported instead of an error so callers
    /// can render a uniform shape.
    #[must_use]
    pub fn unavailable(message: String) -> Self {
        Self {
            available: false,
            kind: AvailabilityKind::Unavailable,
            conflicts: Vec::new(),
            message,
        }
    }

    fn partially_booked(available: bool, conflicts: Vec<TimeRange>, message: String) -> Self {
        Self {
            available,
            kind: AvailabilityKind::PartiallyBooked,
            conflicts,
            message,
        }
    }
}

/// Formats booked ranges for a status message, e.g. `10:00-12:00, 14:00-16:00`.
fn format_ranges(ranges: &[TimeRange]) -> String {
    let formatted: Vec<String> = ranges.iter().map(ToString::to_string).collect();
    formatted.join(", ")
}

/// Collects the time ranges of the given bookings, sorted by start time.
///
/// The day query makes no ordering guarantee, so messages are stabilized
/// here.
fn sorted_ranges(bookings: &[Booking]) -> Vec<TimeRange> {
    let mut ranges: Vec<TimeRange> = bookings.iter().map(Booking::time_range).collect();
    ranges.sort_by_key(|range| range.start());
    ranges
}

/// Classifies a requested time slot against the day's bookings.
///
/// # Arguments
///
/// * `bookings` - The room's bookings for the date, statuses `active` or
///   `completed` only
/// * `requested` - The window the caller wants to book
///
/// # Verdicts
///
/// 1. Any full-day booking ⇒ `fully_booked`, not available.
/// 2. Any overlap with an existing range ⇒ `partially_booked`, not
///    available, with every overlapping range listed.
/// 3. Otherwise ⇒ `available`.
#[must_use]
pub fn check_time_slot(bookings: &[Booking], requested: &TimeRange) -> AvailabilityStatus {
    if bookings.iter().any(|booking| booking.is_full_day) {
        return AvailabilityStatus::fully_booked();
    }

    let mut conflicts: Vec<TimeRange> = bookings
        .iter()
        .map(Booking::time_range)
        .filter(|range| range.overlaps(requested))
        .collect();

    if conflicts.is_empty() {
        return AvailabilityStatus::available();
    }

    conflicts.sort_by_key(|range| range.start());
    let message: String = format!(
        "Requested time {requested} overlaps existing bookings: {}",
        format_ranges(&conflicts)
    );
    AvailabilityStatus::partially_booked(false, conflicts, message)
}

/// Classifies a whole day without a specific requested window.
///
/// A day with bookings but no full-day booking is `partially_booked` yet
/// still `available: true`: some slots remain free.
#[must_use]
pub fn day_status(bookings: &[Booking]) -> AvailabilityStatus {
    if bookings.iter().any(|booking| booking.is_full_day) {
        return AvailabilityStatus::fully_booked();
    }

    if bookings.is_empty() {
        return AvailabilityStatus::available();
    }

    let ranges: Vec<TimeRange> = sorted_ranges(bookings);
    let message: String = format!("Room is partially booked: {}", format_ranges(&ranges));
    AvailabilityStatus::partially_booked(true, ranges, message)
}
