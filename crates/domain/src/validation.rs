// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and room validation rules.
//!
//! Minimum-duration and business-hours checks live here and are enforced by
//! the booking writer for every entry point; there is no second,
//! caller-side copy of these rules.

use crate::error::DomainError;
use crate::time_range::{TimeOfDay, TimeRange};
use crate::types::Room;

/// Business opening time. Full-day bookings use this as their sentinel
/// start time.
pub const BUSINESS_OPEN: TimeOfDay = TimeOfDay::from_minutes(8 * 60);

/// Business closing time. Full-day bookings use this as their sentinel
/// end time.
pub const BUSINESS_CLOSE: TimeOfDay = TimeOfDay::from_minutes(18 * 60);

/// Minimum booking duration in minutes.
pub const MIN_BOOKING_MINUTES: u16 = 120;

/// The canonical full-business-day range.
#[must_use]
pub const fn full_day_range() -> TimeRange {
    TimeRange::from_parts(BUSINESS_OPEN, BUSINESS_CLOSE)
}

/// Validates a requested booking window against duration and business-hour
/// rules.
///
/// `start < end` is already guaranteed by [`TimeRange`] construction.
///
/// # Errors
///
/// Returns an error if the window is shorter than [`MIN_BOOKING_MINUTES`]
/// or extends outside `[BUSINESS_OPEN, BUSINESS_CLOSE]`.
pub fn validate_booking_window(range: &TimeRange) -> Result<(), DomainError> {
    let minutes: u16 = range.duration_minutes();
    if minutes < MIN_BOOKING_MINUTES {
        return Err(DomainError::BookingTooShort {
            minutes,
            minimum: MIN_BOOKING_MINUTES,
        });
    }

    if range.start() < BUSINESS_OPEN || range.end() > BUSINESS_CLOSE {
        return Err(DomainError::OutsideBusinessHours {
            range: *range,
            open: BUSINESS_OPEN,
            close: BUSINESS_CLOSE,
        });
    }

    Ok(())
}

/// Validates admin-supplied room fields.
///
/// # Errors
///
/// Returns an error if the name is empty or the capacity is not positive.
pub fn validate_room_fields(name: &str, capacity: i32) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidRoomName(String::from(
            "Room name cannot be empty",
        )));
    }
    if capacity <= 0 {
        return Err(DomainError::InvalidCapacity { capacity });
    }
    Ok(())
}

/// Validates that a room's global availability switch is on.
///
/// # Errors
///
/// Returns [`DomainError::RoomNotBookable`] if the room is switched off.
pub fn validate_room_bookable(room: &Room) -> Result<(), DomainError> {
    if room.is_available {
        Ok(())
    } else {
        Err(DomainError::RoomNotBookable {
            name: room.name.clone(),
        })
    }
}

/// Validates an hours-ledger amount.
///
/// # Errors
///
/// Returns an error unless the amount is positive and finite.
pub fn validate_hours_amount(amount: f64) -> Result<(), DomainError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidHoursAmount { amount })
    }
}
