// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellation policy for active bookings.
//!
//! A booking may be cancelled either well ahead of its start time or in a
//! short grace window right after it was created (immediate regret). Once
//! inside the 24-hour pre-booking window and past the grace period,
//! cancellation is blocked to protect room-utilization commitments.
//!
//! The policy performs no compensation: if hour-based billing is wired in,
//! the caller emits the refund transaction explicitly after a permitted
//! cancellation.

use crate::day_window::date_at_time;
use crate::error::DomainError;
use crate::types::{Booking, BookingStatus};
use time::OffsetDateTime;

/// Cancellation is free while the booking starts more than this many hours
/// in the future.
pub const CANCELLATION_CUTOFF_HOURS: f64 = 24.0;

/// Cancellation is always permitted within this many hours of creation.
pub const CREATION_GRACE_HOURS: f64 = 1.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Decides whether a booking may transition `active → cancelled` at `now`.
///
/// Permitted iff `hours_until_start > 24` OR `hours_since_creation <= 1`
/// (both fractional).
///
/// # Errors
///
/// - [`DomainError::AlreadyCancelled`] if the booking is already cancelled
///   (state unchanged)
/// - [`DomainError::CancellationNotAllowedForStatus`] if the booking is
///   completed
/// - [`DomainError::CancellationWindowExpired`] if neither threshold is met
pub fn evaluate_cancellation(booking: &Booking, now: OffsetDateTime) -> Result<(), DomainError> {
    match booking.status {
        BookingStatus::Cancelled => {
            return Err(DomainError::AlreadyCancelled {
                booking_id: booking.booking_id,
            });
        }
        BookingStatus::Completed => {
            return Err(DomainError::CancellationNotAllowedForStatus {
                status: booking.status,
            });
        }
        BookingStatus::Active => {}
    }

    let starts_at: OffsetDateTime = date_at_time(booking.booking_date, booking.start_time);
    let hours_until_start: f64 = (starts_at - now).as_seconds_f64() / SECONDS_PER_HOUR;
    let hours_since_creation: f64 = (now - booking.created_at).as_seconds_f64() / SECONDS_PER_HOUR;

    if hours_until_start > CANCELLATION_CUTOFF_HOURS
        || hours_since_creation <= CREATION_GRACE_HOURS
    {
        return Ok(());
    }

    Err(DomainError::CancellationWindowExpired {
        hours_until_start,
        hours_since_creation,
    })
}
