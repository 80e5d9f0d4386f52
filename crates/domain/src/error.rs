// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::time_range::{TimeOfDay, TimeRange};
use crate::types::BookingStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A time-of-day string could not be parsed.
    InvalidTime(String),
    /// A calendar date string could not be parsed.
    InvalidDate {
        /// The invalid date string.
        date_string: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A time range had `start >= end`.
    InvalidTimeRange {
        /// The requested start time.
        start: TimeOfDay,
        /// The requested end time.
        end: TimeOfDay,
    },
    /// A booking is shorter than the minimum duration.
    BookingTooShort {
        /// The requested duration in minutes.
        minutes: u16,
        /// The minimum permitted duration in minutes.
        minimum: u16,
    },
    /// A booking falls outside business hours.
    OutsideBusinessHours {
        /// The requested range.
        range: TimeRange,
        /// Business opening time.
        open: TimeOfDay,
        /// Business closing time.
        close: TimeOfDay,
    },
    /// Room name is empty or invalid.
    InvalidRoomName(String),
    /// Room capacity must be positive.
    InvalidCapacity {
        /// The invalid capacity value.
        capacity: i32,
    },
    /// The room is switched off for booking.
    RoomNotBookable {
        /// The room name.
        name: String,
    },
    /// The booking is already cancelled.
    AlreadyCancelled {
        /// The booking identifier.
        booking_id: i64,
    },
    /// Only active bookings may be cancelled.
    CancellationNotAllowedForStatus {
        /// The booking's current status.
        status: BookingStatus,
    },
    /// The cancellation window has closed.
    CancellationWindowExpired {
        /// Fractional hours until the booking starts.
        hours_until_start: f64,
        /// Fractional hours since the booking was created.
        hours_since_creation: f64,
    },
    /// An hours-ledger amount must be positive and finite.
    InvalidHoursAmount {
        /// The invalid amount.
        amount: f64,
    },
    /// A booking status string was not recognized.
    InvalidStatus(String),
    /// An hours-transaction kind string was not recognized.
    InvalidTransactionKind(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTime(msg) => write!(f, "Invalid time: {msg}"),
            Self::InvalidDate {
                date_string,
                reason,
            } => {
                write!(f, "Invalid date '{date_string}': {reason}")
            }
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Start time {start} must be before end time {end}")
            }
            Self::BookingTooShort { minutes, minimum } => {
                write!(
                    f,
                    "Booking duration of {minutes} minutes is below the minimum of {minimum} minutes"
                )
            }
            Self::OutsideBusinessHours { range, open, close } => {
                write!(
                    f,
                    "Requested time {range} falls outside business hours {open}-{close}"
                )
            }
            Self::InvalidRoomName(msg) => write!(f, "Invalid room name: {msg}"),
            Self::InvalidCapacity { capacity } => {
                write!(f, "Room capacity must be positive, got {capacity}")
            }
            Self::RoomNotBookable { name } => {
                write!(f, "Room '{name}' is not currently accepting bookings")
            }
            Self::AlreadyCancelled { booking_id } => {
                write!(f, "Booking {booking_id} is already cancelled")
            }
            Self::CancellationNotAllowedForStatus { status } => {
                write!(f, "A booking with status '{status}' cannot be cancelled")
            }
            Self::CancellationWindowExpired {
                hours_until_start,
                hours_since_creation,
            } => {
                write!(
                    f,
                    "Cancellation window has closed: bookings may be cancelled more than 24 hours \
                     before the start time or within 1 hour of creation \
                     ({hours_until_start:.1} hours until start, \
                     {hours_since_creation:.1} hours since creation)"
                )
            }
            Self::InvalidHoursAmount { amount } => {
                write!(f, "Hours amount must be positive and finite, got {amount}")
            }
            Self::InvalidStatus(value) => {
                write!(f, "'{value}' is not a booking status")
            }
            Self::InvalidTransactionKind(value) => {
                write!(f, "'{value}' is not an hours transaction kind")
            }
        }
    }
}

impl std::error::Error for DomainError {}
