// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_range::{TimeOfDay, TimeRange};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// A bookable meeting room.
///
/// Rooms are created and edited by administrators; the booking engine only
/// reads them. The `is_available` flag is a global on/off switch independent
/// of any bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Canonical numeric identifier assigned by the database.
    pub room_id: i64,
    /// Human-readable room name.
    pub name: String,
    /// Seating capacity.
    pub capacity: i32,
    /// Floor the room is on.
    pub floor: i32,
    /// Whether the room currently accepts bookings at all.
    pub is_available: bool,
}

/// Lifecycle status of a booking.
///
/// Transitions: `Active → Cancelled` via the cancellation policy and
/// `Active → Completed` via the time-based maintenance sweep. Both target
/// states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// The booking holds its time slot.
    Active,
    /// The booking was cancelled and no longer blocks the slot.
    Cancelled,
    /// The booked time has elapsed. Still blocks historical queries.
    Completed,
}

impl BookingStatus {
    /// The storage representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Whether this status participates in conflict detection.
    ///
    /// Cancelled bookings never conflict; active and completed ones do.
    #[must_use]
    pub const fn blocks_slot(&self) -> bool {
        matches!(self, Self::Active | Self::Completed)
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One room reservation on one calendar day.
///
/// The date has day granularity; the time window is carried separately as
/// wall-clock times. Full-day bookings store the business-hours bounds as
/// sentinel start/end values, so `start_time < end_time` holds for every
/// booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Canonical numeric identifier assigned by the database.
    pub booking_id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The booked room.
    pub room_id: i64,
    /// The calendar day of the reservation.
    pub booking_date: Date,
    /// Wall-clock start of the reserved window.
    pub start_time: TimeOfDay,
    /// Wall-clock end of the reserved window (exclusive).
    pub end_time: TimeOfDay,
    /// Whether this reservation claims the whole business day.
    pub is_full_day: bool,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the booking record was created (UTC).
    pub created_at: OffsetDateTime,
}

impl Booking {
    /// The reserved time window.
    ///
    /// Persisted bookings uphold `start_time < end_time`, so no
    /// revalidation happens here.
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange::from_parts(self.start_time, self.end_time)
    }
}

/// Kind of an hours-ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Hours granted to the company.
    Add,
    /// Hours consumed by a booking.
    Use,
    /// Hours returned after a cancellation.
    Refund,
}

impl TransactionKind {
    /// The storage representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Use => "use",
            Self::Refund => "refund",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "use" => Ok(Self::Use),
            "refund" => Ok(Self::Refund),
            _ => Err(DomainError::InvalidTransactionKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A company's bookable-hours allotment.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyHours {
    /// Canonical numeric identifier assigned by the database.
    pub company_hours_id: i64,
    /// The company this allotment belongs to.
    pub company: String,
    /// Total hours ever granted.
    pub total_hours: f64,
    /// Hours consumed by bookings (net of refunds).
    pub used_hours: f64,
    /// Whether the ledger is currently debited by new bookings.
    pub is_active: bool,
}

impl CompanyHours {
    /// Remaining hours (`total - used`). May be negative if overdrawn.
    #[must_use]
    pub fn remaining_hours(&self) -> f64 {
        self.total_hours - self.used_hours
    }

    /// Whether more hours have been used than granted.
    #[must_use]
    pub fn is_overdrawn(&self) -> bool {
        self.remaining_hours() < 0.0
    }
}

/// One entry in a company's append-only hours ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct HoursTransaction {
    /// Canonical numeric identifier assigned by the database.
    pub transaction_id: i64,
    /// The ledger this entry belongs to.
    pub company_hours_id: i64,
    /// What kind of movement this records.
    pub kind: TransactionKind,
    /// Hours moved. Always positive; the kind carries the direction.
    pub amount: f64,
    /// Human-readable description.
    pub description: String,
    /// The booking this movement is tied to, if any.
    pub booking_id: Option<i64>,
    /// When the entry was recorded (UTC).
    pub created_at: OffsetDateTime,
}
