// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod cancellation;
mod day_window;
mod error;
mod time_range;
mod types;
mod validation;

pub use availability::{AvailabilityKind, AvailabilityStatus, check_time_slot, day_status};
pub use cancellation::{
    CANCELLATION_CUTOFF_HOURS, CREATION_GRACE_HOURS, evaluate_cancellation,
};
pub use day_window::{
    RETENTION_MONTHS, date_at_time, day_bounds, format_calendar_date, parse_calendar_date,
    retention_cutoff,
};
pub use error::DomainError;
pub use time_range::{TimeOfDay, TimeRange};
pub use types::{
    Booking, BookingStatus, CompanyHours, HoursTransaction, Room, TransactionKind,
};
pub use validation::{
    BUSINESS_CLOSE, BUSINESS_OPEN, MIN_BOOKING_MINUTES, full_day_range, validate_booking_window,
    validate_hours_amount, validate_room_bookable, validate_room_fields,
};
