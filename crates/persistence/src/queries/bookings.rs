// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking query operations.
//!
//! The day query is the availability evaluator's only data source: it
//! returns the bookings for one room on one canonical calendar day,
//! restricted to the statuses that block a slot (`active`, `completed`).
//! Cancelled bookings are never returned. No ordering is guaranteed.

use crate::data_models::BookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use diesel::prelude::*;
use roombook_domain::{Booking, format_calendar_date};
use time::Date;

/// Statuses that participate in conflict detection.
const BLOCKING_STATUSES: [&str; 2] = ["active", "completed"];

fn rows_into_domain(rows: Vec<BookingRow>) -> Result<Vec<Booking>, PersistenceError> {
    rows.into_iter().map(BookingRow::into_domain).collect()
}

/// Fetch all non-cancelled bookings for a room on a calendar day.
///
/// `exclude_booking_id` skips one booking, used when re-checking
/// availability while editing that booking.
pub fn bookings_for_room_day(
    conn: &mut SqliteConnection,
    room_id: i64,
    date: Date,
    exclude_booking_id: Option<i64>,
) -> Result<Vec<Booking>, PersistenceError> {
    let date_value: String = format_calendar_date(date);
    let mut query = bookings::table
        .filter(bookings::room_id.eq(room_id))
        .filter(bookings::booking_date.eq(date_value))
        .filter(bookings::status.eq_any(BLOCKING_STATUSES))
        .into_boxed();

    if let Some(excluded) = exclude_booking_id {
        query = query.filter(bookings::booking_id.ne(excluded));
    }

    let rows: Vec<BookingRow> = query
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("bookings_for_room_day: {e}")))?;
    rows_into_domain(rows)
}

/// Fetch every booking for a room on a calendar day, regardless of status.
///
/// Admin console view; includes cancelled bookings.
pub fn bookings_for_room_day_all(
    conn: &mut SqliteConnection,
    room_id: i64,
    date: Date,
) -> Result<Vec<Booking>, PersistenceError> {
    let date_value: String = format_calendar_date(date);
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::room_id.eq(room_id))
        .filter(bookings::booking_date.eq(date_value))
        .order(bookings::start_time.asc())
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("bookings_for_room_day_all: {e}")))?;
    rows_into_domain(rows)
}

/// Fetch a booking by ID.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_booking: {e}")))?;
    row.map(BookingRow::into_domain).transpose()
}

/// Fetch a user's active and completed bookings, newest date first.
pub fn bookings_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::user_id.eq(user_id))
        .filter(bookings::status.eq_any(BLOCKING_STATUSES))
        .order((bookings::booking_date.desc(), bookings::start_time.asc()))
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("bookings_for_user: {e}")))?;
    rows_into_domain(rows)
}
