// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking write operations.
//!
//! ## Conflict hardening
//!
//! An application-level availability pre-check alone leaves a window where
//! two concurrent requests both pass the check and both write. The insert
//! here closes that window: the availability check is re-run against the
//! room's day bookings inside the same `SQLite` immediate transaction that
//! performs the insert. `SQLite` serializes writers, so at most one of two
//! racing overlapping requests can commit; the other observes the first's
//! row and reports a conflict. The schema's partial unique index on
//! full-day bookings backstops the same invariant.

use crate::data_models::{BookingRow, NewBooking, format_timestamp};
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::queries::bookings::bookings_for_room_day;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use roombook_domain::{
    AvailabilityStatus, Booking, BookingStatus, TimeOfDay, check_time_slot, format_calendar_date,
};
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

/// The fields of a booking to be created.
///
/// Times are the final persisted window: for full-day bookings the caller
/// has already substituted the business-hours sentinels.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub user_id: i64,
    pub room_id: i64,
    pub booking_date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_full_day: bool,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Outcome of a conflict-checked insert.
#[derive(Debug, Clone)]
pub enum BookingWriteOutcome {
    /// The booking was persisted.
    Created(Booking),
    /// Another booking holds the slot; nothing was written.
    Conflict(AvailabilityStatus),
}

/// Insert a booking, re-checking availability inside the transaction.
///
/// # Errors
///
/// Returns an error if the transaction or any query fails. An availability
/// conflict is not an error; it is reported as
/// [`BookingWriteOutcome::Conflict`].
pub fn insert_booking_checked(
    conn: &mut SqliteConnection,
    draft: &BookingDraft,
) -> Result<BookingWriteOutcome, PersistenceError> {
    let created_at: String = format_timestamp(draft.created_at)?;

    let outcome: BookingWriteOutcome =
        conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
            let day_bookings: Vec<Booking> =
                bookings_for_room_day(conn, draft.room_id, draft.booking_date, None)?;

            let requested = roombook_domain::TimeRange::from_parts(
                draft.start_time,
                draft.end_time,
            );
            let status: AvailabilityStatus = check_time_slot(&day_bookings, &requested);
            if !status.available {
                return Ok(BookingWriteOutcome::Conflict(status));
            }

            let record = NewBooking {
                user_id: draft.user_id,
                room_id: draft.room_id,
                booking_date: format_calendar_date(draft.booking_date),
                start_time: draft.start_time.to_string(),
                end_time: draft.end_time.to_string(),
                is_full_day: i32::from(draft.is_full_day),
                status: BookingStatus::Active.as_str().to_string(),
                notes: draft.notes.clone(),
                created_at: created_at.clone(),
            };

            diesel::insert_into(bookings::table)
                .values(&record)
                .execute(conn)?;

            let booking_id: i64 = get_last_insert_rowid(conn)?;
            let row: BookingRow = bookings::table
                .filter(bookings::booking_id.eq(booking_id))
                .first::<BookingRow>(conn)?;

            Ok(BookingWriteOutcome::Created(row.into_domain()?))
        })?;

    match &outcome {
        BookingWriteOutcome::Created(booking) => {
            info!(
                booking_id = booking.booking_id,
                room_id = booking.room_id,
                date = %format_calendar_date(booking.booking_date),
                "Booking created"
            );
        }
        BookingWriteOutcome::Conflict(status) => {
            warn!(
                room_id = draft.room_id,
                date = %format_calendar_date(draft.booking_date),
                kind = %status.kind,
                "Booking rejected by in-transaction conflict check"
            );
        }
    }

    Ok(outcome)
}

/// Set a booking's status.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the booking does not exist.
pub fn set_booking_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    status: BookingStatus,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
            .set(bookings::status.eq(status.as_str()))
            .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "booking {booking_id}"
        )));
    }
    Ok(())
}

/// Transition active bookings whose window has fully elapsed to `completed`.
///
/// Zero-padded `YYYY-MM-DD` dates and `HH:MM` times compare
/// lexicographically in chronological order, so the cutoff is expressible
/// in the DSL directly.
pub fn complete_elapsed_bookings(
    conn: &mut SqliteConnection,
    today: Date,
    now_time: TimeOfDay,
) -> Result<usize, PersistenceError> {
    let today_value: String = format_calendar_date(today);
    let now_value: String = now_time.to_string();

    let updated: usize = diesel::update(
        bookings::table
            .filter(bookings::status.eq(BookingStatus::Active.as_str()))
            .filter(
                bookings::booking_date.lt(today_value.clone()).or(
                    bookings::booking_date
                        .eq(today_value)
                        .and(bookings::end_time.le(now_value)),
                ),
            ),
    )
    .set(bookings::status.eq(BookingStatus::Completed.as_str()))
    .execute(conn)?;

    if updated > 0 {
        info!(count = updated, "Marked elapsed bookings completed");
    }
    Ok(updated)
}

/// Bulk-delete bookings whose date is older than the retention cutoff.
///
/// This is the only path that deletes booking rows. Ledger transactions
/// referencing purged bookings are detached first so the append-only
/// ledger survives the purge.
pub fn purge_bookings_before(
    conn: &mut SqliteConnection,
    cutoff: Date,
) -> Result<usize, PersistenceError> {
    use crate::diesel_schema::hours_transactions;

    let cutoff_value: String = format_calendar_date(cutoff);

    let deleted: usize = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let purged_ids: Vec<i64> = bookings::table
            .filter(bookings::booking_date.lt(cutoff_value.clone()))
            .select(bookings::booking_id)
            .load::<i64>(conn)?;

        if purged_ids.is_empty() {
            return Ok(0);
        }

        diesel::update(
            hours_transactions::table
                .filter(hours_transactions::booking_id.eq_any(purged_ids.clone())),
        )
        .set(hours_transactions::booking_id.eq(None::<i64>))
        .execute(conn)?;

        let deleted: usize = diesel::delete(
            bookings::table.filter(bookings::booking_id.eq_any(purged_ids)),
        )
        .execute(conn)?;
        Ok(deleted)
    })?;

    if deleted > 0 {
        info!(count = deleted, cutoff = %format_calendar_date(cutoff), "Purged expired bookings");
    }
    Ok(deleted)
}
