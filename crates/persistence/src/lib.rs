// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the RoomBook system.
//!
//! Built on Diesel over `SQLite`. `SQLite` is the only backend: it serves
//! development, tests (fast, deterministic, in-memory), and production
//! deployments of this single-writer service.
//!
//! ## Concurrency
//!
//! The booking insert re-runs the availability check inside the same
//! immediate transaction that writes the row (see `mutations::bookings`),
//! so the check-then-write sequence cannot double-book under concurrent
//! requests. A partial unique index enforces the one-full-day-booking
//! invariant at the schema level as well.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use roombook_domain::{Booking, BookingStatus, CompanyHours, HoursTransaction, Room, TimeOfDay};
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, OffsetDateTime};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use data_models::{SessionData, UserRecord};
pub use error::PersistenceError;
pub use mutations::bookings::{BookingDraft, BookingWriteOutcome};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with a unique in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = sqlite::initialize_database(path)?;
        Ok(Self { conn })
    }

    // ── Rooms ───────────────────────────────────────────────────────

    /// Creates a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. duplicate name).
    pub fn create_room(
        &mut self,
        name: &str,
        capacity: i32,
        floor: i32,
        is_available: bool,
    ) -> Result<Room, PersistenceError> {
        mutations::rooms::insert_room(&mut self.conn, name, capacity, floor, is_available)
    }

    /// Updates a room's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the update fails.
    pub fn update_room(
        &mut self,
        room_id: i64,
        name: &str,
        capacity: i32,
        floor: i32,
        is_available: bool,
    ) -> Result<Room, PersistenceError> {
        mutations::rooms::update_room(&mut self.conn, room_id, name, capacity, floor, is_available)
    }

    /// Fetches a room by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&mut self, room_id: i64) -> Result<Option<Room>, PersistenceError> {
        queries::rooms::get_room(&mut self.conn, room_id)
    }

    /// Lists rooms, optionally only those accepting bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&mut self, only_available: bool) -> Result<Vec<Room>, PersistenceError> {
        queries::rooms::list_rooms(&mut self.conn, only_available)
    }

    // ── Bookings ────────────────────────────────────────────────────

    /// The day query: non-cancelled bookings for a room on a calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unreachable. Not
    /// retried; the error propagates to the caller.
    pub fn bookings_for_room_day(
        &mut self,
        room_id: i64,
        date: Date,
        exclude_booking_id: Option<i64>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::bookings_for_room_day(&mut self.conn, room_id, date, exclude_booking_id)
    }

    /// All bookings for a room on a day, any status (admin view).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn bookings_for_room_day_all(
        &mut self,
        room_id: i64,
        date: Date,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::bookings_for_room_day_all(&mut self.conn, room_id, date)
    }

    /// Fetches a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// A user's active and completed bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn bookings_for_user(&mut self, user_id: i64) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::bookings_for_user(&mut self.conn, user_id)
    }

    /// Inserts a booking after re-checking availability inside the write
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; a slot conflict is
    /// reported via [`BookingWriteOutcome::Conflict`], not an error.
    pub fn create_booking_checked(
        &mut self,
        draft: &BookingDraft,
    ) -> Result<BookingWriteOutcome, PersistenceError> {
        mutations::bookings::insert_booking_checked(&mut self.conn, draft)
    }

    /// Sets a booking's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist.
    pub fn set_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::set_booking_status(&mut self.conn, booking_id, status)
    }

    /// Transitions elapsed active bookings to `completed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn complete_elapsed_bookings(
        &mut self,
        today: Date,
        now_time: TimeOfDay,
    ) -> Result<usize, PersistenceError> {
        mutations::bookings::complete_elapsed_bookings(&mut self.conn, today, now_time)
    }

    /// Deletes bookings older than the retention cutoff date.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_bookings_before(&mut self, cutoff: Date) -> Result<usize, PersistenceError> {
        mutations::bookings::purge_bookings_before(&mut self.conn, cutoff)
    }

    // ── Users and sessions ──────────────────────────────────────────

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the login name is taken or hashing fails.
    pub fn create_user(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
        company: Option<&str>,
        created_at: OffsetDateTime,
    ) -> Result<UserRecord, PersistenceError> {
        mutations::users::insert_user(
            &mut self.conn,
            login_name,
            display_name,
            password,
            role,
            company,
            created_at,
        )
    }

    /// Verifies login credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or hash verification fails.
    pub fn verify_user_credentials(
        &mut self,
        login_name: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, PersistenceError> {
        mutations::users::verify_user_credentials(&mut self.conn, login_name, password)
    }

    /// Fetches a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Fetches a user by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user_by_login(&mut self.conn, login_name)
    }

    /// Lists all user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserRecord>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Counts user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Sets a user's disabled flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    pub fn set_user_disabled(
        &mut self,
        user_id: i64,
        disabled: bool,
    ) -> Result<(), PersistenceError> {
        mutations::users::set_user_disabled(&mut self.conn, user_id, disabled)
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        token: &str,
        user_id: i64,
        now: OffsetDateTime,
        ttl_minutes: i64,
    ) -> Result<SessionData, PersistenceError> {
        mutations::users::insert_session(&mut self.conn, token, user_id, now, ttl_minutes)
    }

    /// Resolves a session token, enforcing expiry.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SessionNotFound`] or
    /// [`PersistenceError::SessionExpired`].
    pub fn get_session(
        &mut self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<SessionData, PersistenceError> {
        queries::users::get_session(&mut self.conn, token, now)
    }

    /// Records session activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn touch_session(
        &mut self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::users::touch_session(&mut self.conn, token, now)
    }

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, token)
    }

    /// Deletes expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_expired_sessions(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        mutations::users::purge_expired_sessions(&mut self.conn, now)
    }

    // ── Company hours ───────────────────────────────────────────────

    /// Fetches a company's hours ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_company_hours(
        &mut self,
        company: &str,
    ) -> Result<Option<CompanyHours>, PersistenceError> {
        queries::hours::get_company_hours(&mut self.conn, company)
    }

    /// Fetches a ledger's transaction history.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn transactions_for_ledger(
        &mut self,
        company_hours_id: i64,
    ) -> Result<Vec<HoursTransaction>, PersistenceError> {
        queries::hours::transactions_for_ledger(&mut self.conn, company_hours_id)
    }

    /// Creates a company's hours ledger with an initial grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the company already has a ledger.
    pub fn create_company_hours(
        &mut self,
        company: &str,
        initial_hours: f64,
        now: OffsetDateTime,
    ) -> Result<CompanyHours, PersistenceError> {
        mutations::hours::create_company_hours(&mut self.conn, company, initial_hours, now)
    }

    /// Grants additional hours to a ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger does not exist.
    pub fn grant_hours(
        &mut self,
        company_hours_id: i64,
        amount: f64,
        description: &str,
        now: OffsetDateTime,
    ) -> Result<CompanyHours, PersistenceError> {
        mutations::hours::grant_hours(&mut self.conn, company_hours_id, amount, description, now)
    }

    /// Debits a booking's hours from a ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger does not exist.
    pub fn debit_hours_for_booking(
        &mut self,
        company_hours_id: i64,
        amount: f64,
        booking_id: i64,
        now: OffsetDateTime,
    ) -> Result<CompanyHours, PersistenceError> {
        mutations::hours::debit_hours_for_booking(
            &mut self.conn,
            company_hours_id,
            amount,
            booking_id,
            now,
        )
    }

    /// Refunds the hours a cancelled booking had consumed, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn refund_hours_for_booking(
        &mut self,
        booking_id: i64,
        now: OffsetDateTime,
    ) -> Result<Option<f64>, PersistenceError> {
        mutations::hours::refund_hours_for_booking(&mut self.conn, booking_id, now)
    }
}
