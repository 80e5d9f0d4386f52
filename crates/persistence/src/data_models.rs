// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the Diesel schema and domain types.
//!
//! Dates, times, and statuses are stored as text; conversion into domain
//! types happens here so a corrupt row surfaces as
//! [`PersistenceError::CorruptRecord`] instead of a panic.

use crate::diesel_schema::{bookings, company_hours, hours_transactions, rooms, sessions, users};
use crate::error::PersistenceError;
use diesel::prelude::*;
use roombook_domain::{
    Booking, BookingStatus, CompanyHours, HoursTransaction, Room, TimeOfDay, TransactionKind,
    parse_calendar_date,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Parses an RFC 3339 timestamp column.
fn parse_timestamp(column: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::CorruptRecord(format!("{column} '{value}': {e}")))
}

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted (out of RFC 3339
/// range).
pub(crate) fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::CorruptRecord(format!("timestamp: {e}")))
}

#[derive(Debug, Clone, Queryable)]
pub struct RoomRow {
    pub room_id: i64,
    pub name: String,
    pub capacity: i32,
    pub floor: i32,
    pub is_available: i32,
}

impl RoomRow {
    pub fn into_domain(self) -> Room {
        Room {
            room_id: self.room_id,
            name: self.name,
            capacity: self.capacity,
            floor: self.floor,
            is_available: self.is_available != 0,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub struct NewRoom {
    pub name: String,
    pub capacity: i32,
    pub floor: i32,
    pub is_available: i32,
}

/// A stored user account.
///
/// The password hash stays inside the persistence layer; callers verify
/// credentials through `Persistence::verify_user_credentials`.
#[derive(Debug, Clone, Queryable)]
pub struct UserRow {
    pub user_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub company: Option<String>,
    pub is_disabled: i32,
    pub created_at: String,
}

impl UserRow {
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            user_id: self.user_id,
            login_name: self.login_name,
            display_name: self.display_name,
            role: self.role,
            company: self.company,
            is_disabled: self.is_disabled != 0,
            created_at: self.created_at,
        }
    }
}

/// User account data exposed to the API layer (no password hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub role: String,
    pub company: Option<String>,
    pub is_disabled: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub company: Option<String>,
    pub is_disabled: i32,
    pub created_at: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct SessionRow {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

impl SessionRow {
    pub fn expires_at_parsed(&self) -> Result<OffsetDateTime, PersistenceError> {
        parse_timestamp("sessions.expires_at", &self.expires_at)
    }
}

/// Session data exposed to the API layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub expires_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession {
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_full_day: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl BookingRow {
    pub fn into_domain(self) -> Result<Booking, PersistenceError> {
        let corrupt = |what: &str, detail: String| {
            PersistenceError::CorruptRecord(format!("bookings.{what}: {detail}"))
        };

        let booking_date = parse_calendar_date(&self.booking_date)
            .map_err(|e| corrupt("booking_date", e.to_string()))?;
        let start_time = TimeOfDay::parse(&self.start_time)
            .map_err(|e| corrupt("start_time", e.to_string()))?;
        let end_time =
            TimeOfDay::parse(&self.end_time).map_err(|e| corrupt("end_time", e.to_string()))?;
        let status: BookingStatus = self
            .status
            .parse()
            .map_err(|e: roombook_domain::DomainError| corrupt("status", e.to_string()))?;
        let created_at = parse_timestamp("bookings.created_at", &self.created_at)?;

        Ok(Booking {
            booking_id: self.booking_id,
            user_id: self.user_id,
            room_id: self.room_id,
            booking_date,
            start_time,
            end_time,
            is_full_day: self.is_full_day != 0,
            status,
            notes: self.notes,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking {
    pub user_id: i64,
    pub room_id: i64,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_full_day: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct CompanyHoursRow {
    pub company_hours_id: i64,
    pub company: String,
    pub total_hours: f64,
    pub used_hours: f64,
    pub is_active: i32,
}

impl CompanyHoursRow {
    pub fn into_domain(self) -> CompanyHours {
        CompanyHours {
            company_hours_id: self.company_hours_id,
            company: self.company,
            total_hours: self.total_hours,
            used_hours: self.used_hours,
            is_active: self.is_active != 0,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = company_hours)]
pub struct NewCompanyHours {
    pub company: String,
    pub total_hours: f64,
    pub used_hours: f64,
    pub is_active: i32,
}

#[derive(Debug, Clone, Queryable)]
pub struct HoursTransactionRow {
    pub transaction_id: i64,
    pub company_hours_id: i64,
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub booking_id: Option<i64>,
    pub created_at: String,
}

impl HoursTransactionRow {
    pub fn into_domain(self) -> Result<HoursTransaction, PersistenceError> {
        let kind: TransactionKind = self.kind.parse().map_err(
            |e: roombook_domain::DomainError| {
                PersistenceError::CorruptRecord(format!("hours_transactions.kind: {e}"))
            },
        )?;
        let created_at = parse_timestamp("hours_transactions.created_at", &self.created_at)?;
        Ok(HoursTransaction {
            transaction_id: self.transaction_id,
            company_hours_id: self.company_hours_id,
            kind,
            amount: self.amount,
            description: self.description,
            booking_id: self.booking_id,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hours_transactions)]
pub struct NewHoursTransaction {
    pub company_hours_id: i64,
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub booking_id: Option<i64>,
    pub created_at: String,
}
