// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names serialize in camelCase to match the wire contract
//! (`roomId`, `bookingDate`, `isFullDayBooking`, ...). Dates travel as
//! `YYYY-MM-DD` strings and times as `HH:MM`.

use roombook_domain::{
    AvailabilityKind, AvailabilityStatus, BookingStatus, TimeOfDay, TimeRange,
};
use serde::{Deserialize, Serialize};

/// API request to register a new user account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// The login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The password.
    pub password: String,
    /// The password confirmation.
    pub confirmation: String,
    /// The company whose hours ledger bookings debit, if any.
    #[serde(default)]
    pub company: Option<String>,
}

/// User account information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// The user's canonical ID.
    pub user_id: i64,
    /// The login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The role (`user` or `admin`).
    pub role: String,
    /// The user's company, if any.
    pub company: Option<String>,
    /// Whether the account is disabled.
    pub is_disabled: bool,
    /// When the account was created (RFC 3339).
    pub created_at: String,
}

/// API request to log in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// The login name.
    pub login_name: String,
    /// The password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The bearer token for subsequent requests.
    pub token: String,
    /// When the session expires (RFC 3339).
    pub expires_at: String,
    /// The authenticated user.
    pub user: UserInfo,
}

/// API response for the current session's user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    /// The authenticated user.
    pub user: UserInfo,
}

/// The granularity of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckType {
    /// Day-level status without a specific requested window.
    Day,
    /// A specific requested time window.
    TimeSlot,
}

/// API request to check availability.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    /// The room to check.
    pub room_id: i64,
    /// The calendar date (`YYYY-MM-DD`).
    pub booking_date: String,
    /// Requested start time (`timeSlot` checks only).
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// Requested end time (`timeSlot` checks only).
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Day-level or time-slot check.
    pub check_type: CheckType,
    /// Booking to exclude from the check (when re-checking during an
    /// edit).
    #[serde(default)]
    pub exclude_booking_id: Option<i64>,
}

/// API response for an availability check.
///
/// This shape is uniform: request errors are reported with
/// `type = "unavailable"` rather than an error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Whether the day/slot can accept a booking.
    pub is_available: bool,
    /// Classification discriminator.
    #[serde(rename = "type")]
    pub kind: AvailabilityKind,
    /// The booked ranges relevant to the verdict (`HH:MM-HH:MM`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_ranges: Option<Vec<TimeRange>>,
    /// Human-readable summary.
    pub message: String,
}

impl From<AvailabilityStatus> for AvailabilityResponse {
    fn from(status: AvailabilityStatus) -> Self {
        let booked_ranges: Option<Vec<TimeRange>> = if status.conflicts.is_empty() {
            None
        } else {
            Some(status.conflicts)
        };
        Self {
            is_available: status.available,
            kind: status.kind,
            booked_ranges,
            message: status.message,
        }
    }
}

/// API request to create a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// The room to book.
    pub room_id: i64,
    /// The calendar date (`YYYY-MM-DD`).
    pub booking_date: String,
    /// Requested start time. Ignored for full-day bookings.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// Requested end time. Ignored for full-day bookings.
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Whether to claim the whole business day.
    #[serde(default)]
    pub is_full_day_booking: bool,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// One booking, with its room resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInfo {
    /// The booking's canonical ID.
    pub booking_id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The booked room.
    pub room_id: i64,
    /// The room's display name.
    pub room_name: String,
    /// The calendar date (`YYYY-MM-DD`).
    pub booking_date: String,
    /// Start of the reserved window (`HH:MM`).
    pub start_time: TimeOfDay,
    /// End of the reserved window (`HH:MM`).
    pub end_time: TimeOfDay,
    /// Whether the reservation claims the whole business day.
    pub is_full_day_booking: bool,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the booking was created (RFC 3339).
    pub created_at: String,
}

/// API response carrying one booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// The booking.
    pub booking: BookingInfo,
}

/// API request to cancel a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    /// The booking to cancel.
    pub booking_id: i64,
}

/// API response listing the caller's bookings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingsResponse {
    /// Active and completed bookings, newest date first.
    pub bookings: Vec<BookingInfo>,
}

/// One room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    /// The room's canonical ID.
    pub room_id: i64,
    /// The room's display name.
    pub name: String,
    /// Seating capacity.
    pub capacity: i32,
    /// Floor the room is on.
    pub floor: i32,
    /// Whether the room accepts bookings.
    pub is_available: bool,
}

/// API response listing rooms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoomsResponse {
    /// The rooms.
    pub rooms: Vec<RoomInfo>,
}

/// API request to create a room (admin).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// The room's display name.
    pub name: String,
    /// Seating capacity.
    pub capacity: i32,
    /// Floor the room is on.
    pub floor: i32,
    /// Whether the room accepts bookings. Defaults to true.
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// API request to update a room (admin).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    /// The room's display name.
    pub name: String,
    /// Seating capacity.
    pub capacity: i32,
    /// Floor the room is on.
    pub floor: i32,
    /// Whether the room accepts bookings.
    pub is_available: bool,
}

/// API response carrying one room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    /// The room.
    pub room: RoomInfo,
}

/// API response listing user accounts (admin).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    /// The user accounts.
    pub users: Vec<UserInfo>,
}

/// API request to set a user's disabled flag (admin).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUserDisabledRequest {
    /// The new disabled state.
    pub disabled: bool,
}

/// API response listing a room's bookings for a day (admin).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookingsResponse {
    /// The room.
    pub room_id: i64,
    /// The calendar date (`YYYY-MM-DD`).
    pub booking_date: String,
    /// All bookings for the day, any status.
    pub bookings: Vec<BookingInfo>,
}

/// API request to create a company hours ledger (admin).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyHoursRequest {
    /// The company name.
    pub company: String,
    /// The initial hours grant.
    pub initial_hours: f64,
}

/// API request to grant additional hours (admin).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantHoursRequest {
    /// Hours to add.
    pub amount: f64,
    /// Description recorded on the ledger.
    pub description: String,
}

/// A company's hours allotment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHoursInfo {
    /// The company name.
    pub company: String,
    /// Total hours granted.
    pub total_hours: f64,
    /// Hours used (net of refunds).
    pub used_hours: f64,
    /// Remaining hours (`total - used`).
    pub remaining_hours: f64,
    /// Whether bookings currently debit this ledger.
    pub is_active: bool,
}

/// One hours-ledger transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursTransactionInfo {
    /// The movement kind (`add`, `use`, `refund`).
    pub kind: String,
    /// Hours moved.
    pub amount: f64,
    /// Description.
    pub description: String,
    /// Linked booking, if any.
    pub booking_id: Option<i64>,
    /// When the entry was recorded (RFC 3339).
    pub created_at: String,
}

/// API response carrying a ledger and its history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHoursResponse {
    /// The allotment.
    pub allotment: CompanyHoursInfo,
    /// The transaction log, oldest first.
    pub transactions: Vec<HoursTransactionInfo>,
}

/// API response for a maintenance sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    /// How many bookings the sweep affected.
    pub affected: usize,
    /// Human-readable summary.
    pub message: String,
}

const fn default_true() -> bool {
    true
}
