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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use auth::{
    AuthenticatedUser, AuthenticationService, AuthorizationService, DEFAULT_SESSION_TTL_MINUTES,
    Role,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    cancel_booking, check_availability, complete_elapsed_bookings, create_booking,
    create_company_hours, create_room, get_company_hours, grant_company_hours,
    list_available_rooms, list_room_day_bookings, list_rooms, list_users, login, logout,
    purge_expired_bookings, register_user, set_user_disabled, update_room, user_bookings, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AvailabilityResponse, BookingInfo, BookingResponse, CancelBookingRequest, CheckAvailabilityRequest,
    CheckType, CompanyHoursInfo, CompanyHoursResponse, CreateBookingRequest,
    CreateCompanyHoursRequest, CreateRoomRequest, DayBookingsResponse, GrantHoursRequest,
    HoursTransactionInfo, ListRoomsResponse, ListUsersResponse, LoginRequest, LoginResponse,
    MaintenanceResponse, RegisterUserRequest, RoomInfo, RoomResponse, SetUserDisabledRequest,
    UpdateRoomRequest, UserBookingsResponse, UserInfo, WhoAmIResponse,
};
