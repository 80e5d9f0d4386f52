// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use roombook_persistence::Persistence;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::auth::{AuthenticatedUser, Role};
use crate::handlers::{create_room, register_user};
use crate::request_response::{
    CreateBookingRequest, CreateRoomRequest, RegisterUserRequest, RoomInfo, UserInfo,
};

pub const ADMIN_PASSWORD: &str = "Adm1n-Sekrit-Pass!";
pub const USER_PASSWORD: &str = "Us3r-Sekrit-Pass!";

pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::parse("2026-03-02T09:00:00Z", &Rfc3339).unwrap()
}

pub fn actor_from(info: &UserInfo) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: info.user_id,
        login_name: info.login_name.clone(),
        role: Role::parse(&info.role).unwrap(),
        company: info.company.clone(),
    }
}

/// Registers the bootstrap admin account.
pub fn register_admin(persistence: &mut Persistence) -> AuthenticatedUser {
    let info: UserInfo = register_user(
        persistence,
        RegisterUserRequest {
            login_name: String::from("admin"),
            display_name: String::from("Admin One"),
            password: ADMIN_PASSWORD.to_string(),
            confirmation: ADMIN_PASSWORD.to_string(),
            company: None,
        },
        test_now(),
    )
    .unwrap();
    assert_eq!(info.role, "admin");
    actor_from(&info)
}

/// Registers a regular user belonging to the Acme company.
pub fn register_member(persistence: &mut Persistence, login: &str) -> AuthenticatedUser {
    let info: UserInfo = register_user(
        persistence,
        RegisterUserRequest {
            login_name: login.to_string(),
            display_name: format!("Member {login}"),
            password: USER_PASSWORD.to_string(),
            confirmation: USER_PASSWORD.to_string(),
            company: Some(String::from("Acme")),
        },
        test_now(),
    )
    .unwrap();
    actor_from(&info)
}

/// A workspace with an admin, one member, and one bookable room.
pub fn setup() -> (Persistence, AuthenticatedUser, AuthenticatedUser, RoomInfo) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin: AuthenticatedUser = register_admin(&mut persistence);
    let member: AuthenticatedUser = register_member(&mut persistence, "alice");

    let room: RoomInfo = create_room(
        &mut persistence,
        &admin,
        CreateRoomRequest {
            name: String::from("Boardroom"),
            capacity: 8,
            floor: 2,
            is_available: true,
        },
    )
    .unwrap()
    .room;

    (persistence, admin, member, room)
}

pub fn t(value: &str) -> roombook_domain::TimeOfDay {
    roombook_domain::TimeOfDay::parse(value).unwrap()
}

/// A time-slot booking request for the given room and window.
pub fn booking_request(
    room_id: i64,
    booking_date: &str,
    start: &str,
    end: &str,
) -> CreateBookingRequest {
    CreateBookingRequest {
        room_id,
        booking_date: booking_date.to_string(),
        start_time: Some(t(start)),
        end_time: Some(t(end)),
        is_full_day_booking: false,
        notes: None,
    }
}

/// A full-day booking request for the given room and date.
pub fn full_day_request(room_id: i64, booking_date: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        room_id,
        booking_date: booking_date.to_string(),
        start_time: None,
        end_time: None,
        is_full_day_booking: true,
        notes: None,
    }
}

