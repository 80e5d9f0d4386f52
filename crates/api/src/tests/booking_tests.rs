// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the booking writer.

use crate::error::ApiError;
use crate::handlers::{create_booking, get_company_hours, update_room, user_bookings};
use crate::request_response::{
    CreateBookingRequest, CreateCompanyHoursRequest, UpdateRoomRequest,
};
use crate::tests::helpers::{booking_request, full_day_request, setup, t, test_now};
use roombook_domain::{AvailabilityKind, BookingStatus};

#[test]
fn test_create_booking_persists_and_resolves_room() {
    let (mut persistence, _admin, member, room) = setup();
    let response = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    let booking = response.booking;
    assert_eq!(booking.room_name, "Boardroom");
    assert_eq!(booking.booking_date, "2026-03-10");
    assert_eq!(booking.start_time.to_string(), "10:00");
    assert_eq!(booking.end_time.to_string(), "12:00");
    assert_eq!(booking.status, BookingStatus::Active);
    assert!(!booking.is_full_day_booking);
    assert_eq!(booking.user_id, member.user_id);
}

#[test]
fn test_full_day_booking_uses_business_hours_sentinels() {
    let (mut persistence, _admin, member, room) = setup();
    let response = create_booking(
        &mut persistence,
        &member,
        full_day_request(room.room_id, "2026-03-10"),
        test_now(),
    )
    .unwrap();

    let booking = response.booking;
    assert!(booking.is_full_day_booking);
    assert_eq!(booking.start_time.to_string(), "08:00");
    assert_eq!(booking.end_time.to_string(), "18:00");
}

#[test]
fn test_overlapping_booking_is_a_conflict() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "11:00", "13:00"),
        test_now(),
    )
    .unwrap_err();

    match err {
        ApiError::Conflict { kind, message } => {
            assert_eq!(kind, AvailabilityKind::PartiallyBooked);
            assert!(message.contains("10:00-12:00"));
        }
        other => panic!("expected conflict, got {other}"),
    }
}

#[test]
fn test_booking_on_fully_booked_day_is_a_conflict() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        full_day_request(room.room_id, "2026-03-10"),
        test_now(),
    )
    .unwrap();

    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Conflict {
            kind: AvailabilityKind::FullyBooked,
            ..
        }
    ));
}

#[test]
fn test_minimum_duration_enforced_in_writer() {
    let (mut persistence, _admin, member, room) = setup();
    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "11:00"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
    assert!(err.to_string().contains("120"));
}

#[test]
fn test_business_hours_enforced_in_writer() {
    let (mut persistence, _admin, member, room) = setup();
    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "06:00", "09:00"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
    assert!(err.to_string().contains("business hours"));
}

#[test]
fn test_missing_times_without_full_day_flag_rejected() {
    let (mut persistence, _admin, member, room) = setup();
    let request = CreateBookingRequest {
        room_id: room.room_id,
        booking_date: String::from("2026-03-10"),
        start_time: Some(t("10:00")),
        end_time: None,
        is_full_day_booking: false,
        notes: None,
    };
    let err = create_booking(&mut persistence, &member, request, test_now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_unknown_room_is_not_found() {
    let (mut persistence, _admin, member, _room) = setup();
    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(9999, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_switched_off_room_rejects_bookings() {
    let (mut persistence, admin, member, room) = setup();
    update_room(
        &mut persistence,
        &admin,
        room.room_id,
        UpdateRoomRequest {
            name: room.name.clone(),
            capacity: room.capacity,
            floor: room.floor,
            is_available: false,
        },
    )
    .unwrap();

    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn test_malformed_date_rejected() {
    let (mut persistence, _admin, member, room) = setup();
    let err = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "10/03/2026", "10:00", "12:00"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_user_bookings_lists_own_bookings_with_room_names() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-11", "14:00", "16:00"),
        test_now(),
    )
    .unwrap();

    let response = user_bookings(&mut persistence, &member).unwrap();
    assert_eq!(response.bookings.len(), 2);
    assert!(response.bookings.iter().all(|b| b.room_name == "Boardroom"));
    // Newest date first.
    assert_eq!(response.bookings[0].booking_date, "2026-03-11");
}

#[test]
fn test_booking_debits_company_hours_when_ledger_active() {
    let (mut persistence, admin, member, room) = setup();
    crate::handlers::create_company_hours(
        &mut persistence,
        &admin,
        &CreateCompanyHoursRequest {
            company: String::from("Acme"),
            initial_hours: 100.0,
        },
        test_now(),
    )
    .unwrap();

    // Two-hour slot booking debits 2.0 hours.
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    let ledger = get_company_hours(&mut persistence, &admin, "Acme").unwrap();
    assert!((ledger.allotment.used_hours - 2.0).abs() < f64::EPSILON);
    assert!((ledger.allotment.remaining_hours - 98.0).abs() < f64::EPSILON);

    // A full-day booking debits the whole business window (10 hours).
    create_booking(
        &mut persistence,
        &member,
        full_day_request(room.room_id, "2026-03-11"),
        test_now(),
    )
    .unwrap();
    let ledger = get_company_hours(&mut persistence, &admin, "Acme").unwrap();
    assert!((ledger.allotment.used_hours - 12.0).abs() < f64::EPSILON);
}

#[test]
fn test_booking_without_ledger_skips_hour_debit() {
    let (mut persistence, _admin, member, room) = setup();
    // No ledger exists for Acme; creation must still succeed.
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();
}
