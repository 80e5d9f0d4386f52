// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the availability check operation.

use crate::handlers::{check_availability, create_booking};
use crate::request_response::{AvailabilityResponse, CheckAvailabilityRequest, CheckType};
use crate::tests::helpers::{booking_request, full_day_request, setup, t, test_now};
use roombook_domain::AvailabilityKind;

fn slot_check(room_id: i64, date: &str, start: &str, end: &str) -> CheckAvailabilityRequest {
    CheckAvailabilityRequest {
        room_id,
        booking_date: date.to_string(),
        start_time: Some(t(start)),
        end_time: Some(t(end)),
        check_type: CheckType::TimeSlot,
        exclude_booking_id: None,
    }
}

fn day_check(room_id: i64, date: &str) -> CheckAvailabilityRequest {
    CheckAvailabilityRequest {
        room_id,
        booking_date: date.to_string(),
        start_time: None,
        end_time: None,
        check_type: CheckType::Day,
        exclude_booking_id: None,
    }
}

#[test]
fn test_empty_day_slot_check_is_available() {
    let (mut persistence, _admin, _member, room) = setup();
    let response: AvailabilityResponse = check_availability(
        &mut persistence,
        &slot_check(room.room_id, "2026-03-10", "10:00", "12:00"),
    );
    assert!(response.is_available);
    assert_eq!(response.kind, AvailabilityKind::Available);
    assert!(response.booked_ranges.is_none());
}

#[test]
fn test_adjacent_slot_is_available_and_overlap_is_not() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    // Touching boundary: available.
    let adjacent: AvailabilityResponse = check_availability(
        &mut persistence,
        &slot_check(room.room_id, "2026-03-10", "12:00", "14:00"),
    );
    assert!(adjacent.is_available);

    // Overlap: partially booked, conflict listed as HH:MM-HH:MM.
    let overlap: AvailabilityResponse = check_availability(
        &mut persistence,
        &slot_check(room.room_id, "2026-03-10", "09:00", "11:00"),
    );
    assert!(!overlap.is_available);
    assert_eq!(overlap.kind, AvailabilityKind::PartiallyBooked);
    let ranges = overlap.booked_ranges.unwrap();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].to_string(), "10:00-12:00");
    assert!(overlap.message.contains("10:00-12:00"));
}

#[test]
fn test_full_day_booking_blocks_every_slot() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        full_day_request(room.room_id, "2026-03-10"),
        test_now(),
    )
    .unwrap();

    for (start, end) in [("08:00", "10:00"), ("12:00", "14:00"), ("16:00", "18:00")] {
        let response: AvailabilityResponse = check_availability(
            &mut persistence,
            &slot_check(room.room_id, "2026-03-10", start, end),
        );
        assert!(!response.is_available);
        assert_eq!(response.kind, AvailabilityKind::FullyBooked);
    }
}

#[test]
fn test_day_check_partially_booked_is_still_available() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    let response: AvailabilityResponse =
        check_availability(&mut persistence, &day_check(room.room_id, "2026-03-10"));
    assert!(response.is_available);
    assert_eq!(response.kind, AvailabilityKind::PartiallyBooked);
    assert_eq!(
        response.booked_ranges.unwrap()[0].to_string(),
        "10:00-12:00"
    );
}

#[test]
fn test_day_check_with_full_day_booking() {
    let (mut persistence, _admin, member, room) = setup();
    create_booking(
        &mut persistence,
        &member,
        full_day_request(room.room_id, "2026-03-10"),
        test_now(),
    )
    .unwrap();

    let response: AvailabilityResponse =
        check_availability(&mut persistence, &day_check(room.room_id, "2026-03-10"));
    assert!(!response.is_available);
    assert_eq!(response.kind, AvailabilityKind::FullyBooked);
}

#[test]
fn test_check_reflects_new_booking_immediately() {
    let (mut persistence, _admin, member, room) = setup();

    let before: AvailabilityResponse =
        check_availability(&mut persistence, &day_check(room.room_id, "2026-03-10"));
    assert_eq!(before.kind, AvailabilityKind::Available);

    create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    let after: AvailabilityResponse =
        check_availability(&mut persistence, &day_check(room.room_id, "2026-03-10"));
    assert_eq!(after.kind, AvailabilityKind::PartiallyBooked);
}

#[test]
fn test_malformed_date_reports_unavailable_instead_of_failing() {
    let (mut persistence, _admin, _member, room) = setup();
    let response: AvailabilityResponse = check_availability(
        &mut persistence,
        &slot_check(room.room_id, "March 10, 2026", "10:00", "12:00"),
    );
    assert!(!response.is_available);
    assert_eq!(response.kind, AvailabilityKind::Unavailable);
    assert!(response.message.contains("March 10, 2026"));
}

#[test]
fn test_time_slot_check_requires_both_times() {
    let (mut persistence, _admin, _member, room) = setup();
    let request = CheckAvailabilityRequest {
        room_id: room.room_id,
        booking_date: String::from("2026-03-10"),
        start_time: Some(t("10:00")),
        end_time: None,
        check_type: CheckType::TimeSlot,
        exclude_booking_id: None,
    };
    let response: AvailabilityResponse = check_availability(&mut persistence, &request);
    assert!(!response.is_available);
    assert_eq!(response.kind, AvailabilityKind::Unavailable);
}

#[test]
fn test_exclude_booking_id_skips_own_booking() {
    let (mut persistence, _admin, member, room) = setup();
    let created = create_booking(
        &mut persistence,
        &member,
        booking_request(room.room_id, "2026-03-10", "10:00", "12:00"),
        test_now(),
    )
    .unwrap();

    // Re-checking the same window while editing the booking itself.
    let request = CheckAvailabilityRequest {
        exclude_booking_id: Some(created.booking.booking_id),
        ..slot_check(room.room_id, "2026-03-10", "10:00", "12:00")
    };
    let response: AvailabilityResponse = check_availability(&mut persistence, &request);
    assert!(response.is_available);
}
