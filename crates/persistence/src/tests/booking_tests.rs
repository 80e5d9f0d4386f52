// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the conflict-checked booking insert.

use crate::tests::{create_test_room, create_test_user, draft};
use crate::{BookingWriteOutcome, Persistence};
use roombook_domain::{AvailabilityKind, BookingStatus};

fn created(outcome: BookingWriteOutcome) -> roombook_domain::Booking {
    match outcome {
        BookingWriteOutcome::Created(booking) => booking,
        BookingWriteOutcome::Conflict(status) => {
            panic!("expected creation, got conflict: {}", status.message)
        }
    }
}

#[test]
fn test_insert_into_empty_day_succeeds() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room = create_test_room(&mut persistence, "Boardroom");

    let outcome = persistence
        .create_booking_checked(&draft(
            user.user_id,
            room.room_id,
            "2026-03-10",
            "10:00",
            "12:00",
            false,
        ))
        .unwrap();

    let booking = created(outcome);
    assert_eq!(booking.status, BookingStatus::Active);
    assert_eq!(booking.room_id, room.room_id);
    assert_eq!(booking.start_time.to_string(), "10:00");
    assert_eq!(booking.end_time.to_string(), "12:00");
}

#[test]
fn test_overlapping_insert_is_rejected_without_write() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room = create_test_room(&mut persistence, "Boardroom");

    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );

    let outcome = persistence
        .create_booking_checked(&draft(
            user.user_id,
            room.room_id,
            "2026-03-10",
            "11:00",
            "13:00",
            false,
        ))
        .unwrap();

    match outcome {
        BookingWriteOutcome::Conflict(status) => {
            assert_eq!(status.kind, AvailabilityKind::PartiallyBooked);
            assert!(status.message.contains("10:00-12:00"));
        }
        BookingWriteOutcome::Created(_) => panic!("overlapping insert must not succeed"),
    }

    // Exactly one booking exists for the day.
    let day = persistence
        .bookings_for_room_day(room.room_id, crate::tests::test_date("2026-03-10"), None)
        .unwrap();
    assert_eq!(day.len(), 1);
}

#[test]
fn test_adjacent_insert_succeeds() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room = create_test_room(&mut persistence, "Boardroom");

    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );

    // Touching boundary: ends where the other starts.
    let outcome = persistence
        .create_booking_checked(&draft(
            user.user_id,
            room.room_id,
            "2026-03-10",
            "12:00",
            "14:00",
            false,
        ))
        .unwrap();
    created(outcome);
}

#[test]
fn test_full_day_blocks_subsequent_inserts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room = create_test_room(&mut persistence, "Boardroom");

    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room.room_id,
                "2026-03-10",
                "08:00",
                "18:00",
                true,
            ))
            .unwrap(),
    );

    let outcome = persistence
        .create_booking_checked(&draft(
            user.user_id,
            room.room_id,
            "2026-03-10",
            "10:00",
            "12:00",
            false,
        ))
        .unwrap();
    match outcome {
        BookingWriteOutcome::Conflict(status) => {
            assert_eq!(status.kind, AvailabilityKind::FullyBooked);
        }
        BookingWriteOutcome::Created(_) => panic!("full-day booking must block the date"),
    }
}

#[test]
fn test_full_day_after_partial_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room = create_test_room(&mut persistence, "Boardroom");

    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );

    // A full-day booking spans 08:00-18:00 and overlaps the existing one.
    let outcome = persistence
        .create_booking_checked(&draft(
            user.user_id,
            room.room_id,
            "2026-03-10",
            "08:00",
            "18:00",
            true,
        ))
        .unwrap();
    assert!(matches!(outcome, BookingWriteOutcome::Conflict(_)));
}

#[test]
fn test_same_slot_different_room_or_day_succeeds() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room_a = create_test_room(&mut persistence, "Boardroom");
    let room_b = create_test_room(&mut persistence, "Huddle");

    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room_a.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );

    // Same slot, different room.
    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room_b.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );

    // Same slot and room, different day.
    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room_a.room_id,
                "2026-03-11",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );
}

#[test]
fn test_cancelled_booking_frees_the_slot() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = create_test_user(&mut persistence, "alice");
    let room = create_test_room(&mut persistence, "Boardroom");

    let booking = created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );

    persistence
        .set_booking_status(booking.booking_id, BookingStatus::Cancelled)
        .unwrap();

    // The same slot can be booked again.
    created(
        persistence
            .create_booking_checked(&draft(
                user.user_id,
                room.room_id,
                "2026-03-10",
                "10:00",
                "12:00",
                false,
            ))
            .unwrap(),
    );
}

#[test]
fn test_set_status_on_missing_booking_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result = persistence.set_booking_status(9999, BookingStatus::Cancelled);
    assert!(matches!(
        result,
        Err(crate::PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_concurrent_overlapping_inserts_yield_one_success() {
    // Two connections to the same database file, racing the same slot.
    // The in-transaction re-check plus SQLite's writer serialization must
    // admit exactly one booking.
    let db_path = std::env::temp_dir().join(format!(
        "roombook_race_test_{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&db_path);
    let db_url: String = db_path.to_string_lossy().into_owned();

    let (user_id, room_id) = {
        let mut persistence = Persistence::new_with_file(&db_url).unwrap();
        let user = create_test_user(&mut persistence, "alice");
        let room = create_test_room(&mut persistence, "Boardroom");
        (user.user_id, room.room_id)
    };

    let barrier = std::sync::Arc::new(std::sync::Barrier::new(2));
    let mut handles = Vec::new();
    for window in [("10:00", "12:00"), ("11:00", "13:00")] {
        let barrier = std::sync::Arc::clone(&barrier);
        let db_url = db_url.clone();
        handles.push(std::thread::spawn(move || {
            let mut persistence = Persistence::new_with_file(&db_url).unwrap();
            let draft = draft(user_id, room_id, "2026-03-10", window.0, window.1, false);
            barrier.wait();
            persistence.create_booking_checked(&draft).unwrap()
        }));
    }

    let outcomes: Vec<BookingWriteOutcome> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let created_count: usize = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, BookingWriteOutcome::Created(_)))
        .count();
    let conflict_count: usize = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, BookingWriteOutcome::Conflict(_)))
        .count();
    assert_eq!(created_count, 1);
    assert_eq!(conflict_count, 1);

    let _ = std::fs::remove_file(&db_path);
}
