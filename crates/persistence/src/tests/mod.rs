// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod booking_tests;

use crate::{BookingDraft, Persistence, UserRecord};
use roombook_domain::{Room, TimeOfDay, parse_calendar_date};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::parse("2026-03-02T09:00:00Z", &Rfc3339).unwrap()
}

pub fn test_date(value: &str) -> Date {
    parse_calendar_date(value).unwrap()
}

pub fn test_time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

pub fn create_test_user(persistence: &mut Persistence, login: &str) -> UserRecord {
    persistence
        .create_user(
            login,
            "Test User",
            "correct-horse-battery",
            "user",
            Some("Acme"),
            test_now(),
        )
        .unwrap()
}

pub fn create_test_room(persistence: &mut Persistence, name: &str) -> Room {
    persistence.create_room(name, 8, 2, true).unwrap()
}

pub fn draft(
    user_id: i64,
    room_id: i64,
    date: &str,
    start: &str,
    end: &str,
    full_day: bool,
) -> BookingDraft {
    BookingDraft {
        user_id,
        room_id,
        booking_date: test_date(date),
        start_time: test_time(start),
        end_time: test_time(end),
        is_full_day: full_day,
        notes: None,
        created_at: test_now(),
    }
}
