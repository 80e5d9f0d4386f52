// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical calendar-day handling.
//!
//! A "calendar day" is always the UTC window `[midnight, next midnight)`.
//! Date strings are parsed by component, never through locale-sensitive
//! parsing, so a `YYYY-MM-DD` value names the same day on every host.
//! Both the day query and the booking writer go through this module; there
//! is no other date-normalization path.

use crate::error::DomainError;
use crate::time_range::TimeOfDay;
use time::{Date, Duration, Month, OffsetDateTime, Time};

/// Bookings whose date is older than this many calendar months are eligible
/// for bulk deletion by the retention sweep.
pub const RETENTION_MONTHS: u8 = 3;

/// Parses a `YYYY-MM-DD` date string into a calendar date.
///
/// The string is split on `-` and each component converted explicitly.
///
/// # Errors
///
/// Returns an error if the string does not have three numeric components
/// or does not name a real calendar date.
pub fn parse_calendar_date(value: &str) -> Result<Date, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidDate {
        date_string: value.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = value.split('-');
    let (Some(year_str), Some(month_str), Some(day_str), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected YYYY-MM-DD"));
    };

    let year: i32 = year_str
        .parse()
        .map_err(|_| invalid("non-numeric year component"))?;
    let month_number: u8 = month_str
        .parse()
        .map_err(|_| invalid("non-numeric month component"))?;
    let day: u8 = day_str
        .parse()
        .map_err(|_| invalid("non-numeric day component"))?;

    let month: Month =
        Month::try_from(month_number).map_err(|_| invalid("month must be between 01 and 12"))?;

    Date::from_calendar_date(year, month, day)
        .map_err(|_| invalid("day does not exist in that month"))
}

/// Formats a calendar date back to its canonical `YYYY-MM-DD` form.
#[must_use]
pub fn format_calendar_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The UTC day window `[midnight, next midnight)` for a calendar date.
#[must_use]
pub fn day_bounds(date: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start: OffsetDateTime = date.with_time(Time::MIDNIGHT).assume_utc();
    (start, start + Duration::days(1))
}

/// The UTC instant at which a wall-clock time falls on a calendar date.
#[must_use]
pub fn date_at_time(date: Date, time_of_day: TimeOfDay) -> OffsetDateTime {
    let (start_of_day, _) = day_bounds(date);
    start_of_day + Duration::minutes(i64::from(time_of_day.minutes()))
}

/// The newest date that is outside the retention window.
///
/// Subtracts [`RETENTION_MONTHS`] calendar months from `today`, clamping the
/// day to the target month's length (e.g. May 31 minus 3 months is
/// February 28/29).
#[must_use]
pub fn retention_cutoff(today: Date) -> Date {
    let mut year: i32 = today.year();
    let mut month_number: i16 = i16::from(u8::from(today.month())) - i16::from(RETENTION_MONTHS);
    while month_number < 1 {
        month_number += 12;
        year -= 1;
    }

    // month_number is in 1..=12 here, so both conversions are infallible.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let month: Month = match Month::try_from(month_number as u8) {
        Ok(month) => month,
        Err(_) => Month::January,
    };

    let day: u8 = today.day().min(time::util::days_in_month(month, year));
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}
