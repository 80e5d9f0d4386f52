// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Handlers orchestrate domain rules and persistence for one operation
//! each. They receive the authenticated actor and the current instant
//! explicitly; nothing here reads ambient state or the wall clock.

use roombook_domain::{
    AvailabilityStatus, Booking, BookingStatus, CompanyHours, DomainError, Room, TimeOfDay,
    TimeRange, check_time_slot, day_status, evaluate_cancellation, format_calendar_date,
    full_day_range, parse_calendar_date, retention_cutoff, validate_booking_window,
    validate_hours_amount, validate_room_bookable, validate_room_fields,
};
use roombook_persistence::{BookingDraft, BookingWriteOutcome, Persistence, UserRecord};
use std::collections::HashMap;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthenticatedUser, AuthenticationService, AuthorizationService, Role};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AvailabilityResponse, BookingInfo, BookingResponse, CancelBookingRequest,
    CheckAvailabilityRequest, CheckType, CompanyHoursInfo, CompanyHoursResponse,
    CreateBookingRequest, CreateCompanyHoursRequest, CreateRoomRequest, DayBookingsResponse,
    GrantHoursRequest, HoursTransactionInfo, ListRoomsResponse, ListUsersResponse, LoginRequest,
    LoginResponse, MaintenanceResponse, RegisterUserRequest, RoomInfo, RoomResponse,
    SetUserDisabledRequest, UpdateRoomRequest, UserBookingsResponse, UserInfo, WhoAmIResponse,
};

fn user_record_to_info(record: UserRecord) -> UserInfo {
    UserInfo {
        user_id: record.user_id,
        login_name: record.login_name,
        display_name: record.display_name,
        role: record.role,
        company: record.company,
        is_disabled: record.is_disabled,
        created_at: record.created_at,
    }
}

fn room_to_info(room: Room) -> RoomInfo {
    RoomInfo {
        room_id: room.room_id,
        name: room.name,
        capacity: room.capacity,
        floor: room.floor,
        is_available: room.is_available,
    }
}

fn format_created_at(booking: &Booking) -> String {
    booking
        .created_at
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

fn booking_to_info(booking: Booking, room_name: String) -> BookingInfo {
    BookingInfo {
        booking_id: booking.booking_id,
        user_id: booking.user_id,
        room_id: booking.room_id,
        room_name,
        booking_date: format_calendar_date(booking.booking_date),
        start_time: booking.start_time,
        end_time: booking.end_time,
        is_full_day_booking: booking.is_full_day,
        status: booking.status,
        notes: booking.notes.clone(),
        created_at: format_created_at(&booking),
    }
}

/// Resolves room names for a batch of bookings.
fn resolve_bookings(
    persistence: &mut Persistence,
    bookings: Vec<Booking>,
) -> Result<Vec<BookingInfo>, ApiError> {
    let mut room_names: HashMap<i64, String> = HashMap::new();
    let mut infos: Vec<BookingInfo> = Vec::with_capacity(bookings.len());

    for booking in bookings {
        let room_name: String = match room_names.get(&booking.room_id) {
            Some(name) => name.clone(),
            None => {
                let name: String = persistence
                    .get_room(booking.room_id)
                    .map_err(translate_persistence_error)?
                    .map(|room| room.name)
                    .unwrap_or_default();
                room_names.insert(booking.room_id, name.clone());
                name
            }
        };
        infos.push(booking_to_info(booking, room_name));
    }
    Ok(infos)
}

fn get_room_or_not_found(
    persistence: &mut Persistence,
    room_id: i64,
) -> Result<Room, ApiError> {
    persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: format!("Room {room_id} does not exist"),
        })
}

// ── Accounts and sessions ───────────────────────────────────────────

/// Registers a new user account.
///
/// The first account created becomes the admin; every later account is a
/// regular user.
///
/// # Errors
///
/// Returns an error on empty names, password policy violations, or a
/// taken login name.
pub fn register_user(
    persistence: &mut Persistence,
    request: RegisterUserRequest,
    now: OffsetDateTime,
) -> Result<UserInfo, ApiError> {
    if request.login_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("loginName"),
            message: String::from("Login name cannot be empty"),
        });
    }
    if request.display_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("displayName"),
            message: String::from("Display name cannot be empty"),
        });
    }

    PasswordPolicy::default().validate(
        &request.password,
        &request.confirmation,
        &request.login_name,
        &request.display_name,
    )?;

    let existing: i64 = persistence
        .count_users()
        .map_err(translate_persistence_error)?;
    let role: Role = if existing == 0 { Role::Admin } else { Role::User };

    let record: UserRecord = persistence
        .create_user(
            &request.login_name,
            &request.display_name,
            &request.password,
            role.as_str(),
            request.company.as_deref(),
            now,
        )
        .map_err(translate_persistence_error)?;

    info!(
        user_id = record.user_id,
        login_name = %record.login_name,
        role = role.as_str(),
        "Registered user account"
    );
    Ok(user_record_to_info(record))
}

/// Verifies credentials and opens a session.
///
/// # Errors
///
/// Returns an authentication failure on bad credentials.
pub fn login(
    persistence: &mut Persistence,
    service: &AuthenticationService,
    request: LoginRequest,
    now: OffsetDateTime,
) -> Result<LoginResponse, ApiError> {
    let (session, record) =
        service.login(persistence, &request.login_name, &request.password, now)?;
    Ok(LoginResponse {
        token: session.session_token,
        expires_at: session.expires_at,
        user: user_record_to_info(record),
    })
}

/// Ends a session.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn logout(persistence: &mut Persistence, token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, token)
}

/// Returns the caller's account.
///
/// # Errors
///
/// Returns an error if the account no longer exists.
pub fn whoami(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<WhoAmIResponse, ApiError> {
    let record: UserRecord = persistence
        .get_user(actor.user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {} does not exist", actor.user_id),
        })?;
    Ok(WhoAmIResponse {
        user: user_record_to_info(record),
    })
}

// ── Availability ────────────────────────────────────────────────────

fn check_availability_inner(
    persistence: &mut Persistence,
    request: &CheckAvailabilityRequest,
) -> Result<AvailabilityStatus, ApiError> {
    let date: Date =
        parse_calendar_date(&request.booking_date).map_err(translate_domain_error)?;

    let bookings: Vec<Booking> = persistence
        .bookings_for_room_day(request.room_id, date, request.exclude_booking_id)
        .map_err(translate_persistence_error)?;

    match request.check_type {
        CheckType::Day => Ok(day_status(&bookings)),
        CheckType::TimeSlot => {
            let (Some(start), Some(end)) = (request.start_time, request.end_time) else {
                return Err(ApiError::InvalidInput {
                    field: String::from("startTime"),
                    message: String::from(
                        "startTime and endTime are required for a timeSlot check",
                    ),
                });
            };
            let requested: TimeRange =
                TimeRange::new(start, end).map_err(translate_domain_error)?;
            Ok(check_time_slot(&bookings, &requested))
        }
    }
}

/// Checks availability for a day or a specific time slot.
///
/// Never fails: malformed dates and store failures are reported inside
/// the response with `type = "unavailable"`, so callers always render a
/// uniform status.
#[must_use]
pub fn check_availability(
    persistence: &mut Persistence,
    request: &CheckAvailabilityRequest,
) -> AvailabilityResponse {
    match check_availability_inner(persistence, request) {
        Ok(status) => status.into(),
        Err(err) => AvailabilityStatus::unavailable(err.to_string()).into(),
    }
}

// ── Bookings ────────────────────────────────────────────────────────

/// Creates a booking.
///
/// The calendar date is normalized through the shared day-window parser,
/// full-day requests substitute the business-hours sentinels, duration
/// and business-hour rules are enforced here for every entry point, and
/// the final availability verdict comes from the conflict-checked insert.
/// When the owner's company has an active hours ledger, the booked
/// duration is debited against it.
///
/// # Errors
///
/// Returns `Conflict` if the slot is taken, `InvalidInput` for malformed
/// fields, and `ResourceNotFound` for an unknown room. Nothing is written
/// on failure.
pub fn create_booking(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: CreateBookingRequest,
    now: OffsetDateTime,
) -> Result<BookingResponse, ApiError> {
    let date: Date =
        parse_calendar_date(&request.booking_date).map_err(translate_domain_error)?;

    let range: TimeRange = if request.is_full_day_booking {
        full_day_range()
    } else {
        let (Some(start), Some(end)) = (request.start_time, request.end_time) else {
            return Err(ApiError::InvalidInput {
                field: String::from("startTime"),
                message: String::from(
                    "startTime and endTime are required unless isFullDayBooking is set",
                ),
            });
        };
        TimeRange::new(start, end).map_err(translate_domain_error)?
    };
    validate_booking_window(&range).map_err(translate_domain_error)?;

    let room: Room = get_room_or_not_found(persistence, request.room_id)?;
    validate_room_bookable(&room).map_err(translate_domain_error)?;

    let draft = BookingDraft {
        user_id: actor.user_id,
        room_id: room.room_id,
        booking_date: date,
        start_time: range.start(),
        end_time: range.end(),
        is_full_day: request.is_full_day_booking,
        notes: request.notes,
        created_at: now,
    };

    let booking: Booking = match persistence
        .create_booking_checked(&draft)
        .map_err(translate_persistence_error)?
    {
        BookingWriteOutcome::Created(booking) => booking,
        BookingWriteOutcome::Conflict(status) => {
            return Err(ApiError::Conflict {
                kind: status.kind,
                message: status.message,
            });
        }
    };

    debit_company_hours(persistence, actor, &booking, now)?;

    info!(
        booking_id = booking.booking_id,
        user_id = actor.user_id,
        room_id = room.room_id,
        "Created booking"
    );
    Ok(BookingResponse {
        booking: booking_to_info(booking, room.name),
    })
}

/// Debits the booked duration from the owner's company ledger, when one
/// exists and is active.
fn debit_company_hours(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    booking: &Booking,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let Some(company) = &actor.company else {
        return Ok(());
    };
    let Some(ledger) = persistence
        .get_company_hours(company)
        .map_err(translate_persistence_error)?
    else {
        return Ok(());
    };
    if !ledger.is_active {
        return Ok(());
    }

    let hours: f64 = f64::from(booking.time_range().duration_minutes()) / 60.0;
    persistence
        .debit_hours_for_booking(ledger.company_hours_id, hours, booking.booking_id, now)
        .map_err(translate_persistence_error)?;
    Ok(())
}

/// Cancels a booking.
///
/// Ownership is enforced first, then the cancellation window policy. On
/// success the status flips to `cancelled` and any hours the booking had
/// debited are explicitly refunded.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown booking, `Unauthorized` when
/// the caller neither owns it nor is an admin, and the policy errors for
/// a closed window or an already-cancelled booking.
pub fn cancel_booking(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &CancelBookingRequest,
    now: OffsetDateTime,
) -> Result<BookingResponse, ApiError> {
    let booking: Booking = persistence
        .get_booking(request.booking_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {} does not exist", request.booking_id),
        })?;

    AuthorizationService::authorize_booking_access(actor, booking.user_id, "cancel_booking")?;

    evaluate_cancellation(&booking, now).map_err(translate_domain_error)?;

    persistence
        .set_booking_status(booking.booking_id, BookingStatus::Cancelled)
        .map_err(translate_persistence_error)?;

    // Compensation is the caller's job, not the policy's: emit the refund
    // explicitly now that the transition happened.
    persistence
        .refund_hours_for_booking(booking.booking_id, now)
        .map_err(translate_persistence_error)?;

    let cancelled = Booking {
        status: BookingStatus::Cancelled,
        ..booking
    };
    let room_name: String = persistence
        .get_room(cancelled.room_id)
        .map_err(translate_persistence_error)?
        .map(|room| room.name)
        .unwrap_or_default();

    info!(
        booking_id = cancelled.booking_id,
        user_id = actor.user_id,
        "Cancelled booking"
    );
    Ok(BookingResponse {
        booking: booking_to_info(cancelled, room_name),
    })
}

/// Lists the caller's active and completed bookings.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn user_bookings(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<UserBookingsResponse, ApiError> {
    let bookings: Vec<Booking> = persistence
        .bookings_for_user(actor.user_id)
        .map_err(translate_persistence_error)?;
    Ok(UserBookingsResponse {
        bookings: resolve_bookings(persistence, bookings)?,
    })
}

// ── Rooms ───────────────────────────────────────────────────────────

/// Lists rooms currently accepting bookings.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_available_rooms(
    persistence: &mut Persistence,
) -> Result<ListRoomsResponse, ApiError> {
    let rooms: Vec<Room> = persistence
        .list_rooms(true)
        .map_err(translate_persistence_error)?;
    Ok(ListRoomsResponse {
        rooms: rooms.into_iter().map(room_to_info).collect(),
    })
}

/// Lists all rooms, including switched-off ones (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the store fails.
pub fn list_rooms(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<ListRoomsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_rooms")?;
    let rooms: Vec<Room> = persistence
        .list_rooms(false)
        .map_err(translate_persistence_error)?;
    Ok(ListRoomsResponse {
        rooms: rooms.into_iter().map(room_to_info).collect(),
    })
}

/// Creates a room (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the fields are
/// invalid.
pub fn create_room(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: CreateRoomRequest,
) -> Result<RoomResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_room")?;
    validate_room_fields(&request.name, request.capacity).map_err(translate_domain_error)?;

    let room: Room = persistence
        .create_room(
            &request.name,
            request.capacity,
            request.floor,
            request.is_available,
        )
        .map_err(translate_persistence_error)?;
    Ok(RoomResponse {
        room: room_to_info(room),
    })
}

/// Updates a room (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the fields are invalid,
/// or the room does not exist.
pub fn update_room(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    room_id: i64,
    request: UpdateRoomRequest,
) -> Result<RoomResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_room")?;
    validate_room_fields(&request.name, request.capacity).map_err(translate_domain_error)?;

    let room: Room = persistence
        .update_room(
            room_id,
            &request.name,
            request.capacity,
            request.floor,
            request.is_available,
        )
        .map_err(|err| match err {
            roombook_persistence::PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Room"),
                message: format!("Room {room_id} does not exist"),
            },
            other => translate_persistence_error(other),
        })?;
    Ok(RoomResponse {
        room: room_to_info(room),
    })
}

// ── Users (admin) ───────────────────────────────────────────────────

/// Lists all user accounts (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the store fails.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_users")?;
    let users: Vec<UserRecord> = persistence
        .list_users()
        .map_err(translate_persistence_error)?;
    Ok(ListUsersResponse {
        users: users.into_iter().map(user_record_to_info).collect(),
    })
}

/// Sets a user's disabled flag (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the user does not
/// exist.
pub fn set_user_disabled(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    user_id: i64,
    request: &SetUserDisabledRequest,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(actor, "set_user_disabled")?;
    persistence
        .set_user_disabled(user_id, request.disabled)
        .map_err(|err| match err {
            roombook_persistence::PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("User"),
                message: format!("User {user_id} does not exist"),
            },
            other => translate_persistence_error(other),
        })
}

/// Lists a room's bookings for a day, any status (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the date is malformed,
/// or the room does not exist.
pub fn list_room_day_bookings(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    room_id: i64,
    booking_date: &str,
) -> Result<DayBookingsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_room_day_bookings")?;
    let date: Date = parse_calendar_date(booking_date).map_err(translate_domain_error)?;
    let room: Room = get_room_or_not_found(persistence, room_id)?;

    let bookings: Vec<Booking> = persistence
        .bookings_for_room_day_all(room.room_id, date)
        .map_err(translate_persistence_error)?;
    let room_name: String = room.name;
    let infos: Vec<BookingInfo> = bookings
        .into_iter()
        .map(|booking| booking_to_info(booking, room_name.clone()))
        .collect();

    Ok(DayBookingsResponse {
        room_id,
        booking_date: format_calendar_date(date),
        bookings: infos,
    })
}

// ── Company hours (admin) ───────────────────────────────────────────

fn company_hours_to_info(ledger: &CompanyHours) -> CompanyHoursInfo {
    CompanyHoursInfo {
        company: ledger.company.clone(),
        total_hours: ledger.total_hours,
        used_hours: ledger.used_hours,
        remaining_hours: ledger.remaining_hours(),
        is_active: ledger.is_active,
    }
}

fn ledger_response(
    persistence: &mut Persistence,
    ledger: &CompanyHours,
) -> Result<CompanyHoursResponse, ApiError> {
    let transactions: Vec<HoursTransactionInfo> = persistence
        .transactions_for_ledger(ledger.company_hours_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|transaction| HoursTransactionInfo {
            kind: transaction.kind.as_str().to_string(),
            amount: transaction.amount,
            description: transaction.description,
            booking_id: transaction.booking_id,
            created_at: transaction
                .created_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
        })
        .collect();

    Ok(CompanyHoursResponse {
        allotment: company_hours_to_info(ledger),
        transactions,
    })
}

fn get_ledger_or_not_found(
    persistence: &mut Persistence,
    company: &str,
) -> Result<CompanyHours, ApiError> {
    persistence
        .get_company_hours(company)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Company hours"),
            message: format!("Company '{company}' has no hours allotment"),
        })
}

/// Creates a company's hours ledger (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the fields are invalid,
/// or the company already has a ledger.
pub fn create_company_hours(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &CreateCompanyHoursRequest,
    now: OffsetDateTime,
) -> Result<CompanyHoursResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_company_hours")?;
    if request.company.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("company"),
            message: String::from("Company name cannot be empty"),
        });
    }
    if !request.initial_hours.is_finite() || request.initial_hours < 0.0 {
        return Err(translate_domain_error(DomainError::InvalidHoursAmount {
            amount: request.initial_hours,
        }));
    }

    let ledger: CompanyHours = persistence
        .create_company_hours(&request.company, request.initial_hours, now)
        .map_err(translate_persistence_error)?;
    ledger_response(persistence, &ledger)
}

/// Grants additional hours to a company (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the amount is invalid,
/// or the company has no ledger.
pub fn grant_company_hours(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    company: &str,
    request: &GrantHoursRequest,
    now: OffsetDateTime,
) -> Result<CompanyHoursResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "grant_company_hours")?;
    validate_hours_amount(request.amount).map_err(translate_domain_error)?;

    let ledger: CompanyHours = get_ledger_or_not_found(persistence, company)?;
    let updated: CompanyHours = persistence
        .grant_hours(
            ledger.company_hours_id,
            request.amount,
            &request.description,
            now,
        )
        .map_err(translate_persistence_error)?;
    ledger_response(persistence, &updated)
}

/// Fetches a company's ledger and its history (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the company has no
/// ledger.
pub fn get_company_hours(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    company: &str,
) -> Result<CompanyHoursResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "get_company_hours")?;
    let ledger: CompanyHours = get_ledger_or_not_found(persistence, company)?;
    ledger_response(persistence, &ledger)
}

// ── Maintenance (admin) ─────────────────────────────────────────────

/// Transitions elapsed active bookings to `completed` (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the sweep fails.
pub fn complete_elapsed_bookings(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<MaintenanceResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "complete_elapsed_bookings")?;

    let now_time: TimeOfDay =
        TimeOfDay::from_minutes(u16::from(now.hour()) * 60 + u16::from(now.minute()));
    let affected: usize = persistence
        .complete_elapsed_bookings(now.date(), now_time)
        .map_err(translate_persistence_error)?;

    Ok(MaintenanceResponse {
        affected,
        message: format!("Marked {affected} elapsed bookings completed"),
    })
}

/// Deletes bookings older than the retention window (admin).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the sweep fails.
pub fn purge_expired_bookings(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<MaintenanceResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "purge_expired_bookings")?;

    let cutoff: Date = retention_cutoff(now.date());
    let affected: usize = persistence
        .purge_bookings_before(cutoff)
        .map_err(translate_persistence_error)?;

    Ok(MaintenanceResponse {
        affected,
        message: format!(
            "Purged {affected} bookings dated before {}",
            format_calendar_date(cutoff)
        ),
    })
}
