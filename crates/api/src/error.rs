// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API error taxonomy and the explicit cross-layer translations.
//!
//! Domain and persistence errors never cross the API boundary as-is:
//! [`translate_domain_error`] and [`translate_persistence_error`] map each
//! variant onto the API contract, and the server maps each [`ApiError`]
//! variant onto exactly one HTTP status.

use crate::password_policy::PasswordPolicyError;
use roombook_domain::{AvailabilityKind, DomainError};
use roombook_persistence::PersistenceError;

/// Failures of authentication or authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller could not be identified.
    AuthenticationFailed {
        /// Why identification failed.
        reason: String,
    },
    /// The caller is known but lacks the required role.
    Unauthorized {
        /// The attempted action.
        action: String,
        /// The role the action requires.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// The API-contract errors. One HTTP status per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be identified (401).
    AuthenticationFailed {
        /// Why identification failed.
        reason: String,
    },
    /// The caller lacks the required role or ownership (403).
    Unauthorized {
        /// The attempted action.
        action: String,
        /// The role the action requires.
        required_role: String,
    },
    /// A request field is missing or malformed (400).
    InvalidInput {
        /// The offending field, in its wire spelling.
        field: String,
        /// What is wrong with it.
        message: String,
    },
    /// The named resource does not exist (404).
    ResourceNotFound {
        /// What kind of resource was looked up.
        resource_type: String,
        /// What was looked up and missed.
        message: String,
    },
    /// The requested slot is taken (409). `kind` becomes the wire `type`
    /// discriminator.
    Conflict {
        /// Whether the day is fully or partially booked.
        kind: AvailabilityKind,
        /// The evaluator's message, listing conflicting ranges.
        message: String,
    },
    /// The booking was cancelled before (400).
    AlreadyCancelled {
        /// Which booking, for the response body.
        message: String,
    },
    /// Neither cancellation threshold is met any more (400).
    CancellationWindowExpired {
        /// Explanation naming both thresholds.
        message: String,
    },
    /// A business rule rejected the request (400).
    DomainRuleViolation {
        /// The violated rule.
        rule: String,
        /// What the rule rejected.
        message: String,
    },
    /// The password does not meet the account policy (400).
    PasswordPolicyViolation {
        /// Which policy requirement failed.
        message: String,
    },
    /// Unexpected failure (500). Only the message is surfaced, never a
    /// stack trace.
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Conflict { kind, message } => {
                write!(f, "Booking conflict ({kind}): {message}")
            }
            Self::AlreadyCancelled { message }
            | Self::CancellationWindowExpired { message }
            | Self::PasswordPolicyViolation { message } => write!(f, "{message}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Maps a domain error onto the API contract.
///
/// Parse and validation failures become [`ApiError::InvalidInput`] tagged
/// with the wire field they concern; rule rejections keep their own
/// variants so the server can pick the right status.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let input = |field: &str, message: String| ApiError::InvalidInput {
        field: field.to_string(),
        message,
    };

    match err {
        DomainError::InvalidTime(msg) => input("time", msg),
        DomainError::InvalidDate {
            date_string,
            reason,
        } => input("bookingDate", format!("Invalid date '{date_string}': {reason}")),
        DomainError::InvalidTimeRange { start, end } => input(
            "startTime",
            format!("Start time {start} must be before end time {end}"),
        ),
        DomainError::BookingTooShort { minutes, minimum } => input(
            "endTime",
            format!(
                "Booking duration of {minutes} minutes is below the minimum of {minimum} minutes"
            ),
        ),
        DomainError::OutsideBusinessHours { range, open, close } => input(
            "startTime",
            format!("Requested time {range} falls outside business hours {open}-{close}"),
        ),
        DomainError::InvalidRoomName(msg) => input("name", msg),
        DomainError::InvalidCapacity { capacity } => input(
            "capacity",
            format!("Room capacity must be positive, got {capacity}"),
        ),
        DomainError::InvalidHoursAmount { amount } => input(
            "amount",
            format!("Hours amount must be positive and finite, got {amount}"),
        ),
        DomainError::InvalidStatus(value) => {
            input("status", format!("'{value}' is not a booking status"))
        }
        DomainError::InvalidTransactionKind(value) => input(
            "kind",
            format!("'{value}' is not an hours transaction kind"),
        ),
        DomainError::RoomNotBookable { name } => ApiError::DomainRuleViolation {
            rule: String::from("room_available"),
            message: format!("Room '{name}' is not currently accepting bookings"),
        },
        DomainError::CancellationNotAllowedForStatus { status } => ApiError::DomainRuleViolation {
            rule: String::from("cancellable_status"),
            message: format!("A booking with status '{status}' cannot be cancelled"),
        },
        DomainError::AlreadyCancelled { booking_id } => ApiError::AlreadyCancelled {
            message: format!("Booking {booking_id} is already cancelled"),
        },
        err @ DomainError::CancellationWindowExpired { .. } => {
            ApiError::CancellationWindowExpired {
                message: err.to_string(),
            }
        }
    }
}

/// Maps a persistence error onto the API contract.
///
/// Session failures surface as authentication failures; missing records
/// keep their 404 shape; constraint rejections become rule violations.
/// Everything else is an internal error carrying only the message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SessionNotFound(_) => ApiError::AuthenticationFailed {
            reason: String::from("Unknown session token"),
        },
        PersistenceError::SessionExpired(_) => ApiError::AuthenticationFailed {
            reason: String::from("Session has expired"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: what,
        },
        PersistenceError::ConstraintViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("storage_constraint"),
            message: msg,
        },
        err => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
