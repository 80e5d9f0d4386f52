// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Bearer tokens are resolved to users through the session store. The
//! booking engine never reads ambient session state: every handler
//! receives an explicit [`AuthenticatedUser`] produced here.

use rand::RngExt;
use rand::distr::Alphanumeric;
use roombook_persistence::{Persistence, SessionData, UserRecord};
use time::OffsetDateTime;
use tracing::info;

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

/// Length of generated session tokens.
const SESSION_TOKEN_LENGTH: usize = 48;

/// Roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular user: may browse rooms and manage their own bookings.
    User,
    /// Admin: may additionally manage rooms, users, bookings, and company
    /// hour allotments.
    Admin,
}

impl Role {
    /// The storage representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses a stored role string.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown role strings.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{value}'"),
            }),
        }
    }
}

/// An authenticated user with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's canonical ID.
    pub user_id: i64,
    /// The user's login name.
    pub login_name: String,
    /// The user's role.
    pub role: Role,
    /// The company whose hours ledger the user's bookings debit, if any.
    pub company: Option<String>,
}

impl AuthenticatedUser {
    fn from_record(record: &UserRecord) -> Result<Self, AuthError> {
        Ok(Self {
            user_id: record.user_id,
            login_name: record.login_name.clone(),
            role: Role::parse(&record.role)?,
            company: record.company.clone(),
        })
    }
}

/// Generates a random alphanumeric session token.
fn generate_session_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Authentication service resolving credentials and bearer tokens.
pub struct AuthenticationService {
    /// Session lifetime in minutes.
    session_ttl_minutes: i64,
}

impl AuthenticationService {
    /// Creates an authentication service with the given session TTL.
    #[must_use]
    pub const fn new(session_ttl_minutes: i64) -> Self {
        Self {
            session_ttl_minutes,
        }
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns an authentication failure for unknown logins, wrong
    /// passwords, and disabled accounts, without distinguishing them.
    pub fn login(
        &self,
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<(SessionData, UserRecord), ApiError> {
        let record: UserRecord = persistence
            .verify_user_credentials(login_name, password)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            })?;

        let token: String = generate_session_token();
        let session: SessionData = persistence
            .create_session(&token, record.user_id, now, self.session_ttl_minutes)
            .map_err(translate_persistence_error)?;

        info!(user_id = record.user_id, login_name, "User logged in");
        Ok((session, record))
    }

    /// Resolves a bearer token to an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an authentication failure if the token is unknown or
    /// expired, or the account is disabled.
    pub fn authenticate(
        &self,
        persistence: &mut Persistence,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<AuthenticatedUser, ApiError> {
        let session: SessionData = persistence
            .get_session(token, now)
            .map_err(translate_persistence_error)?;

        let record: UserRecord = persistence
            .get_user(session.user_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Session user no longer exists"),
            })?;

        if record.is_disabled {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        persistence
            .touch_session(token, now)
            .map_err(translate_persistence_error)?;

        AuthenticatedUser::from_record(&record).map_err(ApiError::from)
    }

    /// Ends a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn logout(persistence: &mut Persistence, token: &str) -> Result<(), ApiError> {
        persistence
            .delete_session(token)
            .map_err(translate_persistence_error)
    }
}

impl Default for AuthenticationService {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL_MINUTES)
    }
}

/// Authorization service for role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor has the Admin role.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_admin(actor: &AuthenticatedUser, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks that an actor may act on a booking: the owner may, and so
    /// may an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the booking nor is an
    /// admin.
    pub fn authorize_booking_access(
        actor: &AuthenticatedUser,
        booking_owner_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.user_id == booking_owner_id || actor.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("owner"),
            })
        }
    }
}
