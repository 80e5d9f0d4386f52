// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session write operations.
//!
//! Password hashing happens here so plaintext passwords never leave the
//! mutation path.

use crate::data_models::{NewSession, NewUser, SessionData, UserRecord, UserRow, format_timestamp};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;
use crate::queries::users::get_user_row_by_login;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use time::{Duration, OffsetDateTime};
use tracing::info;

/// Insert a user account with a bcrypt-hashed password.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if the login name is
/// taken.
pub fn insert_user(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: &str,
    company: Option<&str>,
    created_at: OffsetDateTime,
) -> Result<UserRecord, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::QueryFailed(format!("bcrypt hash: {e}")))?;

    let record = NewUser {
        login_name: login_name.to_string(),
        display_name: display_name.to_string(),
        password_hash,
        role: role.to_string(),
        company: company.map(ToString::to_string),
        is_disabled: 0,
        created_at: format_timestamp(created_at)?,
    };

    diesel::insert_into(users::table)
        .values(&record)
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;
    let row: UserRow = users::table
        .filter(users::user_id.eq(user_id))
        .first::<UserRow>(conn)?;

    info!(user_id, login_name, "User account created");
    Ok(row.into_record())
}

/// Verify a login name and password against the stored hash.
///
/// Returns `None` on unknown login, wrong password, or a disabled account;
/// callers cannot distinguish the three.
pub fn verify_user_credentials(
    conn: &mut SqliteConnection,
    login_name: &str,
    password: &str,
) -> Result<Option<UserRecord>, PersistenceError> {
    let Some(row) = get_user_row_by_login(conn, login_name)? else {
        return Ok(None);
    };

    if row.is_disabled != 0 {
        return Ok(None);
    }

    let matches: bool = bcrypt::verify(password, &row.password_hash)
        .map_err(|e| PersistenceError::QueryFailed(format!("bcrypt verify: {e}")))?;
    if !matches {
        return Ok(None);
    }

    Ok(Some(row.into_record()))
}

/// Set a user's disabled flag.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the user does not exist.
pub fn set_user_disabled(
    conn: &mut SqliteConnection,
    user_id: i64,
    disabled: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set(users::is_disabled.eq(i32::from(disabled)))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("user {user_id}")));
    }
    Ok(())
}

/// Create a session for a user.
pub fn insert_session(
    conn: &mut SqliteConnection,
    token: &str,
    user_id: i64,
    now: OffsetDateTime,
    ttl_minutes: i64,
) -> Result<SessionData, PersistenceError> {
    let now_value: String = format_timestamp(now)?;
    let expires_value: String = format_timestamp(now + Duration::minutes(ttl_minutes))?;

    let record = NewSession {
        session_token: token.to_string(),
        user_id,
        created_at: now_value.clone(),
        last_activity_at: now_value,
        expires_at: expires_value.clone(),
    };

    diesel::insert_into(sessions::table)
        .values(&record)
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    Ok(SessionData {
        session_id,
        session_token: token.to_string(),
        user_id,
        expires_at: expires_value,
    })
}

/// Record session activity.
pub fn touch_session(
    conn: &mut SqliteConnection,
    token: &str,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_token.eq(token)))
        .set(sessions::last_activity_at.eq(format_timestamp(now)?))
        .execute(conn)?;
    Ok(())
}

/// Delete a session (logout). Deleting an unknown token is not an error.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(token))).execute(conn)?;
    Ok(())
}

/// Delete all sessions whose expiry has passed.
pub fn purge_expired_sessions(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    let now_value: String = format_timestamp(now)?;
    let deleted: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now_value)))
            .execute(conn)?;
    Ok(deleted)
}
