// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session query operations.

use crate::data_models::{SessionData, SessionRow, UserRecord, UserRow};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;
use diesel::prelude::*;
use time::OffsetDateTime;

/// Fetch a user by ID.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserRecord>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .first::<UserRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user: {e}")))?;
    Ok(row.map(UserRow::into_record))
}

/// Fetch the raw user row for a login name, including the password hash.
///
/// Only credential verification goes through this; everything else uses
/// [`UserRecord`].
pub(crate) fn get_user_row_by_login(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<Option<UserRow>, PersistenceError> {
    users::table
        .filter(users::login_name.eq(login_name))
        .first::<UserRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_row_by_login: {e}")))
}

/// Fetch a user by login name.
pub fn get_user_by_login(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<Option<UserRecord>, PersistenceError> {
    Ok(get_user_row_by_login(conn, login_name)?.map(UserRow::into_record))
}

/// List all user accounts, ordered by login name.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<UserRecord>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::login_name.asc())
        .load::<UserRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_users: {e}")))?;
    Ok(rows.into_iter().map(UserRow::into_record).collect())
}

/// Count user accounts.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    users::table
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_users: {e}")))
}

/// Resolve a session token, enforcing expiry.
///
/// # Errors
///
/// - [`PersistenceError::SessionNotFound`] if the token is unknown
/// - [`PersistenceError::SessionExpired`] if the session's expiry has
///   passed
pub fn get_session(
    conn: &mut SqliteConnection,
    token: &str,
    now: OffsetDateTime,
) -> Result<SessionData, PersistenceError> {
    let row: SessionRow = sessions::table
        .filter(sessions::session_token.eq(token))
        .first::<SessionRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_session: {e}")))?
        .ok_or_else(|| PersistenceError::SessionNotFound(token.to_string()))?;

    let expires_at: OffsetDateTime = row.expires_at_parsed()?;
    if expires_at <= now {
        return Err(PersistenceError::SessionExpired(token.to_string()));
    }

    Ok(SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        user_id: row.user_id,
        expires_at: row.expires_at,
    })
}
