// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Everything here is plumbing the Diesel DSL cannot express: PRAGMA
//! configuration, embedded migrations, and `last_insert_rowid()`. Domain
//! queries and mutations live in `queries/` and `mutations/` and stay in
//! the DSL.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row ID of the most recent insert on this connection.
///
/// Fresh rows are re-fetched by ID because `SQLite` does not support
/// `RETURNING` in every context.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Opens a `SQLite` database, configures it, and applies migrations.
///
/// PRAGMAs set on every connection:
/// - `foreign_keys = ON`, then read back and verified: without it the
///   schema's references (bookings to rooms/users, transactions to
///   ledgers) go unenforced.
/// - `busy_timeout`, so a second writer waits for the lock and racing
///   conflict-checked inserts serialize instead of erroring.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened, a PRAGMA fails,
/// foreign keys stay off, or a migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // PRAGMA has no Diesel DSL; raw SQL is the only route.
    for pragma in ["PRAGMA foreign_keys = ON", "PRAGMA busy_timeout = 5000"] {
        diesel::sql_query(pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::Setup(format!("{pragma}: {e}")))?;
    }

    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Migration(e.to_string()))?;

    verify_foreign_keys(&mut conn)?;

    info!(database_url, "SQLite database initialized");
    Ok(conn)
}

/// Reads back `PRAGMA foreign_keys` and fails unless enforcement is on.
fn verify_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    #[derive(QueryableByName)]
    struct ForeignKeysRow {
        #[diesel(sql_type = Integer)]
        foreign_keys: i32,
    }

    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeysDisabled);
    }
    Ok(())
}
