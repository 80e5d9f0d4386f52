// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room query operations.

use crate::data_models::RoomRow;
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;
use diesel::prelude::*;
use roombook_domain::Room;

/// Fetch a room by ID.
pub fn get_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<Option<Room>, PersistenceError> {
    let row: Option<RoomRow> = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .first::<RoomRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_room: {e}")))?;
    Ok(row.map(RoomRow::into_domain))
}

/// List rooms, optionally restricted to those accepting bookings.
///
/// Results are ordered by name for stable display.
pub fn list_rooms(
    conn: &mut SqliteConnection,
    only_available: bool,
) -> Result<Vec<Room>, PersistenceError> {
    let rows: Vec<RoomRow> = if only_available {
        rooms::table
            .filter(rooms::is_available.eq(1))
            .order(rooms::name.asc())
            .load::<RoomRow>(conn)
    } else {
        rooms::table.order(rooms::name.asc()).load::<RoomRow>(conn)
    }
    .map_err(|e| PersistenceError::QueryFailed(format!("list_rooms: {e}")))?;

    Ok(rows.into_iter().map(RoomRow::into_domain).collect())
}
