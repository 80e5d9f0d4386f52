// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room write operations.

use crate::data_models::{NewRoom, RoomRow};
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use roombook_domain::Room;
use tracing::info;

/// Insert a room and return it with its assigned ID.
pub fn insert_room(
    conn: &mut SqliteConnection,
    name: &str,
    capacity: i32,
    floor: i32,
    is_available: bool,
) -> Result<Room, PersistenceError> {
    let record = NewRoom {
        name: name.to_string(),
        capacity,
        floor,
        is_available: i32::from(is_available),
    };

    diesel::insert_into(rooms::table)
        .values(&record)
        .execute(conn)?;

    let room_id: i64 = get_last_insert_rowid(conn)?;
    let row: RoomRow = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .first::<RoomRow>(conn)?;

    info!(room_id, name, "Room created");
    Ok(row.into_domain())
}

/// Update a room's fields.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the room does not exist.
pub fn update_room(
    conn: &mut SqliteConnection,
    room_id: i64,
    name: &str,
    capacity: i32,
    floor: i32,
    is_available: bool,
) -> Result<Room, PersistenceError> {
    let updated: usize = diesel::update(rooms::table.filter(rooms::room_id.eq(room_id)))
        .set((
            rooms::name.eq(name),
            rooms::capacity.eq(capacity),
            rooms::floor.eq(floor),
            rooms::is_available.eq(i32::from(is_available)),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("room {room_id}")));
    }

    let row: RoomRow = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .first::<RoomRow>(conn)?;
    Ok(row.into_domain())
}
