// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query operations.

pub mod bookings;
pub mod hours;
pub mod rooms;
pub mod users;
