// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    rooms (room_id) {
        room_id -> BigInt,
        name -> Text,
        capacity -> Integer,
        floor -> Integer,
        is_available -> Integer,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        login_name -> Text,
        display_name -> Text,
        password_hash -> Text,
        role -> Text,
        company -> Nullable<Text>,
        is_disabled -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        user_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    bookings (booking_id) {
        booking_id -> BigInt,
        user_id -> BigInt,
        room_id -> BigInt,
        booking_date -> Text,
        start_time -> Text,
        end_time -> Text,
        is_full_day -> Integer,
        status -> Text,
        notes -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    company_hours (company_hours_id) {
        company_hours_id -> BigInt,
        company -> Text,
        total_hours -> Double,
        used_hours -> Double,
        is_active -> Integer,
    }
}

diesel::table! {
    hours_transactions (transaction_id) {
        transaction_id -> BigInt,
        company_hours_id -> BigInt,
        kind -> Text,
        amount -> Double,
        description -> Text,
        booking_id -> Nullable<BigInt>,
        created_at -> Text,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> rooms (room_id));
diesel::joinable!(hours_transactions -> company_hours (company_hours_id));
diesel::joinable!(hours_transactions -> bookings (booking_id));

diesel::allow_tables_to_appear_in_same_query!(
    rooms,
    users,
    sessions,
    bookings,
    company_hours,
    hours_transactions,
);
