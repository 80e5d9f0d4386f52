// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Company hours-ledger write operations.
//!
//! The ledger is append-only: balances on `company_hours` are running
//! totals, and every movement also lands as a transaction row. Balance
//! update and transaction insert happen in one transaction so the two can
//! never disagree.

use crate::data_models::{CompanyHoursRow, NewCompanyHours, NewHoursTransaction, format_timestamp};
use crate::diesel_schema::{company_hours, hours_transactions};
use crate::error::PersistenceError;
use crate::queries::hours::unrefunded_use_for_booking;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use roombook_domain::{CompanyHours, TransactionKind};
use time::OffsetDateTime;
use tracing::info;

fn insert_transaction(
    conn: &mut SqliteConnection,
    company_hours_id: i64,
    kind: TransactionKind,
    amount: f64,
    description: &str,
    booking_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let record = NewHoursTransaction {
        company_hours_id,
        kind: kind.as_str().to_string(),
        amount,
        description: description.to_string(),
        booking_id,
        created_at: format_timestamp(now)?,
    };
    diesel::insert_into(hours_transactions::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}

fn fetch_ledger(
    conn: &mut SqliteConnection,
    company_hours_id: i64,
) -> Result<CompanyHours, PersistenceError> {
    let row: CompanyHoursRow = company_hours::table
        .filter(company_hours::company_hours_id.eq(company_hours_id))
        .first::<CompanyHoursRow>(conn)?;
    Ok(row.into_domain())
}

/// Create a company's hours allotment with an initial grant.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if the company
/// already has a ledger.
pub fn create_company_hours(
    conn: &mut SqliteConnection,
    company: &str,
    initial_hours: f64,
    now: OffsetDateTime,
) -> Result<CompanyHours, PersistenceError> {
    let ledger: CompanyHours = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let record = NewCompanyHours {
            company: company.to_string(),
            total_hours: initial_hours,
            used_hours: 0.0,
            is_active: 1,
        };
        diesel::insert_into(company_hours::table)
            .values(&record)
            .execute(conn)?;

        let company_hours_id: i64 = get_last_insert_rowid(conn)?;
        if initial_hours > 0.0 {
            insert_transaction(
                conn,
                company_hours_id,
                TransactionKind::Add,
                initial_hours,
                "Initial allotment",
                None,
                now,
            )?;
        }
        fetch_ledger(conn, company_hours_id)
    })?;

    info!(company, initial_hours, "Company hours ledger created");
    Ok(ledger)
}

/// Grant additional hours to a ledger.
pub fn grant_hours(
    conn: &mut SqliteConnection,
    company_hours_id: i64,
    amount: f64,
    description: &str,
    now: OffsetDateTime,
) -> Result<CompanyHours, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(
            company_hours::table.filter(company_hours::company_hours_id.eq(company_hours_id)),
        )
        .set(company_hours::total_hours.eq(company_hours::total_hours + amount))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!(
                "company hours ledger {company_hours_id}"
            )));
        }

        insert_transaction(
            conn,
            company_hours_id,
            TransactionKind::Add,
            amount,
            description,
            None,
            now,
        )?;
        fetch_ledger(conn, company_hours_id)
    })
}

/// Record a booking's hour consumption against a ledger.
pub fn debit_hours_for_booking(
    conn: &mut SqliteConnection,
    company_hours_id: i64,
    amount: f64,
    booking_id: i64,
    now: OffsetDateTime,
) -> Result<CompanyHours, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(
            company_hours::table.filter(company_hours::company_hours_id.eq(company_hours_id)),
        )
        .set(company_hours::used_hours.eq(company_hours::used_hours + amount))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!(
                "company hours ledger {company_hours_id}"
            )));
        }

        insert_transaction(
            conn,
            company_hours_id,
            TransactionKind::Use,
            amount,
            &format!("Booking {booking_id}"),
            Some(booking_id),
            now,
        )?;
        fetch_ledger(conn, company_hours_id)
    })
}

/// Refund the hours a cancelled booking had consumed.
///
/// Looks up the booking's `use` transaction; if one exists and has not
/// been refunded, records a `refund` for the same amount and credits the
/// ledger's used balance. Returns the refunded amount, or `None` if the
/// booking never debited hours.
pub fn refund_hours_for_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    now: OffsetDateTime,
) -> Result<Option<f64>, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let Some(use_transaction) = unrefunded_use_for_booking(conn, booking_id)? else {
            return Ok(None);
        };

        diesel::update(
            company_hours::table
                .filter(company_hours::company_hours_id.eq(use_transaction.company_hours_id)),
        )
        .set(company_hours::used_hours.eq(company_hours::used_hours - use_transaction.amount))
        .execute(conn)?;

        insert_transaction(
            conn,
            use_transaction.company_hours_id,
            TransactionKind::Refund,
            use_transaction.amount,
            &format!("Refund for cancelled booking {booking_id}"),
            Some(booking_id),
            now,
        )?;

        info!(
            booking_id,
            amount = use_transaction.amount,
            "Refunded booking hours"
        );
        Ok(Some(use_transaction.amount))
    })
}
