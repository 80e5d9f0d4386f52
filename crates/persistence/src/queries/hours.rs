// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Company hours-ledger query operations.

use crate::data_models::{CompanyHoursRow, HoursTransactionRow};
use crate::diesel_schema::{company_hours, hours_transactions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use roombook_domain::{CompanyHours, HoursTransaction, TransactionKind};

/// Fetch a company's hours allotment by company name.
pub fn get_company_hours(
    conn: &mut SqliteConnection,
    company: &str,
) -> Result<Option<CompanyHours>, PersistenceError> {
    let row: Option<CompanyHoursRow> = company_hours::table
        .filter(company_hours::company.eq(company))
        .first::<CompanyHoursRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_company_hours: {e}")))?;
    Ok(row.map(CompanyHoursRow::into_domain))
}

/// Fetch a ledger's transactions in chronological order.
pub fn transactions_for_ledger(
    conn: &mut SqliteConnection,
    company_hours_id: i64,
) -> Result<Vec<HoursTransaction>, PersistenceError> {
    let rows: Vec<HoursTransactionRow> = hours_transactions::table
        .filter(hours_transactions::company_hours_id.eq(company_hours_id))
        .order(hours_transactions::transaction_id.asc())
        .load::<HoursTransactionRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("transactions_for_ledger: {e}")))?;
    rows.into_iter()
        .map(HoursTransactionRow::into_domain)
        .collect()
}

/// Find the `use` transaction recorded for a booking, if any.
///
/// Returns `None` when the booking never debited hours or has already been
/// refunded.
pub fn unrefunded_use_for_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<HoursTransaction>, PersistenceError> {
    let rows: Vec<HoursTransactionRow> = hours_transactions::table
        .filter(hours_transactions::booking_id.eq(booking_id))
        .load::<HoursTransactionRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("unrefunded_use_for_booking: {e}")))?;

    let mut use_transaction: Option<HoursTransaction> = None;
    let mut refunded: bool = false;
    for row in rows {
        let transaction: HoursTransaction = row.into_domain()?;
        match transaction.kind {
            TransactionKind::Use => use_transaction = Some(transaction),
            TransactionKind::Refund => refunded = true,
            TransactionKind::Add => {}
        }
    }

    if refunded {
        return Ok(None);
    }
    Ok(use_transaction)
}
