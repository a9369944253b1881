// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger entry queries.
//!
//! Chain queries order by `(event_date, entry_id)` ascending and see only
//! active entries; the stored ISO text dates sort correctly under the
//! default text collation.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger_domain::{EmployeeId, LedgerEntry};
use time::Date;

use crate::data_models::{LedgerEntryRow, format_date};
use crate::diesel_schema::ledger_entries;
use crate::error::PersistenceError;

fn rows_to_entries(rows: Vec<LedgerEntryRow>) -> Result<Vec<LedgerEntry>, PersistenceError> {
    rows.into_iter().map(LedgerEntryRow::into_entry).collect()
}

/// Loads the active entries with `event_date >= from`, in chain order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn chain_from(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    from: Date,
) -> Result<Vec<LedgerEntry>, PersistenceError> {
    let rows: Vec<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::active.eq(1))
        .filter(ledger_entries::event_date.ge(format_date(from)?))
        .order((ledger_entries::event_date.asc(), ledger_entries::entry_id.asc()))
        .load::<LedgerEntryRow>(conn)?;

    rows_to_entries(rows)
}

/// Loads the active entries with `event_date > after`, in chain order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn chain_after(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    after: Date,
) -> Result<Vec<LedgerEntry>, PersistenceError> {
    let rows: Vec<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::active.eq(1))
        .filter(ledger_entries::event_date.gt(format_date(after)?))
        .order((ledger_entries::event_date.asc(), ledger_entries::entry_id.asc()))
        .load::<LedgerEntryRow>(conn)?;

    rows_to_entries(rows)
}

/// Returns the last active entry with `event_date < before`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn nearest_preceding(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    before: Date,
) -> Result<Option<LedgerEntry>, PersistenceError> {
    let row: Option<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::active.eq(1))
        .filter(ledger_entries::event_date.lt(format_date(before)?))
        .order((ledger_entries::event_date.desc(), ledger_entries::entry_id.desc()))
        .first::<LedgerEntryRow>(conn)
        .optional()?;

    row.map(LedgerEntryRow::into_entry).transpose()
}

/// Returns the last active entry with `event_date <= date`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn last_on_or_before(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    date: Date,
) -> Result<Option<LedgerEntry>, PersistenceError> {
    let row: Option<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::active.eq(1))
        .filter(ledger_entries::event_date.le(format_date(date)?))
        .order((ledger_entries::event_date.desc(), ledger_entries::entry_id.desc()))
        .first::<LedgerEntryRow>(conn)
        .optional()?;

    row.map(LedgerEntryRow::into_entry).transpose()
}

/// Looks up an entry by identifier, archived entries included.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<Option<LedgerEntry>, PersistenceError> {
    let row: Option<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::entry_id.eq(entry_id))
        .first::<LedgerEntryRow>(conn)
        .optional()?;

    row.map(LedgerEntryRow::into_entry).transpose()
}

/// Returns an employee's entries in chain order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn history(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    include_archived: bool,
) -> Result<Vec<LedgerEntry>, PersistenceError> {
    let mut query = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .into_boxed();
    if !include_archived {
        query = query.filter(ledger_entries::active.eq(1));
    }

    let rows: Vec<LedgerEntryRow> = query
        .order((ledger_entries::event_date.asc(), ledger_entries::entry_id.asc()))
        .load::<LedgerEntryRow>(conn)?;

    rows_to_entries(rows)
}

/// Returns `(event_date, approved_leaves)` for the active non-summary
/// entries with a positive day count dated inside `[start, end]`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn discrete_claims_in(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    start: Date,
    end: Date,
) -> Result<Vec<(Date, f64)>, PersistenceError> {
    let rows: Vec<(String, f64)> = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::active.eq(1))
        .filter(ledger_entries::is_monthly_summary.eq(0))
        .filter(ledger_entries::approved_leaves.gt(0.0))
        .filter(ledger_entries::event_date.ge(format_date(start)?))
        .filter(ledger_entries::event_date.le(format_date(end)?))
        .order((ledger_entries::event_date.asc(), ledger_entries::entry_id.asc()))
        .select((ledger_entries::event_date, ledger_entries::approved_leaves))
        .load::<(String, f64)>(conn)?;

    rows.into_iter()
        .map(|(date_text, days)| {
            crate::data_models::parse_date(&date_text).map(|date| (date, days))
        })
        .collect()
}

/// Whether an entry exists for `(employee, date, summary flag)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_entry(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    event_date: Date,
    is_monthly_summary: bool,
) -> Result<bool, PersistenceError> {
    let count: i64 = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::event_date.eq(format_date(event_date)?))
        .filter(ledger_entries::is_monthly_summary.eq(i32::from(is_monthly_summary)))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

/// Whether a monthly summary exists with `event_date` in `[start, end]`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_monthly_summary_in(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    start: Date,
    end: Date,
) -> Result<bool, PersistenceError> {
    let count: i64 = ledger_entries::table
        .filter(ledger_entries::employee_id.eq(employee_id.value()))
        .filter(ledger_entries::is_monthly_summary.eq(1))
        .filter(ledger_entries::event_date.ge(format_date(start)?))
        .filter(ledger_entries::event_date.le(format_date(end)?))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

/// Whether any entry already references this adjustment.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn adjustment_ref_used(
    conn: &mut SqliteConnection,
    adjustment_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = ledger_entries::table
        .filter(ledger_entries::adjustment_ref.eq(adjustment_id))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

/// Whether any entry already references this allowance.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn allowance_ref_used(
    conn: &mut SqliteConnection,
    allowance_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = ledger_entries::table
        .filter(ledger_entries::allowance_ref.eq(allowance_id))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}
