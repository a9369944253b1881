// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger entry mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger_domain::LedgerEntry;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewLedgerEntryRow, format_date};
use crate::diesel_schema::ledger_entries;
use crate::error::PersistenceError;

/// Inserts a new ledger entry and returns its assigned `entry_id`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The entry to insert
///
/// # Errors
///
/// Returns a `ConstraintViolation` if the entry collides with a unique
/// index, or a database error otherwise.
pub fn insert_entry(
    conn: &mut SqliteConnection,
    entry: &LedgerEntry,
) -> Result<i64, PersistenceError> {
    let row: NewLedgerEntryRow = NewLedgerEntryRow::from_entry(entry)?;

    diesel::insert_into(ledger_entries::table)
        .values(&row)
        .execute(conn)?;

    let entry_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        entry_id,
        employee_id = entry.employee_id.value(),
        event_date = %entry.event_date,
        "Inserted ledger entry"
    );

    Ok(entry_id)
}

/// Rewrites one entry's stored fields.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The entry to persist; must carry an `entry_id`
///
/// # Errors
///
/// Returns an error if the entry has no identifier, is unknown, or the
/// database operation fails.
pub fn update_entry(
    conn: &mut SqliteConnection,
    entry: &LedgerEntry,
) -> Result<(), PersistenceError> {
    let entry_id: i64 = entry.entry_id().ok_or_else(|| {
        PersistenceError::QueryFailed("cannot update an unpersisted entry".to_string())
    })?;

    let updated: usize = diesel::update(
        ledger_entries::table.filter(ledger_entries::entry_id.eq(entry_id)),
    )
    .set((
        ledger_entries::event_date.eq(format_date(entry.event_date)?),
        ledger_entries::is_monthly_summary.eq(i32::from(entry.is_monthly_summary)),
        ledger_entries::opening_leaves.eq(entry.opening_leaves),
        ledger_entries::leave_adjustment.eq(entry.leave_adjustment),
        ledger_entries::approved_leaves.eq(entry.approved_leaves),
        ledger_entries::absent_days.eq(entry.absent_days),
        ledger_entries::allowed_leaves.eq(entry.allowed_leaves),
        ledger_entries::closing_leaves.eq(entry.closing_leaves()),
        ledger_entries::remaining_leaves.eq(entry.remaining_leaves()),
        ledger_entries::active.eq(i32::from(entry.active)),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "ledger entry {entry_id}"
        )));
    }

    Ok(())
}

/// Persists a recompute batch inside one transaction.
///
/// The batch either commits completely or not at all, which is the commit
/// boundary the recompute engine relies on for resumable cascades.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `batch` - The recomputed entries to persist
///
/// # Errors
///
/// Returns an error if any entry fails to persist; the transaction rolls
/// back in that case.
pub fn persist_batch(
    conn: &mut SqliteConnection,
    batch: &[LedgerEntry],
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        for entry in batch {
            update_entry(conn, entry)?;
        }
        Ok(())
    })?;

    debug!(entries = batch.len(), "Committed recompute batch");
    Ok(())
}

/// Deletes an entry permanently.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry_id` - The entry to delete
///
/// # Errors
///
/// Returns an error if the entry is unknown or the database operation
/// fails.
pub fn delete_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(ledger_entries::table.filter(ledger_entries::entry_id.eq(entry_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "ledger entry {entry_id}"
        )));
    }

    debug!(entry_id, "Deleted ledger entry");
    Ok(())
}
