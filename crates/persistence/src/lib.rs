// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Leave Ledger.
//!
//! This crate provides `SQLite` persistence, via Diesel, for ledger
//! entries, the external fact tables, and audit events. The [`Persistence`]
//! adapter implements the core store traits ([`LedgerStore`] and
//! [`FactSource`]), so the recompute engine runs against it unchanged from
//! the in-memory store used in core tests.
//!
//! ## Testing
//!
//! Tests run against unique in-memory databases; each call to
//! [`Persistence::new_in_memory`] receives a sequential identifier from an
//! atomic counter, eliminating time-based collisions between concurrently
//! running tests.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leave_ledger::{CascadeGuard, FactSource, LedgerStore, StoreError};
use leave_ledger_audit::AuditEvent;
use leave_ledger_domain::{AllowanceRecord, EmployeeId, LeaveInterval, LedgerEntry};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` persistence adapter for the Leave Ledger.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique shared-memory database instance via an
    /// atomic counter, ensuring deterministic test isolation without
    /// time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // External facts
    // ========================================================================

    /// Records an approved public holiday. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add_public_holiday(&mut self, date: Date) -> Result<(), PersistenceError> {
        mutations::facts::add_public_holiday(&mut self.conn, date)
    }

    /// Records an approved leave interval and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add_leave_request(
        &mut self,
        interval: &LeaveInterval,
    ) -> Result<i64, PersistenceError> {
        mutations::facts::add_leave_request(&mut self.conn, interval)
    }

    /// Records an attendance check-in. Idempotent per (employee, date).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add_attendance_checkin(
        &mut self,
        employee_id: EmployeeId,
        date: Date,
    ) -> Result<(), PersistenceError> {
        mutations::facts::add_attendance_checkin(&mut self.conn, employee_id, date)
    }

    /// Inserts or replaces an allowance record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn upsert_allowance(&mut self, record: &AllowanceRecord) -> Result<(), PersistenceError> {
        mutations::facts::upsert_allowance(&mut self.conn, record)
    }

    // ========================================================================
    // Audit events
    // ========================================================================

    /// Persists an audit event.
    ///
    /// # Arguments
    ///
    /// * `event` - The audit event to persist
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be
    /// deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the ordered audit timeline, optionally scoped to one
    /// employee.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn audit_timeline(
        &mut self,
        employee_id: Option<EmployeeId>,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::audit_timeline(&mut self.conn, employee_id)
    }
}

impl LedgerStore for Persistence {
    fn chain_from(
        &mut self,
        employee_id: EmployeeId,
        from: Date,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(queries::ledger::chain_from(&mut self.conn, employee_id, from)?)
    }

    fn chain_after(
        &mut self,
        employee_id: EmployeeId,
        after: Date,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(queries::ledger::chain_after(&mut self.conn, employee_id, after)?)
    }

    fn nearest_preceding(
        &mut self,
        employee_id: EmployeeId,
        before: Date,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(queries::ledger::nearest_preceding(
            &mut self.conn,
            employee_id,
            before,
        )?)
    }

    fn last_on_or_before(
        &mut self,
        employee_id: EmployeeId,
        date: Date,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(queries::ledger::last_on_or_before(
            &mut self.conn,
            employee_id,
            date,
        )?)
    }

    fn entry(&mut self, entry_id: i64) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(queries::ledger::entry(&mut self.conn, entry_id)?)
    }

    fn history(
        &mut self,
        employee_id: EmployeeId,
        include_archived: bool,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(queries::ledger::history(
            &mut self.conn,
            employee_id,
            include_archived,
        )?)
    }

    fn discrete_claims_in(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<Vec<(Date, f64)>, StoreError> {
        Ok(queries::ledger::discrete_claims_in(
            &mut self.conn,
            employee_id,
            start,
            end,
        )?)
    }

    fn has_entry(
        &mut self,
        employee_id: EmployeeId,
        event_date: Date,
        is_monthly_summary: bool,
    ) -> Result<bool, StoreError> {
        Ok(queries::ledger::has_entry(
            &mut self.conn,
            employee_id,
            event_date,
            is_monthly_summary,
        )?)
    }

    fn has_monthly_summary_in(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<bool, StoreError> {
        Ok(queries::ledger::has_monthly_summary_in(
            &mut self.conn,
            employee_id,
            start,
            end,
        )?)
    }

    fn adjustment_ref_used(&mut self, adjustment_id: i64) -> Result<bool, StoreError> {
        Ok(queries::ledger::adjustment_ref_used(
            &mut self.conn,
            adjustment_id,
        )?)
    }

    fn allowance_ref_used(&mut self, allowance_id: i64) -> Result<bool, StoreError> {
        Ok(queries::ledger::allowance_ref_used(
            &mut self.conn,
            allowance_id,
        )?)
    }

    fn insert_entry(&mut self, entry: &LedgerEntry) -> Result<i64, StoreError> {
        Ok(mutations::ledger::insert_entry(&mut self.conn, entry)?)
    }

    fn persist_batch(
        &mut self,
        batch: &[LedgerEntry],
        _guard: &CascadeGuard,
    ) -> Result<(), StoreError> {
        Ok(mutations::ledger::persist_batch(&mut self.conn, batch)?)
    }

    fn update_entry(&mut self, entry: &LedgerEntry) -> Result<(), StoreError> {
        Ok(mutations::ledger::update_entry(&mut self.conn, entry)?)
    }

    fn delete_entry(&mut self, entry_id: i64) -> Result<(), StoreError> {
        Ok(mutations::ledger::delete_entry(&mut self.conn, entry_id)?)
    }
}

impl FactSource for Persistence {
    fn approved_holidays(&mut self, start: Date, end: Date) -> Result<BTreeSet<Date>, StoreError> {
        Ok(queries::facts::approved_holidays(&mut self.conn, start, end)?)
    }

    fn approved_leave_intervals(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveInterval>, StoreError> {
        Ok(queries::facts::approved_leave_intervals(
            &mut self.conn,
            employee_id,
        )?)
    }

    fn attendance_dates(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<BTreeSet<Date>, StoreError> {
        Ok(queries::facts::attendance_dates(
            &mut self.conn,
            employee_id,
            start,
            end,
        )?)
    }

    fn allowance_records(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AllowanceRecord>, StoreError> {
        Ok(queries::facts::allowance_records(&mut self.conn, employee_id)?)
    }

    fn known_employees(&mut self) -> Result<Vec<EmployeeId>, StoreError> {
        Ok(queries::facts::known_employees(&mut self.conn)?)
    }
}
