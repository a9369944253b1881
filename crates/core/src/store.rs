// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage abstractions for the ledger engine.
//!
//! The engine is written against these traits so the storage technology is
//! swappable (SQL, embedded KV, in-memory) without touching recompute
//! logic. The Diesel-backed implementation lives in the persistence crate;
//! [`crate::MemoryLedger`] is the in-process implementation used by tests
//! and small deployments.

use crate::error::StoreError;
use leave_ledger_domain::{AllowanceRecord, EmployeeId, LeaveInterval, LedgerEntry};
use std::collections::BTreeSet;
use time::Date;

/// Proof that a write originates from inside a recompute pass.
///
/// `persist_batch` requires a guard, and only the engine can construct
/// one, so recomputation writes cannot re-invoke the cascade trigger: the
/// recursion the original system suppressed with an ambient context flag
/// is simply unrepresentable here.
#[derive(Debug)]
pub struct CascadeGuard(());

impl CascadeGuard {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// An employee's balance position as of a date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancePosition {
    /// Snapshot of the total approved allowance.
    pub allowed_leaves: f64,
    /// The closing balance of the governing entry.
    pub closing_leaves: f64,
    /// The remaining balance of the governing entry.
    pub remaining_leaves: f64,
}

impl BalancePosition {
    /// The position of an employee with no ledger entries.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            allowed_leaves: 0.0,
            closing_leaves: 0.0,
            remaining_leaves: 0.0,
        }
    }
}

/// Ordered storage of ledger entries.
///
/// Entries are keyed by `(employee_id, event_date, entry_id)`; the
/// store-assigned `entry_id` is the insertion-order tie-breaker for
/// same-date entries. Chain queries (`chain_from`, `chain_after`,
/// `nearest_preceding`, `last_on_or_before`) see only active entries;
/// archived entries remain reachable through `history` and `entry`.
pub trait LedgerStore {
    /// Loads the active entries with `event_date >= from`, ordered by
    /// `(event_date, entry_id)` ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn chain_from(
        &mut self,
        employee_id: EmployeeId,
        from: Date,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Loads the active entries with `event_date > after`, ordered by
    /// `(event_date, entry_id)` ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn chain_after(
        &mut self,
        employee_id: EmployeeId,
        after: Date,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Returns the last active entry with `event_date < before`, by
    /// `(event_date, entry_id)` order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn nearest_preceding(
        &mut self,
        employee_id: EmployeeId,
        before: Date,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    /// Returns the last active entry with `event_date <= date`, by
    /// `(event_date, entry_id)` order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn last_on_or_before(
        &mut self,
        employee_id: EmployeeId,
        date: Date,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    /// Looks up an entry by identifier, archived entries included.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn entry(&mut self, entry_id: i64) -> Result<Option<LedgerEntry>, StoreError>;

    /// Returns an employee's entries ordered by `(event_date, entry_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn history(
        &mut self,
        employee_id: EmployeeId,
        include_archived: bool,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Returns `(event_date, approved_leaves)` for the active non-summary
    /// entries with a positive day count dated inside `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn discrete_claims_in(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<Vec<(Date, f64)>, StoreError>;

    /// Whether an entry exists for `(employee, date, summary flag)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn has_entry(
        &mut self,
        employee_id: EmployeeId,
        event_date: Date,
        is_monthly_summary: bool,
    ) -> Result<bool, StoreError>;

    /// Whether a monthly summary exists with `event_date` in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn has_monthly_summary_in(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<bool, StoreError>;

    /// Whether any entry already references this adjustment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn adjustment_ref_used(&mut self, adjustment_id: i64) -> Result<bool, StoreError>;

    /// Whether any entry already references this allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn allowance_ref_used(&mut self, allowance_id: i64) -> Result<bool, StoreError>;

    /// Inserts a new entry and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or a uniqueness constraint is
    /// violated.
    fn insert_entry(&mut self, entry: &LedgerEntry) -> Result<i64, StoreError>;

    /// Persists one recompute batch behind a single commit boundary.
    ///
    /// Every entry in the batch must already carry an identifier. The
    /// batch either commits completely or not at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; no entry of the batch is
    /// persisted in that case.
    fn persist_batch(
        &mut self,
        batch: &[LedgerEntry],
        guard: &CascadeGuard,
    ) -> Result<(), StoreError>;

    /// Rewrites a single entry outside a cascade (entry-level change).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the entry is unknown.
    fn update_entry(&mut self, entry: &LedgerEntry) -> Result<(), StoreError>;

    /// Removes an entry permanently.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the entry is unknown.
    fn delete_entry(&mut self, entry_id: i64) -> Result<(), StoreError>;
}

/// Read-only facts consumed from external collaborators.
///
/// Everything behind this trait is owned by other systems (leave request
/// approval, allowance approval, attendance capture, holiday management);
/// the engine only reads.
pub trait FactSource {
    /// Approved public holiday dates in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn approved_holidays(&mut self, start: Date, end: Date) -> Result<BTreeSet<Date>, StoreError>;

    /// The employee's approved leave intervals.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn approved_leave_intervals(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveInterval>, StoreError>;

    /// Dates in `[start, end]` with at least one attendance check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn attendance_dates(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<BTreeSet<Date>, StoreError>;

    /// The employee's allowance records, draft and approved alike.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn allowance_records(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AllowanceRecord>, StoreError>;

    /// Every employee known to the system, for aggregation sweeps.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn known_employees(&mut self) -> Result<Vec<EmployeeId>, StoreError>;
}
