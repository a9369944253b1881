// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The ledger entry type and its balance derivations.
//!
//! Each entry represents one employee's leave balance at a point in time.
//! Entries are chained per employee in `(event_date, entry_id)` order: every
//! entry's opening balance must equal the closing balance of its
//! predecessor, and the first entry opens at zero.

use serde::{Deserialize, Serialize};
use time::Date;

/// Identifier of an employee in the external HR system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of an employee's leave balance ledger.
///
/// `closing_leaves` and `remaining_leaves` are derived quantities. They are
/// private and can only be produced by [`LedgerEntry::derive_totals`] (or
/// rehydrated verbatim from the store), so no caller can author them
/// independently of the inputs they are derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Store-assigned identifier; `None` until persisted. Doubles as the
    /// insertion-order tie-breaker for same-date entries.
    entry_id: Option<i64>,
    /// The subject employee.
    pub employee_id: EmployeeId,
    /// The date this entry represents. Month-end for monthly summaries.
    pub event_date: Date,
    /// Distinguishes aggregate month-end entries from discrete events.
    pub is_monthly_summary: bool,
    /// Balance carried in from the chronologically preceding entry.
    pub opening_leaves: f64,
    /// Signed delta from an approved adjustment.
    pub leave_adjustment: f64,
    /// Approved-leave working days attributed to this entry.
    pub approved_leaves: f64,
    /// Unexcused absence working days. Monthly summaries only.
    pub absent_days: f64,
    /// Snapshot of the employee's total approved allowance.
    pub allowed_leaves: f64,
    closing_leaves: f64,
    remaining_leaves: f64,
    /// Back-reference to the originating adjustment, if any.
    pub adjustment_ref: Option<i64>,
    /// Back-reference to the originating allowance, if any.
    pub allowance_ref: Option<i64>,
    /// Soft-visibility flag. Archived entries leave the chain but remain
    /// queryable through history.
    pub active: bool,
}

impl LedgerEntry {
    /// Creates a new discrete (non-summary) entry with zeroed balances.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, event_date: Date) -> Self {
        Self {
            entry_id: None,
            employee_id,
            event_date,
            is_monthly_summary: false,
            opening_leaves: 0.0,
            leave_adjustment: 0.0,
            approved_leaves: 0.0,
            absent_days: 0.0,
            allowed_leaves: 0.0,
            closing_leaves: 0.0,
            remaining_leaves: 0.0,
            adjustment_ref: None,
            allowance_ref: None,
            active: true,
        }
    }

    /// Creates a new monthly summary entry dated at `month_end`.
    #[must_use]
    pub const fn monthly_summary(employee_id: EmployeeId, month_end: Date) -> Self {
        let mut entry = Self::new(employee_id, month_end);
        entry.is_monthly_summary = true;
        entry
    }

    /// Rehydrates an entry from stored values, derived fields included.
    ///
    /// This is the store's constructor; everything else must go through
    /// [`LedgerEntry::derive_totals`].
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn from_stored(
        entry_id: i64,
        employee_id: EmployeeId,
        event_date: Date,
        is_monthly_summary: bool,
        opening_leaves: f64,
        leave_adjustment: f64,
        approved_leaves: f64,
        absent_days: f64,
        allowed_leaves: f64,
        closing_leaves: f64,
        remaining_leaves: f64,
        adjustment_ref: Option<i64>,
        allowance_ref: Option<i64>,
        active: bool,
    ) -> Self {
        Self {
            entry_id: Some(entry_id),
            employee_id,
            event_date,
            is_monthly_summary,
            opening_leaves,
            leave_adjustment,
            approved_leaves,
            absent_days,
            allowed_leaves,
            closing_leaves,
            remaining_leaves,
            adjustment_ref,
            allowance_ref,
            active,
        }
    }

    /// Returns the store-assigned identifier, if persisted.
    #[must_use]
    pub const fn entry_id(&self) -> Option<i64> {
        self.entry_id
    }

    /// Records the identifier assigned by the store on insertion.
    pub const fn assign_id(&mut self, entry_id: i64) {
        self.entry_id = Some(entry_id);
    }

    /// Recomputes the derived totals from the current inputs.
    ///
    /// Closing reflects utilized days and adjustments on top of the carried
    /// opening balance; remaining is measured against the allowance
    /// snapshot.
    pub const fn derive_totals(&mut self) {
        self.closing_leaves =
            self.opening_leaves + self.leave_adjustment + self.approved_leaves + self.absent_days;
        self.remaining_leaves = self.allowed_leaves - self.closing_leaves;
    }

    /// The derived closing balance.
    #[must_use]
    pub const fn closing_leaves(&self) -> f64 {
        self.closing_leaves
    }

    /// The derived remaining balance.
    #[must_use]
    pub const fn remaining_leaves(&self) -> f64 {
        self.remaining_leaves
    }
}
