// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger_domain::{DomainError, EmployeeId};
use time::Date;

/// Errors surfaced by a ledger store implementation.
///
/// Store implementations translate their backend-specific failures into
/// this type so the engine stays independent of the storage technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The storage backend failed.
    Backend(String),
    /// A uniqueness or integrity constraint was violated at the store level.
    ConstraintViolation(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
            Self::ConstraintViolation(msg) => write!(f, "Store constraint violation: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An entry already exists for `(employee, date, summary flag)`.
    DuplicateEntry {
        /// The subject employee.
        employee_id: EmployeeId,
        /// The contested event date.
        event_date: Date,
        /// Whether the contested entry is a monthly summary.
        is_monthly_summary: bool,
    },
    /// The adjustment has already produced a ledger entry.
    DuplicateAdjustmentRef {
        /// The adjustment identifier.
        adjustment_id: i64,
    },
    /// The allowance has already produced a ledger entry.
    DuplicateAllowanceRef {
        /// The allowance identifier.
        allowance_id: i64,
    },
    /// No entry exists with the given identifier.
    EntryNotFound {
        /// The missing entry identifier.
        entry_id: i64,
    },
    /// A recompute batch failed partway through a cascade.
    ///
    /// Batches committed before the failure remain valid; rerunning
    /// `recompute_from` at `resume_from` (or the original date — the
    /// engine is idempotent) completes the cascade.
    CascadeIncomplete {
        /// The employee whose chain was being recomputed.
        employee_id: EmployeeId,
        /// Entries committed before the failure.
        entries_committed: usize,
        /// The event date of the first uncommitted entry.
        resume_from: Option<Date>,
        /// The underlying store failure.
        source: StoreError,
    },
    /// A post-recompute invariant check found a broken chain.
    ///
    /// This indicates a bug in the engine or store, never an expected
    /// runtime condition, and must fail loudly rather than persist a
    /// corrupt ledger.
    OrderingViolation {
        /// The employee whose chain is broken.
        employee_id: EmployeeId,
        /// The event date of the offending entry.
        event_date: Date,
        /// The opening balance the chain rule requires.
        expected_opening: f64,
        /// The opening balance actually found.
        found_opening: f64,
    },
    /// A store operation failed outside a cascade.
    Store(StoreError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::DuplicateEntry {
                employee_id,
                event_date,
                is_monthly_summary,
            } => {
                let kind: &str = if *is_monthly_summary {
                    "monthly summary"
                } else {
                    "entry"
                };
                write!(
                    f,
                    "Employee {employee_id} already has a {kind} for {event_date}"
                )
            }
            Self::DuplicateAdjustmentRef { adjustment_id } => {
                write!(
                    f,
                    "Adjustment {adjustment_id} has already produced a ledger entry"
                )
            }
            Self::DuplicateAllowanceRef { allowance_id } => {
                write!(
                    f,
                    "Allowance {allowance_id} has already produced a ledger entry"
                )
            }
            Self::EntryNotFound { entry_id } => write!(f, "Ledger entry {entry_id} not found"),
            Self::CascadeIncomplete {
                employee_id,
                entries_committed,
                resume_from,
                source,
            } => match resume_from {
                Some(date) => write!(
                    f,
                    "Cascade for employee {employee_id} stopped after {entries_committed} entries; resume from {date}: {source}"
                ),
                None => write!(
                    f,
                    "Cascade for employee {employee_id} stopped after {entries_committed} entries: {source}"
                ),
            },
            Self::OrderingViolation {
                employee_id,
                event_date,
                expected_opening,
                found_opening,
            } => {
                write!(
                    f,
                    "Chain continuity broken for employee {employee_id} at {event_date}: expected opening {expected_opening}, found {found_opening}"
                )
            }
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
