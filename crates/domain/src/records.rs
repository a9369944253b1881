// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only fact records consumed from external collaborators.
//!
//! The ledger engine never mutates these records. Approval workflows,
//! attachments, and notification content live outside this system; only the
//! approved facts cross the boundary.

use crate::entry::EmployeeId;
use serde::{Deserialize, Serialize};
use time::Date;

/// Direction declared on an adjustment by its author.
///
/// The direction is redundant with the delta's sign and exists so that a
/// transposed sign is caught at validation time instead of silently moving
/// the balance the wrong way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentDirection {
    /// Grants additional leave (positive delta).
    Grant,
    /// Deducts leave (negative delta).
    Deduction,
}

impl std::fmt::Display for AdjustmentDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grant => write!(f, "grant"),
            Self::Deduction => write!(f, "deduction"),
        }
    }
}

/// An ad-hoc leave adjustment approved for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    /// The adjustment's identifier in the approval system.
    pub adjustment_id: i64,
    /// The subject employee.
    pub employee_id: EmployeeId,
    /// The date the adjustment takes effect.
    pub date: Date,
    /// Signed day delta (positive = grant, negative = deduction).
    pub delta: f64,
    /// Declared direction, validated against the delta's sign.
    pub direction: AdjustmentDirection,
    /// The reason recorded by the author. Required.
    pub reason: String,
    /// Whether the approval workflow has completed.
    pub approved: bool,
}

/// Lifecycle state of an allowance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllowanceState {
    /// Not yet approved; excluded from allowance resolution.
    Draft,
    /// Approved; contributes to the allowed-leaves total.
    Approved,
}

/// A leave allowance granted to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceRecord {
    /// The allowance's identifier in the approval system.
    pub allowance_id: i64,
    /// The subject employee.
    pub employee_id: EmployeeId,
    /// Days granted by this allowance.
    pub allowed_leaves: f64,
    /// The first day the allowance is meant to apply from.
    pub from_date: Date,
    /// Current lifecycle state.
    pub state: AllowanceState,
}

/// An approved leave request interval.
///
/// Intervals are inclusive on both ends and may span weekends, holidays,
/// and month boundaries; the calendar classifier decides which covered
/// dates are working days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveInterval {
    /// The subject employee.
    pub employee_id: EmployeeId,
    /// First day of the interval.
    pub start_date: Date,
    /// Last day of the interval.
    pub end_date: Date,
}

impl LeaveInterval {
    /// Creates a new `LeaveInterval`.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, start_date: Date, end_date: Date) -> Self {
        Self {
            employee_id,
            start_date,
            end_date,
        }
    }

    /// Whether this interval overlaps the inclusive range `[start, end]`.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}
