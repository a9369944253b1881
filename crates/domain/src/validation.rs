// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of external fact records before they can touch the ledger.
//!
//! Validation failures block the triggering write; no entry is created for
//! a record that fails here.

use crate::error::DomainError;
use crate::records::{AdjustmentDirection, AdjustmentRecord, AllowanceRecord, AllowanceState, LeaveInterval};
use time::Date;

/// Validates an adjustment record against the evaluation day.
///
/// Checks, in order: approval state, a recorded reason, sign consistency
/// with the declared direction, and forward dating (adjustments cannot be
/// back-dated).
///
/// # Errors
///
/// Returns an error if any of the checks fail.
pub fn validate_adjustment(record: &AdjustmentRecord, today: Date) -> Result<(), DomainError> {
    if !record.approved {
        return Err(DomainError::AdjustmentNotApproved {
            adjustment_id: record.adjustment_id,
        });
    }

    if record.reason.trim().is_empty() {
        return Err(DomainError::MissingAdjustmentReason);
    }

    match record.direction {
        AdjustmentDirection::Deduction if record.delta >= 0.0 => {
            return Err(DomainError::AdjustmentSignMismatch {
                direction: record.direction,
                delta: record.delta,
            });
        }
        AdjustmentDirection::Grant if record.delta < 0.0 => {
            return Err(DomainError::AdjustmentSignMismatch {
                direction: record.direction,
                delta: record.delta,
            });
        }
        _ => {}
    }

    if record.date < today {
        return Err(DomainError::AdjustmentDateInPast {
            date: record.date,
            today,
        });
    }

    Ok(())
}

/// Validates an allowance record before it can produce a ledger entry.
///
/// # Errors
///
/// Returns an error if the allowance is not approved or grants a negative
/// day count.
pub fn validate_allowance(record: &AllowanceRecord) -> Result<(), DomainError> {
    if record.state != AllowanceState::Approved {
        return Err(DomainError::AllowanceNotApproved {
            allowance_id: record.allowance_id,
        });
    }

    if record.allowed_leaves < 0.0 {
        return Err(DomainError::NegativeAllowance {
            allowance_id: record.allowance_id,
            allowed_leaves: record.allowed_leaves,
        });
    }

    Ok(())
}

/// Validates that a leave interval is not reversed.
///
/// # Errors
///
/// Returns an error if the interval ends before it starts.
pub fn validate_leave_interval(interval: &LeaveInterval) -> Result<(), DomainError> {
    if interval.end_date < interval.start_date {
        return Err(DomainError::InvalidDateRange {
            start: interval.start_date,
            end: interval.end_date,
        });
    }

    Ok(())
}
