// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entry::EmployeeId;
use crate::error::DomainError;
use crate::records::{AdjustmentDirection, AdjustmentRecord, AllowanceRecord, AllowanceState, LeaveInterval};
use crate::validation::{validate_adjustment, validate_allowance, validate_leave_interval};
use time::Date;
use time::macros::date;

fn make_adjustment(delta: f64, direction: AdjustmentDirection) -> AdjustmentRecord {
    AdjustmentRecord {
        adjustment_id: 1,
        employee_id: EmployeeId::new(7),
        date: date!(2024 - 01 - 15),
        delta,
        direction,
        reason: String::from("Carry-over correction"),
        approved: true,
    }
}

const TODAY: Date = date!(2024 - 01 - 10);

#[test]
fn test_valid_grant_passes() {
    let record: AdjustmentRecord = make_adjustment(2.0, AdjustmentDirection::Grant);

    assert!(validate_adjustment(&record, TODAY).is_ok());
}

#[test]
fn test_valid_deduction_passes() {
    let record: AdjustmentRecord = make_adjustment(-2.0, AdjustmentDirection::Deduction);

    assert!(validate_adjustment(&record, TODAY).is_ok());
}

#[test]
fn test_negative_delta_on_grant_rejected() {
    let record: AdjustmentRecord = make_adjustment(-2.0, AdjustmentDirection::Grant);

    let result: Result<(), DomainError> = validate_adjustment(&record, TODAY);

    assert!(matches!(
        result,
        Err(DomainError::AdjustmentSignMismatch { .. })
    ));
}

#[test]
fn test_positive_delta_on_deduction_rejected() {
    let record: AdjustmentRecord = make_adjustment(2.0, AdjustmentDirection::Deduction);

    let result: Result<(), DomainError> = validate_adjustment(&record, TODAY);

    assert!(matches!(
        result,
        Err(DomainError::AdjustmentSignMismatch { .. })
    ));
}

#[test]
fn test_zero_delta_on_deduction_rejected() {
    let record: AdjustmentRecord = make_adjustment(0.0, AdjustmentDirection::Deduction);

    assert!(validate_adjustment(&record, TODAY).is_err());
}

#[test]
fn test_back_dated_adjustment_rejected() {
    let record: AdjustmentRecord = make_adjustment(2.0, AdjustmentDirection::Grant);

    let result: Result<(), DomainError> = validate_adjustment(&record, date!(2024 - 02 - 01));

    assert!(matches!(
        result,
        Err(DomainError::AdjustmentDateInPast { .. })
    ));
}

#[test]
fn test_same_day_adjustment_passes() {
    let record: AdjustmentRecord = make_adjustment(2.0, AdjustmentDirection::Grant);

    assert!(validate_adjustment(&record, date!(2024 - 01 - 15)).is_ok());
}

#[test]
fn test_unapproved_adjustment_rejected() {
    let mut record: AdjustmentRecord = make_adjustment(2.0, AdjustmentDirection::Grant);
    record.approved = false;

    let result: Result<(), DomainError> = validate_adjustment(&record, TODAY);

    assert!(matches!(
        result,
        Err(DomainError::AdjustmentNotApproved { adjustment_id: 1 })
    ));
}

#[test]
fn test_blank_reason_rejected() {
    let mut record: AdjustmentRecord = make_adjustment(2.0, AdjustmentDirection::Grant);
    record.reason = String::from("   ");

    let result: Result<(), DomainError> = validate_adjustment(&record, TODAY);

    assert!(matches!(result, Err(DomainError::MissingAdjustmentReason)));
}

#[test]
fn test_draft_allowance_rejected() {
    let record: AllowanceRecord = AllowanceRecord {
        allowance_id: 9,
        employee_id: EmployeeId::new(7),
        allowed_leaves: 18.0,
        from_date: date!(2024 - 01 - 01),
        state: AllowanceState::Draft,
    };

    let result: Result<(), DomainError> = validate_allowance(&record);

    assert!(matches!(
        result,
        Err(DomainError::AllowanceNotApproved { allowance_id: 9 })
    ));
}

#[test]
fn test_negative_allowance_rejected() {
    let record: AllowanceRecord = AllowanceRecord {
        allowance_id: 9,
        employee_id: EmployeeId::new(7),
        allowed_leaves: -3.0,
        from_date: date!(2024 - 01 - 01),
        state: AllowanceState::Approved,
    };

    let result: Result<(), DomainError> = validate_allowance(&record);

    assert!(matches!(
        result,
        Err(DomainError::NegativeAllowance { allowance_id: 9, .. })
    ));
}

#[test]
fn test_reversed_interval_rejected() {
    let interval: LeaveInterval = LeaveInterval::new(
        EmployeeId::new(7),
        date!(2024 - 01 - 15),
        date!(2024 - 01 - 10),
    );

    let result: Result<(), DomainError> = validate_leave_interval(&interval);

    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_single_day_interval_passes() {
    let interval: LeaveInterval = LeaveInterval::new(
        EmployeeId::new(7),
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 10),
    );

    assert!(validate_leave_interval(&interval).is_ok());
}
