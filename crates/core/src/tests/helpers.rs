// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::memory::MemoryLedger;
use crate::store::LedgerStore;
use leave_ledger_domain::{
    AdjustmentDirection, AdjustmentRecord, AllowanceRecord, AllowanceState, EmployeeId,
    LeaveInterval, LedgerEntry,
};
use time::Date;
use time::macros::date;

pub(crate) const EMPLOYEE: EmployeeId = EmployeeId::new(7);

/// A ledger with one approved allowance for [`EMPLOYEE`], effective from
/// the start of 2024.
pub(crate) fn store_with_allowance(days: f64) -> MemoryLedger {
    let mut store: MemoryLedger = MemoryLedger::new();
    store.add_allowance(approved_allowance(1, EMPLOYEE, days));
    store
}

pub(crate) fn approved_allowance(
    allowance_id: i64,
    employee_id: EmployeeId,
    days: f64,
) -> AllowanceRecord {
    AllowanceRecord {
        allowance_id,
        employee_id,
        allowed_leaves: days,
        from_date: date!(2024 - 01 - 01),
        state: AllowanceState::Approved,
    }
}

pub(crate) fn approved_adjustment(
    adjustment_id: i64,
    employee_id: EmployeeId,
    adjustment_date: Date,
    delta: f64,
) -> AdjustmentRecord {
    let direction: AdjustmentDirection = if delta < 0.0 {
        AdjustmentDirection::Deduction
    } else {
        AdjustmentDirection::Grant
    };
    AdjustmentRecord {
        adjustment_id,
        employee_id,
        date: adjustment_date,
        delta,
        direction,
        reason: String::from("Test adjustment"),
        approved: true,
    }
}

pub(crate) fn interval(employee_id: EmployeeId, start: Date, end: Date) -> LeaveInterval {
    LeaveInterval::new(employee_id, start, end)
}

/// Asserts chain continuity (P1) and derivation correctness (P2) over the
/// active chain of `employee_id`.
pub(crate) fn assert_chain_valid(store: &mut MemoryLedger, employee_id: EmployeeId) {
    let chain: Vec<LedgerEntry> = store.history(employee_id, false).unwrap();

    let mut expected_opening: f64 = 0.0;
    for entry in &chain {
        assert_eq!(
            entry.opening_leaves, expected_opening,
            "opening of {} must equal prior closing",
            entry.event_date
        );
        assert_eq!(
            entry.closing_leaves(),
            entry.opening_leaves
                + entry.leave_adjustment
                + entry.approved_leaves
                + entry.absent_days,
            "closing of {} must be derived",
            entry.event_date
        );
        assert_eq!(
            entry.remaining_leaves(),
            entry.allowed_leaves - entry.closing_leaves(),
            "remaining of {} must be derived",
            entry.event_date
        );
        expected_opening = entry.closing_leaves();
    }
}
