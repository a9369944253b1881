// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{EMPLOYEE, assert_chain_valid, interval, store_with_allowance};
use crate::memory::MemoryLedger;
use crate::monthly::{AggregationOutcome, run_monthly_aggregation};
use crate::store::LedgerStore;
use crate::trigger::record_adjustment;
use leave_ledger_domain::{EmployeeId, LedgerEntry, working_days};
use std::collections::BTreeSet;
use time::Date;
use time::macros::date;

/// Check the employee in on every January 2024 working day except the
/// given ones.
fn attend_january_except(store: &mut MemoryLedger, employee_id: EmployeeId, except: &[Date]) {
    for day in working_days(date!(2024 - 01 - 01), date!(2024 - 01 - 31), &BTreeSet::new()) {
        if !except.contains(&day) {
            store.add_attendance(employee_id, day);
        }
    }
}

#[test]
fn test_aggregation_creates_summary_for_absent_month() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    attend_january_except(&mut store, EMPLOYEE, &[date!(2024 - 01 - 10), date!(2024 - 01 - 11)]);

    let outcome: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert_eq!(outcome.month_start, date!(2024 - 01 - 01));
    assert_eq!(outcome.month_end, date!(2024 - 01 - 31));
    assert_eq!(outcome.created.len(), 1);
    let summary: &LedgerEntry = &outcome.created[0];
    assert_eq!(summary.event_date, date!(2024 - 01 - 31));
    assert_eq!(summary.absent_days, 2.0);
    assert_eq!(summary.closing_leaves(), 2.0);
    assert_eq!(summary.remaining_leaves(), 16.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}

#[test]
fn test_aggregation_skips_month_without_absence() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    attend_january_except(&mut store, EMPLOYEE, &[]);

    let outcome: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert!(outcome.created.is_empty());
    assert_eq!(outcome.skipped_no_absence, 1);
    assert!(store.history(EMPLOYEE, true).unwrap().is_empty());
}

#[test]
fn test_leave_covered_days_are_not_absences() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    // No check-ins on the 10th and 11th, but both are covered by leave.
    attend_january_except(&mut store, EMPLOYEE, &[date!(2024 - 01 - 10), date!(2024 - 01 - 11)]);
    store.add_leave_interval(interval(
        EMPLOYEE,
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 11),
    ));

    let outcome: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert!(outcome.created.is_empty());
    assert_eq!(outcome.skipped_no_absence, 1);
}

#[test]
fn test_holidays_are_not_absences() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    store.add_holiday(date!(2024 - 01 - 10));
    attend_january_except(&mut store, EMPLOYEE, &[date!(2024 - 01 - 10)]);

    let outcome: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert!(outcome.created.is_empty());
}

#[test]
fn test_rerunning_aggregation_is_idempotent() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    attend_january_except(&mut store, EMPLOYEE, &[date!(2024 - 01 - 10)]);

    let first: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();
    let second: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert_eq!(first.created.len(), 1);
    assert!(second.created.is_empty());
    assert_eq!(second.skipped_existing, 1);
    assert_eq!(store.history(EMPLOYEE, true).unwrap().len(), 1);
}

#[test]
fn test_aggregation_sweeps_multiple_employees() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    let colleague: EmployeeId = EmployeeId::new(8);
    attend_january_except(&mut store, EMPLOYEE, &[date!(2024 - 01 - 10)]);
    attend_january_except(&mut store, colleague, &[]);

    let outcome: AggregationOutcome =
        run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.created[0].employee_id, EMPLOYEE);
    assert_eq!(outcome.skipped_no_absence, 1);
}

#[test]
fn test_summary_cascades_into_following_entries() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    attend_january_except(&mut store, EMPLOYEE, &[date!(2024 - 01 - 10)]);
    // A February adjustment already on the books before the January
    // summary lands.
    record_adjustment(
        &mut store,
        &super::helpers::approved_adjustment(1, EMPLOYEE, date!(2024 - 02 - 15), 2.0),
        date!(2024 - 02 - 01),
    )
    .unwrap();

    run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    let chain: Vec<LedgerEntry> = store.history(EMPLOYEE, false).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].event_date, date!(2024 - 01 - 31));
    assert_eq!(chain[0].closing_leaves(), 1.0);
    assert_eq!(chain[1].event_date, date!(2024 - 02 - 15));
    assert_eq!(chain[1].opening_leaves, 1.0);
    assert_eq!(chain[1].closing_leaves(), 3.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}
