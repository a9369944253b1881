// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end ledger flows exercised the way the external collaborators
//! drive them: leave approvals, adjustment approvals, deletions, and the
//! monthly aggregation, with chain continuity asserted after every step.

use super::helpers::{EMPLOYEE, approved_adjustment, assert_chain_valid, interval, store_with_allowance};
use crate::memory::MemoryLedger;
use crate::monthly::run_monthly_aggregation;
use crate::store::LedgerStore;
use crate::trigger::{delete_entry, record_adjustment, record_leave_event};
use leave_ledger_domain::LedgerEntry;
use time::macros::date;

const NOW: time::Date = date!(2024 - 01 - 02);

/// Builds the three-entry January chain shared by the later scenarios:
/// a two-day leave on the 10th, a one-day leave on the 5th (inserted
/// after, cascading into the 10th), and a -2 adjustment on the 15th.
fn build_january_chain(store: &mut MemoryLedger) {
    record_leave_event(
        store,
        &interval(EMPLOYEE, date!(2024 - 01 - 10), date!(2024 - 01 - 11)),
        NOW,
    )
    .unwrap()
    .unwrap();
    record_leave_event(
        store,
        &interval(EMPLOYEE, date!(2024 - 01 - 05), date!(2024 - 01 - 05)),
        NOW,
    )
    .unwrap()
    .unwrap();
    record_adjustment(
        store,
        &approved_adjustment(1, EMPLOYEE, date!(2024 - 01 - 15), -2.0),
        NOW,
    )
    .unwrap();
}

#[test]
fn test_first_entry_opens_at_zero() {
    let mut store: MemoryLedger = store_with_allowance(18.0);

    // Two working days: Wednesday the 10th and Thursday the 11th.
    let entry: LedgerEntry = record_leave_event(
        &mut store,
        &interval(EMPLOYEE, date!(2024 - 01 - 10), date!(2024 - 01 - 11)),
        NOW,
    )
    .unwrap()
    .unwrap();

    assert_eq!(entry.opening_leaves, 0.0);
    assert_eq!(entry.approved_leaves, 2.0);
    assert_eq!(entry.allowed_leaves, 18.0);
    assert_eq!(entry.closing_leaves(), 2.0);
    assert_eq!(entry.remaining_leaves(), 16.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}

#[test]
fn test_inserting_earlier_entry_cascades_forward() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    record_leave_event(
        &mut store,
        &interval(EMPLOYEE, date!(2024 - 01 - 10), date!(2024 - 01 - 11)),
        NOW,
    )
    .unwrap()
    .unwrap();

    // Backdated single working day on Friday the 5th.
    record_leave_event(
        &mut store,
        &interval(EMPLOYEE, date!(2024 - 01 - 05), date!(2024 - 01 - 05)),
        NOW,
    )
    .unwrap()
    .unwrap();

    let chain: Vec<LedgerEntry> = store.history(EMPLOYEE, false).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].event_date, date!(2024 - 01 - 05));
    assert_eq!(chain[0].opening_leaves, 0.0);
    assert_eq!(chain[0].closing_leaves(), 1.0);
    assert_eq!(chain[1].event_date, date!(2024 - 01 - 10));
    assert_eq!(chain[1].opening_leaves, 1.0);
    assert_eq!(chain[1].closing_leaves(), 3.0);
    assert_eq!(chain[1].remaining_leaves(), 15.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}

#[test]
fn test_adjustment_entry_extends_chain() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    build_january_chain(&mut store);

    let chain: Vec<LedgerEntry> = store.history(EMPLOYEE, false).unwrap();
    assert_eq!(chain.len(), 3);
    let adjustment: &LedgerEntry = &chain[2];
    assert_eq!(adjustment.event_date, date!(2024 - 01 - 15));
    assert_eq!(adjustment.opening_leaves, 3.0);
    assert_eq!(adjustment.leave_adjustment, -2.0);
    assert_eq!(adjustment.closing_leaves(), 1.0);
    assert_eq!(adjustment.remaining_leaves(), 17.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}

#[test]
fn test_deleting_first_entry_rebaselines_to_zero() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    build_january_chain(&mut store);

    let first_id: i64 = store.history(EMPLOYEE, false).unwrap()[0]
        .entry_id()
        .unwrap();
    delete_entry(&mut store, first_id).unwrap();

    let chain: Vec<LedgerEntry> = store.history(EMPLOYEE, false).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].event_date, date!(2024 - 01 - 10));
    assert_eq!(chain[0].opening_leaves, 0.0);
    assert_eq!(chain[0].closing_leaves(), 2.0);
    assert_eq!(chain[1].opening_leaves, 2.0);
    assert_eq!(chain[1].closing_leaves(), 0.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}

#[test]
fn test_monthly_summary_excludes_discretely_claimed_days() {
    let mut store: MemoryLedger = store_with_allowance(18.0);
    build_january_chain(&mut store);

    // The intervals behind the discrete entries.
    store.add_leave_interval(interval(
        EMPLOYEE,
        date!(2024 - 01 - 05),
        date!(2024 - 01 - 05),
    ));
    store.add_leave_interval(interval(
        EMPLOYEE,
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 11),
    ));

    // Check-ins on every January working day except the leave days and
    // Wednesday the 31st, which becomes the one unexcused absence.
    let absent_day: time::Date = date!(2024 - 01 - 31);
    let leave_days: [time::Date; 3] = [
        date!(2024 - 01 - 05),
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 11),
    ];
    for day in leave_ledger_domain::working_days(
        date!(2024 - 01 - 01),
        date!(2024 - 01 - 31),
        &std::collections::BTreeSet::new(),
    ) {
        if day != absent_day && !leave_days.contains(&day) {
            store.add_attendance(EMPLOYEE, day);
        }
    }

    let outcome = run_monthly_aggregation(&mut store, date!(2024 - 02 - 05)).unwrap();

    assert_eq!(outcome.created.len(), 1);
    let summary: &LedgerEntry = &outcome.created[0];
    assert!(summary.is_monthly_summary);
    assert_eq!(summary.event_date, date!(2024 - 01 - 31));
    // Every interval day is already claimed by a discrete entry.
    assert_eq!(summary.approved_leaves, 0.0);
    assert_eq!(summary.absent_days, 1.0);
    // Chained onto the adjustment entry's closing balance.
    assert_eq!(summary.opening_leaves, 1.0);
    assert_eq!(summary.closing_leaves(), 2.0);
    assert_chain_valid(&mut store, EMPLOYEE);
}
