// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use leave_ledger::FactSource;
use leave_ledger_domain::{AllowanceRecord, AllowanceState, EmployeeId, LeaveInterval};
use std::collections::BTreeSet;
use time::Date;
use time::macros::date;

const EMPLOYEE: EmployeeId = EmployeeId::new(7);

fn allowance(allowance_id: i64, days: f64, state: AllowanceState) -> AllowanceRecord {
    AllowanceRecord {
        allowance_id,
        employee_id: EMPLOYEE,
        allowed_leaves: days,
        from_date: date!(2024 - 01 - 01),
        state,
    }
}

#[test]
fn test_holidays_filter_by_range() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.add_public_holiday(date!(2024 - 01 - 10)).unwrap();
    persistence.add_public_holiday(date!(2024 - 02 - 14)).unwrap();

    let january: BTreeSet<Date> = persistence
        .approved_holidays(date!(2024 - 01 - 01), date!(2024 - 01 - 31))
        .unwrap();

    assert_eq!(january, [date!(2024 - 01 - 10)].into_iter().collect());
}

#[test]
fn test_duplicate_holiday_is_ignored() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.add_public_holiday(date!(2024 - 01 - 10)).unwrap();
    persistence.add_public_holiday(date!(2024 - 01 - 10)).unwrap();

    let january: BTreeSet<Date> = persistence
        .approved_holidays(date!(2024 - 01 - 01), date!(2024 - 01 - 31))
        .unwrap();

    assert_eq!(january.len(), 1);
}

#[test]
fn test_leave_intervals_scoped_to_employee() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .add_leave_request(&LeaveInterval::new(
            EMPLOYEE,
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 11),
        ))
        .unwrap();
    persistence
        .add_leave_request(&LeaveInterval::new(
            EmployeeId::new(8),
            date!(2024 - 01 - 12),
            date!(2024 - 01 - 12),
        ))
        .unwrap();

    let intervals: Vec<LeaveInterval> =
        persistence.approved_leave_intervals(EMPLOYEE).unwrap();

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start_date, date!(2024 - 01 - 10));
}

#[test]
fn test_attendance_dates_filter_by_range_and_employee() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .add_attendance_checkin(EMPLOYEE, date!(2024 - 01 - 08))
        .unwrap();
    persistence
        .add_attendance_checkin(EMPLOYEE, date!(2024 - 02 - 01))
        .unwrap();
    persistence
        .add_attendance_checkin(EmployeeId::new(8), date!(2024 - 01 - 09))
        .unwrap();
    // Duplicate check-in the same day collapses to one date.
    persistence
        .add_attendance_checkin(EMPLOYEE, date!(2024 - 01 - 08))
        .unwrap();

    let january: BTreeSet<Date> = persistence
        .attendance_dates(EMPLOYEE, date!(2024 - 01 - 01), date!(2024 - 01 - 31))
        .unwrap();

    assert_eq!(january, [date!(2024 - 01 - 08)].into_iter().collect());
}

#[test]
fn test_allowance_records_round_trip() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_allowance(&allowance(1, 18.0, AllowanceState::Approved))
        .unwrap();
    persistence
        .upsert_allowance(&allowance(2, 5.0, AllowanceState::Draft))
        .unwrap();

    let records: Vec<AllowanceRecord> = persistence.allowance_records(EMPLOYEE).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].allowed_leaves, 18.0);
    assert_eq!(records[0].state, AllowanceState::Approved);
    assert_eq!(records[1].state, AllowanceState::Draft);
}

#[test]
fn test_upsert_allowance_replaces_state() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_allowance(&allowance(1, 18.0, AllowanceState::Draft))
        .unwrap();
    persistence
        .upsert_allowance(&allowance(1, 18.0, AllowanceState::Approved))
        .unwrap();

    let records: Vec<AllowanceRecord> = persistence.allowance_records(EMPLOYEE).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].state, AllowanceState::Approved);
}

#[test]
fn test_known_employees_unions_all_sources() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .add_attendance_checkin(EmployeeId::new(3), date!(2024 - 01 - 08))
        .unwrap();
    persistence
        .add_leave_request(&LeaveInterval::new(
            EmployeeId::new(1),
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 11),
        ))
        .unwrap();
    persistence
        .upsert_allowance(&AllowanceRecord {
            allowance_id: 1,
            employee_id: EmployeeId::new(2),
            allowed_leaves: 18.0,
            from_date: date!(2024 - 01 - 01),
            state: AllowanceState::Approved,
        })
        .unwrap();

    let employees: Vec<EmployeeId> = persistence.known_employees().unwrap();

    assert_eq!(
        employees,
        vec![EmployeeId::new(1), EmployeeId::new(2), EmployeeId::new(3)]
    );
}
