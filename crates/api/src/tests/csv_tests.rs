// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{EMPLOYEE_ID, actor, cause, persistence_with_allowance};
use crate::csv_export::{export_ledger_history_csv, render_ledger_csv};
use crate::handlers::record_leave_event;
use crate::request_response::RecordLeaveEventRequest;
use leave_ledger_persistence::Persistence;
use time::macros::date;

#[test]
fn test_empty_history_renders_header_only() {
    let csv: String = render_ledger_csv(&[]).unwrap();

    assert_eq!(
        csv.trim_end(),
        "entry_id,event_date,kind,opening_leaves,leave_adjustment,approved_leaves,absent_days,allowed_leaves,closing_leaves,remaining_leaves"
    );
}

#[test]
fn test_export_contains_one_row_per_entry() {
    let mut persistence: Persistence = persistence_with_allowance();
    record_leave_event(
        &mut persistence,
        &RecordLeaveEventRequest {
            employee_id: EMPLOYEE_ID,
            start_date: String::from("2024-01-10"),
            end_date: String::from("2024-01-11"),
        },
        actor(),
        cause("leave-csv"),
        date!(2024 - 01 - 02),
    )
    .unwrap();

    let csv: String = export_ledger_history_csv(&mut persistence, EMPLOYEE_ID, false).unwrap();
    let lines: Vec<&str> = csv.trim_end().lines().collect();

    // Header, allowance grant entry, leave event entry.
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("2024-01-01"));
    assert!(lines[2].contains("2024-01-10"));
    assert!(lines[2].contains("event"));
    assert!(lines[2].ends_with("16"));
}

#[test]
fn test_export_for_unknown_employee_is_header_only() {
    let mut persistence: Persistence = persistence_with_allowance();

    let csv: String = export_ledger_history_csv(&mut persistence, 999, false).unwrap();

    assert_eq!(csv.trim_end().lines().count(), 1);
}
