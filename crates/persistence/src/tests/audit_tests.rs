// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use leave_ledger_audit::{Action, Actor, AuditEvent, BalanceSnapshot, Cause};
use leave_ledger_domain::EmployeeId;

fn make_event(employee_id: Option<EmployeeId>, action_name: &str) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("hr-123"), String::from("user")),
        Cause::new(String::from("req-456"), String::from("Leave approval")),
        Action::new(
            String::from(action_name),
            Some(String::from("two days starting 2024-01-10")),
        ),
        BalanceSnapshot::new(String::from("allowed=18,closing=0,remaining=18")),
        BalanceSnapshot::new(String::from("allowed=18,closing=2,remaining=16")),
        employee_id,
    )
}

#[test]
fn test_audit_event_round_trip() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let event: AuditEvent = make_event(Some(EmployeeId::new(7)), "RecordLeaveEvent");

    let event_id: i64 = persistence.persist_audit_event(&event).unwrap();
    let loaded: AuditEvent = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(loaded, event);
}

#[test]
fn test_missing_event_reports_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.get_audit_event(999);

    assert!(matches!(result, Err(PersistenceError::EventNotFound(999))));
}

#[test]
fn test_timeline_scopes_to_employee() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .persist_audit_event(&make_event(Some(EmployeeId::new(7)), "RecordLeaveEvent"))
        .unwrap();
    persistence
        .persist_audit_event(&make_event(Some(EmployeeId::new(8)), "RecordAdjustment"))
        .unwrap();
    persistence
        .persist_audit_event(&make_event(None, "RunMonthlyAggregation"))
        .unwrap();

    let scoped = persistence
        .audit_timeline(Some(EmployeeId::new(7)))
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].action.name, "RecordLeaveEvent");

    let all = persistence.audit_timeline(None).unwrap();
    assert_eq!(all.len(), 3);
}
