// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger_audit::{Action, Actor, AuditEvent, BalanceSnapshot, Cause};
use leave_ledger_domain::EmployeeId;
use serde_json::Value;

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

type AuditRow = (i64, Option<i64>, String, String, String, String, String);

fn json_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn row_to_event(row: AuditRow) -> Result<AuditEvent, PersistenceError> {
    let (_event_id, employee_id, actor_json, cause_json, action_json, before_json, after_json) =
        row;

    let actor_value: Value = serde_json::from_str(&actor_json)?;
    let cause_value: Value = serde_json::from_str(&cause_json)?;
    let action_value: Value = serde_json::from_str(&action_json)?;
    let before_value: Value = serde_json::from_str(&before_json)?;
    let after_value: Value = serde_json::from_str(&after_json)?;

    let details: Option<String> = action_value
        .get("details")
        .and_then(Value::as_str)
        .map(ToString::to_string);

    Ok(AuditEvent::new(
        Actor::new(
            json_field(&actor_value, "id"),
            json_field(&actor_value, "actor_type"),
        ),
        Cause::new(
            json_field(&cause_value, "id"),
            json_field(&cause_value, "description"),
        ),
        Action::new(json_field(&action_value, "name"), details),
        BalanceSnapshot::new(json_field(&before_value, "data")),
        BalanceSnapshot::new(json_field(&after_value, "data")),
        employee_id.map(EmployeeId::new),
    ))
}

/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: Option<AuditRow> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select((
            audit_events::event_id,
            audit_events::employee_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .first::<AuditRow>(conn)
        .optional()?;

    row.map_or(Err(PersistenceError::EventNotFound(event_id)), row_to_event)
}

/// Retrieves the ordered audit timeline, optionally scoped to one
/// employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - When set, only events scoped to this employee
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn audit_timeline(
    conn: &mut SqliteConnection,
    employee_id: Option<EmployeeId>,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let mut query = audit_events::table.into_boxed();
    if let Some(employee_id) = employee_id {
        query = query.filter(audit_events::employee_id.eq(employee_id.value()));
    }

    let rows: Vec<AuditRow> = query
        .order(audit_events::event_id.asc())
        .select((
            audit_events::event_id,
            audit_events::employee_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .load::<AuditRow>(conn)?;

    rows.into_iter().map(row_to_event).collect()
}
