// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger_audit::AuditEvent;
use serde_json::json;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event and returns its assigned event ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The audit event to persist
///
/// # Errors
///
/// Returns an error if serialization or the database operation fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&json!({
        "id": event.actor.id,
        "actor_type": event.actor.actor_type,
    }))?;
    let cause_json: String = serde_json::to_string(&json!({
        "id": event.cause.id,
        "description": event.cause.description,
    }))?;
    let action_json: String = serde_json::to_string(&json!({
        "name": event.action.name,
        "details": event.action.details,
    }))?;
    let before_json: String = serde_json::to_string(&json!({ "data": event.before.data }))?;
    let after_json: String = serde_json::to_string(&json!({ "data": event.after.data }))?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::employee_id.eq(event.employee_id.map(|id| id.value())),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::before_snapshot_json.eq(before_json),
            audit_events::after_snapshot_json.eq(after_json),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
