// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use leave_ledger_domain::EmployeeId;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a ledger change.
/// This could be a user, a system process, or the monthly aggregation
/// scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "system", "scheduler").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a ledger change was initiated — typically the
/// upstream approval record or cron run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, approval ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what ledger change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`RecordLeaveEvent`", "`RecomputeFrom`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of an employee's balance position at a point in time.
///
/// Snapshots capture the allowed/closing/remaining figures visible before
/// and after a ledger operation, rendered as a compact string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// A string representation of the balance position.
    pub data: String,
}

impl BalanceSnapshot {
    /// Creates a new `BalanceSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the balance position
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a ledger change.
///
/// Every successful ledger operation must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The balance position before the change (before)
/// - The balance position after the change (after)
/// - The employee whose chain was affected, when the operation is scoped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this ledger change.
    pub actor: Actor,
    /// The cause or reason for this ledger change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The balance position before the change.
    pub before: BalanceSnapshot,
    /// The balance position after the change.
    pub after: BalanceSnapshot,
    /// The affected employee; `None` for system-wide operations such as a
    /// full aggregation run.
    pub employee_id: Option<EmployeeId>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The balance position before the change
    /// * `after` - The balance position after the change
    /// * `employee_id` - The affected employee, when scoped
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: BalanceSnapshot,
        after: BalanceSnapshot,
        employee_id: Option<EmployeeId>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            employee_id,
        }
    }
}
