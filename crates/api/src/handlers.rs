// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate boundary requests into domain types, run the
//! corresponding cascade-trigger operation, and package the result with
//! the audit event it must leave behind. The caller (the HTTP server)
//! persists the audit event alongside the response.

use leave_ledger::{
    BalancePosition, balance_as_of, recompute_from, run_monthly_aggregation,
};
use leave_ledger_audit::{Action, Actor, AuditEvent, BalanceSnapshot, Cause};
use leave_ledger_domain::{
    AdjustmentDirection, AdjustmentRecord, AllowanceRecord, AllowanceState, EmployeeId,
    LeaveInterval, LedgerEntry, validate_leave_interval,
};
use leave_ledger_persistence::Persistence;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    EntryActionRequest, EntryActionResponse, GetBalanceResponse, GetLedgerHistoryResponse,
    GrantAllowanceRequest, GrantAllowanceResponse, LedgerEntryInfo, RecomputeRequest,
    RecomputeResponse, RecordAdjustmentRequest, RecordAdjustmentResponse, RecordLeaveEventRequest,
    RecordLeaveEventResponse, RegisterAttendanceRequest, RegisterFactResponse,
    RegisterHolidayRequest, RunAggregationResponse,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The result of an API operation that includes both the response and the
/// audit event.
///
/// This ensures that successful state-changing API operations always
/// produce an audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

/// Parses an ISO 8601 calendar date from a request field.
fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{value}' is not a valid ISO 8601 date: {e}"),
    })
}

/// Snapshots an employee's balance position for an audit event.
fn snapshot(persistence: &mut Persistence, employee_id: EmployeeId, date: Date) -> BalanceSnapshot {
    let position: BalancePosition = balance_as_of(persistence, employee_id, date)
        .unwrap_or_else(|_| BalancePosition::zero());
    BalanceSnapshot::new(format!(
        "allowed={},closing={},remaining={}",
        position.allowed_leaves, position.closing_leaves, position.remaining_leaves
    ))
}

/// Records a ledger entry for an approved leave interval.
///
/// The interval is also registered as a fact so later monthly
/// attribution sees it. Skips (stale interval, no working days,
/// duplicate entry) return a response without an entry rather than an
/// error, matching the source system.
///
/// # Errors
///
/// Returns an error if a date is invalid, the interval is reversed, or
/// the ledger operation fails.
pub fn record_leave_event(
    persistence: &mut Persistence,
    request: &RecordLeaveEventRequest,
    actor: Actor,
    cause: Cause,
    now: Date,
) -> Result<ApiResult<RecordLeaveEventResponse>, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(request.employee_id);
    let start_date: Date = parse_date_field(&request.start_date, "start_date")?;
    let end_date: Date = parse_date_field(&request.end_date, "end_date")?;
    let interval: LeaveInterval = LeaveInterval::new(employee_id, start_date, end_date);
    validate_leave_interval(&interval).map_err(|e| translate_domain_error(&e))?;

    let before: BalanceSnapshot = snapshot(persistence, employee_id, end_date);

    persistence
        .add_leave_request(&interval)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to register leave interval: {e}"),
        })?;

    let created: Option<LedgerEntry> =
        leave_ledger::record_leave_event(persistence, &interval, now)
            .map_err(|e| translate_core_error(&e))?;

    let after: BalanceSnapshot = snapshot(persistence, employee_id, end_date);

    let (entry, message): (Option<LedgerEntryInfo>, String) = match created {
        Some(entry) => {
            info!(employee = %employee_id, "Recorded leave event entry");
            (
                Some(LedgerEntryInfo::from_entry(&entry)),
                format!(
                    "Recorded {} leave day(s) for employee {employee_id} starting {start_date}",
                    entry.approved_leaves
                ),
            )
        }
        None => (
            None,
            format!("No ledger entry recorded for employee {employee_id} ({start_date} to {end_date})"),
        ),
    };

    let action: Action = Action::new(
        String::from("RecordLeaveEvent"),
        Some(format!("Leave {start_date} to {end_date}")),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, Some(employee_id));

    Ok(ApiResult {
        response: RecordLeaveEventResponse { entry, message },
        audit_event,
    })
}

/// Records a ledger entry for an approved adjustment.
///
/// # Errors
///
/// Returns an error if a date is invalid, validation fails, the
/// adjustment already produced an entry, or the cascade fails.
pub fn record_adjustment(
    persistence: &mut Persistence,
    request: &RecordAdjustmentRequest,
    actor: Actor,
    cause: Cause,
    now: Date,
) -> Result<ApiResult<RecordAdjustmentResponse>, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(request.employee_id);
    let date: Date = parse_date_field(&request.date, "date")?;
    let direction: AdjustmentDirection = match request.direction.as_str() {
        "grant" => AdjustmentDirection::Grant,
        "deduction" => AdjustmentDirection::Deduction,
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("direction"),
                message: format!("'{other}' is not a valid direction (grant, deduction)"),
            });
        }
    };

    let record: AdjustmentRecord = AdjustmentRecord {
        adjustment_id: request.adjustment_id,
        employee_id,
        date,
        delta: request.delta,
        direction,
        reason: request.reason.clone(),
        approved: request.approved,
    };

    let before: BalanceSnapshot = snapshot(persistence, employee_id, date);

    let entry: LedgerEntry = leave_ledger::record_adjustment(persistence, &record, now)
        .map_err(|e| translate_core_error(&e))?;

    let after: BalanceSnapshot = snapshot(persistence, employee_id, date);

    let action: Action = Action::new(
        String::from("RecordAdjustment"),
        Some(format!(
            "Adjustment {} of {} day(s) on {date}",
            request.adjustment_id, request.delta
        )),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, Some(employee_id));

    Ok(ApiResult {
        response: RecordAdjustmentResponse {
            message: format!(
                "Recorded adjustment of {} day(s) for employee {employee_id} on {date}",
                request.delta
            ),
            entry: LedgerEntryInfo::from_entry(&entry),
        },
        audit_event,
    })
}

/// Records an approved allowance and its ledger entry.
///
/// # Errors
///
/// Returns an error if a date is invalid, validation fails, the
/// allowance already produced an entry, or the cascade fails.
pub fn grant_allowance(
    persistence: &mut Persistence,
    request: &GrantAllowanceRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<GrantAllowanceResponse>, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(request.employee_id);
    let from_date: Date = parse_date_field(&request.from_date, "from_date")?;

    let record: AllowanceRecord = AllowanceRecord {
        allowance_id: request.allowance_id,
        employee_id,
        allowed_leaves: request.allowed_leaves,
        from_date,
        state: AllowanceState::Approved,
    };

    let before: BalanceSnapshot = snapshot(persistence, employee_id, from_date);

    persistence
        .upsert_allowance(&record)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to register allowance: {e}"),
        })?;

    let entry: LedgerEntry = leave_ledger::record_allowance_grant(persistence, &record)
        .map_err(|e| translate_core_error(&e))?;

    let after: BalanceSnapshot = snapshot(persistence, employee_id, from_date);

    let action: Action = Action::new(
        String::from("GrantAllowance"),
        Some(format!(
            "Allowance {} of {} day(s) from {from_date}",
            request.allowance_id, request.allowed_leaves
        )),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, Some(employee_id));

    Ok(ApiResult {
        response: GrantAllowanceResponse {
            message: format!(
                "Granted {} day(s) to employee {employee_id} from {from_date}",
                request.allowed_leaves
            ),
            entry: LedgerEntryInfo::from_entry(&entry),
        },
        audit_event,
    })
}

/// Records an approved public holiday.
///
/// # Errors
///
/// Returns an error if the date is invalid or the database operation
/// fails.
pub fn register_holiday(
    persistence: &mut Persistence,
    request: &RegisterHolidayRequest,
) -> Result<RegisterFactResponse, ApiError> {
    let date: Date = parse_date_field(&request.date, "date")?;

    persistence
        .add_public_holiday(date)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to register holiday: {e}"),
        })?;

    Ok(RegisterFactResponse {
        message: format!("Registered public holiday on {date}"),
    })
}

/// Records an attendance check-in.
///
/// # Errors
///
/// Returns an error if the date is invalid or the database operation
/// fails.
pub fn register_attendance(
    persistence: &mut Persistence,
    request: &RegisterAttendanceRequest,
) -> Result<RegisterFactResponse, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(request.employee_id);
    let date: Date = parse_date_field(&request.date, "date")?;

    persistence
        .add_attendance_checkin(employee_id, date)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to register check-in: {e}"),
        })?;

    Ok(RegisterFactResponse {
        message: format!("Registered check-in for employee {employee_id} on {date}"),
    })
}

/// Recomputes an employee's chain from a date (administrative repair).
///
/// # Errors
///
/// Returns an error if the date is invalid or the recompute fails.
pub fn recompute(
    persistence: &mut Persistence,
    request: &RecomputeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<RecomputeResponse>, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(request.employee_id);
    let from_date: Date = parse_date_field(&request.from_date, "from_date")?;

    let before: BalanceSnapshot = snapshot(persistence, employee_id, from_date);

    let outcome = recompute_from(persistence, employee_id, from_date)
        .map_err(|e| translate_core_error(&e))?;

    let after: BalanceSnapshot = snapshot(persistence, employee_id, from_date);

    let action: Action = Action::new(
        String::from("RecomputeFrom"),
        Some(format!("Administrative repair from {from_date}")),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, Some(employee_id));

    Ok(ApiResult {
        response: RecomputeResponse {
            entries_recomputed: outcome.entries_recomputed,
            batches_committed: outcome.batches_committed,
            message: format!(
                "Recomputed {} entries for employee {employee_id} from {from_date}",
                outcome.entries_recomputed
            ),
        },
        audit_event,
    })
}

/// Runs the monthly aggregation for the month preceding `now`.
///
/// # Errors
///
/// Returns an error if the sweep or any entry creation fails.
pub fn run_aggregation(
    persistence: &mut Persistence,
    actor: Actor,
    cause: Cause,
    now: Date,
) -> Result<ApiResult<RunAggregationResponse>, ApiError> {
    let outcome = run_monthly_aggregation(persistence, now)
        .map_err(|e| translate_core_error(&e))?;

    let before: BalanceSnapshot = BalanceSnapshot::new(format!(
        "skipped_existing={},skipped_no_absence={}",
        outcome.skipped_existing, outcome.skipped_no_absence
    ));
    let after: BalanceSnapshot =
        BalanceSnapshot::new(format!("summaries_created={}", outcome.created.len()));

    let action: Action = Action::new(
        String::from("RunMonthlyAggregation"),
        Some(format!(
            "Aggregated {} to {}",
            outcome.month_start, outcome.month_end
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, None);

    Ok(ApiResult {
        response: RunAggregationResponse {
            month_start: outcome.month_start.to_string(),
            month_end: outcome.month_end.to_string(),
            created: outcome
                .created
                .iter()
                .map(LedgerEntryInfo::from_entry)
                .collect(),
            skipped_existing: outcome.skipped_existing,
            skipped_no_absence: outcome.skipped_no_absence,
        },
        audit_event,
    })
}

/// Deletes a ledger entry and re-chains the remainder.
///
/// # Errors
///
/// Returns an error if the entry is unknown or the cascade fails.
pub fn delete_ledger_entry(
    persistence: &mut Persistence,
    request: &EntryActionRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<EntryActionResponse>, ApiError> {
    let entry: LedgerEntry = leave_ledger::LedgerStore::entry(persistence, request.entry_id)
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Ledger entry"),
            message: format!("entry {}", request.entry_id),
        })?;
    let employee_id: EmployeeId = entry.employee_id;

    let before: BalanceSnapshot = snapshot(persistence, employee_id, entry.event_date);

    leave_ledger::delete_entry(persistence, request.entry_id)
        .map_err(|e| translate_core_error(&e))?;

    let after: BalanceSnapshot = snapshot(persistence, employee_id, entry.event_date);

    let action: Action = Action::new(
        String::from("DeleteEntry"),
        Some(format!("Deleted entry {} ({})", request.entry_id, entry.event_date)),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, Some(employee_id));

    Ok(ApiResult {
        response: EntryActionResponse {
            message: format!("Deleted ledger entry {}", request.entry_id),
        },
        audit_event,
    })
}

/// Archives a ledger entry (soft delete) and re-chains the remainder.
///
/// # Errors
///
/// Returns an error if the entry is unknown or the cascade fails.
pub fn archive_ledger_entry(
    persistence: &mut Persistence,
    request: &EntryActionRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<EntryActionResponse>, ApiError> {
    let entry: LedgerEntry = leave_ledger::archive_entry(persistence, request.entry_id)
        .map_err(|e| translate_core_error(&e))?;
    let employee_id: EmployeeId = entry.employee_id;

    let before: BalanceSnapshot = BalanceSnapshot::new(String::from("active=true"));
    let after: BalanceSnapshot = snapshot(persistence, employee_id, entry.event_date);

    let action: Action = Action::new(
        String::from("ArchiveEntry"),
        Some(format!("Archived entry {} ({})", request.entry_id, entry.event_date)),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, Some(employee_id));

    Ok(ApiResult {
        response: EntryActionResponse {
            message: format!("Archived ledger entry {}", request.entry_id),
        },
        audit_event,
    })
}

/// Returns an employee's balance position as of a date.
///
/// # Errors
///
/// Returns an error if the date is invalid or the store fails.
pub fn get_balance_as_of(
    persistence: &mut Persistence,
    employee_id: i64,
    as_of: &str,
) -> Result<GetBalanceResponse, ApiError> {
    let employee: EmployeeId = EmployeeId::new(employee_id);
    let date: Date = parse_date_field(as_of, "date")?;

    let position: BalancePosition =
        balance_as_of(persistence, employee, date).map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?;

    Ok(GetBalanceResponse {
        employee_id,
        as_of: date.to_string(),
        allowed_leaves: position.allowed_leaves,
        closing_leaves: position.closing_leaves,
        remaining_leaves: position.remaining_leaves,
    })
}

/// Returns an employee's ordered ledger history.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_ledger_history(
    persistence: &mut Persistence,
    employee_id: i64,
    include_archived: bool,
) -> Result<GetLedgerHistoryResponse, ApiError> {
    let employee: EmployeeId = EmployeeId::new(employee_id);

    let entries: Vec<LedgerEntry> =
        leave_ledger::LedgerStore::history(persistence, employee, include_archived).map_err(
            |e| ApiError::Internal {
                message: e.to_string(),
            },
        )?;

    Ok(GetLedgerHistoryResponse {
        employee_id,
        entries: entries.iter().map(LedgerEntryInfo::from_entry).collect(),
    })
}
