// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Dates cross the boundary as ISO 8601 calendar-date text
//! (`YYYY-MM-DD`); handlers parse and validate them before anything
//! touches the ledger.

use leave_ledger_domain::LedgerEntry;
use serde::{Deserialize, Serialize};

/// A ledger entry as exposed through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntryInfo {
    /// Store-assigned identifier.
    pub entry_id: Option<i64>,
    /// The subject employee.
    pub employee_id: i64,
    /// The date this entry represents (ISO 8601).
    pub event_date: String,
    /// Whether this is an aggregate month-end entry.
    pub is_monthly_summary: bool,
    /// Balance carried in from the preceding entry.
    pub opening_leaves: f64,
    /// Signed adjustment delta.
    pub leave_adjustment: f64,
    /// Approved-leave working days attributed to this entry.
    pub approved_leaves: f64,
    /// Unexcused absence working days.
    pub absent_days: f64,
    /// Allowance snapshot.
    pub allowed_leaves: f64,
    /// Derived closing balance.
    pub closing_leaves: f64,
    /// Derived remaining balance.
    pub remaining_leaves: f64,
    /// Back-reference to the originating adjustment, if any.
    pub adjustment_ref: Option<i64>,
    /// Back-reference to the originating allowance, if any.
    pub allowance_ref: Option<i64>,
    /// Soft-visibility flag.
    pub active: bool,
}

impl LedgerEntryInfo {
    /// Builds the API view of a domain entry.
    #[must_use]
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            entry_id: entry.entry_id(),
            employee_id: entry.employee_id.value(),
            event_date: entry.event_date.to_string(),
            is_monthly_summary: entry.is_monthly_summary,
            opening_leaves: entry.opening_leaves,
            leave_adjustment: entry.leave_adjustment,
            approved_leaves: entry.approved_leaves,
            absent_days: entry.absent_days,
            allowed_leaves: entry.allowed_leaves,
            closing_leaves: entry.closing_leaves(),
            remaining_leaves: entry.remaining_leaves(),
            adjustment_ref: entry.adjustment_ref,
            allowance_ref: entry.allowance_ref,
            active: entry.active,
        }
    }
}

/// Request to record a ledger entry for an approved leave interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordLeaveEventRequest {
    /// The subject employee.
    pub employee_id: i64,
    /// First day of the approved interval (ISO 8601).
    pub start_date: String,
    /// Last day of the approved interval (ISO 8601).
    pub end_date: String,
}

/// Response for a recorded (or skipped) leave event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordLeaveEventResponse {
    /// The created entry, when one was created.
    pub entry: Option<LedgerEntryInfo>,
    /// A success or skip message.
    pub message: String,
}

/// Request to record a ledger entry for an approved adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAdjustmentRequest {
    /// The adjustment's identifier in the approval system.
    pub adjustment_id: i64,
    /// The subject employee.
    pub employee_id: i64,
    /// The date the adjustment takes effect (ISO 8601).
    pub date: String,
    /// Signed day delta.
    pub delta: f64,
    /// Declared direction: `grant` or `deduction`.
    pub direction: String,
    /// The reason recorded by the author.
    pub reason: String,
    /// Whether the approval workflow has completed.
    pub approved: bool,
}

/// Response for a recorded adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAdjustmentResponse {
    /// The created entry.
    pub entry: LedgerEntryInfo,
    /// A success message.
    pub message: String,
}

/// Request to record an approved allowance and its ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAllowanceRequest {
    /// The allowance's identifier in the approval system.
    pub allowance_id: i64,
    /// The subject employee.
    pub employee_id: i64,
    /// Days granted by this allowance.
    pub allowed_leaves: f64,
    /// The first day the allowance applies from (ISO 8601).
    pub from_date: String,
}

/// Response for a granted allowance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAllowanceResponse {
    /// The created entry.
    pub entry: LedgerEntryInfo,
    /// A success message.
    pub message: String,
}

/// Request to record an approved public holiday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterHolidayRequest {
    /// The holiday date (ISO 8601).
    pub date: String,
}

/// Request to record an attendance check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAttendanceRequest {
    /// The subject employee.
    pub employee_id: i64,
    /// The check-in date (ISO 8601).
    pub date: String,
}

/// Generic acknowledgement for fact registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFactResponse {
    /// A success message.
    pub message: String,
}

/// Request for an explicit recompute (administrative repair).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeRequest {
    /// The subject employee.
    pub employee_id: i64,
    /// First date of the recompute window (ISO 8601).
    pub from_date: String,
}

/// Response for an explicit recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeResponse {
    /// Entries recomputed and persisted.
    pub entries_recomputed: usize,
    /// Commit boundaries crossed.
    pub batches_committed: usize,
    /// A success message.
    pub message: String,
}

/// Request to delete or archive a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryActionRequest {
    /// The entry to act on.
    pub entry_id: i64,
}

/// Response for a delete or archive action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryActionResponse {
    /// A success message.
    pub message: String,
}

/// Response for a monthly aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAggregationResponse {
    /// First day of the aggregated month (ISO 8601).
    pub month_start: String,
    /// Last day of the aggregated month (ISO 8601).
    pub month_end: String,
    /// The summary entries created.
    pub created: Vec<LedgerEntryInfo>,
    /// Employees skipped because a summary already existed.
    pub skipped_existing: usize,
    /// Employees skipped because the month held no absence.
    pub skipped_no_absence: usize,
}

/// An employee's balance position as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBalanceResponse {
    /// The subject employee.
    pub employee_id: i64,
    /// The evaluation date (ISO 8601).
    pub as_of: String,
    /// Allowance snapshot of the governing entry.
    pub allowed_leaves: f64,
    /// Closing balance of the governing entry.
    pub closing_leaves: f64,
    /// Remaining balance of the governing entry.
    pub remaining_leaves: f64,
}

/// An employee's ordered ledger history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLedgerHistoryResponse {
    /// The subject employee.
    pub employee_id: i64,
    /// Entries in `(event_date, entry_id)` order.
    pub entries: Vec<LedgerEntryInfo>,
}
