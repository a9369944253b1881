// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of an employee's ledger history.
//!
//! The column set mirrors the summary table the source system mailed to
//! employees each month; delivery itself is out of scope, so the export
//! stops at the document.

use thiserror::Error;

use crate::error::ApiError;
use crate::handlers::get_ledger_history;
use crate::request_response::{GetLedgerHistoryResponse, LedgerEntryInfo};
use leave_ledger_persistence::Persistence;

/// CSV export errors.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// Writing a record failed.
    #[error("Failed to write CSV record: {0}")]
    Write(#[from] csv::Error),

    /// The finished buffer could not be recovered from the writer.
    #[error("Failed to finish CSV document: {0}")]
    Finish(String),
}

const HEADER: [&str; 10] = [
    "entry_id",
    "event_date",
    "kind",
    "opening_leaves",
    "leave_adjustment",
    "approved_leaves",
    "absent_days",
    "allowed_leaves",
    "closing_leaves",
    "remaining_leaves",
];

/// Renders ledger entries as a CSV document.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn render_ledger_csv(entries: &[LedgerEntryInfo]) -> Result<String, CsvExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for entry in entries {
        let kind: &str = if entry.is_monthly_summary {
            "monthly_summary"
        } else {
            "event"
        };
        writer.write_record([
            entry.entry_id.map_or_else(String::new, |id| id.to_string()),
            entry.event_date.clone(),
            kind.to_string(),
            entry.opening_leaves.to_string(),
            entry.leave_adjustment.to_string(),
            entry.approved_leaves.to_string(),
            entry.absent_days.to_string(),
            entry.allowed_leaves.to_string(),
            entry.closing_leaves.to_string(),
            entry.remaining_leaves.to_string(),
        ])?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| CsvExportError::Finish(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvExportError::Finish(e.to_string()))
}

/// Exports an employee's ledger history as a CSV document.
///
/// # Errors
///
/// Returns an error if the history cannot be loaded or rendered.
pub fn export_ledger_history_csv(
    persistence: &mut Persistence,
    employee_id: i64,
    include_archived: bool,
) -> Result<String, ApiError> {
    let history: GetLedgerHistoryResponse =
        get_ledger_history(persistence, employee_id, include_archived)?;

    render_ledger_csv(&history.entries).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}
