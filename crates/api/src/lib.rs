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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests;

pub use csv_export::{CsvExportError, export_ledger_history_csv, render_ledger_csv};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, archive_ledger_entry, delete_ledger_entry, get_balance_as_of, get_ledger_history,
    grant_allowance, record_adjustment, record_leave_event, recompute, register_attendance,
    register_holiday, run_aggregation,
};
pub use request_response::{
    EntryActionRequest, EntryActionResponse, GetBalanceResponse, GetLedgerHistoryResponse,
    GrantAllowanceRequest, GrantAllowanceResponse, LedgerEntryInfo, RecomputeRequest,
    RecomputeResponse, RecordAdjustmentRequest, RecordAdjustmentResponse, RecordLeaveEventRequest,
    RecordLeaveEventResponse, RegisterAttendanceRequest, RegisterFactResponse,
    RegisterHolidayRequest, RunAggregationResponse,
};
