// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly aggregation.
//!
//! Intended to run from a scheduler shortly after each month closes, this
//! sweeps every known employee and materializes a month-end summary entry
//! for the previous month where one is due. Mirroring the source system,
//! a month with no unexcused absence produces no summary entry, even when
//! approved leave occurred in it.

use crate::error::CoreError;
use crate::store::{FactSource, LedgerStore};
use crate::trigger::create_entry;
use leave_ledger_domain::{
    EmployeeId, LedgerEntry, absent_working_days, interval_dates_clipped, month_bounds,
    months_earlier, working_day_set,
};
use time::Date;
use tracing::{debug, info};

/// Result of one aggregation sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationOutcome {
    /// First day of the aggregated month.
    pub month_start: Date,
    /// Last day of the aggregated month.
    pub month_end: Date,
    /// The summary entries created, in employee order.
    pub created: Vec<LedgerEntry>,
    /// Employees skipped because a summary already existed.
    pub skipped_existing: usize,
    /// Employees skipped because the month held no absence.
    pub skipped_no_absence: usize,
}

/// Runs the aggregation for the month preceding `now`.
///
/// For each known employee without a monthly summary in that month, the
/// absent working days are computed (working days minus check-in dates
/// minus leave-covered dates); when any remain, a month-end summary entry
/// is created through the cascade trigger, which fills in attribution,
/// allowance, and the derived balances, and cascades forward.
///
/// # Errors
///
/// Returns an error if the store fails or any entry creation or cascade
/// fails; employees already processed keep their summaries.
pub fn run_monthly_aggregation<S: LedgerStore + FactSource>(
    store: &mut S,
    now: Date,
) -> Result<AggregationOutcome, CoreError> {
    let (month_start, month_end) = month_bounds(months_earlier(now, 1)?)?;

    info!(%month_start, %month_end, "Running monthly aggregation");

    let employees: Vec<EmployeeId> = store.known_employees()?;
    let holidays = store.approved_holidays(month_start, month_end)?;
    let workdays = working_day_set(month_start, month_end, &holidays);

    let mut outcome: AggregationOutcome = AggregationOutcome {
        month_start,
        month_end,
        created: Vec::new(),
        skipped_existing: 0,
        skipped_no_absence: 0,
    };

    for employee_id in employees {
        if store.has_monthly_summary_in(employee_id, month_start, month_end)? {
            outcome.skipped_existing += 1;
            continue;
        }

        let attendance = store.attendance_dates(employee_id, month_start, month_end)?;
        let intervals = store.approved_leave_intervals(employee_id)?;
        let leave_dates = interval_dates_clipped(&intervals, month_start, month_end);
        let absent: f64 = absent_working_days(&workdays, &attendance, &leave_dates);

        if absent <= 0.0 {
            debug!(employee = %employee_id, "No absences; skipping summary");
            outcome.skipped_no_absence += 1;
            continue;
        }

        let entry: LedgerEntry = LedgerEntry::monthly_summary(employee_id, month_end);
        let created: LedgerEntry = create_entry(store, entry)?;
        outcome.created.push(created);
    }

    info!(
        created = outcome.created.len(),
        skipped_existing = outcome.skipped_existing,
        skipped_no_absence = outcome.skipped_no_absence,
        "Monthly aggregation complete"
    );

    Ok(outcome)
}
