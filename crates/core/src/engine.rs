// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The recompute engine.
//!
//! Given an employee and a starting point, the engine walks forward
//! through every later ledger entry in strict `(event_date, entry_id)`
//! order, re-deriving opening, allowance, attribution, absence, and the
//! closing/remaining totals, and persists the results in bounded batches.
//!
//! The engine is idempotent: rerunning it with no intervening data change
//! produces identical persisted state, which is also what makes failed
//! cascades safely retryable.

use crate::error::{CoreError, StoreError};
use crate::store::{BalancePosition, CascadeGuard, FactSource, LedgerStore};
use leave_ledger_domain::{
    EmployeeId, LedgerEntry, absent_working_days, approved_allowance_total, interval_dates_clipped,
    month_bounds, monthly_approved_days, working_day_set,
};
use time::Date;
use tracing::{debug, info};

/// Maximum entries persisted per commit boundary.
///
/// Bounds transaction size on long chains (an employee with years of
/// history); the cascade may suspend between batches without holding a
/// storage transaction open across the whole chain.
pub const RECOMPUTE_BATCH_SIZE: usize = 50;

/// Summary of a completed recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeOutcome {
    /// Entries recomputed and persisted.
    pub entries_recomputed: usize,
    /// Commit boundaries crossed.
    pub batches_committed: usize,
}

/// Recomputes every entry of `employee_id` with `event_date >= from`.
///
/// The baseline is the nearest active entry strictly before `from` (zero
/// when none survives). This is both the cascade primitive used by the
/// trigger for updates and deletions, and the explicit administrative
/// repair operation.
///
/// # Errors
///
/// Returns [`CoreError::CascadeIncomplete`] if a batch fails to commit
/// (the committed prefix stays valid and the call is retryable), or
/// [`CoreError::OrderingViolation`] if the post-recompute invariant check
/// finds a broken chain.
pub fn recompute_from<S: LedgerStore + FactSource>(
    store: &mut S,
    employee_id: EmployeeId,
    from: Date,
) -> Result<RecomputeOutcome, CoreError> {
    let baseline: f64 = store
        .nearest_preceding(employee_id, from)?
        .map_or(0.0, |entry| entry.closing_leaves());
    let chain: Vec<LedgerEntry> = store.chain_from(employee_id, from)?;

    let outcome: RecomputeOutcome = recompute_chain(store, employee_id, baseline, chain)?;
    verify_chain(employee_id, baseline, &store.chain_from(employee_id, from)?)?;
    Ok(outcome)
}

/// Recomputes every entry of `employee_id` strictly after `after`.
///
/// The baseline is the last active entry on or before `after` — on the
/// create path that is the entry just written, whose own fields were
/// computed inline, so the cascade does not redo its work.
///
/// # Errors
///
/// Propagates the same failures as [`recompute_from`].
pub fn recompute_after<S: LedgerStore + FactSource>(
    store: &mut S,
    employee_id: EmployeeId,
    after: Date,
) -> Result<RecomputeOutcome, CoreError> {
    let baseline: f64 = store
        .last_on_or_before(employee_id, after)?
        .map_or(0.0, |entry| entry.closing_leaves());
    let chain: Vec<LedgerEntry> = store.chain_after(employee_id, after)?;

    let outcome: RecomputeOutcome = recompute_chain(store, employee_id, baseline, chain)?;
    verify_chain(employee_id, baseline, &store.chain_after(employee_id, after)?)?;
    Ok(outcome)
}

/// Re-derives one entry's computed fields against the given opening
/// balance.
///
/// Discrete entries keep their stored `approved_leaves` (authored at
/// creation from the leave interval); monthly summaries re-run day
/// attribution and the absence calculation every pass.
pub(crate) fn refresh_entry<S: LedgerStore + FactSource>(
    store: &mut S,
    entry: &mut LedgerEntry,
    opening: f64,
) -> Result<(), CoreError> {
    entry.opening_leaves = opening;

    let allowances = store.allowance_records(entry.employee_id)?;
    entry.allowed_leaves = approved_allowance_total(&allowances);

    if entry.is_monthly_summary {
        let (month_start, month_end) = month_bounds(entry.event_date)?;
        let holidays = store.approved_holidays(month_start, month_end)?;
        let workdays = working_day_set(month_start, month_end, &holidays);
        let claims = store.discrete_claims_in(entry.employee_id, month_start, month_end)?;
        let intervals = store.approved_leave_intervals(entry.employee_id)?;

        entry.approved_leaves =
            monthly_approved_days(month_start, month_end, &workdays, &claims, &intervals);

        let attendance = store.attendance_dates(entry.employee_id, month_start, month_end)?;
        let leave_dates = interval_dates_clipped(&intervals, month_start, month_end);
        entry.absent_days = absent_working_days(&workdays, &attendance, &leave_dates);
    } else {
        entry.absent_days = 0.0;
    }

    entry.derive_totals();
    Ok(())
}

/// Walks the loaded chain in order, refreshing each entry against its
/// predecessor's closing balance, then persists in bounded batches.
fn recompute_chain<S: LedgerStore + FactSource>(
    store: &mut S,
    employee_id: EmployeeId,
    baseline: f64,
    mut chain: Vec<LedgerEntry>,
) -> Result<RecomputeOutcome, CoreError> {
    if chain.is_empty() {
        return Ok(RecomputeOutcome {
            entries_recomputed: 0,
            batches_committed: 0,
        });
    }

    debug!(
        employee = %employee_id,
        entries = chain.len(),
        baseline,
        "Starting recompute pass"
    );

    let mut previous_closing: f64 = baseline;
    for entry in &mut chain {
        refresh_entry(store, entry, previous_closing)?;
        previous_closing = entry.closing_leaves();
    }

    let guard: CascadeGuard = CascadeGuard::new();
    let mut entries_committed: usize = 0;
    let mut batches_committed: usize = 0;

    for batch in chain.chunks(RECOMPUTE_BATCH_SIZE) {
        if let Err(source) = store.persist_batch(batch, &guard) {
            return Err(CoreError::CascadeIncomplete {
                employee_id,
                entries_committed,
                resume_from: batch.first().map(|entry| entry.event_date),
                source,
            });
        }
        entries_committed += batch.len();
        batches_committed += 1;
        debug!(
            employee = %employee_id,
            entries_committed,
            "Committed recompute batch"
        );
    }

    info!(
        employee = %employee_id,
        entries = entries_committed,
        batches = batches_committed,
        "Recompute pass complete"
    );

    Ok(RecomputeOutcome {
        entries_recomputed: entries_committed,
        batches_committed,
    })
}

/// Defensive continuity check over the persisted chain after a recompute.
///
/// Exact float equality is intended: each opening was assigned from the
/// previous closing, so any difference at all means the chain is broken.
#[allow(clippy::float_cmp)]
fn verify_chain(
    employee_id: EmployeeId,
    baseline: f64,
    chain: &[LedgerEntry],
) -> Result<(), CoreError> {
    let mut expected: f64 = baseline;
    for entry in chain {
        if entry.opening_leaves != expected {
            return Err(CoreError::OrderingViolation {
                employee_id,
                event_date: entry.event_date,
                expected_opening: expected,
                found_opening: entry.opening_leaves,
            });
        }
        expected = entry.closing_leaves();
    }
    Ok(())
}

/// Returns an employee's balance position as of `date`.
///
/// The governing entry is the last active entry with `event_date <= date`;
/// an employee with no such entry is at the zero position.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn balance_as_of<S: LedgerStore>(
    store: &mut S,
    employee_id: EmployeeId,
    date: Date,
) -> Result<BalancePosition, StoreError> {
    Ok(store
        .last_on_or_before(employee_id, date)?
        .map_or(BalancePosition::zero(), |entry| BalancePosition {
            allowed_leaves: entry.allowed_leaves,
            closing_leaves: entry.closing_leaves(),
            remaining_leaves: entry.remaining_leaves(),
        }))
}
