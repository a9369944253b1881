// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The cascade trigger.
//!
//! Every externally visible ledger mutation goes through here: the trigger
//! validates the change, performs the entry-level write, and then invokes
//! the recompute engine for the affected suffix of the employee's chain.
//! Recomputation itself writes through [`crate::store::CascadeGuard`]-gated
//! batches and can never re-enter this module.

use crate::engine::{recompute_after, recompute_from, refresh_entry};
use crate::error::CoreError;
use crate::store::{FactSource, LedgerStore};
use leave_ledger_domain::{
    AdjustmentRecord, AllowanceRecord, EmployeeId, LeaveInterval, LedgerEntry, months_earlier,
    validate_adjustment, validate_allowance, validate_leave_interval, working_days,
};
use time::Date;
use tracing::{debug, info, warn};

/// A partial update to an existing entry's authored fields.
///
/// Derived fields cannot appear here; they are re-derived by the cascade
/// that follows the write.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryPatch {
    /// Moves the entry to a new event date.
    pub event_date: Option<Date>,
    /// Replaces the adjustment delta.
    pub leave_adjustment: Option<f64>,
    /// Replaces the approved-leave day count (discrete entries).
    pub approved_leaves: Option<f64>,
}

impl EntryPatch {
    /// Whether applying this patch requires a cascade.
    #[must_use]
    pub const fn affects_chain(&self) -> bool {
        self.event_date.is_some()
            || self.leave_adjustment.is_some()
            || self.approved_leaves.is_some()
    }
}

/// Validates and inserts a new entry, computing its own fields inline,
/// then cascades through the entries strictly after it.
///
/// Computing inline (rather than recomputing from the entry's own date)
/// avoids doing the new entry's work twice.
pub(crate) fn create_entry<S: LedgerStore + FactSource>(
    store: &mut S,
    mut entry: LedgerEntry,
) -> Result<LedgerEntry, CoreError> {
    if store.has_entry(entry.employee_id, entry.event_date, entry.is_monthly_summary)? {
        return Err(CoreError::DuplicateEntry {
            employee_id: entry.employee_id,
            event_date: entry.event_date,
            is_monthly_summary: entry.is_monthly_summary,
        });
    }
    if let Some(adjustment_id) = entry.adjustment_ref {
        if store.adjustment_ref_used(adjustment_id)? {
            return Err(CoreError::DuplicateAdjustmentRef { adjustment_id });
        }
    }
    if let Some(allowance_id) = entry.allowance_ref {
        if store.allowance_ref_used(allowance_id)? {
            return Err(CoreError::DuplicateAllowanceRef { allowance_id });
        }
    }

    let opening: f64 = store
        .last_on_or_before(entry.employee_id, entry.event_date)?
        .map_or(0.0, |previous| previous.closing_leaves());
    refresh_entry(store, &mut entry, opening)?;

    let entry_id: i64 = store.insert_entry(&entry)?;
    entry.assign_id(entry_id);

    info!(
        employee = %entry.employee_id,
        entry_id,
        event_date = %entry.event_date,
        monthly = entry.is_monthly_summary,
        "Created ledger entry"
    );

    recompute_after(store, entry.employee_id, entry.event_date)?;

    Ok(entry)
}

/// Records a discrete ledger entry for an approved leave interval.
///
/// The entry lands at the interval's start date and claims the interval's
/// working days (weekends and approved holidays excluded). Mirroring the
/// source system, three cases are skipped rather than rejected, returning
/// `Ok(None)`: intervals that ended more than three months before `now`,
/// intervals containing no working day, and intervals whose entry already
/// exists.
///
/// # Errors
///
/// Returns an error if the interval is reversed, the store fails, or the
/// cascade fails.
pub fn record_leave_event<S: LedgerStore + FactSource>(
    store: &mut S,
    interval: &LeaveInterval,
    now: Date,
) -> Result<Option<LedgerEntry>, CoreError> {
    validate_leave_interval(interval)?;

    let stale_cutoff: Date = months_earlier(now, 3)?;
    if interval.end_date < stale_cutoff {
        debug!(
            employee = %interval.employee_id,
            end_date = %interval.end_date,
            "Skipping stale leave interval"
        );
        return Ok(None);
    }

    let holidays = store.approved_holidays(interval.start_date, interval.end_date)?;
    #[allow(clippy::cast_precision_loss)]
    let leave_days: f64 =
        working_days(interval.start_date, interval.end_date, &holidays).len() as f64;
    if leave_days <= 0.0 {
        warn!(
            employee = %interval.employee_id,
            start = %interval.start_date,
            end = %interval.end_date,
            "Leave interval covers no working day"
        );
        return Ok(None);
    }

    if store.has_entry(interval.employee_id, interval.start_date, false)? {
        debug!(
            employee = %interval.employee_id,
            event_date = %interval.start_date,
            "Leave event entry already exists"
        );
        return Ok(None);
    }

    let mut entry: LedgerEntry = LedgerEntry::new(interval.employee_id, interval.start_date);
    entry.approved_leaves = leave_days;

    create_entry(store, entry).map(Some)
}

/// Records a ledger entry for an approved adjustment.
///
/// # Errors
///
/// Returns an error if validation fails (unapproved, sign mismatch,
/// back-dated, missing reason), the adjustment already produced an entry,
/// or the cascade fails.
pub fn record_adjustment<S: LedgerStore + FactSource>(
    store: &mut S,
    record: &AdjustmentRecord,
    now: Date,
) -> Result<LedgerEntry, CoreError> {
    validate_adjustment(record, now)?;

    let mut entry: LedgerEntry = LedgerEntry::new(record.employee_id, record.date);
    entry.leave_adjustment = record.delta;
    entry.adjustment_ref = Some(record.adjustment_id);

    create_entry(store, entry)
}

/// Records a ledger entry for an approved allowance grant.
///
/// The entry lands at the allowance's `from_date`. Its `allowed_leaves`
/// is resolved from the full approved set, not copied from the one record,
/// so stacked allowances snapshot correctly.
///
/// # Errors
///
/// Returns an error if validation fails, the allowance already produced an
/// entry, or the cascade fails.
pub fn record_allowance_grant<S: LedgerStore + FactSource>(
    store: &mut S,
    record: &AllowanceRecord,
) -> Result<LedgerEntry, CoreError> {
    validate_allowance(record)?;

    let mut entry: LedgerEntry = LedgerEntry::new(record.employee_id, record.from_date);
    entry.allowance_ref = Some(record.allowance_id);

    create_entry(store, entry)
}

/// Applies a patch to an entry and cascades from the earliest affected
/// date.
///
/// When the event date moves, the cascade starts at the minimum of the old
/// and new dates so both the vacated and the occupied position re-chain.
///
/// # Errors
///
/// Returns an error if the entry is unknown, the new position collides
/// with an existing entry, the store fails, or the cascade fails.
pub fn update_entry<S: LedgerStore + FactSource>(
    store: &mut S,
    entry_id: i64,
    patch: &EntryPatch,
) -> Result<LedgerEntry, CoreError> {
    let mut entry: LedgerEntry = store
        .entry(entry_id)?
        .ok_or(CoreError::EntryNotFound { entry_id })?;
    let old_date: Date = entry.event_date;

    if let Some(new_date) = patch.event_date {
        if new_date != old_date
            && store.has_entry(entry.employee_id, new_date, entry.is_monthly_summary)?
        {
            return Err(CoreError::DuplicateEntry {
                employee_id: entry.employee_id,
                event_date: new_date,
                is_monthly_summary: entry.is_monthly_summary,
            });
        }
        entry.event_date = new_date;
    }
    if let Some(delta) = patch.leave_adjustment {
        entry.leave_adjustment = delta;
    }
    if let Some(days) = patch.approved_leaves {
        entry.approved_leaves = days;
    }

    store.update_entry(&entry)?;

    if patch.affects_chain() {
        recompute_from(store, entry.employee_id, old_date.min(entry.event_date))?;
    }

    store
        .entry(entry_id)?
        .ok_or(CoreError::EntryNotFound { entry_id })
}

/// Removes an entry and re-chains the remainder.
///
/// The cascade recomputes from the deleted date; the nearest surviving
/// preceding entry becomes the new baseline (zero when none remains).
///
/// # Errors
///
/// Returns an error if the entry is unknown, the store fails, or the
/// cascade fails.
pub fn delete_entry<S: LedgerStore + FactSource>(
    store: &mut S,
    entry_id: i64,
) -> Result<(), CoreError> {
    let entry: LedgerEntry = store
        .entry(entry_id)?
        .ok_or(CoreError::EntryNotFound { entry_id })?;

    store.delete_entry(entry_id)?;

    info!(
        employee = %entry.employee_id,
        entry_id,
        event_date = %entry.event_date,
        "Deleted ledger entry"
    );

    recompute_from(store, entry.employee_id, entry.event_date)?;
    Ok(())
}

/// Archives an entry (soft delete) and re-chains the remainder.
///
/// The entry stays queryable through history but leaves the chain, so the
/// cascade treats its date exactly like a deletion.
///
/// # Errors
///
/// Returns an error if the entry is unknown, the store fails, or the
/// cascade fails.
pub fn archive_entry<S: LedgerStore + FactSource>(
    store: &mut S,
    entry_id: i64,
) -> Result<LedgerEntry, CoreError> {
    let mut entry: LedgerEntry = store
        .entry(entry_id)?
        .ok_or(CoreError::EntryNotFound { entry_id })?;
    entry.active = false;

    store.update_entry(&entry)?;

    info!(
        employee = %entry.employee_id,
        entry_id,
        event_date = %entry.event_date,
        "Archived ledger entry"
    );

    recompute_from(store, entry.employee_id, entry.event_date)?;
    Ok(entry)
}
