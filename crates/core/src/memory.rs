// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory implementation of the store traits.
//!
//! Used by the core test suite and suitable for small single-process
//! deployments. The Diesel-backed implementation in the persistence crate
//! is behaviorally equivalent; both honor the same uniqueness constraints
//! and chain ordering.

use crate::error::StoreError;
use crate::store::{CascadeGuard, FactSource, LedgerStore};
use leave_ledger_domain::{AllowanceRecord, EmployeeId, LeaveInterval, LedgerEntry};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// An in-memory ledger store and fact source.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: Vec<LedgerEntry>,
    next_entry_id: i64,
    holidays: BTreeSet<Date>,
    leave_intervals: Vec<LeaveInterval>,
    attendance: BTreeMap<EmployeeId, BTreeSet<Date>>,
    allowances: Vec<AllowanceRecord>,
    employees: BTreeSet<EmployeeId>,
    /// Test hook: fail `persist_batch` once this many batches have been
    /// committed, simulating a mid-cascade storage failure.
    pub fail_persist_after_batches: Option<usize>,
    batches_persisted: usize,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_entry_id: 1,
            ..Self::default()
        }
    }

    /// Registers an employee for aggregation sweeps.
    pub fn register_employee(&mut self, employee_id: EmployeeId) {
        self.employees.insert(employee_id);
    }

    /// Records an approved public holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Records an approved leave interval.
    pub fn add_leave_interval(&mut self, interval: LeaveInterval) {
        self.employees.insert(interval.employee_id);
        self.leave_intervals.push(interval);
    }

    /// Records an attendance check-in date.
    pub fn add_attendance(&mut self, employee_id: EmployeeId, date: Date) {
        self.employees.insert(employee_id);
        self.attendance.entry(employee_id).or_default().insert(date);
    }

    /// Records an allowance record.
    pub fn add_allowance(&mut self, record: AllowanceRecord) {
        self.employees.insert(record.employee_id);
        self.allowances.push(record);
    }

    /// Clears the batch-failure test hook and its counter.
    pub const fn reset_persist_failures(&mut self) {
        self.fail_persist_after_batches = None;
        self.batches_persisted = 0;
    }

    fn ordered_indices(&self, employee_id: EmployeeId, include_archived: bool) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.employee_id == employee_id && (include_archived || entry.active)
            })
            .map(|(index, _)| index)
            .collect();
        indices.sort_by_key(|&index| (self.entries[index].event_date, self.entries[index].entry_id()));
        indices
    }
}

impl LedgerStore for MemoryLedger {
    fn chain_from(
        &mut self,
        employee_id: EmployeeId,
        from: Date,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self
            .ordered_indices(employee_id, false)
            .into_iter()
            .map(|index| self.entries[index].clone())
            .filter(|entry| entry.event_date >= from)
            .collect())
    }

    fn chain_after(
        &mut self,
        employee_id: EmployeeId,
        after: Date,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self
            .ordered_indices(employee_id, false)
            .into_iter()
            .map(|index| self.entries[index].clone())
            .filter(|entry| entry.event_date > after)
            .collect())
    }

    fn nearest_preceding(
        &mut self,
        employee_id: EmployeeId,
        before: Date,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .ordered_indices(employee_id, false)
            .into_iter()
            .map(|index| self.entries[index].clone())
            .filter(|entry| entry.event_date < before)
            .next_back())
    }

    fn last_on_or_before(
        &mut self,
        employee_id: EmployeeId,
        date: Date,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .ordered_indices(employee_id, false)
            .into_iter()
            .map(|index| self.entries[index].clone())
            .filter(|entry| entry.event_date <= date)
            .next_back())
    }

    fn entry(&mut self, entry_id: i64) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.entry_id() == Some(entry_id))
            .cloned())
    }

    fn history(
        &mut self,
        employee_id: EmployeeId,
        include_archived: bool,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self
            .ordered_indices(employee_id, include_archived)
            .into_iter()
            .map(|index| self.entries[index].clone())
            .collect())
    }

    fn discrete_claims_in(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<Vec<(Date, f64)>, StoreError> {
        Ok(self
            .ordered_indices(employee_id, false)
            .into_iter()
            .map(|index| &self.entries[index])
            .filter(|entry| {
                !entry.is_monthly_summary
                    && entry.approved_leaves > 0.0
                    && entry.event_date >= start
                    && entry.event_date <= end
            })
            .map(|entry| (entry.event_date, entry.approved_leaves))
            .collect())
    }

    fn has_entry(
        &mut self,
        employee_id: EmployeeId,
        event_date: Date,
        is_monthly_summary: bool,
    ) -> Result<bool, StoreError> {
        Ok(self.entries.iter().any(|entry| {
            entry.employee_id == employee_id
                && entry.event_date == event_date
                && entry.is_monthly_summary == is_monthly_summary
        }))
    }

    fn has_monthly_summary_in(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<bool, StoreError> {
        Ok(self.entries.iter().any(|entry| {
            entry.employee_id == employee_id
                && entry.is_monthly_summary
                && entry.event_date >= start
                && entry.event_date <= end
        }))
    }

    fn adjustment_ref_used(&mut self, adjustment_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .iter()
            .any(|entry| entry.adjustment_ref == Some(adjustment_id)))
    }

    fn allowance_ref_used(&mut self, allowance_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .iter()
            .any(|entry| entry.allowance_ref == Some(allowance_id)))
    }

    fn insert_entry(&mut self, entry: &LedgerEntry) -> Result<i64, StoreError> {
        if self.has_entry(entry.employee_id, entry.event_date, entry.is_monthly_summary)? {
            return Err(StoreError::ConstraintViolation(format!(
                "entry for employee {} on {} already exists",
                entry.employee_id, entry.event_date
            )));
        }
        if let Some(adjustment_id) = entry.adjustment_ref {
            if self.adjustment_ref_used(adjustment_id)? {
                return Err(StoreError::ConstraintViolation(format!(
                    "adjustment {adjustment_id} already referenced"
                )));
            }
        }
        if let Some(allowance_id) = entry.allowance_ref {
            if self.allowance_ref_used(allowance_id)? {
                return Err(StoreError::ConstraintViolation(format!(
                    "allowance {allowance_id} already referenced"
                )));
            }
        }

        let entry_id: i64 = self.next_entry_id;
        self.next_entry_id += 1;

        let mut stored: LedgerEntry = entry.clone();
        stored.assign_id(entry_id);
        self.employees.insert(stored.employee_id);
        self.entries.push(stored);

        Ok(entry_id)
    }

    fn persist_batch(
        &mut self,
        batch: &[LedgerEntry],
        _guard: &CascadeGuard,
    ) -> Result<(), StoreError> {
        if let Some(failure_point) = self.fail_persist_after_batches {
            if self.batches_persisted >= failure_point {
                return Err(StoreError::Backend(String::from(
                    "simulated mid-cascade failure",
                )));
            }
        }

        // Stage the whole batch before touching state so a bad id leaves
        // nothing half-applied, matching the all-or-nothing contract.
        let mut updates: Vec<(usize, LedgerEntry)> = Vec::with_capacity(batch.len());
        for entry in batch {
            let index: usize = self
                .entries
                .iter()
                .position(|candidate| candidate.entry_id() == entry.entry_id())
                .ok_or_else(|| {
                    StoreError::Backend(format!("unknown entry in batch: {:?}", entry.entry_id()))
                })?;
            updates.push((index, entry.clone()));
        }
        for (index, entry) in updates {
            self.entries[index] = entry;
        }

        self.batches_persisted += 1;
        Ok(())
    }

    fn update_entry(&mut self, entry: &LedgerEntry) -> Result<(), StoreError> {
        let index: usize = self
            .entries
            .iter()
            .position(|candidate| candidate.entry_id() == entry.entry_id())
            .ok_or_else(|| {
                StoreError::Backend(format!("unknown entry: {:?}", entry.entry_id()))
            })?;
        self.entries[index] = entry.clone();
        Ok(())
    }

    fn delete_entry(&mut self, entry_id: i64) -> Result<(), StoreError> {
        let index: usize = self
            .entries
            .iter()
            .position(|candidate| candidate.entry_id() == Some(entry_id))
            .ok_or_else(|| StoreError::Backend(format!("unknown entry: {entry_id}")))?;
        self.entries.remove(index);
        Ok(())
    }
}

impl FactSource for MemoryLedger {
    fn approved_holidays(&mut self, start: Date, end: Date) -> Result<BTreeSet<Date>, StoreError> {
        Ok(self
            .holidays
            .iter()
            .copied()
            .filter(|date| *date >= start && *date <= end)
            .collect())
    }

    fn approved_leave_intervals(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveInterval>, StoreError> {
        Ok(self
            .leave_intervals
            .iter()
            .filter(|interval| interval.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn attendance_dates(
        &mut self,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
    ) -> Result<BTreeSet<Date>, StoreError> {
        Ok(self
            .attendance
            .get(&employee_id)
            .map(|dates| {
                dates
                    .iter()
                    .copied()
                    .filter(|date| *date >= start && *date <= end)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn allowance_records(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AllowanceRecord>, StoreError> {
        Ok(self
            .allowances
            .iter()
            .filter(|record| record.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn known_employees(&mut self) -> Result<Vec<EmployeeId>, StoreError> {
        Ok(self.employees.iter().copied().collect())
    }
}
