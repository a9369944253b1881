// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and date text conversions.
//!
//! Dates are stored as ISO 8601 calendar-date text (`YYYY-MM-DD`), which
//! sorts correctly under SQLite's default text collation, so chain
//! ordering can happen in SQL.

use crate::diesel_schema::ledger_entries;
use crate::error::PersistenceError;
use diesel::prelude::*;
use leave_ledger_domain::{EmployeeId, LedgerEntry};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Formats a date for storage.
pub(crate) fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored date.
pub(crate) fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidStoredDate(format!("'{text}': {e}")))
}

/// A `ledger_entries` row as loaded from the database.
#[derive(Debug, Clone, Queryable)]
pub struct LedgerEntryRow {
    pub entry_id: i64,
    pub employee_id: i64,
    pub event_date: String,
    pub is_monthly_summary: i32,
    pub opening_leaves: f64,
    pub leave_adjustment: f64,
    pub approved_leaves: f64,
    pub absent_days: f64,
    pub allowed_leaves: f64,
    pub closing_leaves: f64,
    pub remaining_leaves: f64,
    pub adjustment_ref: Option<i64>,
    pub allowance_ref: Option<i64>,
    pub active: i32,
    pub created_at: Option<String>,
}

impl LedgerEntryRow {
    /// Converts a stored row into the domain entry.
    pub fn into_entry(self) -> Result<LedgerEntry, PersistenceError> {
        let event_date: Date = parse_date(&self.event_date)?;
        Ok(LedgerEntry::from_stored(
            self.entry_id,
            EmployeeId::new(self.employee_id),
            event_date,
            self.is_monthly_summary != 0,
            self.opening_leaves,
            self.leave_adjustment,
            self.approved_leaves,
            self.absent_days,
            self.allowed_leaves,
            self.closing_leaves,
            self.remaining_leaves,
            self.adjustment_ref,
            self.allowance_ref,
            self.active != 0,
        ))
    }
}

/// A new `ledger_entries` row for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = ledger_entries)]
pub struct NewLedgerEntryRow {
    pub employee_id: i64,
    pub event_date: String,
    pub is_monthly_summary: i32,
    pub opening_leaves: f64,
    pub leave_adjustment: f64,
    pub approved_leaves: f64,
    pub absent_days: f64,
    pub allowed_leaves: f64,
    pub closing_leaves: f64,
    pub remaining_leaves: f64,
    pub adjustment_ref: Option<i64>,
    pub allowance_ref: Option<i64>,
    pub active: i32,
}

impl NewLedgerEntryRow {
    /// Builds an insertable row from a domain entry.
    pub fn from_entry(entry: &LedgerEntry) -> Result<Self, PersistenceError> {
        Ok(Self {
            employee_id: entry.employee_id.value(),
            event_date: format_date(entry.event_date)?,
            is_monthly_summary: i32::from(entry.is_monthly_summary),
            opening_leaves: entry.opening_leaves,
            leave_adjustment: entry.leave_adjustment,
            approved_leaves: entry.approved_leaves,
            absent_days: entry.absent_days,
            allowed_leaves: entry.allowed_leaves,
            closing_leaves: entry.closing_leaves(),
            remaining_leaves: entry.remaining_leaves(),
            adjustment_ref: entry.adjustment_ref,
            allowance_ref: entry.allowance_ref,
            active: i32::from(entry.active),
        })
    }
}
