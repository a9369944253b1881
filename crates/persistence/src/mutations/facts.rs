// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for the external fact tables.
//!
//! These tables mirror approved facts owned by external collaborators
//! (leave approval, allowance approval, attendance capture, holiday
//! management); the engine itself only reads them.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger_domain::{AllowanceRecord, AllowanceState, EmployeeId, LeaveInterval};
use time::Date;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::format_date;
use crate::diesel_schema::{attendance_checkins, leave_allowances, leave_requests, public_holidays};
use crate::error::PersistenceError;

/// Records an approved public holiday. Idempotent.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn add_public_holiday(conn: &mut SqliteConnection, date: Date) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(public_holidays::table)
        .values(public_holidays::holiday_date.eq(format_date(date)?))
        .execute(conn)?;
    Ok(())
}

/// Records an approved leave interval and returns its assigned identifier.
/// Idempotent per (employee, start, end).
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn add_leave_request(
    conn: &mut SqliteConnection,
    interval: &LeaveInterval,
) -> Result<i64, PersistenceError> {
    diesel::insert_or_ignore_into(leave_requests::table)
        .values((
            leave_requests::employee_id.eq(interval.employee_id.value()),
            leave_requests::start_date.eq(format_date(interval.start_date)?),
            leave_requests::end_date.eq(format_date(interval.end_date)?),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Records an attendance check-in date. Idempotent per (employee, date).
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn add_attendance_checkin(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    date: Date,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(attendance_checkins::table)
        .values((
            attendance_checkins::employee_id.eq(employee_id.value()),
            attendance_checkins::checkin_date.eq(format_date(date)?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts or replaces an allowance record, keyed by its approval-system
/// identifier.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_allowance(
    conn: &mut SqliteConnection,
    record: &AllowanceRecord,
) -> Result<(), PersistenceError> {
    let state: &str = match record.state {
        AllowanceState::Draft => "draft",
        AllowanceState::Approved => "approved",
    };

    diesel::replace_into(leave_allowances::table)
        .values((
            leave_allowances::allowance_id.eq(record.allowance_id),
            leave_allowances::employee_id.eq(record.employee_id.value()),
            leave_allowances::allowed_leaves.eq(record.allowed_leaves),
            leave_allowances::from_date.eq(format_date(record.from_date)?),
            leave_allowances::state.eq(state),
        ))
        .execute(conn)?;
    Ok(())
}
