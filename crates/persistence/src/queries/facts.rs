// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries over the external fact tables.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger_domain::{AllowanceRecord, AllowanceState, EmployeeId, LeaveInterval};
use std::collections::{BTreeSet, HashSet};
use time::Date;

use crate::data_models::{format_date, parse_date};
use crate::diesel_schema::{attendance_checkins, leave_allowances, leave_requests, ledger_entries, public_holidays};
use crate::error::PersistenceError;

/// Approved public holiday dates in `[start, end]`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn approved_holidays(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<BTreeSet<Date>, PersistenceError> {
    let rows: Vec<String> = public_holidays::table
        .filter(public_holidays::holiday_date.ge(format_date(start)?))
        .filter(public_holidays::holiday_date.le(format_date(end)?))
        .select(public_holidays::holiday_date)
        .load::<String>(conn)?;

    rows.iter().map(|text| parse_date(text)).collect()
}

/// The employee's approved leave intervals.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn approved_leave_intervals(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Vec<LeaveInterval>, PersistenceError> {
    let rows: Vec<(String, String)> = leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id.value()))
        .order(leave_requests::start_date.asc())
        .select((leave_requests::start_date, leave_requests::end_date))
        .load::<(String, String)>(conn)?;

    rows.into_iter()
        .map(|(start_text, end_text)| {
            Ok(LeaveInterval::new(
                employee_id,
                parse_date(&start_text)?,
                parse_date(&end_text)?,
            ))
        })
        .collect()
}

/// Dates in `[start, end]` with at least one check-in.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn attendance_dates(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    start: Date,
    end: Date,
) -> Result<BTreeSet<Date>, PersistenceError> {
    let rows: Vec<String> = attendance_checkins::table
        .filter(attendance_checkins::employee_id.eq(employee_id.value()))
        .filter(attendance_checkins::checkin_date.ge(format_date(start)?))
        .filter(attendance_checkins::checkin_date.le(format_date(end)?))
        .select(attendance_checkins::checkin_date)
        .load::<String>(conn)?;

    rows.iter().map(|text| parse_date(text)).collect()
}

/// The employee's allowance records, draft and approved alike.
///
/// # Errors
///
/// Returns an error if the query fails, a stored date is invalid, or a
/// stored state is unknown.
pub fn allowance_records(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Vec<AllowanceRecord>, PersistenceError> {
    let rows: Vec<(i64, f64, String, String)> = leave_allowances::table
        .filter(leave_allowances::employee_id.eq(employee_id.value()))
        .order(leave_allowances::allowance_id.asc())
        .select((
            leave_allowances::allowance_id,
            leave_allowances::allowed_leaves,
            leave_allowances::from_date,
            leave_allowances::state,
        ))
        .load::<(i64, f64, String, String)>(conn)?;

    rows.into_iter()
        .map(|(allowance_id, allowed_leaves, from_text, state_text)| {
            let state: AllowanceState = match state_text.as_str() {
                "draft" => AllowanceState::Draft,
                "approved" => AllowanceState::Approved,
                other => {
                    return Err(PersistenceError::SerializationError(format!(
                        "unknown allowance state '{other}'"
                    )));
                }
            };
            Ok(AllowanceRecord {
                allowance_id,
                employee_id,
                allowed_leaves,
                from_date: parse_date(&from_text)?,
                state,
            })
        })
        .collect()
}

/// Every employee appearing in any fact table or in the ledger itself.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn known_employees(conn: &mut SqliteConnection) -> Result<Vec<EmployeeId>, PersistenceError> {
    let mut ids: HashSet<i64> = HashSet::new();

    ids.extend(
        ledger_entries::table
            .select(ledger_entries::employee_id)
            .distinct()
            .load::<i64>(conn)?,
    );
    ids.extend(
        leave_allowances::table
            .select(leave_allowances::employee_id)
            .distinct()
            .load::<i64>(conn)?,
    );
    ids.extend(
        leave_requests::table
            .select(leave_requests::employee_id)
            .distinct()
            .load::<i64>(conn)?,
    );
    ids.extend(
        attendance_checkins::table
            .select(attendance_checkins::employee_id)
            .distinct()
            .load::<i64>(conn)?,
    );

    let mut sorted: Vec<i64> = ids.into_iter().collect();
    sorted.sort_unstable();
    Ok(sorted.into_iter().map(EmployeeId::new).collect())
}
