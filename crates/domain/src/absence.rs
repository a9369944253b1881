// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unexcused-absence calculation for monthly summaries.
//!
//! A working day counts as absent when the employee neither checked in nor
//! was covered by an approved leave interval on that day.

use crate::records::LeaveInterval;
use std::collections::BTreeSet;
use time::Date;

/// Collects every calendar date covered by `intervals`, clipped to
/// `[start, end]`.
///
/// The result may include weekends and holidays; subtracting it from a
/// working-day set makes those harmless.
#[must_use]
pub fn interval_dates_clipped(
    intervals: &[LeaveInterval],
    start: Date,
    end: Date,
) -> BTreeSet<Date> {
    let mut dates: BTreeSet<Date> = BTreeSet::new();

    for interval in intervals {
        if !interval.overlaps(start, end) {
            continue;
        }

        let mut current: Date = interval.start_date.max(start);
        let clipped_end: Date = interval.end_date.min(end);
        while current <= clipped_end {
            dates.insert(current);
            let Some(next) = current.next_day() else {
                break;
            };
            current = next;
        }
    }

    dates
}

/// Counts the working days with neither a check-in nor leave coverage.
///
/// A check-in on a working day always excuses it, whatever else happened
/// that day.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn absent_working_days(
    workdays: &BTreeSet<Date>,
    attendance: &BTreeSet<Date>,
    leave_dates: &BTreeSet<Date>,
) -> f64 {
    workdays
        .iter()
        .filter(|day| !attendance.contains(*day) && !leave_dates.contains(*day))
        .count() as f64
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::calendar::working_day_set;
    use crate::entry::EmployeeId;
    use time::macros::date;

    fn january_workdays() -> BTreeSet<Date> {
        working_day_set(date!(2024 - 01 - 01), date!(2024 - 01 - 31), &BTreeSet::new())
    }

    #[test]
    fn test_full_attendance_means_no_absence() {
        let workdays: BTreeSet<Date> = january_workdays();

        let absent: f64 = absent_working_days(&workdays, &workdays.clone(), &BTreeSet::new());

        assert_eq!(absent, 0.0);
    }

    #[test]
    fn test_uncovered_working_days_are_absent() {
        let workdays: BTreeSet<Date> = january_workdays();
        let mut attendance: BTreeSet<Date> = workdays.clone();
        attendance.remove(&date!(2024 - 01 - 10));
        attendance.remove(&date!(2024 - 01 - 11));

        let absent: f64 = absent_working_days(&workdays, &attendance, &BTreeSet::new());

        assert_eq!(absent, 2.0);
    }

    #[test]
    fn test_leave_coverage_excuses_missing_checkin() {
        let workdays: BTreeSet<Date> = january_workdays();
        let mut attendance: BTreeSet<Date> = workdays.clone();
        attendance.remove(&date!(2024 - 01 - 10));
        let leave: BTreeSet<Date> = [date!(2024 - 01 - 10)].into_iter().collect();

        let absent: f64 = absent_working_days(&workdays, &attendance, &leave);

        assert_eq!(absent, 0.0);
    }

    #[test]
    fn test_interval_dates_are_clipped_to_range() {
        let intervals: Vec<LeaveInterval> = vec![LeaveInterval::new(
            EmployeeId::new(7),
            date!(2024 - 01 - 30),
            date!(2024 - 02 - 02),
        )];

        let dates: BTreeSet<Date> =
            interval_dates_clipped(&intervals, date!(2024 - 01 - 01), date!(2024 - 01 - 31));

        assert_eq!(
            dates,
            [date!(2024 - 01 - 30), date!(2024 - 01 - 31)]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_non_overlapping_interval_contributes_nothing() {
        let intervals: Vec<LeaveInterval> = vec![LeaveInterval::new(
            EmployeeId::new(7),
            date!(2024 - 02 - 05),
            date!(2024 - 02 - 07),
        )];

        let dates: BTreeSet<Date> =
            interval_dates_clipped(&intervals, date!(2024 - 01 - 01), date!(2024 - 01 - 31));

        assert!(dates.is_empty());
    }
}
