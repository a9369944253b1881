// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day attribution for monthly summaries.
//!
//! A monthly summary must count an approved-leave working day at most once
//! across the whole ledger: days already attributed to discrete event
//! entries inside the month are reconstructed here and excluded from the
//! aggregate count.

use crate::records::LeaveInterval;
use std::collections::BTreeSet;
use time::Date;

/// Reconstructs the specific working dates a discrete entry claims.
///
/// Expansion walks forward from the entry's `event_date`, consuming
/// `approved_leaves` working days and skipping weekends and holidays (any
/// date absent from `workdays`). If the count exceeds the working days left
/// before `month_end`, expansion stops there; nothing spills into the next
/// month.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn claimed_dates(
    event_date: Date,
    approved_leaves: f64,
    workdays: &BTreeSet<Date>,
    month_end: Date,
) -> BTreeSet<Date> {
    let mut claimed: BTreeSet<Date> = BTreeSet::new();
    let mut remaining: i64 = approved_leaves.trunc() as i64;
    let mut current: Date = event_date;

    while remaining > 0 && current <= month_end {
        if workdays.contains(&current) {
            claimed.insert(current);
            remaining -= 1;
        }
        let Some(next) = current.next_day() else {
            break;
        };
        current = next;
    }

    claimed
}

/// Computes the approved-leave day count for a monthly summary.
///
/// `discrete_claims` are the `(event_date, approved_leaves)` pairs of the
/// employee's non-summary entries dated inside the month with a positive
/// day count. Each approved interval overlapping the month is clipped to
/// it, intersected with the working days, and reduced by the dates those
/// discrete entries already claim; the remainder's cardinality is summed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn monthly_approved_days(
    month_start: Date,
    month_end: Date,
    workdays: &BTreeSet<Date>,
    discrete_claims: &[(Date, f64)],
    intervals: &[LeaveInterval],
) -> f64 {
    let mut already_counted: BTreeSet<Date> = BTreeSet::new();
    for (event_date, approved_leaves) in discrete_claims {
        already_counted.extend(claimed_dates(
            *event_date,
            *approved_leaves,
            workdays,
            month_end,
        ));
    }

    let mut total_days: usize = 0;
    for interval in intervals {
        if !interval.overlaps(month_start, month_end) {
            continue;
        }

        let start: Date = interval.start_date.max(month_start);
        let end: Date = interval.end_date.min(month_end);

        let mut current: Date = start;
        while current <= end {
            if workdays.contains(&current) && !already_counted.contains(&current) {
                total_days += 1;
            }
            let Some(next) = current.next_day() else {
                break;
            };
            current = next;
        }
    }

    total_days as f64
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

    fn interval(start: Date, end: Date) -> LeaveInterval {
        LeaveInterval::new(EmployeeId::new(7), start, end)
    }

    #[test]
    fn test_expansion_consumes_consecutive_working_days() {
        let workdays: BTreeSet<Date> = january_workdays();

        // Wednesday the 10th, two days: 10th and 11th.
        let claimed: BTreeSet<Date> =
            claimed_dates(date!(2024 - 01 - 10), 2.0, &workdays, date!(2024 - 01 - 31));

        assert_eq!(
            claimed,
            [date!(2024 - 01 - 10), date!(2024 - 01 - 11)]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_expansion_skips_weekend() {
        let workdays: BTreeSet<Date> = january_workdays();

        // Friday the 5th, two days: the 5th and Monday the 8th.
        let claimed: BTreeSet<Date> =
            claimed_dates(date!(2024 - 01 - 05), 2.0, &workdays, date!(2024 - 01 - 31));

        assert_eq!(
            claimed,
            [date!(2024 - 01 - 05), date!(2024 - 01 - 08)]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_expansion_stops_at_month_end() {
        let workdays: BTreeSet<Date> = january_workdays();

        // Tuesday the 30th, five days requested: only the 30th and 31st fit.
        let claimed: BTreeSet<Date> =
            claimed_dates(date!(2024 - 01 - 30), 5.0, &workdays, date!(2024 - 01 - 31));

        assert_eq!(
            claimed,
            [date!(2024 - 01 - 30), date!(2024 - 01 - 31)]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_monthly_count_excludes_claimed_dates() {
        let workdays: BTreeSet<Date> = january_workdays();

        // Interval covers the 10th through the 12th (three working days);
        // a discrete entry already claims the 10th and 11th.
        let approved: f64 = monthly_approved_days(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
            &workdays,
            &[(date!(2024 - 01 - 10), 2.0)],
            &[interval(date!(2024 - 01 - 10), date!(2024 - 01 - 12))],
        );

        assert_eq!(approved, 1.0);
    }

    #[test]
    fn test_monthly_count_clips_interval_to_month() {
        let workdays: BTreeSet<Date> = january_workdays();

        // Interval runs into February; only January working days count here.
        let approved: f64 = monthly_approved_days(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
            &workdays,
            &[],
            &[interval(date!(2024 - 01 - 30), date!(2024 - 02 - 02))],
        );

        assert_eq!(approved, 2.0);
    }

    #[test]
    fn test_monthly_count_ignores_weekend_interval_days() {
        let workdays: BTreeSet<Date> = january_workdays();

        // Friday the 5th through Monday the 8th: two working days.
        let approved: f64 = monthly_approved_days(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
            &workdays,
            &[],
            &[interval(date!(2024 - 01 - 05), date!(2024 - 01 - 08))],
        );

        assert_eq!(approved, 2.0);
    }

    #[test]
    fn test_interval_outside_month_contributes_nothing() {
        let workdays: BTreeSet<Date> = january_workdays();

        let approved: f64 = monthly_approved_days(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
            &workdays,
            &[],
            &[interval(date!(2024 - 02 - 05), date!(2024 - 02 - 07))],
        );

        assert_eq!(approved, 0.0);
    }

    #[test]
    fn test_fully_claimed_interval_contributes_nothing() {
        let workdays: BTreeSet<Date> = january_workdays();

        let approved: f64 = monthly_approved_days(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
            &workdays,
            &[(date!(2024 - 01 - 10), 3.0)],
            &[interval(date!(2024 - 01 - 10), date!(2024 - 01 - 12))],
        );

        assert_eq!(approved, 0.0);
    }
}
