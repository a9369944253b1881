// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Working-day classification.
//!
//! A working day is a weekday (Monday through Friday) that is not an
//! approved public holiday. These functions are pure: holiday lookups
//! happen at the caller, and the approved set is passed in.

use crate::error::DomainError;
use std::collections::BTreeSet;
use time::{Date, Weekday};

/// Whether `date` is a working day given the approved holiday set.
#[must_use]
pub fn is_working_day(date: Date, holidays: &BTreeSet<Date>) -> bool {
    !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) && !holidays.contains(&date)
}

/// Returns the ordered working days in the inclusive range `[start, end]`.
///
/// A reversed range (`start > end`) yields an empty list, not an error.
#[must_use]
pub fn working_days(start: Date, end: Date, holidays: &BTreeSet<Date>) -> Vec<Date> {
    let mut days: Vec<Date> = Vec::new();
    let mut current: Date = start;

    while current <= end {
        if is_working_day(current, holidays) {
            days.push(current);
        }
        let Some(next) = current.next_day() else {
            break;
        };
        current = next;
    }

    days
}

/// Returns the working days in `[start, end]` as an ordered set.
#[must_use]
pub fn working_day_set(start: Date, end: Date, holidays: &BTreeSet<Date>) -> BTreeSet<Date> {
    working_days(start, end, holidays).into_iter().collect()
}

/// Returns the first and last day of the month containing `date`.
///
/// # Errors
///
/// Returns an error if the month boundaries cannot be constructed, which
/// only happens at the edges of the representable date range.
pub fn month_bounds(date: Date) -> Result<(Date, Date), DomainError> {
    let start: Date =
        Date::from_calendar_date(date.year(), date.month(), 1).map_err(|_| {
            DomainError::DateArithmeticOverflow {
                operation: format!("computing month start for {date}"),
            }
        })?;
    let end: Date =
        Date::from_calendar_date(date.year(), date.month(), date.month().length(date.year()))
            .map_err(|_| DomainError::DateArithmeticOverflow {
                operation: format!("computing month end for {date}"),
            })?;
    Ok((start, end))
}

/// Returns `date` moved back by `months` calendar months.
///
/// The day of month is clamped to the target month's length, so moving
/// back one month from March 31 lands on the last day of February.
///
/// # Errors
///
/// Returns an error if the resulting date cannot be constructed, which
/// only happens at the edges of the representable date range.
pub fn months_earlier(date: Date, months: u32) -> Result<Date, DomainError> {
    let month_index: i64 = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1;
    let target_index: i64 = month_index - i64::from(months);

    let year: i64 = target_index.div_euclid(12);
    let month_number: i64 = target_index.rem_euclid(12) + 1;

    let year: i32 = i32::try_from(year).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("moving {date} back {months} months"),
    })?;
    let month: time::Month = u8::try_from(month_number)
        .ok()
        .and_then(|m| time::Month::try_from(m).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("moving {date} back {months} months"),
        })?;

    let day: u8 = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("moving {date} back {months} months"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_weekend_days_are_not_working_days() {
        let holidays: BTreeSet<Date> = BTreeSet::new();
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday.
        assert!(!is_working_day(date!(2024 - 01 - 06), &holidays));
        assert!(!is_working_day(date!(2024 - 01 - 07), &holidays));
        assert!(is_working_day(date!(2024 - 01 - 08), &holidays));
    }

    #[test]
    fn test_holiday_excluded_from_working_days() {
        let holidays: BTreeSet<Date> = [date!(2024 - 01 - 10)].into_iter().collect();

        let days: Vec<Date> = working_days(date!(2024 - 01 - 08), date!(2024 - 01 - 12), &holidays);

        assert_eq!(
            days,
            vec![
                date!(2024 - 01 - 08),
                date!(2024 - 01 - 09),
                date!(2024 - 01 - 11),
                date!(2024 - 01 - 12),
            ]
        );
    }

    #[test]
    fn test_range_spanning_weekend() {
        let holidays: BTreeSet<Date> = BTreeSet::new();

        // Friday through Monday: two working days.
        let days: Vec<Date> = working_days(date!(2024 - 01 - 05), date!(2024 - 01 - 08), &holidays);

        assert_eq!(days, vec![date!(2024 - 01 - 05), date!(2024 - 01 - 08)]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let holidays: BTreeSet<Date> = BTreeSet::new();

        let days: Vec<Date> = working_days(date!(2024 - 01 - 10), date!(2024 - 01 - 05), &holidays);

        assert!(days.is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let holidays: BTreeSet<Date> = BTreeSet::new();

        let days: Vec<Date> = working_days(date!(2024 - 01 - 10), date!(2024 - 01 - 10), &holidays);

        assert_eq!(days, vec![date!(2024 - 01 - 10)]);
    }

    #[test]
    fn test_month_bounds_january() {
        let (start, end): (Date, Date) = month_bounds(date!(2024 - 01 - 15)).unwrap();

        assert_eq!(start, date!(2024 - 01 - 01));
        assert_eq!(end, date!(2024 - 01 - 31));
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (start, end): (Date, Date) = month_bounds(date!(2024 - 02 - 10)).unwrap();

        assert_eq!(start, date!(2024 - 02 - 01));
        assert_eq!(end, date!(2024 - 02 - 29));
    }

    #[test]
    fn test_months_earlier_simple() {
        assert_eq!(
            months_earlier(date!(2024 - 03 - 15), 1).unwrap(),
            date!(2024 - 02 - 15)
        );
    }

    #[test]
    fn test_months_earlier_clamps_day() {
        assert_eq!(
            months_earlier(date!(2024 - 03 - 31), 1).unwrap(),
            date!(2024 - 02 - 29)
        );
    }

    #[test]
    fn test_months_earlier_crosses_year_boundary() {
        assert_eq!(
            months_earlier(date!(2024 - 01 - 10), 3).unwrap(),
            date!(2023 - 10 - 10)
        );
    }

    #[test]
    fn test_working_days_in_january_2024() {
        let holidays: BTreeSet<Date> = BTreeSet::new();
        let (start, end): (Date, Date) = month_bounds(date!(2024 - 01 - 01)).unwrap();

        let days: Vec<Date> = working_days(start, end, &holidays);

        // January 2024 has 23 weekdays.
        assert_eq!(days.len(), 23);
    }
}
