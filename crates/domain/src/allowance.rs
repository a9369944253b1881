// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allowance resolution.
//!
//! The allowed-leaves figure on a ledger entry is the sum of every
//! allowance currently in the approved state, regardless of the entry's
//! historical date. A later approval therefore retroactively raises
//! `allowed_leaves` on past entries at their next recompute; this matches
//! the source system's observed behavior.

use crate::records::{AllowanceRecord, AllowanceState};

/// Sums the approved allowances in `records`.
///
/// Draft records are ignored. Returns `0.0` when no approved allowance
/// exists; the result is never negative because allowances are validated
/// as non-negative before they reach the resolver.
#[must_use]
pub fn approved_allowance_total(records: &[AllowanceRecord]) -> f64 {
    records
        .iter()
        .filter(|record| record.state == AllowanceState::Approved)
        .map(|record| record.allowed_leaves)
        .sum()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::entry::EmployeeId;
    use time::macros::date;

    fn make_allowance(allowance_id: i64, days: f64, state: AllowanceState) -> AllowanceRecord {
        AllowanceRecord {
            allowance_id,
            employee_id: EmployeeId::new(7),
            allowed_leaves: days,
            from_date: date!(2024 - 01 - 01),
            state,
        }
    }

    #[test]
    fn test_no_records_resolves_to_zero() {
        assert_eq!(approved_allowance_total(&[]), 0.0);
    }

    #[test]
    fn test_draft_records_are_ignored() {
        let records: Vec<AllowanceRecord> = vec![
            make_allowance(1, 10.0, AllowanceState::Draft),
            make_allowance(2, 8.0, AllowanceState::Approved),
        ];

        assert_eq!(approved_allowance_total(&records), 8.0);
    }

    #[test]
    fn test_multiple_approved_records_sum() {
        let records: Vec<AllowanceRecord> = vec![
            make_allowance(1, 10.0, AllowanceState::Approved),
            make_allowance(2, 8.0, AllowanceState::Approved),
            make_allowance(3, 2.5, AllowanceState::Approved),
        ];

        assert_eq!(approved_allowance_total(&records), 20.5);
    }
}
