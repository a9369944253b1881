// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entry::EmployeeId;
use crate::records::LeaveInterval;
use time::macros::date;

#[test]
fn test_employee_id_round_trip() {
    let id: EmployeeId = EmployeeId::new(42);

    assert_eq!(id.value(), 42);
    assert_eq!(id.to_string(), "42");
}

#[test]
fn test_employee_id_equality_and_ordering() {
    assert_eq!(EmployeeId::new(1), EmployeeId::new(1));
    assert_ne!(EmployeeId::new(1), EmployeeId::new(2));
    assert!(EmployeeId::new(1) < EmployeeId::new(2));
}

#[test]
fn test_interval_overlap_detection() {
    let interval: LeaveInterval = LeaveInterval::new(
        EmployeeId::new(7),
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 15),
    );

    assert!(interval.overlaps(date!(2024 - 01 - 01), date!(2024 - 01 - 31)));
    assert!(interval.overlaps(date!(2024 - 01 - 15), date!(2024 - 01 - 20)));
    assert!(interval.overlaps(date!(2024 - 01 - 05), date!(2024 - 01 - 10)));
    assert!(!interval.overlaps(date!(2024 - 01 - 16), date!(2024 - 01 - 31)));
    assert!(!interval.overlaps(date!(2024 - 01 - 01), date!(2024 - 01 - 09)));
}

#[test]
fn test_single_day_interval_overlaps_itself() {
    let interval: LeaveInterval = LeaveInterval::new(
        EmployeeId::new(7),
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 10),
    );

    assert!(interval.overlaps(date!(2024 - 01 - 10), date!(2024 - 01 - 10)));
}
