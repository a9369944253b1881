// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use leave_ledger::{FactSource, LedgerStore};
use leave_ledger_domain::EmployeeId;
use time::macros::date;

#[test]
fn test_in_memory_database_initializes() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let history = persistence.history(EmployeeId::new(1), true).unwrap();
    assert!(history.is_empty());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    first.add_public_holiday(date!(2024 - 01 - 10)).unwrap();

    let holidays = second
        .approved_holidays(date!(2024 - 01 - 01), date!(2024 - 01 - 31))
        .unwrap();
    assert!(holidays.is_empty());
}

#[test]
fn test_file_database_initializes() {
    let dir = std::env::temp_dir().join(format!(
        "leave-ledger-test-{}-{}",
        std::process::id(),
        line!()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let db_path = dir.join("ledger.db");

    {
        let mut persistence: Persistence = Persistence::new_with_file(&db_path).unwrap();
        persistence.add_public_holiday(date!(2024 - 01 - 10)).unwrap();
    }

    // Reopening sees the previously written data.
    let mut reopened: Persistence = Persistence::new_with_file(&db_path).unwrap();
    let holidays = reopened
        .approved_holidays(date!(2024 - 01 - 01), date!(2024 - 01 - 31))
        .unwrap();
    assert_eq!(holidays.len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}
