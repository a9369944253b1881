// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::handlers::grant_allowance;
use crate::request_response::GrantAllowanceRequest;
use leave_ledger_audit::{Actor, Cause};
use leave_ledger_persistence::Persistence;

pub(crate) const EMPLOYEE_ID: i64 = 7;

pub(crate) fn actor() -> Actor {
    Actor::new(String::from("hr-123"), String::from("user"))
}

pub(crate) fn cause(id: &str) -> Cause {
    Cause::new(id.to_string(), format!("Test cause {id}"))
}

/// A persistence layer with one 18-day allowance granted to the test
/// employee, ledger entry included.
pub(crate) fn persistence_with_allowance() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    grant_allowance(
        &mut persistence,
        &GrantAllowanceRequest {
            allowance_id: 1,
            employee_id: EMPLOYEE_ID,
            allowed_leaves: 18.0,
            from_date: String::from("2024-01-01"),
        },
        actor(),
        cause("allowance-1"),
    )
    .unwrap();
    persistence
}
