// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod absence;
mod allowance;
mod attribution;
mod calendar;
mod entry;
mod error;
mod records;
mod validation;

#[cfg(test)]
mod tests;

pub use absence::{absent_working_days, interval_dates_clipped};
pub use allowance::approved_allowance_total;
pub use attribution::{claimed_dates, monthly_approved_days};
pub use calendar::{is_working_day, month_bounds, months_earlier, working_day_set, working_days};
pub use entry::{EmployeeId, LedgerEntry};
pub use error::DomainError;
pub use records::{
    AdjustmentDirection, AdjustmentRecord, AllowanceRecord, AllowanceState, LeaveInterval,
};
pub use validation::{validate_adjustment, validate_allowance, validate_leave_interval};
