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

mod engine;
mod error;
mod locks;
mod memory;
mod monthly;
mod store;
mod trigger;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests;

pub use engine::{RECOMPUTE_BATCH_SIZE, RecomputeOutcome, balance_as_of, recompute_from};
pub use error::{CoreError, StoreError};
pub use locks::EmployeeLockRegistry;
pub use memory::MemoryLedger;
pub use monthly::{AggregationOutcome, run_monthly_aggregation};
pub use store::{BalancePosition, CascadeGuard, FactSource, LedgerStore};
pub use trigger::{
    EntryPatch, archive_entry, delete_entry, record_adjustment, record_allowance_grant,
    record_leave_event, update_entry,
};
