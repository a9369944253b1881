// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-employee write serialization.
//!
//! An employee's chain is a strict sequential dependency, so exactly one
//! worker may own it at a time; cascades for different employees are
//! independent and may run in parallel. Callers take the handle for the
//! subject employee and hold its lock for the whole trigger-plus-cascade
//! operation, including the commit boundaries between batches.

use leave_ledger_domain::EmployeeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of per-employee locks.
#[derive(Debug, Default)]
pub struct EmployeeLockRegistry {
    inner: Mutex<HashMap<EmployeeId, Arc<Mutex<()>>>>,
}

impl EmployeeLockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock handle for an employee, creating it on first use.
    ///
    /// The registry lock is held only for the lookup; contention happens
    /// on the returned per-employee handle.
    #[must_use]
    pub fn handle(&self, employee_id: EmployeeId) -> Arc<Mutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(employee_id).or_default())
    }
}
