//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::Employee;
use crate::store::{EmployeeDirectory, InMemoryEmployeeDirectory, InMemoryPayrollStore, PayrollStore};

/// Shared application state.
///
/// Holds the loaded statutory configuration and the employee and payroll
/// stores. Cloning is cheap: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    employees: Arc<dyn EmployeeDirectory>,
    payroll: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates state from explicit store implementations.
    pub fn new(
        config: ConfigLoader,
        employees: Arc<dyn EmployeeDirectory>,
        payroll: Arc<dyn PayrollStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            employees,
            payroll,
        }
    }

    /// Creates state backed by in-memory stores seeded with `employees`.
    pub fn in_memory(config: ConfigLoader, employees: Vec<Employee>) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryEmployeeDirectory::new(employees)),
            Arc::new(InMemoryPayrollStore::new()),
        )
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee directory.
    pub fn employees(&self) -> &dyn EmployeeDirectory {
        self.employees.as_ref()
    }

    /// Returns the payroll record store.
    pub fn payroll(&self) -> &dyn PayrollStore {
        self.payroll.as_ref()
    }
}
