//! Storage for employees and payroll records.
//!
//! Storage sits behind the [`EmployeeDirectory`] and [`PayrollStore`] traits
//! so the HTTP layer does not depend on a particular backend. The in-memory
//! implementations here back the service binary and the tests.

mod employees;
mod payroll;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PayrollResult;
use crate::models::{Employee, NewPayrollRecord, PayrollRecord, PayrollStatus};

pub use employees::InMemoryEmployeeDirectory;
pub use payroll::InMemoryPayrollStore;

/// Read access to employee reference data.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Lists all employees, active and inactive.
    async fn list(&self) -> PayrollResult<Vec<Employee>>;

    /// Finds an employee by id, failing with `EmployeeNotFound`.
    async fn get(&self, employee_id: &str) -> PayrollResult<Employee>;
}

/// Persistence for finalized payroll records.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Validates and persists a new record, assigning id and serial number.
    async fn create(&self, new: NewPayrollRecord) -> PayrollResult<PayrollRecord>;

    /// Lists all records, newest first.
    async fn list(&self) -> PayrollResult<Vec<PayrollRecord>>;

    /// Finds a record by id, failing with `RecordNotFound`.
    async fn get(&self, record_id: Uuid) -> PayrollResult<PayrollRecord>;

    /// Moves a record to a new lifecycle status.
    async fn update_status(
        &self,
        record_id: Uuid,
        status: PayrollStatus,
    ) -> PayrollResult<PayrollRecord>;
}
