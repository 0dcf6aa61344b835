//! Client side of the payroll API.
//!
//! [`PayrollApi`] is the seam the payroll form talks through. The HTTP
//! implementation is [`HttpPayrollApi`]; tests substitute their own.

mod http;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::CalculateRequest;
use crate::error::PayrollResult;
use crate::models::{
    CalculationBreakdown, Employee, NewPayrollRecord, PayrollListEntry, PayrollRecord,
    PayrollStatus,
};

pub use http::HttpPayrollApi;

/// Operations the payroll page needs from the backend.
#[async_trait]
pub trait PayrollApi: Send + Sync {
    /// Fetches all employees.
    async fn list_employees(&self) -> PayrollResult<Vec<Employee>>;

    /// Fetches all payroll records with employee display fields.
    async fn list_payroll(&self) -> PayrollResult<Vec<PayrollListEntry>>;

    /// Requests a statutory breakdown.
    async fn calculate(&self, request: &CalculateRequest) -> PayrollResult<CalculationBreakdown>;

    /// Persists a new payroll record.
    async fn create_payroll(&self, record: &NewPayrollRecord) -> PayrollResult<PayrollRecord>;

    /// Changes the lifecycle status of a record.
    async fn update_status(
        &self,
        record_id: Uuid,
        status: PayrollStatus,
    ) -> PayrollResult<PayrollRecord>;
}
