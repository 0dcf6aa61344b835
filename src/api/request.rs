//! Request types for the payroll API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The employee to calculate for.
    pub employee_id: String,
    /// The payroll month (1-12).
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Allowances for the month. Omitted means none.
    #[serde(default)]
    pub allowances: Decimal,
}
