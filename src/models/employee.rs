//! Employee model and related types.
//!
//! Employees are reference data for payroll: the calculation service reads
//! their default salary components and the form pre-fills from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an employee can currently be put on payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and payable.
    Active,
    /// Left, suspended or otherwise not payable.
    Inactive,
}

/// Who bears the APIT liability for an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxBearer {
    /// Tax is withheld from the employee's salary.
    #[default]
    Employee,
    /// Tax is paid by the employer on top of the salary.
    Employer,
}

/// Represents an employee as seen by payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human-facing employee code (e.g., "EMP-001").
    pub employee_code: String,
    /// Default monthly basic salary.
    pub basic_salary: Decimal,
    /// Default monthly allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// Employment status.
    pub status: EmployeeStatus,
    /// Who bears APIT for this employee.
    #[serde(default)]
    pub apit_bearer: TaxBearer,
}

impl Employee {
    /// Returns true if the employee can be put on payroll.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus, TaxBearer};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Nimal Perera".to_string(),
    ///     employee_code: "EMP-001".to_string(),
    ///     basic_salary: Decimal::new(150_000, 0),
    ///     allowances: Decimal::new(20_000, 0),
    ///     status: EmployeeStatus::Active,
    ///     apit_bearer: TaxBearer::Employee,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
