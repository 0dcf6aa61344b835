//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

pub(crate) mod breakdown;
mod employee;
mod payroll_record;
mod period;

pub use breakdown::{
    AuditStep, AuditTrace, BreakdownFigures, CalculationBreakdown, Figures, TaxScenario,
};
pub use employee::{Employee, EmployeeStatus, TaxBearer};
pub use payroll_record::{
    DraftFields, NewPayrollRecord, PayrollListEntry, PayrollRecord, PayrollStatus, StatusUpdate,
    format_serial_number,
};
pub use period::{MAX_PAYROLL_YEAR, MIN_PAYROLL_YEAR, PayrollPeriod, month_name};
