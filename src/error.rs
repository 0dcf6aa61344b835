//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculation service, the record store, the HTTP
//! client and the payroll form can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory rate set is effective for the requested period.
    #[error("No statutory rates effective for {year}-{month:02}")]
    RateNotFound {
        /// The payroll month (1-12).
        month: u32,
        /// The payroll year.
        year: i32,
    },

    /// The referenced employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The referenced employee exists but is not active.
    #[error("Employee '{employee_id}' is inactive")]
    EmployeeInactive {
        /// The identifier of the inactive employee.
        employee_id: String,
    },

    /// The payroll period is out of range.
    #[error("Invalid payroll period {year}-{month}: {message}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
        /// What made the period invalid.
        message: String,
    },

    /// A monetary amount was out of range.
    #[error("Invalid amount for '{field}': {value}")]
    InvalidAmount {
        /// The field carrying the amount.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A submitted record does not satisfy the breakdown invariants.
    #[error("Inconsistent breakdown: {message}")]
    InconsistentBreakdown {
        /// Which invariant failed.
        message: String,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll already exists for employee '{employee_id}' in {year}-{month:02}")]
    DuplicatePayroll {
        /// The employee identifier.
        employee_id: String,
        /// The payroll month.
        month: u32,
        /// The payroll year.
        year: i32,
    },

    /// The payroll record does not exist.
    #[error("Payroll record not found: {record_id}")]
    RecordNotFound {
        /// The record identifier that was looked up.
        record_id: String,
    },

    /// The requested lifecycle status change is not allowed.
    #[error("Cannot change payroll status from '{from}' to '{to}'")]
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// The form was submitted before it was complete.
    #[error("Payroll form is incomplete: {message}")]
    IncompleteForm {
        /// What is missing.
        message: String,
    },

    /// The remote API could not be reached or returned an unreadable body.
    #[error("Transport error: {message}")]
    Transport {
        /// A description of the transport failure.
        message: String,
    },

    /// The remote API answered with an error response.
    #[error("API error {status} ({code}): {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The machine-readable error code.
        code: String,
        /// The human-readable message.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PayrollError::ConfigNotFound {
            path: "/missing/scheme.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/scheme.yaml"
        );
    }

    #[test]
    fn test_rate_not_found_pads_month() {
        let error = PayrollError::RateNotFound { month: 3, year: 2019 };
        assert_eq!(error.to_string(), "No statutory rates effective for 2019-03");
    }

    #[test]
    fn test_invalid_amount_displays_field_and_value() {
        let error = PayrollError::InvalidAmount {
            field: "allowances".to_string(),
            value: Decimal::new(-500, 0),
        };
        assert_eq!(error.to_string(), "Invalid amount for 'allowances': -500");
    }

    #[test]
    fn test_duplicate_payroll_displays_period() {
        let error = PayrollError::DuplicatePayroll {
            employee_id: "emp_001".to_string(),
            month: 1,
            year: 2026,
        };
        assert_eq!(
            error.to_string(),
            "Payroll already exists for employee 'emp_001' in 2026-01"
        );
    }

    #[test]
    fn test_invalid_status_transition_displays_both_states() {
        let error = PayrollError::InvalidStatusTransition {
            from: "paid".to_string(),
            to: "draft".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot change payroll status from 'paid' to 'draft'"
        );
    }

    #[test]
    fn test_api_error_displays_status_and_code() {
        let error = PayrollError::Api {
            status: 404,
            code: "EMPLOYEE_NOT_FOUND".to_string(),
            message: "Employee not found: emp_9".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "API error 404 (EMPLOYEE_NOT_FOUND): Employee not found: emp_9"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> PayrollResult<()> {
            Err(PayrollError::EmployeeNotFound {
                employee_id: "emp_x".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
