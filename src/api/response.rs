//! Response types for the payroll API.
//!
//! This module defines the error response structures and the mapping from
//! [`PayrollError`] to HTTP status codes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a response with an explicit status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            PayrollError::RateNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "RATE_NOT_FOUND",
                    message,
                    "No statutory rate set covers the requested period",
                ),
            ),
            PayrollError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            PayrollError::EmployeeInactive { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "EMPLOYEE_INACTIVE",
                    message,
                    "Payroll can only be calculated for active employees",
                ),
            ),
            PayrollError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            PayrollError::InvalidAmount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_AMOUNT", message),
            ),
            PayrollError::InconsistentBreakdown { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INCONSISTENT_BREAKDOWN",
                    message,
                    "Submitted figures must match a calculation breakdown",
                ),
            ),
            PayrollError::DuplicatePayroll { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_PAYROLL", message),
            ),
            PayrollError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            PayrollError::InvalidStatusTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("INVALID_STATUS_TRANSITION", message),
            ),
            PayrollError::IncompleteForm { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(message),
            ),
            PayrollError::Transport { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("UPSTREAM_ERROR", message),
            ),
            PayrollError::Api {
                status,
                code,
                message,
            } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                ApiError::new(code, message),
            ),
            PayrollError::CalculationError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        Self { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_deserializes_without_details() {
        let error: ApiError =
            serde_json::from_str(r#"{"code": "X", "message": "y"}"#).unwrap();
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_employee_errors_map_to_statuses() {
        let not_found: ApiErrorResponse = PayrollError::EmployeeNotFound {
            employee_id: "emp_x".to_string(),
        }
        .into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.error.code, "EMPLOYEE_NOT_FOUND");
        assert!(not_found.error.message.contains("emp_x"));

        let inactive: ApiErrorResponse = PayrollError::EmployeeInactive {
            employee_id: "emp_004".to_string(),
        }
        .into();
        assert_eq!(inactive.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(inactive.error.code, "EMPLOYEE_INACTIVE");
    }

    #[test]
    fn test_record_errors_map_to_statuses() {
        let duplicate: ApiErrorResponse = PayrollError::DuplicatePayroll {
            employee_id: "emp_001".to_string(),
            month: 1,
            year: 2026,
        }
        .into();
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(duplicate.error.code, "DUPLICATE_PAYROLL");

        let transition: ApiErrorResponse = PayrollError::InvalidStatusTransition {
            from: "paid".to_string(),
            to: "draft".to_string(),
        }
        .into();
        assert_eq!(transition.status, StatusCode::CONFLICT);
        assert_eq!(transition.error.code, "INVALID_STATUS_TRANSITION");
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let amount: ApiErrorResponse = PayrollError::InvalidAmount {
            field: "allowances".to_string(),
            value: Decimal::NEGATIVE_ONE,
        }
        .into();
        assert_eq!(amount.status, StatusCode::BAD_REQUEST);
        assert_eq!(amount.error.code, "INVALID_AMOUNT");

        let inconsistent: ApiErrorResponse = PayrollError::InconsistentBreakdown {
            message: "net".to_string(),
        }
        .into();
        assert_eq!(inconsistent.status, StatusCode::BAD_REQUEST);
        assert_eq!(inconsistent.error.code, "INCONSISTENT_BREAKDOWN");
    }

    #[test]
    fn test_config_error_is_internal() {
        let error: ApiErrorResponse = PayrollError::ConfigNotFound {
            path: "/missing".to_string(),
        }
        .into();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.error.details.unwrap().contains("/missing"));
    }
}
