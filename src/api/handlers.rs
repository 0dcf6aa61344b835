//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_breakdown;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    CalculationBreakdown, NewPayrollRecord, PayrollListEntry, PayrollPeriod, PayrollRecord,
    StatusUpdate,
};

use super::request::CalculateRequest;
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "payroll-engine";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/employees", get(list_employees_handler))
        .route("/payroll", get(list_payroll_handler).post(create_payroll_handler))
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/:id", get(get_payroll_handler))
        .route("/payroll/:id/status", patch(update_status_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to the API error shape.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

fn error_response(err: PayrollError, correlation_id: Uuid, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{}",
        context
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /employees.
///
/// Returns every employee; consumers filter to active ones.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.employees().list().await {
        Ok(employees) => {
            debug!(
                correlation_id = %correlation_id,
                count = employees.len(),
                "Listed employees"
            );
            json_response(StatusCode::OK, employees)
        }
        Err(err) => error_response(err, correlation_id, "Listing employees failed"),
    }
}

/// Handler for GET /payroll.
///
/// Returns all records joined with the employee's display fields.
async fn list_payroll_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match list_payroll(&state).await {
        Ok(entries) => {
            debug!(
                correlation_id = %correlation_id,
                count = entries.len(),
                "Listed payroll records"
            );
            json_response(StatusCode::OK, entries)
        }
        Err(err) => error_response(err, correlation_id, "Listing payroll failed"),
    }
}

async fn list_payroll(state: &AppState) -> PayrollResult<Vec<PayrollListEntry>> {
    let employees: HashMap<String, (String, String)> = state
        .employees()
        .list()
        .await?
        .into_iter()
        .map(|e| (e.id, (e.name, e.employee_code)))
        .collect();

    let records = state.payroll().list().await?;
    Ok(records
        .iter()
        .map(|record| match employees.get(&record.employee_id) {
            Some((name, code)) => PayrollListEntry::new(record, name, code),
            None => PayrollListEntry::new(record, "", ""),
        })
        .collect())
}

/// Handler for POST /payroll/calculate.
///
/// Calculates the statutory breakdown for one employee and period.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match perform_calculation(&state, &request).await {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %breakdown.employee_id,
                period = %format!("{}-{:02}", breakdown.year, breakdown.month),
                gross_salary = %breakdown.gross_salary,
                net_salary = %breakdown.net_salary,
                total_ctc = %breakdown.total_ctc,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, breakdown)
        }
        Err(err) => error_response(err, correlation_id, "Calculation failed"),
    }
}

async fn perform_calculation(
    state: &AppState,
    request: &CalculateRequest,
) -> PayrollResult<CalculationBreakdown> {
    let period = PayrollPeriod::new(request.month, request.year)?;
    let employee = state.employees().get(&request.employee_id).await?;
    let rates = state.config().rates_for(period)?;
    calculate_breakdown(&employee, period, request.allowances, rates)
}

/// Handler for POST /payroll.
///
/// Persists a record built from form fields and a calculation breakdown.
/// The figures are checked against the breakdown invariants, not
/// recalculated.
async fn create_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewPayrollRecord>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll creation");

    let new = match payload {
        Ok(Json(new)) => new,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match create_payroll(&state, new).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record.id,
                serial_number = %record.serial_number,
                employee_id = %record.employee_id,
                net_salary = %record.net_salary,
                "Payroll record created"
            );
            json_response(StatusCode::CREATED, record)
        }
        Err(err) => error_response(err, correlation_id, "Payroll creation failed"),
    }
}

async fn create_payroll(state: &AppState, new: NewPayrollRecord) -> PayrollResult<PayrollRecord> {
    let employee = state.employees().get(&new.employee_id).await?;
    if !employee.is_active() {
        return Err(PayrollError::EmployeeInactive {
            employee_id: employee.id,
        });
    }
    state.payroll().create(new).await
}

fn parse_record_id(id: &str) -> PayrollResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| PayrollError::RecordNotFound {
        record_id: id.to_string(),
    })
}

/// Handler for GET /payroll/:id.
async fn get_payroll_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = match parse_record_id(&id) {
        Ok(record_id) => state.payroll().get(record_id).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(err, correlation_id, "Payroll lookup failed"),
    }
}

/// Handler for PATCH /payroll/:id/status.
async fn update_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let result = match parse_record_id(&id) {
        Ok(record_id) => state.payroll().update_status(record_id, update.status).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record.id,
                status = %record.status,
                "Payroll status updated"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => error_response(err, correlation_id, "Status update failed"),
    }
}
