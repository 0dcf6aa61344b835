//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for listing employees,
//! calculating statutory breakdowns and managing payroll records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{SERVICE_NAME, create_router};
pub use request::CalculateRequest;
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
