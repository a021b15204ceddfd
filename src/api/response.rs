//! Response types for the Timesheet Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::PeriodBoundary;
use crate::error::EngineError;
use crate::models::PeriodSummary;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
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

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::ProjectNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("PROJECT_NOT_FOUND", message),
            ),
            EngineError::TimeEntryNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("TIME_ENTRY_NOT_FOUND", message),
            ),
            EngineError::BreakNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("BREAK_NOT_FOUND", message),
            ),
            EngineError::EntryAlreadyClosed { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ENTRY_ALREADY_CLOSED", message),
            ),
            EngineError::BreakAlreadyActive { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("BREAK_ALREADY_ACTIVE", message),
            ),
            EngineError::BreakAlreadyEnded { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("BREAK_ALREADY_ENDED", message),
            ),
            EngineError::ProjectInUse { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "PROJECT_IN_USE",
                    message,
                    "Delete or reassign the project's time entries first",
                ),
            ),
            EngineError::DuplicateEmployee { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_EMPLOYEE", message),
            ),
            EngineError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            EngineError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("NOT_AUTHENTICATED", message),
            ),
            EngineError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
            EngineError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::StoreError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Storage failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response body of `GET /breaks/format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBreak {
    /// The requested minutes.
    pub minutes: u32,
    /// Display form, e.g. `1h 5m`.
    pub formatted: String,
}

/// Response body of `POST /summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// The window that was summarized.
    pub boundary: PeriodBoundary,
    /// Totals over the closed sessions inside the window.
    pub summary: PeriodSummary,
    /// Sessions dropped because their clock-in could not be read.
    pub skipped: usize,
}
