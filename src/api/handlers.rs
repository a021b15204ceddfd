//! HTTP request handlers for the Timesheet Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_period_with_threshold, compute_hours_breakdown_with_threshold,
    format_break_duration, parse_timestamp,
};
use crate::error::{EngineError, EngineResult};
use crate::models::TimeInterval;
use crate::report::{ReportQuery, export_filename, generate_report, report_to_csv};
use crate::store::TimeEntryStore;

use super::request::{
    ClockInRequest, FormatBreakQuery, HoursRequest, RecentActivityQuery, SummaryRequest,
};
use super::response::{ApiError, ApiErrorResponse, FormattedBreak, SummaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/hours", post(hours_handler))
        .route("/summary", post(summary_handler))
        .route("/breaks/format", get(format_break_handler))
        .route("/breaks/:id/end", post(end_break_handler))
        .route("/entries/clock-in", post(clock_in_handler))
        .route("/entries/:id/clock-out", post(clock_out_handler))
        .route("/entries/:id/breaks", post(start_break_handler))
        .route("/users/:id/summary", get(dashboard_handler))
        .route("/users/:id/recent", get(recent_activity_handler))
        .route("/reports", post(report_handler))
        .route("/reports/csv", post(report_csv_handler))
        .with_state(state)
}

/// Handler for POST /hours.
///
/// Computes the breakdown of a single session from raw timestamp strings.
async fn hours_handler(
    State(state): State<AppState>,
    payload: Result<Json<HoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing hours request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let breakdown = compute_hours_breakdown_with_threshold(
        request.clock_in.as_deref().and_then(parse_timestamp),
        request.clock_out.as_deref().and_then(parse_timestamp),
        request.break_minutes,
        state.config().daily_overtime_threshold(),
    );

    info!(
        correlation_id = %correlation_id,
        total_hours = %breakdown.total_hours,
        overtime_hours = %breakdown.overtime_hours,
        "Hours computed"
    );
    (StatusCode::OK, Json(breakdown)).into_response()
}

/// Handler for POST /summary.
///
/// Aggregates the supplied sessions that fall inside the boundary.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let intervals: Vec<TimeInterval> = request
        .intervals
        .iter()
        .filter_map(|interval| interval.to_interval())
        .collect();
    let skipped = request.intervals.len() - intervals.len();
    if skipped > 0 {
        warn!(
            correlation_id = %correlation_id,
            skipped,
            "Dropped intervals with unreadable clock-in"
        );
    }

    let boundary = request.boundary;
    let summary = aggregate_period_with_threshold(
        &intervals,
        |interval| boundary.contains(interval),
        state.config().daily_overtime_threshold(),
    );

    info!(
        correlation_id = %correlation_id,
        intervals = summary.interval_count,
        total_hours = %summary.total_hours,
        "Summary computed"
    );
    (
        StatusCode::OK,
        Json(SummaryResponse {
            boundary,
            summary,
            skipped,
        }),
    )
        .into_response()
}

/// Handler for GET /breaks/format.
async fn format_break_handler(query: Result<Query<FormatBreakQuery>, QueryRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(FormattedBreak {
            minutes: query.minutes,
            formatted: format_break_duration(query.minutes),
        }),
    )
        .into_response()
}

/// Handler for POST /entries/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-in request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    respond(
        correlation_id,
        StatusCode::OK,
        state
            .tracker()
            .clock_in(request.user_id, request.project_id),
    )
}

/// Handler for POST /entries/:id/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    entry_id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-out request");

    match entry_id {
        Ok(Path(entry_id)) => respond(
            correlation_id,
            StatusCode::OK,
            state.tracker().clock_out(entry_id),
        ),
        Err(rejection) => path_rejection(correlation_id, rejection),
    }
}

/// Handler for POST /entries/:id/breaks.
async fn start_break_handler(
    State(state): State<AppState>,
    entry_id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing start-break request");

    match entry_id {
        Ok(Path(entry_id)) => respond(
            correlation_id,
            StatusCode::CREATED,
            state.tracker().start_break(entry_id),
        ),
        Err(rejection) => path_rejection(correlation_id, rejection),
    }
}

/// Handler for POST /breaks/:id/end.
async fn end_break_handler(
    State(state): State<AppState>,
    break_id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing end-break request");

    match break_id {
        Ok(Path(break_id)) => respond(
            correlation_id,
            StatusCode::OK,
            state.tracker().end_break(break_id),
        ),
        Err(rejection) => path_rejection(correlation_id, rejection),
    }
}

/// Handler for GET /users/:id/summary.
async fn dashboard_handler(
    State(state): State<AppState>,
    user_id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dashboard request");

    let Path(user_id) = match user_id {
        Ok(path) => path,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    let result = ensure_employee(&state, user_id)
        .and_then(|_| state.tracker().dashboard_summary(user_id));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /users/:id/recent.
async fn recent_activity_handler(
    State(state): State<AppState>,
    user_id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<RecentActivityQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recent activity request");

    let Path(user_id) = match user_id {
        Ok(path) => path,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    let limit = match query {
        Ok(Query(query)) => query
            .limit
            .unwrap_or_else(|| state.config().recent_entries_limit()),
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    let result = ensure_employee(&state, user_id)
        .and_then(|_| state.tracker().recent_activity(user_id, limit));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /reports.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportQuery>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let query = match payload {
        Ok(Json(query)) => query,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = generate_report(
        state.store(),
        &query,
        state.config().daily_overtime_threshold(),
    );
    if let Ok(report) = &result {
        info!(
            correlation_id = %correlation_id,
            rows = report.rows.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Report generated"
        );
    }
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /reports/csv.
///
/// Returns the report as a `text/csv` attachment.
async fn report_csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportQuery>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report export request");

    let query = match payload {
        Ok(Json(query)) => query,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let report = match generate_report(
        state.store(),
        &query,
        state.config().daily_overtime_threshold(),
    ) {
        Ok(report) => report,
        Err(err) => return engine_failure(correlation_id, err),
    };

    let filename = export_filename(
        &state.config().report_settings().filename_prefix,
        state.tracker().now().date_naive(),
    );
    info!(
        correlation_id = %correlation_id,
        rows = report.rows.len(),
        filename = %filename,
        "Report exported"
    );

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        report_to_csv(&report),
    )
        .into_response()
}

fn ensure_employee(state: &AppState, user_id: Uuid) -> EngineResult<()> {
    state
        .store()
        .find_employee(user_id)?
        .map(|_| ())
        .ok_or_else(|| EngineError::EmployeeNotFound {
            id: user_id.to_string(),
        })
}

fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => engine_failure(correlation_id, err),
    }
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::with_details(
        "VALIDATION_ERROR",
        "Invalid identifier",
        rejection.body_text(),
    ))
    .into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    ApiErrorResponse::bad_request(error).into_response()
}
