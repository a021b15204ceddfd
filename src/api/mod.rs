//! HTTP API module for the Timesheet Engine.
//!
//! This module exposes the hours calculator, the clock-in/out workflow,
//! the employee dashboard and report export over REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockInRequest, FormatBreakQuery, HoursRequest, IntervalRequest, RecentActivityQuery,
    SummaryRequest,
};
pub use response::{ApiError, ApiErrorResponse, FormattedBreak, SummaryResponse};
pub use state::AppState;
