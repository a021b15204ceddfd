//! Request types for the Timesheet Engine API.
//!
//! Timestamps arrive as strings and go through the same lenient parser the
//! calculator uses, so an unreadable value behaves like an absent one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{PeriodBoundary, parse_timestamp};
use crate::models::TimeInterval;

/// Request body for `POST /hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRequest {
    /// Session start.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Session end; absent for a session still in progress.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Minutes of break taken during the session.
    #[serde(default)]
    pub break_minutes: u32,
}

/// One session in a `POST /summary` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalRequest {
    /// Session start.
    pub clock_in: String,
    /// Session end.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Minutes of break taken during the session.
    #[serde(default)]
    pub break_minutes: u32,
}

impl IntervalRequest {
    /// Converts to a domain interval.
    ///
    /// Returns `None` when `clock_in` cannot be parsed. An unreadable
    /// `clock_out` leaves the interval open.
    pub fn to_interval(&self) -> Option<TimeInterval> {
        let clock_in = parse_timestamp(&self.clock_in)?;
        Some(TimeInterval {
            clock_in,
            clock_out: self.clock_out.as_deref().and_then(parse_timestamp),
            break_minutes: self.break_minutes,
        })
    }
}

/// Request body for `POST /summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Window the sessions are filed into.
    pub boundary: PeriodBoundary,
    /// Sessions to aggregate.
    #[serde(default)]
    pub intervals: Vec<IntervalRequest>,
}

/// Request body for `POST /entries/clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// Employee account clocking in.
    pub user_id: Uuid,
    /// Project the session is booked against.
    pub project_id: Uuid,
}

/// Query string of `GET /breaks/format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatBreakQuery {
    /// Break length in minutes.
    pub minutes: u32,
}

/// Query string of `GET /users/:id/recent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentActivityQuery {
    /// Maximum rows; the configured default when absent.
    #[serde(default)]
    pub limit: Option<usize>,
}
