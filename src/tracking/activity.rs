//! Read models for the employee dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PeriodSummary;

/// Label used when an entry's project no longer exists.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Placeholder shown for a clock-out that has not happened yet.
pub const NO_CLOCK_OUT: &str = "-";

/// One line of the recent activity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    /// The entry this row describes.
    pub entry_id: Uuid,
    /// Work date of the entry.
    pub date: NaiveDate,
    /// Project name, or [`UNKNOWN_PROJECT`].
    pub project: String,
    /// Clock-in time as `hh:mm AM`.
    pub clock_in: String,
    /// Clock-out time as `hh:mm PM`, or [`NO_CLOCK_OUT`].
    pub clock_out: String,
    /// Break minutes as `"{h}h {m}m"`.
    pub breaks: String,
    /// Worked hours for the entry.
    pub total_hours: Decimal,
}

/// Today's and this week's hours for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// The day the summary was taken.
    pub date: NaiveDate,
    /// Closed sessions dated today.
    pub today: PeriodSummary,
    /// First day of the current week.
    pub week_start: NaiveDate,
    /// Closed sessions dated within the current week.
    pub week: PeriodSummary,
}

/// Formats an instant as a 12-hour wall clock time, e.g. `09:05 AM`.
pub fn format_clock_time(instant: DateTime<Utc>) -> String {
    instant.format("%I:%M %p").to_string()
}
