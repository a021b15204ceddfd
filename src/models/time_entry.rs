//! Time entry model and related types.
//!
//! This module defines the [`TimeInterval`] measured by the calculator, the
//! stored [`TimeEntry`] record it is derived from, and the [`BreakRecord`]
//! that accumulates into an entry's break minutes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One work session: a clock-in, an optional clock-out and the break
/// minutes taken in between.
///
/// An interval without a clock-out is open (in progress) and is not
/// eligible for hours calculation.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::TimeInterval;
/// use chrono::{TimeZone, Utc};
///
/// let clock_in = Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).unwrap();
/// let interval = TimeInterval::open(clock_in);
/// assert!(!interval.is_closed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// When the session started.
    pub clock_in: DateTime<Utc>,
    /// When the session ended, if it has.
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    /// Accumulated break minutes within the session.
    #[serde(default)]
    pub break_minutes: u32,
}

impl TimeInterval {
    /// Creates an open interval with no breaks.
    pub fn open(clock_in: DateTime<Utc>) -> Self {
        Self {
            clock_in,
            clock_out: None,
            break_minutes: 0,
        }
    }

    /// Creates a closed interval.
    pub fn closed(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>, break_minutes: u32) -> Self {
        Self {
            clock_in,
            clock_out: Some(clock_out),
            break_minutes,
        }
    }

    /// Returns true if the interval has a clock-out time.
    pub fn is_closed(&self) -> bool {
        self.clock_out.is_some()
    }

    /// The calendar date (UTC) the session belongs to.
    pub fn work_date(&self) -> NaiveDate {
        self.clock_in.date_naive()
    }
}

/// Review status of a stored time entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Newly recorded, awaiting review.
    #[default]
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

/// A stored time entry for one user and project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee who recorded the entry.
    pub user_id: Uuid,
    /// The project the time was booked against.
    pub project_id: Uuid,
    /// The work date the entry is filed under.
    pub date: NaiveDate,
    /// Clock-in instant.
    pub clock_in: DateTime<Utc>,
    /// Clock-out instant, absent while the entry is open.
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    /// Total minutes of completed breaks.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Review status.
    #[serde(default)]
    pub status: EntryStatus,
}

impl TimeEntry {
    /// Creates a new open, pending entry dated on the clock-in day.
    pub fn start(user_id: Uuid, project_id: Uuid, clock_in: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            project_id,
            date: clock_in.date_naive(),
            clock_in,
            clock_out: None,
            break_minutes: 0,
            notes: None,
            status: EntryStatus::Pending,
        }
    }

    /// Returns true while the entry has no clock-out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// The interval the calculator measures for this entry.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            clock_in: self.clock_in,
            clock_out: self.clock_out,
            break_minutes: self.break_minutes,
        }
    }
}

/// A break taken during a time entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRecord {
    /// Unique identifier for the break.
    pub id: Uuid,
    /// The entry the break belongs to.
    pub time_entry_id: Uuid,
    /// When the break started.
    pub start_time: DateTime<Utc>,
    /// When the break ended, absent while it is in progress.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl BreakRecord {
    /// Starts a new break on the given entry.
    pub fn start(time_entry_id: Uuid, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            time_entry_id,
            start_time,
            end_time: None,
        }
    }

    /// Returns true while the break has no end time.
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Duration of a finished break in whole minutes, rounded to the
    /// nearest minute. Returns `None` while the break is still running.
    ///
    /// An end time before the start time counts as zero minutes.
    pub fn duration_minutes(&self) -> Option<u32> {
        let end_time = self.end_time?;
        let millis = (end_time - self.start_time).num_milliseconds().max(0);
        let minutes = (millis + 30_000) / 60_000;
        Some(u32::try_from(minutes).unwrap_or(u32::MAX))
    }
}
