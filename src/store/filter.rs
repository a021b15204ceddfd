//! Time entry query filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{EntryStatus, TimeEntry};

/// Criteria for selecting time entries. Unset fields match everything.
///
/// # Example
///
/// ```
/// use timesheet_engine::store::EntryFilter;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let user = Uuid::new_v4();
/// let filter = EntryFilter::for_user(user)
///     .between(
///         NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2023, 6, 7).unwrap(),
///     )
///     .closed_only();
/// assert_eq!(filter.user_id, Some(user));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Only entries recorded by this user.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Only entries booked against this project.
    #[serde(default)]
    pub project_id: Option<Uuid>,
    /// Only entries dated on or after this day.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Only entries dated on or before this day.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Only entries with this status.
    #[serde(default)]
    pub status: Option<EntryStatus>,
    /// `Some(true)` for open entries only, `Some(false)` for closed only.
    #[serde(default)]
    pub open: Option<bool>,
}

impl EntryFilter {
    /// Entries recorded by one user.
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Entries booked against one project.
    pub fn for_project(project_id: Uuid) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    /// Restricts to an inclusive date range.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Restricts to a single date.
    pub fn on(self, date: NaiveDate) -> Self {
        self.between(date, date)
    }

    /// Restricts to entries without a clock-out.
    pub fn open_only(mut self) -> Self {
        self.open = Some(true);
        self
    }

    /// Restricts to entries with a clock-out.
    pub fn closed_only(mut self) -> Self {
        self.open = Some(false);
        self
    }

    /// Restricts to one status.
    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the entry satisfies every set criterion.
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        self.user_id.is_none_or(|id| entry.user_id == id)
            && self.project_id.is_none_or(|id| entry.project_id == id)
            && self.from.is_none_or(|from| entry.date >= from)
            && self.to.is_none_or(|to| entry.date <= to)
            && self.status.is_none_or(|status| entry.status == status)
            && self.open.is_none_or(|open| entry.is_open() == open)
    }
}
