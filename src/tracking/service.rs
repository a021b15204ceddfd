//! The time tracking service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc, Weekday};
use mockable::Clock;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, aggregate_period_with_threshold, format_break_duration,
    interval_breakdown, week_start,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakRecord, TimeEntry, TimeInterval};
use crate::store::{EntryFilter, TimeEntryStore};

use super::activity::{
    ActivityRow, DashboardSummary, NO_CLOCK_OUT, UNKNOWN_PROJECT, format_clock_time,
};

/// Records work sessions and breaks for employees.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::Utc;
/// use mockable::DefaultClock;
/// use timesheet_engine::models::Project;
/// use timesheet_engine::store::{MemoryStore, TimeEntryStore};
/// use timesheet_engine::tracking::TimeTracker;
/// # use timesheet_engine::models::{Employee, Role};
/// # use uuid::Uuid;
///
/// let store = Arc::new(MemoryStore::new());
/// # let user = store.insert_employee(Employee {
/// #     id: Uuid::new_v4(),
/// #     employee_id: "EMP-001".into(),
/// #     name: "Sam".into(),
/// #     email: "sam@example.com".into(),
/// #     role: Role::Employee,
/// #     avatar_url: None,
/// #     created_at: Utc::now(),
/// # })?;
/// let project = store.insert_project(Project::new("Mobile App", None, Utc::now()))?;
/// let tracker = TimeTracker::new(store, Arc::new(DefaultClock));
///
/// let entry = tracker.clock_in(user.id, project.id)?;
/// assert!(entry.is_open());
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
pub struct TimeTracker<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    daily_threshold: Decimal,
    week_starts_on: Weekday,
}

impl<S> Clone for TimeTracker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            daily_threshold: self.daily_threshold,
            week_starts_on: self.week_starts_on,
        }
    }
}

impl<S> TimeTracker<S> {
    /// Creates a tracker with an 8 hour threshold and Sunday week start.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            daily_threshold: DEFAULT_DAILY_OVERTIME_THRESHOLD,
            week_starts_on: Weekday::Sun,
        }
    }

    /// Creates a tracker using the configured threshold and week start.
    pub fn from_config(store: Arc<S>, clock: Arc<dyn Clock>, config: &ConfigLoader) -> Self {
        Self::new(store, clock)
            .with_daily_threshold(config.daily_overtime_threshold())
            .with_week_start(config.week_starts_on())
    }

    /// Overrides the per-session overtime threshold.
    ///
    /// The threshold must be positive; zero or negative values are ignored
    /// and the previous threshold is kept.
    pub fn with_daily_threshold(mut self, threshold: Decimal) -> Self {
        if threshold <= Decimal::ZERO {
            warn!(threshold = %threshold, "Ignoring non-positive overtime threshold");
            return self;
        }
        self.daily_threshold = threshold;
        self
    }

    /// Overrides the first day of the week.
    pub fn with_week_start(mut self, first_day: Weekday) -> Self {
        self.week_starts_on = first_day;
        self
    }

    /// The store this tracker writes to.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The current instant according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

impl<S: TimeEntryStore> TimeTracker<S> {
    /// Opens a session for the user on the project.
    ///
    /// If the user already has an open entry dated today, that entry is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// `EmployeeNotFound` or `ProjectNotFound` when either id is unknown.
    pub fn clock_in(&self, user_id: Uuid, project_id: Uuid) -> EngineResult<TimeEntry> {
        self.store
            .find_employee(user_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: user_id.to_string(),
            })?;

        if let Some(existing) = self.active_entry(user_id)? {
            debug!(
                user_id = %user_id,
                entry_id = %existing.id,
                "User already clocked in today"
            );
            return Ok(existing);
        }

        self.store
            .find_project(project_id)?
            .ok_or_else(|| EngineError::ProjectNotFound {
                id: project_id.to_string(),
            })?;

        let candidate = TimeEntry::start(user_id, project_id, self.now());
        let candidate_id = candidate.id;
        let entry = self.store.insert_entry_unless_open(candidate)?;
        if entry.id != candidate_id {
            debug!(
                user_id = %user_id,
                entry_id = %entry.id,
                "Concurrent clock-in already opened an entry"
            );
            return Ok(entry);
        }

        info!(
            user_id = %user_id,
            project_id = %project_id,
            entry_id = %entry.id,
            clock_in = %entry.clock_in,
            "Clocked in"
        );

        Ok(entry)
    }

    /// Closes a session at the current instant, ending any active break first.
    pub fn clock_out(&self, entry_id: Uuid) -> EngineResult<TimeEntry> {
        let mut entry = self.find_entry(entry_id)?;
        if !entry.is_open() {
            return Err(EngineError::EntryAlreadyClosed {
                entry_id: entry_id.to_string(),
            });
        }

        let now = self.now();
        if let Some(record) = self.store.active_break(entry_id)? {
            debug!(break_id = %record.id, "Ending active break before clock out");
            self.finish_break(record, &mut entry, now)?;
        }

        entry.clock_out = Some(now);
        self.store.update_entry(&entry)?;

        let breakdown = interval_breakdown(&entry.interval(), self.daily_threshold);
        info!(
            entry_id = %entry.id,
            clock_out = %now,
            break_minutes = entry.break_minutes,
            total_hours = %breakdown.total_hours,
            overtime_hours = %breakdown.overtime_hours,
            "Clocked out"
        );

        Ok(entry)
    }

    /// Starts a break on an open session.
    pub fn start_break(&self, entry_id: Uuid) -> EngineResult<BreakRecord> {
        let entry = self.find_entry(entry_id)?;
        if !entry.is_open() {
            return Err(EngineError::EntryAlreadyClosed {
                entry_id: entry_id.to_string(),
            });
        }
        if self.store.active_break(entry_id)?.is_some() {
            return Err(EngineError::BreakAlreadyActive {
                entry_id: entry_id.to_string(),
            });
        }

        let record = self
            .store
            .insert_break(BreakRecord::start(entry_id, self.now()))?;
        info!(entry_id = %entry_id, break_id = %record.id, "Break started");
        Ok(record)
    }

    /// Ends a break and adds its length to the session's break minutes.
    pub fn end_break(&self, break_id: Uuid) -> EngineResult<BreakRecord> {
        let record = self
            .store
            .find_break(break_id)?
            .ok_or_else(|| EngineError::BreakNotFound {
                id: break_id.to_string(),
            })?;
        if !record.is_active() {
            return Err(EngineError::BreakAlreadyEnded {
                break_id: break_id.to_string(),
            });
        }

        let mut entry = self.find_entry(record.time_entry_id)?;
        let record = self.finish_break(record, &mut entry, self.now())?;
        self.store.update_entry(&entry)?;
        Ok(record)
    }

    /// The user's open session dated today, if any.
    pub fn active_entry(&self, user_id: Uuid) -> EngineResult<Option<TimeEntry>> {
        let today = self.now().date_naive();
        let filter = EntryFilter::for_user(user_id).on(today).open_only();
        Ok(self.store.query_entries(&filter)?.into_iter().next())
    }

    /// The break in progress on a session, if any.
    pub fn active_break(&self, entry_id: Uuid) -> EngineResult<Option<BreakRecord>> {
        self.store.active_break(entry_id)
    }

    /// The user's most recent sessions, newest first.
    pub fn recent_activity(&self, user_id: Uuid, limit: usize) -> EngineResult<Vec<ActivityRow>> {
        let entries = self.store.query_entries(&EntryFilter::for_user(user_id))?;

        entries
            .into_iter()
            .take(limit)
            .map(|entry| self.activity_row(entry))
            .collect()
    }

    /// Today's and this week's hours for the user.
    pub fn dashboard_summary(&self, user_id: Uuid) -> EngineResult<DashboardSummary> {
        let today = self.now().date_naive();
        let start = week_start(today, self.week_starts_on);
        let filter = EntryFilter::for_user(user_id).between(start, start + Duration::days(6));

        // Sessions are filed by their stored date, not by the clock-in instant.
        let entries = self.store.query_entries(&filter)?;
        let week: Vec<TimeInterval> = entries.iter().map(TimeEntry::interval).collect();
        let today_only: Vec<TimeInterval> = entries
            .iter()
            .filter(|entry| entry.date == today)
            .map(TimeEntry::interval)
            .collect();

        Ok(DashboardSummary {
            date: today,
            today: aggregate_period_with_threshold(&today_only, |_| true, self.daily_threshold),
            week_start: start,
            week: aggregate_period_with_threshold(&week, |_| true, self.daily_threshold),
        })
    }

    fn find_entry(&self, entry_id: Uuid) -> EngineResult<TimeEntry> {
        self.store
            .find_entry(entry_id)?
            .ok_or_else(|| EngineError::TimeEntryNotFound {
                id: entry_id.to_string(),
            })
    }

    /// Stamps the break's end and folds its minutes into the entry.
    /// The caller persists the entry.
    fn finish_break(
        &self,
        mut record: BreakRecord,
        entry: &mut TimeEntry,
        now: DateTime<Utc>,
    ) -> EngineResult<BreakRecord> {
        record.end_time = Some(now);
        let minutes = record.duration_minutes().unwrap_or(0);
        entry.break_minutes = entry.break_minutes.saturating_add(minutes);
        self.store.update_break(&record)?;

        info!(
            entry_id = %entry.id,
            break_id = %record.id,
            minutes,
            break_minutes = entry.break_minutes,
            "Break ended"
        );
        Ok(record)
    }

    fn activity_row(&self, entry: TimeEntry) -> EngineResult<ActivityRow> {
        let project = match self.store.find_project(entry.project_id)? {
            Some(project) => project.name,
            None => {
                warn!(
                    entry_id = %entry.id,
                    project_id = %entry.project_id,
                    "Entry references a missing project"
                );
                UNKNOWN_PROJECT.to_string()
            }
        };

        Ok(ActivityRow {
            entry_id: entry.id,
            date: entry.date,
            project,
            clock_in: format_clock_time(entry.clock_in),
            clock_out: entry
                .clock_out
                .map(format_clock_time)
                .unwrap_or_else(|| NO_CLOCK_OUT.to_string()),
            breaks: format_break_duration(entry.break_minutes),
            total_hours: interval_breakdown(&entry.interval(), self.daily_threshold).total_hours,
        })
    }
}
