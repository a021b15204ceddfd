//! Timesheet report generation.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculation::{aggregate_period_with_threshold, interval_breakdown};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PeriodSummary, TimeEntry, TimeInterval};
use crate::store::{EntryFilter, TimeEntryStore};
use crate::tracking::UNKNOWN_PROJECT;

/// Name shown for an entry whose employee no longer exists.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown";

/// Which entries a report covers. Empty id lists mean every employee or
/// every project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
    /// Employees to include.
    #[serde(default)]
    pub employee_ids: Vec<Uuid>,
    /// Projects to include.
    #[serde(default)]
    pub project_ids: Vec<Uuid>,
}

impl ReportQuery {
    /// A query over every employee and project in the date range.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            employee_ids: Vec::new(),
            project_ids: Vec::new(),
        }
    }

    fn selects(&self, entry: &TimeEntry) -> bool {
        (self.employee_ids.is_empty() || self.employee_ids.contains(&entry.user_id))
            && (self.project_ids.is_empty() || self.project_ids.contains(&entry.project_id))
    }
}

/// One closed session in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The session.
    pub entry_id: Uuid,
    /// Work date.
    pub date: NaiveDate,
    /// Employee display name.
    pub employee_name: String,
    /// Employee badge number.
    pub employee_id: String,
    /// Project name.
    pub project: String,
    /// Hours up to the daily threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
    /// Worked hours.
    pub total_hours: Decimal,
}

/// Rows and totals for a report query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetReport {
    /// The query the report answers.
    pub query: ReportQuery,
    /// Sessions ordered by date, then employee name.
    pub rows: Vec<ReportRow>,
    /// Sum over every row.
    pub totals: PeriodSummary,
}

/// Builds a report over the closed sessions matching the query.
///
/// # Errors
///
/// `Validation` when `start` is after `end`.
pub fn generate_report<S: TimeEntryStore + ?Sized>(
    store: &S,
    query: &ReportQuery,
    daily_threshold: Decimal,
) -> EngineResult<TimesheetReport> {
    if query.start > query.end {
        return Err(EngineError::validation(
            "start",
            "must not be after the end date",
        ));
    }

    let filter = EntryFilter::default()
        .between(query.start, query.end)
        .closed_only();
    let entries: Vec<TimeEntry> = store
        .query_entries(&filter)?
        .into_iter()
        .filter(|entry| query.selects(entry))
        .collect();

    let mut employees: HashMap<Uuid, Option<Employee>> = HashMap::new();
    let mut projects: HashMap<Uuid, String> = HashMap::new();
    let mut rows = Vec::with_capacity(entries.len());

    for entry in &entries {
        if !employees.contains_key(&entry.user_id) {
            employees.insert(entry.user_id, store.find_employee(entry.user_id)?);
        }
        if !projects.contains_key(&entry.project_id) {
            let name = store
                .find_project(entry.project_id)?
                .map(|project| project.name)
                .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());
            projects.insert(entry.project_id, name);
        }

        let employee = employees.get(&entry.user_id).and_then(Option::as_ref);
        let breakdown = interval_breakdown(&entry.interval(), daily_threshold);

        rows.push(ReportRow {
            entry_id: entry.id,
            date: entry.date,
            employee_name: employee
                .map(|e| e.name.clone())
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()),
            employee_id: employee.map(|e| e.employee_id.clone()).unwrap_or_default(),
            project: projects
                .get(&entry.project_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PROJECT.to_string()),
            regular_hours: breakdown.regular_hours,
            overtime_hours: breakdown.overtime_hours,
            total_hours: breakdown.total_hours,
        });
    }

    rows.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.employee_name.cmp(&b.employee_name))
    });

    // Entries were selected by their filed date; total exactly those.
    let intervals: Vec<TimeInterval> = entries.iter().map(TimeEntry::interval).collect();
    let totals = aggregate_period_with_threshold(&intervals, |_| true, daily_threshold);

    info!(
        start = %query.start,
        end = %query.end,
        rows = rows.len(),
        total_hours = %totals.total_hours,
        "Generated timesheet report"
    );

    Ok(TimesheetReport {
        query: query.clone(),
        rows,
        totals,
    })
}
