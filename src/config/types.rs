//! Configuration types for the time tracker.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_DAILY_OVERTIME_THRESHOLD;
use crate::models::Role;

/// Overtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeSettings {
    /// Hours per session before overtime starts.
    #[serde(default = "default_threshold")]
    pub daily_threshold_hours: Decimal,
}

fn default_threshold() -> Decimal {
    DEFAULT_DAILY_OVERTIME_THRESHOLD
}

impl Default for OvertimeSettings {
    fn default() -> Self {
        Self {
            daily_threshold_hours: default_threshold(),
        }
    }
}

/// Calendar settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekSettings {
    /// The first day of the reporting week.
    #[serde(default = "default_week_start")]
    pub starts_on: Weekday,
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

impl Default for WeekSettings {
    fn default() -> Self {
        Self {
            starts_on: default_week_start(),
        }
    }
}

/// Recent activity settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySettings {
    /// Number of entries shown when no limit is requested.
    #[serde(default = "default_recent_limit")]
    pub recent_entries_limit: usize,
}

fn default_recent_limit() -> usize {
    5
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            recent_entries_limit: default_recent_limit(),
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Filename prefix for timesheet report exports.
    #[serde(default = "default_report_prefix")]
    pub filename_prefix: String,
    /// Filename prefix for employee list exports.
    #[serde(default = "default_employees_prefix")]
    pub employees_filename_prefix: String,
}

fn default_report_prefix() -> String {
    "timesheet_report".to_string()
}

fn default_employees_prefix() -> String {
    "employees".to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            filename_prefix: default_report_prefix(),
            employees_filename_prefix: default_employees_prefix(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Top-level settings from tracker.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerSettings {
    /// Organisation name shown in reports.
    #[serde(default)]
    pub organization: String,
    /// Overtime settings.
    #[serde(default)]
    pub overtime: OvertimeSettings,
    /// Calendar settings.
    #[serde(default)]
    pub week: WeekSettings,
    /// Recent activity settings.
    #[serde(default)]
    pub activity: ActivitySettings,
    /// CSV export settings.
    #[serde(default)]
    pub reports: ReportSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// A project created at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedProject {
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Projects configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsConfig {
    /// Projects to create at startup.
    #[serde(default)]
    pub projects: Vec<SeedProject>,
}

/// An account created at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAccount {
    /// Badge number.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Access level.
    #[serde(default)]
    pub role: Role,
}

/// Accounts configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountsConfig {
    /// Accounts to create at startup.
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
}

/// The complete tracker configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    settings: TrackerSettings,
    projects: Vec<SeedProject>,
    accounts: Vec<SeedAccount>,
}

impl TrackerConfig {
    /// Creates a new TrackerConfig from its component parts.
    pub fn new(
        settings: TrackerSettings,
        projects: Vec<SeedProject>,
        accounts: Vec<SeedAccount>,
    ) -> Self {
        Self {
            settings,
            projects,
            accounts,
        }
    }

    /// Returns the tracker settings.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Returns the seed projects.
    pub fn projects(&self) -> &[SeedProject] {
        &self.projects
    }

    /// Returns the seed accounts.
    pub fn accounts(&self) -> &[SeedAccount] {
        &self.accounts
    }
}
