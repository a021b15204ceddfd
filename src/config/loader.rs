//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tracker
//! configuration from YAML files.

use chrono::Weekday;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{
    AccountsConfig, ProjectsConfig, ReportSettings, SeedAccount, SeedProject, TrackerConfig,
    TrackerSettings,
};

/// Loads and provides access to tracker configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── tracker.yaml   # Overtime, calendar, report and server settings (required)
/// ├── projects.yaml  # Projects created at startup (optional)
/// └── accounts.yaml  # Accounts created at startup (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Overtime after {} hours", loader.daily_overtime_threshold());
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: TrackerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `tracker.yaml` is missing
    /// - Any present file contains invalid YAML
    /// - The overtime threshold is not positive, or the recent entry limit is zero
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("tracker.yaml");
        let settings = Self::load_yaml::<TrackerSettings>(&settings_path)?;
        Self::validate(&settings, &settings_path)?;

        let projects = Self::load_optional_yaml::<ProjectsConfig>(&path.join("projects.yaml"))?;
        let accounts = Self::load_optional_yaml::<AccountsConfig>(&path.join("accounts.yaml"))?;

        info!(
            path = %path.display(),
            projects = projects.projects.len(),
            accounts = accounts.accounts.len(),
            "Loaded tracker configuration"
        );

        Ok(Self {
            config: TrackerConfig::new(settings, projects.projects, accounts.accounts),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads a YAML file, falling back to the default when it does not exist.
    fn load_optional_yaml<T: serde::de::DeserializeOwned + Default>(
        path: &Path,
    ) -> EngineResult<T> {
        if !path.exists() {
            debug!(path = %path.display(), "Optional configuration file absent");
            return Ok(T::default());
        }
        Self::load_yaml(path)
    }

    fn validate(settings: &TrackerSettings, path: &Path) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if settings.overtime.daily_threshold_hours <= Decimal::ZERO {
            return Err(invalid("overtime.daily_threshold_hours must be positive"));
        }
        if settings.activity.recent_entries_limit == 0 {
            return Err(invalid("activity.recent_entries_limit must be at least 1"));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the tracker settings.
    pub fn settings(&self) -> &TrackerSettings {
        self.config.settings()
    }

    /// Hours per session before overtime starts.
    pub fn daily_overtime_threshold(&self) -> Decimal {
        self.settings().overtime.daily_threshold_hours
    }

    /// The first day of the reporting week.
    pub fn week_starts_on(&self) -> Weekday {
        self.settings().week.starts_on
    }

    /// Number of recent entries returned when none is requested.
    pub fn recent_entries_limit(&self) -> usize {
        self.settings().activity.recent_entries_limit
    }

    /// CSV export settings.
    pub fn report_settings(&self) -> &ReportSettings {
        &self.settings().reports
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_address(&self) -> &str {
        &self.settings().server.bind_address
    }

    /// Projects to create at startup.
    pub fn seed_projects(&self) -> &[SeedProject] {
        self.config.projects()
    }

    /// Accounts to create at startup.
    pub fn seed_accounts(&self) -> &[SeedAccount] {
        self.config.accounts()
    }
}
