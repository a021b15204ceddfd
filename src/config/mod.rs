//! Configuration loading and management for the Timesheet Engine.
//!
//! This module loads tracker settings and startup seed data from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Weeks start on {}", config.week_starts_on());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccountsConfig, ActivitySettings, OvertimeSettings, ProjectsConfig, ReportSettings,
    SeedAccount, SeedProject, ServerSettings, TrackerConfig, TrackerSettings, WeekSettings,
};
