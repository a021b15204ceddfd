//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod hours;
mod project;
mod time_entry;

pub use employee::{Employee, Role};
pub use hours::{HoursBreakdown, PeriodSummary};
pub use project::Project;
pub use time_entry::{BreakRecord, EntryStatus, TimeEntry, TimeInterval};
