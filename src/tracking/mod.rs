//! Clocking in and out, breaks, and the employee dashboard.
//!
//! [`TimeTracker`] mutates stored entries through a [`crate::store::TimeEntryStore`]
//! and reads "now" from an injected [`mockable::Clock`].

mod activity;
mod service;

pub use activity::{ActivityRow, DashboardSummary, NO_CLOCK_OUT, UNKNOWN_PROJECT, format_clock_time};
pub use service::TimeTracker;
