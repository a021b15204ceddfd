//! Calculation logic for the Timesheet Engine.
//!
//! This module contains the pure time accounting functions: turning a
//! clock-in/clock-out pair and break minutes into regular and overtime hours,
//! summing those breakdowns over days and weeks, parsing stored timestamps,
//! and formatting break durations for display. Nothing here performs I/O or
//! can fail.

mod break_duration;
mod hours_breakdown;
mod period_summary;
mod rounding;
mod timestamp;

pub use break_duration::format_break_duration;
pub use hours_breakdown::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, compute_hours_breakdown, compute_hours_breakdown_from_str,
    compute_hours_breakdown_with_threshold, interval_breakdown,
};
pub use period_summary::{
    PeriodBoundary, aggregate_period, aggregate_period_with_threshold, week_start,
};
pub use rounding::{HOURS_DECIMAL_PLACES, round_hours};
pub use timestamp::parse_timestamp;
