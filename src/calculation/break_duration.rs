//! Display formatting for break durations.

/// Formats a minute count as `"{hours}h {minutes}m"`.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::format_break_duration;
///
/// assert_eq!(format_break_duration(90), "1h 30m");
/// assert_eq!(format_break_duration(0), "0h 0m");
/// ```
pub fn format_break_duration(total_minutes: u32) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}
