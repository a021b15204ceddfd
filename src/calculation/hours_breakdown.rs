//! Hours breakdown for a single work session.
//!
//! This module converts a clock-in/clock-out pair plus break minutes into
//! worked hours and splits them into regular and overtime portions at the
//! daily threshold.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{HoursBreakdown, TimeInterval};

use super::rounding::round_hours;
use super::timestamp::parse_timestamp;

/// Default daily overtime threshold in hours.
///
/// Regular hours are capped at 8 per session; anything beyond is overtime.
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

const MILLIS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_HOUR: i64 = 60;

/// Computes the regular/overtime breakdown of one session at the default
/// 8 hour threshold.
///
/// If either timestamp is absent the session is not yet measurable and the
/// zero breakdown is returned. Negative worked time (clock-out before
/// clock-in, or breaks longer than the session) is clamped to zero. All
/// three values are rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::compute_hours_breakdown;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let clock_in = Utc.with_ymd_and_hms(2023, 6, 1, 8, 30, 0).unwrap();
/// let clock_out = Utc.with_ymd_and_hms(2023, 6, 1, 18, 45, 0).unwrap();
///
/// let result = compute_hours_breakdown(Some(clock_in), Some(clock_out), 45);
/// assert_eq!(result.regular_hours, Decimal::from(8));
/// assert_eq!(result.overtime_hours, Decimal::from_str("1.5").unwrap());
/// assert_eq!(result.total_hours, Decimal::from_str("9.5").unwrap());
/// ```
pub fn compute_hours_breakdown(
    clock_in: Option<DateTime<Utc>>,
    clock_out: Option<DateTime<Utc>>,
    break_minutes: u32,
) -> HoursBreakdown {
    compute_hours_breakdown_with_threshold(
        clock_in,
        clock_out,
        break_minutes,
        DEFAULT_DAILY_OVERTIME_THRESHOLD,
    )
}

/// Same as [`compute_hours_breakdown`] with a caller-supplied daily threshold.
pub fn compute_hours_breakdown_with_threshold(
    clock_in: Option<DateTime<Utc>>,
    clock_out: Option<DateTime<Utc>>,
    break_minutes: u32,
    threshold: Decimal,
) -> HoursBreakdown {
    let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
        return HoursBreakdown::ZERO;
    };

    let worked_hours = worked_hours(clock_in, clock_out, break_minutes);
    let (regular_hours, overtime_hours) = split_at_threshold(worked_hours, threshold);

    trace!(
        clock_in = %clock_in,
        clock_out = %clock_out,
        break_minutes,
        worked_hours = %worked_hours,
        "Computed hours breakdown"
    );

    HoursBreakdown {
        regular_hours: round_hours(regular_hours),
        overtime_hours: round_hours(overtime_hours),
        total_hours: round_hours(worked_hours),
    }
}

/// Computes a breakdown from stored ISO-8601 strings.
///
/// Empty or unparseable strings count as absent.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::compute_hours_breakdown_from_str;
/// use timesheet_engine::models::HoursBreakdown;
///
/// let open = compute_hours_breakdown_from_str("2023-06-01T09:00:00Z", None, 0);
/// assert_eq!(open, HoursBreakdown::ZERO);
/// ```
pub fn compute_hours_breakdown_from_str(
    clock_in: &str,
    clock_out: Option<&str>,
    break_minutes: u32,
) -> HoursBreakdown {
    compute_hours_breakdown(
        parse_timestamp(clock_in),
        clock_out.and_then(parse_timestamp),
        break_minutes,
    )
}

/// Computes the breakdown of an interval at the given threshold.
///
/// Open intervals yield the zero breakdown.
pub fn interval_breakdown(interval: &TimeInterval, threshold: Decimal) -> HoursBreakdown {
    compute_hours_breakdown_with_threshold(
        Some(interval.clock_in),
        interval.clock_out,
        interval.break_minutes,
        threshold,
    )
}

/// Unrounded hours worked, net of breaks, never negative.
fn worked_hours(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>, break_minutes: u32) -> Decimal {
    let elapsed_millis = (clock_out - clock_in).num_milliseconds();
    let elapsed_minutes =
        Decimal::from(elapsed_millis) / Decimal::from(MILLIS_PER_MINUTE) - Decimal::from(break_minutes);
    let hours = elapsed_minutes / Decimal::from(MINUTES_PER_HOUR);

    hours.max(Decimal::ZERO)
}

/// Splits worked hours into (regular, overtime) at the threshold.
fn split_at_threshold(worked_hours: Decimal, threshold: Decimal) -> (Decimal, Decimal) {
    let regular_hours = worked_hours.min(threshold);
    let overtime_hours = (worked_hours - threshold).max(Decimal::ZERO);
    (regular_hours, overtime_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 1, hour, minute, 0).unwrap()
    }

    fn breakdown(regular: &str, overtime: &str, total: &str) -> HoursBreakdown {
        HoursBreakdown {
            regular_hours: dec(regular),
            overtime_hours: dec(overtime),
            total_hours: dec(total),
        }
    }

    #[test]
    fn test_standard_day_with_lunch() {
        let result = compute_hours_breakdown(Some(at(9, 0)), Some(at(17, 30)), 30);
        assert_eq!(result, breakdown("7.5", "0", "7.5"));
    }

    #[test]
    fn test_long_day_splits_overtime() {
        let result = compute_hours_breakdown(Some(at(8, 30)), Some(at(18, 45)), 45);
        assert_eq!(result, breakdown("8", "1.5", "9.5"));
    }

    #[test]
    fn test_absent_clock_out_is_zero() {
        let result = compute_hours_breakdown(Some(at(9, 0)), None, 0);
        assert_eq!(result, HoursBreakdown::ZERO);
    }

    #[test]
    fn test_absent_clock_in_is_zero() {
        let result = compute_hours_breakdown(None, Some(at(17, 0)), 0);
        assert_eq!(result, HoursBreakdown::ZERO);
    }

    #[test]
    fn test_equal_timestamps_are_zero() {
        let result = compute_hours_breakdown(Some(at(9, 0)), Some(at(9, 0)), 0);
        assert_eq!(result, HoursBreakdown::ZERO);
    }

    #[test]
    fn test_clock_out_before_clock_in_clamps_to_zero() {
        let result = compute_hours_breakdown(Some(at(17, 0)), Some(at(9, 0)), 0);
        assert_eq!(result, HoursBreakdown::ZERO);
    }

    #[test]
    fn test_break_longer_than_session_clamps_to_zero() {
        let result = compute_hours_breakdown(Some(at(9, 0)), Some(at(10, 0)), 90);
        assert_eq!(result, HoursBreakdown::ZERO);
    }

    #[test]
    fn test_exactly_at_threshold_has_no_overtime() {
        let result = compute_hours_breakdown(Some(at(9, 0)), Some(at(17, 0)), 0);
        assert_eq!(result, breakdown("8", "0", "8"));
    }

    #[test]
    fn test_values_rounded_to_two_places() {
        // 9:00 -> 17:07 less 0 = 487 minutes = 8.11666.. hours
        let result = compute_hours_breakdown(Some(at(9, 0)), Some(at(17, 7)), 0);
        assert_eq!(result, breakdown("8", "0.12", "8.12"));
        assert_eq!(result.regular_hours + result.overtime_hours, result.total_hours);
    }

    #[test]
    fn test_sub_minute_precision_kept_until_rounding() {
        let clock_in = Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).unwrap();
        let clock_out = Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 36).unwrap();
        // 36 seconds = 0.01 hours
        let result = compute_hours_breakdown(Some(clock_in), Some(clock_out), 0);
        assert_eq!(result.total_hours, dec("0.01"));
    }

    #[test]
    fn test_overnight_session() {
        let clock_in = Utc.with_ymd_and_hms(2023, 6, 1, 22, 0, 0).unwrap();
        let clock_out = Utc.with_ymd_and_hms(2023, 6, 2, 8, 0, 0).unwrap();
        let result = compute_hours_breakdown(Some(clock_in), Some(clock_out), 30);
        assert_eq!(result, breakdown("8", "1.5", "9.5"));
    }

    #[test]
    fn test_custom_threshold() {
        let result = compute_hours_breakdown_with_threshold(
            Some(at(6, 0)),
            Some(at(18, 0)),
            0,
            dec("10"),
        );
        assert_eq!(result, breakdown("10", "2", "12"));
    }

    #[test]
    fn test_from_str_scenarios() {
        let result = compute_hours_breakdown_from_str(
            "2023-06-01T09:00:00Z",
            Some("2023-06-01T17:30:00Z"),
            30,
        );
        assert_eq!(result, breakdown("7.5", "0", "7.5"));

        let result = compute_hours_breakdown_from_str(
            "2023-06-01T08:30:00Z",
            Some("2023-06-01T18:45:00Z"),
            45,
        );
        assert_eq!(result, breakdown("8", "1.5", "9.5"));
    }

    #[test]
    fn test_from_str_empty_or_invalid_is_zero() {
        assert_eq!(
            compute_hours_breakdown_from_str("", Some("2023-06-01T17:30:00Z"), 0),
            HoursBreakdown::ZERO
        );
        assert_eq!(
            compute_hours_breakdown_from_str("2023-06-01T09:00:00Z", Some(""), 0),
            HoursBreakdown::ZERO
        );
        assert_eq!(
            compute_hours_breakdown_from_str("garbage", Some("2023-06-01T17:30:00Z"), 0),
            HoursBreakdown::ZERO
        );
    }

    #[test]
    fn test_interval_breakdown_uses_interval_fields() {
        let interval = TimeInterval::closed(at(9, 0), at(17, 30), 30);
        let result = interval_breakdown(&interval, DEFAULT_DAILY_OVERTIME_THRESHOLD);
        assert_eq!(result, breakdown("7.5", "0", "7.5"));

        let open = TimeInterval::open(at(9, 0));
        assert_eq!(
            interval_breakdown(&open, DEFAULT_DAILY_OVERTIME_THRESHOLD),
            HoursBreakdown::ZERO
        );
    }

    #[test]
    fn test_default_threshold_constant() {
        assert_eq!(DEFAULT_DAILY_OVERTIME_THRESHOLD, dec("8"));
    }

    #[test]
    fn test_split_at_threshold() {
        assert_eq!(split_at_threshold(dec("6"), dec("8")), (dec("6"), dec("0")));
        assert_eq!(split_at_threshold(dec("11.25"), dec("8")), (dec("8"), dec("3.25")));
        assert_eq!(split_at_threshold(dec("8.5"), dec("7.5")), (dec("7.5"), dec("1")));
    }
}
