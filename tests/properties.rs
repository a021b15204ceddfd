//! Property tests for the hours calculator.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use timesheet_engine::calculation::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, PeriodBoundary, aggregate_period, compute_hours_breakdown,
    format_break_duration, interval_breakdown,
};
use timesheet_engine::models::{HoursBreakdown, TimeInterval};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
}

prop_compose! {
    fn session()(
        start_minute in 0i64..(60 * 24 * 30),
        length_seconds in -3_600i64..(60 * 60 * 20),
        break_minutes in 0u32..300,
    ) -> TimeInterval {
        let clock_in = base() + Duration::minutes(start_minute);
        TimeInterval::closed(clock_in, clock_in + Duration::seconds(length_seconds), break_minutes)
    }
}

proptest! {
    #[test]
    fn total_is_regular_plus_overtime(interval in session()) {
        let result = compute_hours_breakdown(
            Some(interval.clock_in),
            interval.clock_out,
            interval.break_minutes,
        );
        prop_assert_eq!(result.total_hours, result.regular_hours + result.overtime_hours);
    }

    #[test]
    fn regular_never_exceeds_threshold(interval in session()) {
        let result = interval_breakdown(&interval, DEFAULT_DAILY_OVERTIME_THRESHOLD);
        prop_assert!(result.regular_hours <= DEFAULT_DAILY_OVERTIME_THRESHOLD);
        prop_assert!(result.overtime_hours.is_zero() || result.regular_hours == DEFAULT_DAILY_OVERTIME_THRESHOLD);
    }

    #[test]
    fn hours_are_never_negative(interval in session()) {
        let result = interval_breakdown(&interval, DEFAULT_DAILY_OVERTIME_THRESHOLD);
        prop_assert!(result.regular_hours >= Decimal::ZERO);
        prop_assert!(result.overtime_hours >= Decimal::ZERO);
        prop_assert!(result.total_hours >= Decimal::ZERO);
    }

    #[test]
    fn hours_have_at_most_two_decimal_places(interval in session()) {
        let result = interval_breakdown(&interval, DEFAULT_DAILY_OVERTIME_THRESHOLD);
        prop_assert!(result.total_hours.normalize().scale() <= 2);
        prop_assert!(result.overtime_hours.normalize().scale() <= 2);
    }

    #[test]
    fn missing_timestamp_yields_zero(interval in session(), drop_clock_in in any::<bool>()) {
        let result = if drop_clock_in {
            compute_hours_breakdown(None, interval.clock_out, interval.break_minutes)
        } else {
            compute_hours_breakdown(Some(interval.clock_in), None, interval.break_minutes)
        };
        prop_assert_eq!(result, HoursBreakdown::ZERO);
    }

    #[test]
    fn longer_breaks_never_add_hours(interval in session(), extra in 0u32..120) {
        let shorter = interval_breakdown(&interval, DEFAULT_DAILY_OVERTIME_THRESHOLD);
        let longer = interval_breakdown(
            &TimeInterval { break_minutes: interval.break_minutes + extra, ..interval },
            DEFAULT_DAILY_OVERTIME_THRESHOLD,
        );
        prop_assert!(longer.total_hours <= shorter.total_hours);
    }

    #[test]
    fn aggregate_sums_per_session_breakdowns(
        intervals in prop::collection::vec(session(), 0..40),
        start_day in 1u32..20,
        span in 0i64..14,
    ) {
        let start = NaiveDate::from_ymd_opt(2023, 6, start_day).unwrap();
        let boundary = PeriodBoundary::Range { start, end: start + Duration::days(span) };

        let summary = aggregate_period(&intervals, |i| boundary.contains(i));

        let inside: Vec<HoursBreakdown> = intervals
            .iter()
            .filter(|i| boundary.contains(i))
            .map(|i| interval_breakdown(i, DEFAULT_DAILY_OVERTIME_THRESHOLD))
            .collect();
        let total: Decimal = inside.iter().map(|b| b.total_hours).sum();
        let overtime: Decimal = inside.iter().map(|b| b.overtime_hours).sum();

        prop_assert_eq!(summary.interval_count, inside.len());
        prop_assert_eq!(summary.total_hours, total);
        prop_assert_eq!(summary.overtime_hours, overtime);
        prop_assert_eq!(summary.total_hours, summary.regular_hours + summary.overtime_hours);
    }

    #[test]
    fn open_sessions_never_count(intervals in prop::collection::vec(session(), 0..20)) {
        let open: Vec<TimeInterval> = intervals
            .iter()
            .map(|i| TimeInterval::open(i.clock_in))
            .collect();
        let boundary = PeriodBoundary::Range {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        };

        let summary = aggregate_period(&open, |i| boundary.contains(i));
        prop_assert_eq!(summary.interval_count, 0);
        prop_assert!(summary.total_hours.is_zero());
    }

    #[test]
    fn break_format_round_trips(hours in 0u32..100, minutes in 0u32..60) {
        let formatted = format_break_duration(hours * 60 + minutes);
        prop_assert_eq!(formatted, format!("{}h {}m", hours, minutes));
    }
}
