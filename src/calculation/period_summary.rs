//! Aggregation of session breakdowns over days and weeks.
//!
//! The overtime split is decided per session; summaries only add the
//! per-session results together and never re-apply a threshold to the
//! aggregate.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PeriodSummary, TimeInterval};

use super::hours_breakdown::{DEFAULT_DAILY_OVERTIME_THRESHOLD, interval_breakdown};
use super::rounding::round_hours;

/// A date window that intervals are filed into by their work date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeriodBoundary {
    /// A single calendar day.
    Day {
        /// The day.
        date: NaiveDate,
    },
    /// Seven days starting on `start`.
    Week {
        /// First day of the week.
        start: NaiveDate,
    },
    /// An inclusive date range.
    Range {
        /// First day (inclusive).
        start: NaiveDate,
        /// Last day (inclusive).
        end: NaiveDate,
    },
}

impl PeriodBoundary {
    /// Returns true if the date falls inside the boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::calculation::PeriodBoundary;
    /// use chrono::NaiveDate;
    ///
    /// let week = PeriodBoundary::Week {
    ///     start: NaiveDate::from_ymd_opt(2023, 5, 28).unwrap(),
    /// };
    /// assert!(week.contains_date(NaiveDate::from_ymd_opt(2023, 6, 3).unwrap()));
    /// assert!(!week.contains_date(NaiveDate::from_ymd_opt(2023, 6, 4).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        match *self {
            PeriodBoundary::Day { date: day } => date == day,
            PeriodBoundary::Week { start } => date >= start && date <= start + Duration::days(6),
            PeriodBoundary::Range { start, end } => date >= start && date <= end,
        }
    }

    /// Returns true if the interval's work date falls inside the boundary.
    pub fn contains(&self, interval: &TimeInterval) -> bool {
        self.contains_date(interval.work_date())
    }
}

/// Returns the first day of the week containing `date`.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::week_start;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2023-06-01 is a Thursday
/// let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
/// assert_eq!(week_start(date, Weekday::Sun), NaiveDate::from_ymd_opt(2023, 5, 28).unwrap());
/// assert_eq!(week_start(date, Weekday::Mon), NaiveDate::from_ymd_opt(2023, 5, 29).unwrap());
/// ```
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let days_back = (date.weekday().num_days_from_monday() + 7
        - first_day.num_days_from_monday())
        % 7;
    date - Duration::days(i64::from(days_back))
}

/// Sums the breakdowns of every closed interval accepted by `predicate`,
/// at the default 8 hour daily threshold.
///
/// Open intervals are skipped. An empty input yields the zero summary.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::{aggregate_period, PeriodBoundary};
/// use timesheet_engine::models::TimeInterval;
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let intervals = vec![
///     TimeInterval::closed(
///         Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap(),
///         Utc.with_ymd_and_hms(2023, 6, 1, 18, 0, 0).unwrap(),
///         0,
///     ),
///     TimeInterval::open(Utc.with_ymd_and_hms(2023, 6, 2, 9, 0, 0).unwrap()),
/// ];
///
/// let day = PeriodBoundary::Day { date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap() };
/// let summary = aggregate_period(&intervals, |interval| day.contains(interval));
/// assert_eq!(summary.total_hours, Decimal::from(10));
/// assert_eq!(summary.overtime_hours, Decimal::from(2));
/// assert_eq!(summary.interval_count, 1);
/// ```
pub fn aggregate_period<'a, I, P>(intervals: I, predicate: P) -> PeriodSummary
where
    I: IntoIterator<Item = &'a TimeInterval>,
    P: Fn(&TimeInterval) -> bool,
{
    aggregate_period_with_threshold(intervals, predicate, DEFAULT_DAILY_OVERTIME_THRESHOLD)
}

/// Same as [`aggregate_period`] with a caller-supplied daily threshold.
pub fn aggregate_period_with_threshold<'a, I, P>(
    intervals: I,
    predicate: P,
    threshold: Decimal,
) -> PeriodSummary
where
    I: IntoIterator<Item = &'a TimeInterval>,
    P: Fn(&TimeInterval) -> bool,
{
    let mut summary = intervals
        .into_iter()
        .filter(|interval| interval.is_closed() && predicate(interval))
        .fold(PeriodSummary::default(), |mut summary, interval| {
            summary.add(&interval_breakdown(interval, threshold));
            summary
        });

    summary.regular_hours = round_hours(summary.regular_hours);
    summary.overtime_hours = round_hours(summary.overtime_hours);
    summary.total_hours = round_hours(summary.total_hours);
    summary
}
