//! Derived hour values produced by the calculator.
//!
//! Neither type is stored; both are recomputed from time intervals whenever
//! they are needed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Regular and overtime split of one interval's worked hours.
///
/// Invariants: `total_hours == regular_hours + overtime_hours`,
/// `regular_hours` never exceeds the daily threshold, nothing is negative.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::HoursBreakdown;
/// use rust_decimal::Decimal;
///
/// let zero = HoursBreakdown::ZERO;
/// assert_eq!(zero.total_hours, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Hours up to the daily threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
    /// All worked hours, net of breaks.
    pub total_hours: Decimal,
}

impl HoursBreakdown {
    /// The breakdown of an interval that cannot be measured.
    pub const ZERO: HoursBreakdown = HoursBreakdown {
        regular_hours: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
        total_hours: Decimal::ZERO,
    };

    /// Returns true if no hours were worked.
    pub fn is_zero(&self) -> bool {
        self.total_hours.is_zero()
    }
}

/// Hours summed over every closed interval inside a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Sum of per-interval regular hours.
    pub regular_hours: Decimal,
    /// Sum of per-interval overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of per-interval total hours.
    pub total_hours: Decimal,
    /// Number of intervals that contributed.
    pub interval_count: usize,
}

impl PeriodSummary {
    /// Adds one interval's breakdown to the running totals.
    pub fn add(&mut self, breakdown: &HoursBreakdown) {
        self.regular_hours += breakdown.regular_hours;
        self.overtime_hours += breakdown.overtime_hours;
        self.total_hours += breakdown.total_hours;
        self.interval_count += 1;
    }

    /// The summed hours as a breakdown.
    pub fn as_breakdown(&self) -> HoursBreakdown {
        HoursBreakdown {
            regular_hours: self.regular_hours,
            overtime_hours: self.overtime_hours,
            total_hours: self.total_hours,
        }
    }
}
