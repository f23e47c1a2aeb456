//! Actual/360 day count convention.
//!
//! Used for money market instruments and for fixed coupon accrual.

use super::DayCount;
use crate::types::Date;

/// Calendar days over a 360-day year, so a full year accrues slightly more
/// than `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
