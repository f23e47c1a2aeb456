//! Accrual schedule generation.
//!
//! Schedules are rolled backward from maturity: the `k`-th period end is
//! `maturity - k × months_per_period`, each computed from the maturity anchor
//! so month-end clamping never accumulates. Any front stub is absorbed into
//! the first period, which always starts exactly at issue.
//!
//! # Example
//!
//! ```rust
//! use bondflow_bonds::schedule::{Schedule, ScheduleConfig};
//! use bondflow_core::{Date, Frequency};
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2023, 8, 1).unwrap(),
//!     Date::from_ymd(2026, 8, 1).unwrap(),
//!     Frequency::Annual,
//! );
//!
//! let schedule = Schedule::generate(&config).unwrap();
//! assert_eq!(schedule.len(), 3);
//! for period in schedule.iter() {
//!     println!("{} to {}", period.start_date, period.end_date);
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use bondflow_core::{Date, DayCountConvention, Frequency};

use crate::error::{BondError, BondResult};

/// One accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Accrual start (inclusive).
    pub start_date: Date,
    /// Accrual end, also the payment date.
    pub end_date: Date,
    /// Calendar days in the period.
    pub days_between: i64,
    /// Year fraction under the schedule's day count.
    pub day_count_fraction: f64,
}

impl Period {
    fn new(start_date: Date, end_date: Date, day_count: DayCountConvention) -> Self {
        Self {
            start_date,
            end_date,
            days_between: start_date.days_between(&end_date),
            day_count_fraction: day_count.year_fraction(start_date, end_date),
        }
    }

    /// Returns true if `date` falls in `[start_date, end_date)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date < self.end_date
    }
}

/// Configuration for schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Issue date; the first period starts here.
    pub issue_date: Date,
    /// Maturity date; the last period ends here.
    pub maturity_date: Date,
    /// Payment frequency.
    pub frequency: Frequency,
    /// Day count used for each period's year fraction.
    pub day_count: DayCountConvention,
    /// Keep period ends on month end when maturity is a month end.
    pub end_of_month: bool,
}

impl ScheduleConfig {
    /// Creates a configuration with ACT/ACT ISDA and the end-of-month rule.
    #[must_use]
    pub fn new(issue_date: Date, maturity_date: Date, frequency: Frequency) -> Self {
        Self {
            issue_date,
            maturity_date,
            frequency,
            day_count: DayCountConvention::default(),
            end_of_month: true,
        }
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn with_end_of_month(mut self, end_of_month: bool) -> Self {
        self.end_of_month = end_of_month;
        self
    }
}

/// A generated accrual schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    issue_date: Date,
    maturity_date: Date,
    frequency: Frequency,
    day_count: DayCountConvention,
    periods: Vec<Period>,
}

impl Schedule {
    /// Generates a schedule from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if maturity is not after issue.
    pub fn generate(config: &ScheduleConfig) -> BondResult<Self> {
        let issue = config.issue_date;
        let maturity = config.maturity_date;
        if maturity <= issue {
            return Err(BondError::invalid_date_range(issue, maturity));
        }

        let months_per_period = config.frequency.months_per_period() as i32;
        let total_months = issue.months_between(&maturity)?;
        let count = ((total_months / f64::from(months_per_period)).round() as i32).max(1);

        let eom = config.end_of_month && maturity.is_end_of_month();
        let mut ends = Vec::with_capacity(count as usize);
        for k in 0..count {
            let mut end = maturity.add_months(-k * months_per_period)?;
            if eom {
                end = end.end_of_month();
            }
            if end > issue {
                ends.push(end);
            } else {
                debug!(
                    issue = %issue,
                    end = %end,
                    "grid date on or before issue dropped"
                );
            }
        }
        ends.reverse();
        ends.dedup();

        let mut periods = Vec::with_capacity(ends.len());
        let mut start = issue;
        for end in ends {
            periods.push(Period::new(start, end, config.day_count));
            start = end;
        }

        if let Some(first) = periods.first() {
            let regular_start = first.end_date.add_months(-months_per_period)?;
            if regular_start != issue {
                debug!(
                    issue = %issue,
                    first_end = %first.end_date,
                    "front stub absorbed into first period"
                );
            }
        }

        debug!(
            issue = %issue,
            maturity = %maturity,
            frequency = %config.frequency,
            periods = periods.len(),
            "generated schedule"
        );

        Ok(Self {
            issue_date: issue,
            maturity_date: maturity,
            frequency: config.frequency,
            day_count: config.day_count,
            periods,
        })
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the day count convention of the period fractions.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the periods in date order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Iterates over the periods in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Returns the period accruing on `date`: the one with the latest start
    /// on or before `date`.
    #[must_use]
    pub fn accruing_period(&self, date: Date) -> Option<&Period> {
        self.periods.iter().rev().find(|p| p.start_date <= date)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

/// Generates a schedule from issue to maturity.
///
/// Shorthand for [`Schedule::generate`] with the end-of-month rule on.
///
/// # Errors
///
/// Returns `InvalidDateRange` if maturity is not after issue.
pub fn generate_schedule(
    issue_date: Date,
    maturity_date: Date,
    frequency: Frequency,
    day_count: DayCountConvention,
) -> BondResult<Schedule> {
    Schedule::generate(
        &ScheduleConfig::new(issue_date, maturity_date, frequency).with_day_count(day_count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_annual_three_years() {
        let schedule = generate_schedule(
            d(2023, 8, 1),
            d(2026, 8, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap();

        assert_eq!(schedule.len(), 3);
        let days: Vec<i64> = schedule.iter().map(|p| p.days_between).collect();
        assert_eq!(days, vec![366, 365, 365]);
        assert_eq!(schedule.periods()[0].start_date, d(2023, 8, 1));
        assert_eq!(schedule.periods()[1].start_date, d(2024, 8, 1));
        assert_eq!(schedule.periods()[2].end_date, d(2026, 8, 1));
        assert_relative_eq!(
            schedule.periods()[0].day_count_fraction,
            153.0 / 365.0 + 213.0 / 366.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_semi_annual_periods_are_contiguous() {
        let schedule = generate_schedule(
            d(2025, 1, 15),
            d(2030, 1, 15),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360US,
        )
        .unwrap();

        assert_eq!(schedule.len(), 10);
        for pair in schedule.periods().windows(2) {
            assert_eq!(pair[0].end_date, pair[1].start_date);
        }
        for period in &schedule {
            assert_relative_eq!(period.day_count_fraction, 0.5, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_front_stub_absorbed() {
        // 2 years and ~1.5 months: rounds to 2 annual periods.
        let schedule = generate_schedule(
            d(2024, 6, 15),
            d(2026, 8, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.periods()[0].start_date, d(2024, 6, 15));
        assert_eq!(schedule.periods()[0].end_date, d(2025, 8, 1));
        assert_eq!(schedule.periods()[1].end_date, d(2026, 8, 1));
    }

    #[test]
    fn test_short_first_period() {
        // ~11.45 months of quarterly coupons rounds to 4 periods, the first
        // one short.
        let issue = d(2024, 2, 1);
        let maturity = d(2025, 1, 15);
        let schedule =
            generate_schedule(issue, maturity, Frequency::Quarterly, DayCountConvention::Act360)
                .unwrap();

        let expected = (issue.months_between(&maturity).unwrap() / 3.0).round() as usize;
        assert_eq!(schedule.len(), expected);
        assert_eq!(schedule.len(), 4);

        let first = schedule.periods()[0];
        assert_eq!(first.start_date, issue);
        assert_eq!(first.end_date, d(2024, 4, 15));
        assert_eq!(first.days_between, 74);
        assert!(schedule.iter().all(|p| p.end_date > issue));
    }

    #[test]
    fn test_short_life_single_period() {
        let schedule = generate_schedule(
            d(2025, 1, 1),
            d(2025, 2, 1),
            Frequency::Annual,
            DayCountConvention::Act360,
        )
        .unwrap();

        assert_eq!(schedule.len(), 1);
        let only = schedule.periods()[0];
        assert_eq!(only.start_date, d(2025, 1, 1));
        assert_eq!(only.end_date, d(2025, 2, 1));
        assert_eq!(only.days_between, 31);
    }

    #[test]
    fn test_end_of_month_preserved() {
        let schedule = generate_schedule(
            d(2024, 2, 29),
            d(2025, 2, 28),
            Frequency::Quarterly,
            DayCountConvention::ActActIsda,
        )
        .unwrap();

        let ends: Vec<Date> = schedule.iter().map(|p| p.end_date).collect();
        assert_eq!(
            ends,
            vec![d(2024, 5, 31), d(2024, 8, 31), d(2024, 11, 30), d(2025, 2, 28)]
        );
    }

    #[test]
    fn test_end_of_month_disabled() {
        let config = ScheduleConfig::new(d(2024, 2, 29), d(2025, 2, 28), Frequency::Quarterly)
            .with_end_of_month(false);
        let schedule = Schedule::generate(&config).unwrap();
        assert_eq!(schedule.periods()[0].end_date, d(2024, 5, 28));
    }

    #[test]
    fn test_maturity_not_after_issue() {
        let err = generate_schedule(
            d(2025, 1, 1),
            d(2025, 1, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap_err();
        assert_eq!(err.code(), "InvalidDateRange");

        let err = generate_schedule(
            d(2026, 1, 1),
            d(2025, 1, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap_err();
        assert_eq!(err.code(), "InvalidDateRange");
    }

    #[test]
    fn test_accruing_period() {
        let schedule = generate_schedule(
            d(2023, 8, 1),
            d(2026, 8, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap();

        let period = schedule.accruing_period(d(2024, 8, 1)).unwrap();
        assert_eq!(period.start_date, d(2024, 8, 1));
        let period = schedule.accruing_period(d(2025, 3, 1)).unwrap();
        assert_eq!(period.start_date, d(2024, 8, 1));
        assert!(period.contains(d(2025, 3, 1)));
        assert!(schedule.accruing_period(d(2023, 7, 31)).is_none());
    }

    proptest! {
        #[test]
        fn prop_schedule_spans_issue_to_maturity(
            start in 0i64..20_000,
            life in 1i64..12_000,
            freq in prop::sample::select(Frequency::all().to_vec()),
        ) {
            let issue = d(1990, 1, 1).add_days(start);
            let maturity = issue.add_days(life);
            let schedule = generate_schedule(
                issue,
                maturity,
                freq,
                DayCountConvention::ActActIsda,
            ).unwrap();

            prop_assert!(!schedule.is_empty());
            prop_assert_eq!(schedule.periods()[0].start_date, issue);
            prop_assert_eq!(schedule.periods()[schedule.len() - 1].end_date, maturity);
            for period in &schedule {
                prop_assert!(period.end_date > period.start_date);
                prop_assert!(period.day_count_fraction > 0.0);
            }
            for pair in schedule.periods().windows(2) {
                prop_assert_eq!(pair[0].end_date, pair[1].start_date);
            }
        }
    }
}
