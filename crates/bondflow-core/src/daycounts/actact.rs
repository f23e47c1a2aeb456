//! Actual/Actual ISDA day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The year fraction is calculated by splitting the period into
/// portions that fall in each calendar year, each divided by that
/// year's length. The fraction is additive over contiguous intervals,
/// so a schedule's period fractions sum to the whole-life fraction.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap year}}{365} + \frac{\text{Days in leap year}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    fn forward_fraction(start: Date, end: Date) -> f64 {
        let mut total = 0.0;
        let mut current = start;

        // Process year by year
        while current.year() < end.year() {
            let next_year = match current.start_of_next_year() {
                Ok(date) => date,
                Err(_) => break,
            };
            let days = current.days_between(&next_year);
            total += days as f64 / f64::from(current.days_in_year());
            current = next_year;
        }

        // Remaining portion in the final year
        if current < end {
            let days = current.days_between(&end);
            total += days as f64 / f64::from(current.days_in_year());
        }

        total
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start == end {
            0.0
        } else if start < end {
            Self::forward_fraction(start, end)
        } else {
            -Self::forward_fraction(end, start)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_full_years() {
        let dc = ActActIsda;
        assert_eq!(dc.year_fraction(d(2024, 1, 1), d(2025, 1, 1)), 1.0);
        assert_eq!(dc.year_fraction(d(2025, 1, 1), d(2026, 1, 1)), 1.0);
    }

    #[test]
    fn test_span_across_leap_boundary() {
        let dc = ActActIsda;
        // 2023-08-01 -> 2024-08-01: 153 days of 2023, 213 days of 2024
        let yf = dc.year_fraction(d(2023, 8, 1), d(2024, 8, 1));
        assert_relative_eq!(yf, 153.0 / 365.0 + 213.0 / 366.0, epsilon = 1e-15);
    }

    #[test]
    fn test_additive_over_contiguous_spans() {
        let dc = ActActIsda;
        let a = d(2023, 8, 1);
        let b = d(2024, 8, 1);
        let c = d(2026, 2, 1);
        assert_relative_eq!(
            dc.year_fraction(a, b) + dc.year_fraction(b, c),
            dc.year_fraction(a, c),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_reversed_is_negative() {
        let dc = ActActIsda;
        let yf = dc.year_fraction(d(2025, 7, 1), d(2025, 1, 1));
        assert_relative_eq!(yf, -181.0 / 365.0, epsilon = 1e-15);
    }
}
