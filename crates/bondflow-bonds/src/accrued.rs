//! Accrued interest.
//!
//! Interest accrued from the start of the period in progress up to the
//! valuation date. Fixed instruments accrue linearly on ACT/360. Floating
//! instruments compound the overnight forwards day by day over the stub and
//! express the result as a simple rate over the stub fraction:
//!
//! ```text
//! growth  = Π (1 + fwd(d, d+1))^dcf(d, d+1)      for d in [start, valuation)
//! simple  = (growth - 1) / stub
//! accrued = face × simple × stub = face × (growth - 1)
//! ```

use tracing::trace;

use bondflow_core::{Compounding, Date, DayCountConvention};
use bondflow_curves::RateCurve;

use crate::cashflows::FIXED_ACCRUAL_DAY_COUNT;
use crate::error::{BondError, BondResult};
use crate::schedule::Schedule;

/// What an instrument accrues, and how.
#[derive(Clone, Copy)]
pub enum AccrualBasis<'a> {
    /// Fixed coupon accrual.
    Fixed {
        /// Face value.
        face_value: f64,
        /// Annual coupon rate.
        coupon_rate: f64,
        /// Accrual day count (ACT/360 by default).
        day_count: DayCountConvention,
    },
    /// Floating accrual compounded daily from a forward curve.
    Floating {
        /// Face value.
        face_value: f64,
        /// Curve supplying the daily forwards.
        forward_curve: &'a dyn RateCurve,
    },
}

impl<'a> AccrualBasis<'a> {
    /// Fixed accrual on ACT/360.
    #[must_use]
    pub fn fixed(face_value: f64, coupon_rate: f64) -> Self {
        Self::Fixed {
            face_value,
            coupon_rate,
            day_count: FIXED_ACCRUAL_DAY_COUNT,
        }
    }

    /// Floating accrual from an annually compounded forward curve.
    #[must_use]
    pub fn floating(face_value: f64, forward_curve: &'a dyn RateCurve) -> Self {
        Self::Floating {
            face_value,
            forward_curve,
        }
    }

    /// Returns the face value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        match self {
            Self::Fixed { face_value, .. } | Self::Floating { face_value, .. } => *face_value,
        }
    }
}

impl std::fmt::Debug for AccrualBasis<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed {
                face_value,
                coupon_rate,
                day_count,
            } => f
                .debug_struct("Fixed")
                .field("face_value", face_value)
                .field("coupon_rate", coupon_rate)
                .field("day_count", day_count)
                .finish(),
            Self::Floating {
                face_value,
                forward_curve,
            } => f
                .debug_struct("Floating")
                .field("face_value", face_value)
                .field("curve_reference_date", &forward_curve.reference_date())
                .finish(),
        }
    }
}

/// Accrued interest at `valuation_date`.
///
/// Zero at issue and on a period start. Before issue there is nothing to
/// accrue and the call fails with `InvalidDateRange`.
///
/// # Errors
///
/// `InvalidDateRange` if `valuation_date` precedes the first period, or any
/// curve failure of the floating daily loop.
pub fn accrued_interest(
    schedule: &Schedule,
    valuation_date: Date,
    basis: &AccrualBasis<'_>,
) -> BondResult<f64> {
    let period = schedule
        .accruing_period(valuation_date)
        .ok_or_else(|| BondError::invalid_date_range(schedule.issue_date(), valuation_date))?;

    match *basis {
        AccrualBasis::Fixed {
            face_value,
            coupon_rate,
            day_count,
        } => Ok(fixed_accrued_interest(
            period.start_date,
            valuation_date,
            face_value,
            coupon_rate,
            day_count,
        )),
        AccrualBasis::Floating {
            face_value,
            forward_curve,
        } => floating_accrued_interest(
            period.start_date,
            valuation_date,
            face_value,
            forward_curve,
            schedule.day_count(),
        ),
    }
}

/// Linear fixed accrual: `face × coupon_rate × dcf(start, valuation)`.
#[must_use]
pub fn fixed_accrued_interest(
    accrual_start: Date,
    valuation_date: Date,
    face_value: f64,
    coupon_rate: f64,
    day_count: DayCountConvention,
) -> f64 {
    if valuation_date <= accrual_start {
        return 0.0;
    }
    face_value * coupon_rate * day_count.year_fraction(accrual_start, valuation_date)
}

/// Daily compounded floating accrual from `accrual_start` to `valuation_date`.
///
/// Each day's annually compounded forward is read from `forward_curve` and
/// compounded over that day's fraction under `day_count`. Converting the
/// growth to a simple rate over the stub and applying it over the same stub
/// cancels out, so the accrual is taken straight from the growth factor.
///
/// # Errors
///
/// `CurveLookup` for the first day the curve cannot price.
pub fn floating_accrued_interest<C>(
    accrual_start: Date,
    valuation_date: Date,
    face_value: f64,
    forward_curve: &C,
    day_count: DayCountConvention,
) -> BondResult<f64>
where
    C: RateCurve + ?Sized,
{
    if valuation_date <= accrual_start {
        return Ok(0.0);
    }

    let mut growth = 1.0;
    let mut day = accrual_start;
    while day < valuation_date {
        let next = day.add_days(1);
        let fwd = forward_curve
            .forward_rate(day, next)
            .map_err(|e| BondError::curve_lookup(day, next, e))?;
        growth *= Compounding::Annual.growth_factor(fwd, day_count.year_fraction(day, next));
        day = next;
    }

    let accrued = face_value * (growth - 1.0);

    trace!(
        start = %accrual_start,
        valuation = %valuation_date,
        growth,
        accrued,
        "floating accrued interest"
    );
    Ok(accrued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generate_schedule;
    use approx::assert_relative_eq;
    use bondflow_core::Frequency;
    use bondflow_curves::{FlatCurve, ZeroCurveBuilder};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn schedule() -> Schedule {
        generate_schedule(
            d(2023, 8, 1),
            d(2026, 8, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_accrued_act360() {
        let basis = AccrualBasis::fixed(1_000_000.0, 0.05);
        let accrued = accrued_interest(&schedule(), d(2024, 10, 1), &basis).unwrap();
        // 2024-08-01 to 2024-10-01 is 61 days.
        assert_relative_eq!(accrued, 1_000_000.0 * 0.05 * 61.0 / 360.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_on_period_start() {
        let basis = AccrualBasis::fixed(1_000_000.0, 0.05);
        assert_eq!(accrued_interest(&schedule(), d(2024, 8, 1), &basis).unwrap(), 0.0);
    }

    #[test]
    fn test_before_issue_fails() {
        let basis = AccrualBasis::fixed(100.0, 0.05);
        let err = accrued_interest(&schedule(), d(2023, 1, 1), &basis).unwrap_err();
        assert_eq!(err.code(), "InvalidDateRange");
    }

    #[test]
    fn test_floating_accrued_flat_curve() {
        // A flat annual curve compounds to (1 + r)^stub over the stub.
        let curve = FlatCurve::new(d(2023, 1, 1), 0.04);
        let basis = AccrualBasis::floating(1_000_000.0, &curve);
        let valuation = d(2024, 2, 15);
        let accrued = accrued_interest(&schedule(), valuation, &basis).unwrap();

        let stub = DayCountConvention::ActActIsda.year_fraction(d(2023, 8, 1), valuation);
        let expected = 1_000_000.0 * (1.04_f64.powf(stub) - 1.0);
        assert_relative_eq!(accrued, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_floating_accrued_upward_curve_exceeds_first_day_rate() {
        let curve = ZeroCurveBuilder::new(d(2023, 1, 1))
            .add_rate(d(2023, 6, 1), 0.02)
            .add_rate(d(2025, 1, 1), 0.06)
            .build()
            .unwrap();
        let start = d(2023, 8, 1);
        let valuation = d(2023, 12, 1);
        let accrued = floating_accrued_interest(
            start,
            valuation,
            100.0,
            &curve,
            DayCountConvention::ActActIsda,
        )
        .unwrap();

        let first_day = curve.forward_rate(start, start.add_days(1)).unwrap();
        let stub = DayCountConvention::ActActIsda.year_fraction(start, valuation);
        assert!(accrued > 100.0 * ((1.0 + first_day).powf(stub) - 1.0));
    }

    #[test]
    fn test_floating_accrued_curve_gap_fails() {
        // Curve starts after the period start: the first daily forward fails.
        let curve = FlatCurve::new(d(2023, 9, 1), 0.04);
        let basis = AccrualBasis::floating(100.0, &curve);
        let err = accrued_interest(&schedule(), d(2023, 10, 1), &basis).unwrap_err();
        match err {
            BondError::CurveLookup { start, end, .. } => {
                assert_eq!(start, d(2023, 8, 1));
                assert_eq!(end, d(2023, 8, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_floating_accrued_matches_simple_rate_over_stub() {
        let curve = FlatCurve::new(d(2023, 1, 1), 0.055);
        let start = d(2023, 8, 1);
        let valuation = d(2024, 1, 20);
        let accrued = floating_accrued_interest(
            start,
            valuation,
            250_000.0,
            &curve,
            DayCountConvention::ActActIsda,
        )
        .unwrap();

        let stub = DayCountConvention::ActActIsda.year_fraction(start, valuation);
        let simple = bondflow_core::rates::zc_to_simple_rate(0.055, stub).unwrap();
        assert_relative_eq!(accrued, 250_000.0 * simple * stub, epsilon = 1e-6);
    }
}
