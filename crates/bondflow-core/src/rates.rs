//! Conversion between compounded zero-coupon rates and simple rates.
//!
//! Forward curves quote zero-coupon forwards that compound over the accrual
//! period. Coupon formulas want a simple (linear) rate so that
//! `notional × simple × dcf` equals the interest the compounded rate earns
//! over the same period:
//!
//! ```text
//! 1 + simple × dcf = growth(zc, dcf)
//! ```
//!
//! The unsuffixed functions use annual compounding, the convention of the
//! curves in this workspace. The `_with` variants take any [`Compounding`].

use crate::error::{CoreError, CoreResult};
use crate::types::Compounding;

fn check_fraction(day_count_fraction: f64) -> CoreResult<()> {
    if !day_count_fraction.is_finite() || day_count_fraction <= 0.0 {
        return Err(CoreError::invalid_rate(format!(
            "day count fraction must be positive, got {day_count_fraction}"
        )));
    }
    Ok(())
}

fn check_rate(rate: f64) -> CoreResult<()> {
    if !rate.is_finite() {
        return Err(CoreError::invalid_rate(format!("rate is not finite: {rate}")));
    }
    Ok(())
}

/// Converts an annually compounded zero-coupon forward over a period of
/// `day_count_fraction` years into the equivalent simple rate.
///
/// `simple = ((1 + zc)^dcf - 1) / dcf`
///
/// # Errors
///
/// Returns `CoreError::InvalidRate` if `day_count_fraction <= 0`.
///
/// # Example
///
/// ```rust
/// use bondflow_core::rates::zc_to_simple_rate;
///
/// // Over exactly one year both conventions agree.
/// assert!((zc_to_simple_rate(0.04, 1.0).unwrap() - 0.04).abs() < 1e-15);
/// ```
pub fn zc_to_simple_rate(zc_forward_rate: f64, day_count_fraction: f64) -> CoreResult<f64> {
    zc_to_simple_rate_with(zc_forward_rate, day_count_fraction, Compounding::Annual)
}

/// Inverse of [`zc_to_simple_rate`]: `zc = (1 + simple × dcf)^(1/dcf) - 1`.
///
/// # Errors
///
/// Returns `CoreError::InvalidRate` if `day_count_fraction <= 0`.
pub fn simple_to_zc_rate(simple_rate: f64, day_count_fraction: f64) -> CoreResult<f64> {
    simple_to_zc_rate_with(simple_rate, day_count_fraction, Compounding::Annual)
}

/// Converts a zero-coupon rate compounded with `compounding` into the
/// equivalent simple rate over `day_count_fraction`.
///
/// # Errors
///
/// Returns `CoreError::InvalidRate` if `day_count_fraction <= 0` or the
/// rate is not finite.
pub fn zc_to_simple_rate_with(
    zc_rate: f64,
    day_count_fraction: f64,
    compounding: Compounding,
) -> CoreResult<f64> {
    check_fraction(day_count_fraction)?;
    check_rate(zc_rate)?;

    let growth = compounding.growth_factor(zc_rate, day_count_fraction);
    Ok((growth - 1.0) / day_count_fraction)
}

/// Converts a simple rate over `day_count_fraction` into the equivalent
/// zero-coupon rate compounded with `compounding`.
///
/// # Errors
///
/// Returns `CoreError::InvalidRate` if `day_count_fraction <= 0`, the rate is
/// not finite, or the implied growth factor is not positive.
pub fn simple_to_zc_rate_with(
    simple_rate: f64,
    day_count_fraction: f64,
    compounding: Compounding,
) -> CoreResult<f64> {
    check_fraction(day_count_fraction)?;
    check_rate(simple_rate)?;

    let growth = 1.0 + simple_rate * day_count_fraction;
    if growth <= 0.0 {
        return Err(CoreError::invalid_rate(format!(
            "simple rate {simple_rate} over {day_count_fraction} implies non-positive growth"
        )));
    }
    Ok(compounding.rate_from_growth(growth, day_count_fraction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_one_year_is_identity() {
        assert_relative_eq!(zc_to_simple_rate(0.035, 1.0).unwrap(), 0.035, epsilon = 1e-15);
    }

    #[test]
    fn test_short_period_simple_below_zc() {
        // Compounding over less than a year earns less than linear accrual
        // at the same headline rate, so the simple equivalent is lower.
        let simple = zc_to_simple_rate(0.05, 0.25).unwrap();
        assert!(simple < 0.05);
        assert_relative_eq!(simple, (1.05_f64.powf(0.25) - 1.0) / 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_reproduces_terminal_value() {
        let face = 1_000_000.0;
        let dcf = 183.0 / 365.0;
        let zc = 0.042;
        let simple = zc_to_simple_rate(zc, dcf).unwrap();
        assert_relative_eq!(
            face * (1.0 + simple * dcf),
            face * (1.0 + zc).powf(dcf),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_continuous_variant() {
        let simple = zc_to_simple_rate_with(0.03, 0.5, Compounding::Continuous).unwrap();
        assert_relative_eq!(simple, ((0.03_f64 * 0.5).exp() - 1.0) / 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_non_positive_fraction() {
        assert!(matches!(
            zc_to_simple_rate(0.03, 0.0),
            Err(CoreError::InvalidRate { .. })
        ));
        assert!(matches!(
            simple_to_zc_rate(0.03, -0.5),
            Err(CoreError::InvalidRate { .. })
        ));
        assert!(zc_to_simple_rate(0.03, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        assert!(zc_to_simple_rate(f64::INFINITY, 0.5).is_err());
    }

    proptest! {
        #[test]
        fn prop_roundtrip(rate in -0.02f64..0.25, dcf in 0.002f64..5.0) {
            let simple = zc_to_simple_rate(rate, dcf).unwrap();
            let back = simple_to_zc_rate(simple, dcf).unwrap();
            prop_assert!((back - rate).abs() < 1e-10);
        }
    }
}
