//! Core trait for discount and forward curves.
//!
//! This module defines the [`RateCurve`] trait that every curve consumed by
//! the cash-flow engine implements.

use bondflow_core::daycounts::{Act365Fixed, DayCount};
use bondflow_core::{Compounding, Date};

use crate::error::{CurveError, CurveResult};

/// The interface the pricing pipeline needs from a curve.
///
/// Curves are immutable once built and are shared read-only across
/// concurrent pricing runs, hence the `Send + Sync` bound.
///
/// # Required Methods
///
/// - [`discount_factor`](RateCurve::discount_factor)
/// - [`reference_date`](RateCurve::reference_date)
/// - [`max_date`](RateCurve::max_date)
///
/// # Derived Methods
///
/// - [`forward_rate`](RateCurve::forward_rate): annually compounded
///   zero-coupon forward from the ratio of discount factors
/// - [`zero_rate`](RateCurve::zero_rate)
pub trait RateCurve: Send + Sync {
    /// Returns the curve's reference (valuation) date.
    ///
    /// The discount factor at this date is 1.
    fn reference_date(&self) -> Date;

    /// Returns the last date with market data, or `None` if unbounded.
    fn max_date(&self) -> Option<Date>;

    /// Returns the discount factor for `date`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::OutOfRange` if the curve has no data for `date`.
    fn discount_factor(&self, date: Date) -> CurveResult<f64>;

    /// Returns the year fraction from the reference date to `date`.
    ///
    /// Uses ACT/365 Fixed.
    fn year_fraction(&self, date: Date) -> f64 {
        Act365Fixed.year_fraction(self.reference_date(), date)
    }

    /// Returns the annually compounded zero-coupon forward rate between two dates.
    ///
    /// # Formula
    ///
    /// `F(s, e) = (DF(s) / DF(e))^(1/τ) - 1` with `τ` the ACT/365F fraction
    /// between `s` and `e`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidRange` if `end <= start`, or the lookup
    /// error of either discount factor.
    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        if end <= start {
            return Err(CurveError::InvalidRange { start, end });
        }

        let df_start = self.discount_factor(start)?;
        let df_end = self.discount_factor(end)?;

        if df_end <= 0.0 || df_start <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "non-positive discount factor between {start} and {end}"
            )));
        }

        let tau = Act365Fixed.year_fraction(start, end);
        Ok((df_start / df_end).powf(1.0 / tau) - 1.0)
    }

    /// Returns the zero rate to `date` with the given compounding.
    fn zero_rate(&self, date: Date, compounding: Compounding) -> CurveResult<f64> {
        let df = self.discount_factor(date)?;
        Ok(compounding.zero_rate(df, self.year_fraction(date)))
    }
}

impl<C: RateCurve + ?Sized> RateCurve for &C {
    fn reference_date(&self) -> Date {
        (**self).reference_date()
    }

    fn max_date(&self) -> Option<Date> {
        (**self).max_date()
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        (**self).discount_factor(date)
    }

    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        (**self).forward_rate(start, end)
    }
}

impl<C: RateCurve + ?Sized> RateCurve for std::sync::Arc<C> {
    fn reference_date(&self) -> Date {
        (**self).reference_date()
    }

    fn max_date(&self) -> Option<Date> {
        (**self).max_date()
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        (**self).discount_factor(date)
    }

    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        (**self).forward_rate(start, end)
    }
}
