//! Flat rate curve.

use bondflow_core::{Compounding, Date};

use crate::error::{CurveError, CurveResult};
use crate::traits::RateCurve;

/// A curve with the same zero rate at every horizon.
///
/// Unbounded on the long end. Dates before the reference date fail with
/// `CurveError::OutOfRange`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve {
    reference_date: Date,
    rate: f64,
    compounding: Compounding,
}

impl FlatCurve {
    /// Creates a flat curve with annually compounded `rate`.
    #[must_use]
    pub fn new(reference_date: Date, rate: f64) -> Self {
        Self::with_compounding(reference_date, rate, Compounding::Annual)
    }

    /// Creates a flat curve with the given compounding.
    #[must_use]
    pub fn with_compounding(reference_date: Date, rate: f64, compounding: Compounding) -> Self {
        Self {
            reference_date,
            rate,
            compounding,
        }
    }

    /// Returns the curve rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl RateCurve for FlatCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn max_date(&self) -> Option<Date> {
        None
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date < self.reference_date {
            return Err(CurveError::out_of_range(date, self.reference_date, None));
        }
        Ok(self
            .compounding
            .discount_factor(self.rate, self.year_fraction(date)))
    }
}
