//! Zero rate curve built from pillar dates.

use bondflow_core::{Compounding, Date};
use tracing::debug;

use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationMethod;
use crate::traits::RateCurve;

/// A curve of zero rates at pillar dates.
///
/// Rates are quoted with the curve's [`Compounding`] over ACT/365F time from
/// the reference date. Between the reference date and the first pillar the
/// first rate applies; beyond the last pillar the curve fails with
/// `CurveError::OutOfRange` unless extrapolation was enabled, in which case
/// the last zero rate is held flat.
#[derive(Debug, Clone)]
pub struct ZeroCurve {
    reference_date: Date,
    dates: Vec<Date>,
    times: Vec<f64>,
    rates: Vec<f64>,
    log_dfs: Vec<f64>,
    compounding: Compounding,
    interpolation: InterpolationMethod,
    allow_extrapolation: bool,
}

impl ZeroCurve {
    /// Returns a builder anchored at `reference_date`.
    #[must_use]
    pub fn builder(reference_date: Date) -> ZeroCurveBuilder {
        ZeroCurveBuilder::new(reference_date)
    }

    /// Returns the pillar dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the pillar zero rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Returns the compounding convention of the pillar rates.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMethod {
        self.interpolation
    }

    fn last_index(&self) -> usize {
        self.times.len() - 1
    }

    fn interpolated_rate(&self, t: f64) -> f64 {
        let last = self.last_index();
        if t <= self.times[0] {
            self.rates[0]
        } else if t >= self.times[last] {
            self.rates[last]
        } else {
            InterpolationMethod::linear(&self.times, &self.rates, t)
        }
    }

    fn interpolated_log_df(&self, t: f64) -> f64 {
        let last = self.last_index();
        if t <= self.times[0] {
            // Interpolate from the reference node (t = 0, ln DF = 0).
            self.log_dfs[0] * t / self.times[0]
        } else if t >= self.times[last] {
            self.log_dfs[last] * t / self.times[last]
        } else {
            InterpolationMethod::linear(&self.times, &self.log_dfs, t)
        }
    }
}

impl RateCurve for ZeroCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn max_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date < self.reference_date
            || (!self.allow_extrapolation && self.max_date().is_some_and(|max| date > max))
        {
            return Err(CurveError::out_of_range(
                date,
                self.reference_date,
                self.max_date(),
            ));
        }

        let t = self.year_fraction(date);
        if t == 0.0 {
            return Ok(1.0);
        }

        let df = match self.interpolation {
            InterpolationMethod::Linear => {
                self.compounding.discount_factor(self.interpolated_rate(t), t)
            }
            InterpolationMethod::LogLinear => self.interpolated_log_df(t).exp(),
        };
        Ok(df)
    }
}

/// Builder for [`ZeroCurve`].
///
/// # Example
///
/// ```rust
/// use bondflow_core::Date;
/// use bondflow_curves::{InterpolationMethod, RateCurve, ZeroCurveBuilder};
///
/// let curve = ZeroCurveBuilder::new(Date::from_ymd(2025, 1, 1).unwrap())
///     .add_rate(Date::from_ymd(2025, 7, 1).unwrap(), 0.04)
///     .add_rate(Date::from_ymd(2026, 1, 1).unwrap(), 0.05)
///     .interpolation(InterpolationMethod::LogLinear)
///     .build()
///     .unwrap();
///
/// assert!(curve.discount_factor(Date::from_ymd(2025, 10, 1).unwrap()).unwrap() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurveBuilder {
    reference_date: Date,
    pillars: Vec<(Date, f64)>,
    compounding: Compounding,
    interpolation: InterpolationMethod,
    allow_extrapolation: bool,
}

impl ZeroCurveBuilder {
    /// Creates a builder anchored at `reference_date`.
    #[must_use]
    pub fn new(reference_date: Date) -> Self {
        Self {
            reference_date,
            pillars: Vec::new(),
            compounding: Compounding::Annual,
            interpolation: InterpolationMethod::Linear,
            allow_extrapolation: false,
        }
    }

    /// Adds a pillar zero rate.
    #[must_use]
    pub fn add_rate(mut self, date: Date, rate: f64) -> Self {
        self.pillars.push((date, rate));
        self
    }

    /// Adds several pillar zero rates.
    #[must_use]
    pub fn add_rates(mut self, pillars: impl IntoIterator<Item = (Date, f64)>) -> Self {
        self.pillars.extend(pillars);
        self
    }

    /// Sets the compounding of the pillar rates.
    #[must_use]
    pub fn compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the interpolation method.
    #[must_use]
    pub fn interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Holds the last zero rate flat beyond the last pillar.
    #[must_use]
    pub fn allow_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Validates the pillars and builds the curve.
    ///
    /// # Errors
    ///
    /// - `CurveError::InsufficientPoints` with no pillars
    /// - `CurveError::NonMonotonicDates` if dates are not strictly increasing
    ///   after the reference date
    /// - `CurveError::InvalidValue` for non-finite rates
    pub fn build(self) -> CurveResult<ZeroCurve> {
        if self.pillars.is_empty() {
            return Err(CurveError::InsufficientPoints {
                required: 1,
                got: 0,
            });
        }

        let mut prev = self.reference_date;
        for (index, &(date, rate)) in self.pillars.iter().enumerate() {
            if date <= prev {
                return Err(CurveError::NonMonotonicDates {
                    index,
                    prev,
                    current: date,
                });
            }
            if !rate.is_finite() {
                return Err(CurveError::invalid_value(format!(
                    "rate at {date} is not finite"
                )));
            }
            prev = date;
        }

        let reference_date = self.reference_date;
        let (dates, rates): (Vec<Date>, Vec<f64>) = self.pillars.into_iter().unzip();
        let times: Vec<f64> = dates
            .iter()
            .map(|d| reference_date.days_between(d) as f64 / 365.0)
            .collect();
        let log_dfs: Vec<f64> = times
            .iter()
            .zip(&rates)
            .map(|(&t, &r)| self.compounding.discount_factor(r, t).ln())
            .collect();

        if let Some(bad) = log_dfs.iter().position(|v| !v.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "rate at {} implies a non-positive discount factor",
                dates[bad]
            )));
        }

        debug!(
            reference_date = %reference_date,
            pillars = dates.len(),
            interpolation = %self.interpolation,
            "built zero curve"
        );

        Ok(ZeroCurve {
            reference_date,
            dates,
            times,
            rates,
            log_dfs,
            compounding: self.compounding,
            interpolation: self.interpolation,
            allow_extrapolation: self.allow_extrapolation,
        })
    }
}
