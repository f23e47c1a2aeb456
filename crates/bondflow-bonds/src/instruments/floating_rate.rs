//! Floating rate notes.

use serde::{Deserialize, Serialize};

use bondflow_core::{Date, DayCountConvention, Frequency};
use bondflow_curves::RateCurve;

use crate::accrued::{accrued_interest, AccrualBasis};
use crate::cashflows::{compute_floating_cash_flows, compute_live_floating_cash_flows, CashFlow};
use crate::error::{BondError, BondResult};
use crate::schedule::{Schedule, ScheduleConfig};
use crate::valuation::{discount, ValuationResult};

use super::spec::{validate_terms, InstrumentConventions, InstrumentKind, InstrumentSpec};

/// A bullet note whose coupons are projected from a forward curve.
///
/// Coupons are only known once a forward curve is supplied, so cash flows
/// and valuation take the curve as an argument. The curve's forwards are
/// annually compounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingRateNote {
    issue_date: Date,
    maturity_date: Date,
    face_value: f64,
    frequency: Frequency,
    redemption_rate: f64,
    day_count: DayCountConvention,
}

impl FloatingRateNote {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> FloatingRateNoteBuilder {
        FloatingRateNoteBuilder::default()
    }

    /// Builds a note from a spec with default conventions.
    ///
    /// # Errors
    ///
    /// Parse failures of dates, frequency or day count, or any builder
    /// validation error.
    pub fn from_spec(spec: &InstrumentSpec) -> BondResult<Self> {
        Self::from_spec_with(spec, &InstrumentConventions::default())
    }

    /// Builds a note from a spec with explicit conventions.
    ///
    /// # Errors
    ///
    /// See [`from_spec`](Self::from_spec).
    pub fn from_spec_with(
        spec: &InstrumentSpec,
        conventions: &InstrumentConventions,
    ) -> BondResult<Self> {
        spec.expect_kind(InstrumentKind::Floating)?;

        Self::builder()
            .issue_date(spec.issue()?)
            .maturity_date(spec.maturity()?)
            .face_value(spec.face_value)
            .frequency(spec.parsed_frequency()?)
            .redemption_rate(spec.redemption_rate)
            .day_count(spec.schedule_day_count(conventions)?)
            .build()
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

    /// Returns the face value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Returns the payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the redemption rate.
    #[must_use]
    pub fn redemption_rate(&self) -> f64 {
        self.redemption_rate
    }

    /// Returns the schedule day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Generates the accrual schedule.
    pub fn schedule(&self) -> BondResult<Schedule> {
        Schedule::generate(
            &ScheduleConfig::new(self.issue_date, self.maturity_date, self.frequency)
                .with_day_count(self.day_count),
        )
    }

    /// Projects coupon and redemption flows from `forward_curve`.
    pub fn cash_flows<F>(&self, forward_curve: &F) -> BondResult<Vec<CashFlow>>
    where
        F: RateCurve + ?Sized,
    {
        compute_floating_cash_flows(
            &self.schedule()?,
            self.face_value,
            self.redemption_rate,
            forward_curve,
        )
    }

    /// Returns how this note accrues against `forward_curve`.
    #[must_use]
    pub fn accrual_basis<'a>(&self, forward_curve: &'a dyn RateCurve) -> AccrualBasis<'a> {
        AccrualBasis::floating(self.face_value, forward_curve)
    }

    /// Daily compounded accrued interest at `date`.
    pub fn accrued_interest(&self, forward_curve: &dyn RateCurve, date: Date) -> BondResult<f64> {
        accrued_interest(&self.schedule()?, date, &self.accrual_basis(forward_curve))
    }

    /// Values the note, projecting on `forward_curve` and discounting on
    /// `discount_curve`.
    ///
    /// With a valuation date only the periods paid on or after it are
    /// projected, so `forward_curve` needs to cover the accruing period and
    /// later ones.
    pub fn value<C>(
        &self,
        discount_curve: &C,
        forward_curve: &dyn RateCurve,
        valuation_date: Option<Date>,
    ) -> BondResult<ValuationResult>
    where
        C: RateCurve + ?Sized,
    {
        let schedule = self.schedule()?;
        let flows = match valuation_date {
            Some(date) => compute_live_floating_cash_flows(
                &schedule,
                self.face_value,
                self.redemption_rate,
                forward_curve,
                date,
            )?,
            None => compute_floating_cash_flows(
                &schedule,
                self.face_value,
                self.redemption_rate,
                forward_curve,
            )?,
        };
        discount(
            &schedule,
            &flows,
            discount_curve,
            valuation_date,
            &self.accrual_basis(forward_curve),
        )
    }
}

/// Builder for [`FloatingRateNote`].
#[derive(Debug, Clone, Default)]
pub struct FloatingRateNoteBuilder {
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    face_value: Option<f64>,
    frequency: Option<Frequency>,
    redemption_rate: Option<f64>,
    day_count: Option<DayCountConvention>,
}

impl FloatingRateNoteBuilder {
    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the redemption rate.
    #[must_use]
    pub fn redemption_rate(mut self, rate: f64) -> Self {
        self.redemption_rate = Some(rate);
        self
    }

    /// Sets the schedule day count.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Validates and builds the note.
    ///
    /// # Errors
    ///
    /// `MissingField` for unset dates or face value; `InvalidDateRange` and
    /// `InvalidSpec` as for fixed bonds.
    pub fn build(self) -> BondResult<FloatingRateNote> {
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::missing_field("issue_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::missing_field("maturity_date"))?;
        let face_value = self
            .face_value
            .ok_or_else(|| BondError::missing_field("face_value"))?;
        let redemption_rate = self.redemption_rate.unwrap_or(1.0);

        validate_terms(issue_date, maturity_date, face_value, redemption_rate)?;

        Ok(FloatingRateNote {
            issue_date,
            maturity_date,
            face_value,
            frequency: self.frequency.unwrap_or_default(),
            redemption_rate,
            day_count: self.day_count.unwrap_or_default(),
        })
    }
}
