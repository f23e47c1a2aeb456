//! Fixed coupon bonds.

use serde::{Deserialize, Serialize};

use bondflow_core::{Date, DayCountConvention, Frequency};
use bondflow_curves::RateCurve;

use crate::accrued::{accrued_interest, AccrualBasis};
use crate::cashflows::{compute_fixed_cash_flows_with, CashFlow, FIXED_ACCRUAL_DAY_COUNT};
use crate::error::{BondError, BondResult};
use crate::schedule::{Schedule, ScheduleConfig};
use crate::valuation::{discount, ValuationResult};

use super::spec::{validate_terms, InstrumentConventions, InstrumentKind, InstrumentSpec};

/// A bullet bond paying a fixed coupon.
///
/// # Example
///
/// ```rust
/// use bondflow_bonds::instruments::FixedRateBond;
/// use bondflow_core::{Date, Frequency};
/// use bondflow_curves::FlatCurve;
///
/// let bond = FixedRateBond::builder()
///     .issue_date(Date::from_ymd(2023, 8, 1).unwrap())
///     .maturity_date(Date::from_ymd(2026, 8, 1).unwrap())
///     .face_value(1_500_000_000.0)
///     .coupon_rate(0.035)
///     .frequency(Frequency::Annual)
///     .build()
///     .unwrap();
///
/// let curve = FlatCurve::new(Date::from_ymd(2023, 8, 1).unwrap(), 0.03);
/// let result = bond.value(&curve, None).unwrap();
/// assert_eq!(result.cash_flows.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRateBond {
    issue_date: Date,
    maturity_date: Date,
    face_value: f64,
    coupon_rate: f64,
    frequency: Frequency,
    redemption_rate: f64,
    day_count: DayCountConvention,
    accrual_day_count: DayCountConvention,
}

impl FixedRateBond {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> FixedRateBondBuilder {
        FixedRateBondBuilder::default()
    }

    /// Builds a bond from a spec with default conventions.
    ///
    /// # Errors
    ///
    /// Parse failures of dates, frequency or day count, a missing coupon, or
    /// any builder validation error.
    pub fn from_spec(spec: &InstrumentSpec) -> BondResult<Self> {
        Self::from_spec_with(spec, &InstrumentConventions::default())
    }

    /// Builds a bond from a spec with explicit conventions.
    ///
    /// # Errors
    ///
    /// See [`from_spec`](Self::from_spec).
    pub fn from_spec_with(
        spec: &InstrumentSpec,
        conventions: &InstrumentConventions,
    ) -> BondResult<Self> {
        spec.expect_kind(InstrumentKind::Fixed)?;
        let coupon_rate = spec
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("coupon_rate"))?;

        Self::builder()
            .issue_date(spec.issue()?)
            .maturity_date(spec.maturity()?)
            .face_value(spec.face_value)
            .coupon_rate(coupon_rate)
            .frequency(spec.parsed_frequency()?)
            .redemption_rate(spec.redemption_rate)
            .day_count(spec.schedule_day_count(conventions)?)
            .accrual_day_count(conventions.fixed_accrual_day_count)
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

    /// Returns the annual coupon rate.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
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

    /// Computes the coupon and redemption flows.
    pub fn cash_flows(&self) -> BondResult<Vec<CashFlow>> {
        Ok(compute_fixed_cash_flows_with(
            &self.schedule()?,
            self.face_value,
            self.coupon_rate,
            self.redemption_rate,
            self.accrual_day_count,
        ))
    }

    /// Returns how this bond accrues.
    #[must_use]
    pub fn accrual_basis(&self) -> AccrualBasis<'static> {
        AccrualBasis::Fixed {
            face_value: self.face_value,
            coupon_rate: self.coupon_rate,
            day_count: self.accrual_day_count,
        }
    }

    /// Accrued interest at `date`.
    pub fn accrued_interest(&self, date: Date) -> BondResult<f64> {
        accrued_interest(&self.schedule()?, date, &self.accrual_basis())
    }

    /// Values the bond on `discount_curve`, at issue when `valuation_date`
    /// is `None`.
    pub fn value<C>(
        &self,
        discount_curve: &C,
        valuation_date: Option<Date>,
    ) -> BondResult<ValuationResult>
    where
        C: RateCurve + ?Sized,
    {
        let schedule = self.schedule()?;
        let flows = compute_fixed_cash_flows_with(
            &schedule,
            self.face_value,
            self.coupon_rate,
            self.redemption_rate,
            self.accrual_day_count,
        );
        discount(
            &schedule,
            &flows,
            discount_curve,
            valuation_date,
            &self.accrual_basis(),
        )
    }
}

/// Builder for [`FixedRateBond`].
#[derive(Debug, Clone, Default)]
pub struct FixedRateBondBuilder {
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    face_value: Option<f64>,
    coupon_rate: Option<f64>,
    frequency: Option<Frequency>,
    redemption_rate: Option<f64>,
    day_count: Option<DayCountConvention>,
    accrual_day_count: Option<DayCountConvention>,
}

impl FixedRateBondBuilder {
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

    /// Sets the annual coupon rate (0.035 for 3.5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the payment frequency. Defaults to semi-annual.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the redemption rate. Defaults to 1.0 (par).
    #[must_use]
    pub fn redemption_rate(mut self, rate: f64) -> Self {
        self.redemption_rate = Some(rate);
        self
    }

    /// Sets the schedule day count. Defaults to ACT/ACT ISDA.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the coupon accrual day count. Defaults to ACT/360.
    #[must_use]
    pub fn accrual_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.accrual_day_count = Some(day_count);
        self
    }

    /// Validates and builds the bond.
    ///
    /// # Errors
    ///
    /// `MissingField` for unset dates, face value or coupon;
    /// `InvalidDateRange` if maturity is not after issue; `InvalidSpec` for a
    /// non-positive face, negative redemption or non-finite coupon.
    pub fn build(self) -> BondResult<FixedRateBond> {
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::missing_field("issue_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::missing_field("maturity_date"))?;
        let face_value = self
            .face_value
            .ok_or_else(|| BondError::missing_field("face_value"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("coupon_rate"))?;
        let redemption_rate = self.redemption_rate.unwrap_or(1.0);

        validate_terms(issue_date, maturity_date, face_value, redemption_rate)?;
        if !coupon_rate.is_finite() {
            return Err(BondError::invalid_spec(format!(
                "coupon_rate must be finite, got {coupon_rate}"
            )));
        }

        Ok(FixedRateBond {
            issue_date,
            maturity_date,
            face_value,
            coupon_rate,
            frequency: self.frequency.unwrap_or_default(),
            redemption_rate,
            day_count: self.day_count.unwrap_or_default(),
            accrual_day_count: self.accrual_day_count.unwrap_or(FIXED_ACCRUAL_DAY_COUNT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondflow_curves::FlatCurve;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn bond(coupon: f64) -> FixedRateBond {
        FixedRateBond::builder()
            .issue_date(d(2023, 8, 1))
            .maturity_date(d(2026, 8, 1))
            .face_value(1.5e9)
            .coupon_rate(coupon)
            .frequency(Frequency::Annual)
            .redemption_rate(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let bond = bond(0.035);
        assert_eq!(bond.day_count(), DayCountConvention::ActActIsda);
        assert_eq!(bond.redemption_rate(), 1.0);

        let semi = FixedRateBond::builder()
            .issue_date(d(2023, 8, 1))
            .maturity_date(d(2026, 8, 1))
            .face_value(100.0)
            .coupon_rate(0.05)
            .build()
            .unwrap();
        assert_eq!(semi.frequency(), Frequency::SemiAnnual);
        assert_eq!(semi.schedule().unwrap().len(), 6);
    }

    #[test]
    fn test_builder_missing_fields() {
        let err = FixedRateBond::builder()
            .issue_date(d(2023, 8, 1))
            .maturity_date(d(2026, 8, 1))
            .face_value(100.0)
            .build()
            .unwrap_err();
        assert_eq!(err, BondError::missing_field("coupon_rate"));

        let err = FixedRateBond::builder().build().unwrap_err();
        assert_eq!(err.code(), "MissingField");
    }

    #[test]
    fn test_builder_rejects_bad_terms() {
        let err = FixedRateBond::builder()
            .issue_date(d(2026, 8, 1))
            .maturity_date(d(2023, 8, 1))
            .face_value(100.0)
            .coupon_rate(0.05)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "InvalidDateRange");

        let err = FixedRateBond::builder()
            .issue_date(d(2023, 8, 1))
            .maturity_date(d(2026, 8, 1))
            .face_value(-5.0)
            .coupon_rate(0.05)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "InvalidSpec");
    }

    #[test]
    fn test_value_at_issue_has_no_accrued() {
        let curve = FlatCurve::new(d(2023, 8, 1), 0.03);
        let result = bond(0.035).value(&curve, Some(d(2023, 8, 1))).unwrap();
        assert_eq!(result.accrued_interest, 0.0);
        assert_eq!(result.anchor_date, d(2023, 8, 1));
        assert_eq!(result.cash_flows.len(), 3);
    }

    #[test]
    fn test_accrued_interest_mid_period() {
        let accrued = bond(0.035).accrued_interest(d(2025, 2, 1)).unwrap();
        // 2024-08-01 to 2025-02-01 is 184 days.
        assert_relative_eq!(accrued, 1.5e9 * 0.035 * 184.0 / 360.0, epsilon = 1e-3);
    }

    #[test]
    fn test_from_spec() {
        let spec = InstrumentSpec {
            kind: InstrumentKind::Fixed,
            issue_date: "2023-08-01".into(),
            maturity_date: "2026-08-01".into(),
            face_value: 1.5e9,
            coupon_rate: Some(0.035),
            frequency: "ANNUAL".into(),
            redemption_rate: 1.0,
            day_count: None,
        };
        assert_eq!(FixedRateBond::from_spec(&spec).unwrap(), bond(0.035));

        let mut missing = spec.clone();
        missing.coupon_rate = None;
        assert_eq!(
            FixedRateBond::from_spec(&missing).unwrap_err(),
            BondError::missing_field("coupon_rate")
        );

        let mut weekly = spec.clone();
        weekly.frequency = "WEEKLY".into();
        assert_eq!(
            FixedRateBond::from_spec(&weekly).unwrap_err().code(),
            "UnknownFrequency"
        );

        let mut floating = spec;
        floating.kind = InstrumentKind::Floating;
        assert_eq!(
            FixedRateBond::from_spec(&floating).unwrap_err().code(),
            "InvalidSpec"
        );
    }
}
