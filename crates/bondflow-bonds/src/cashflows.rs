//! Coupon and redemption cash flows.
//!
//! One [`CashFlow`] per schedule period, paid on the period end. The last
//! flow also carries the bullet redemption `face × redemption_rate`.
//!
//! Fixed coupons accrue on ACT/360 regardless of the schedule's day count.
//! Floating coupons are projected from a forward curve that quotes
//! zero-coupon forwards; each forward is converted to a simple rate over the
//! period before it is applied.

use serde::{Deserialize, Serialize};
use tracing::trace;

use bondflow_core::rates::zc_to_simple_rate;
use bondflow_core::{Date, DayCountConvention};
use bondflow_curves::RateCurve;

use crate::error::{BondError, BondResult};
use crate::schedule::{Period, Schedule};

/// Day count used for fixed coupon accrual.
pub const FIXED_ACCRUAL_DAY_COUNT: DayCountConvention = DayCountConvention::Act360;

/// A single scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date (the period end).
    pub payment_date: Date,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Year fraction the coupon accrued over.
    pub day_count_fraction: f64,
    /// Simple annual rate applied to the face value.
    pub rate: f64,
    /// Coupon interest.
    pub coupon_amount: f64,
    /// Principal repaid with this flow.
    pub redemption_amount: f64,
    /// Total paid: coupon plus redemption.
    pub amount: f64,
}

impl CashFlow {
    /// Creates a coupon flow for `period` without redemption.
    #[must_use]
    pub fn coupon(period: &Period, face_value: f64, rate: f64, day_count_fraction: f64) -> Self {
        let coupon_amount = face_value * rate * day_count_fraction;
        Self {
            payment_date: period.end_date,
            accrual_start: period.start_date,
            accrual_end: period.end_date,
            day_count_fraction,
            rate,
            coupon_amount,
            redemption_amount: 0.0,
            amount: coupon_amount,
        }
    }

    /// Adds a redemption to this flow.
    #[must_use]
    pub fn with_redemption(mut self, redemption_amount: f64) -> Self {
        self.redemption_amount = redemption_amount;
        self.amount = self.coupon_amount + redemption_amount;
        self
    }

    /// Returns true if this flow repays principal.
    #[must_use]
    pub fn is_redemption(&self) -> bool {
        self.redemption_amount != 0.0
    }
}

fn attach_redemption(flows: &mut [CashFlow], face_value: f64, redemption_rate: f64) {
    if let Some(last) = flows.last_mut() {
        *last = last.with_redemption(face_value * redemption_rate);
    }
}

/// Computes fixed coupon flows with ACT/360 accrual.
///
/// `coupon = face × coupon_rate × ACT/360(start, end)`; the last flow adds
/// `face × redemption_rate`.
#[must_use]
pub fn compute_fixed_cash_flows(
    schedule: &Schedule,
    face_value: f64,
    coupon_rate: f64,
    redemption_rate: f64,
) -> Vec<CashFlow> {
    compute_fixed_cash_flows_with(
        schedule,
        face_value,
        coupon_rate,
        redemption_rate,
        FIXED_ACCRUAL_DAY_COUNT,
    )
}

/// Computes fixed coupon flows with an explicit accrual day count.
#[must_use]
pub fn compute_fixed_cash_flows_with(
    schedule: &Schedule,
    face_value: f64,
    coupon_rate: f64,
    redemption_rate: f64,
    accrual_day_count: DayCountConvention,
) -> Vec<CashFlow> {
    let mut flows: Vec<CashFlow> = schedule
        .iter()
        .map(|period| {
            let dcf = accrual_day_count.year_fraction(period.start_date, period.end_date);
            CashFlow::coupon(period, face_value, coupon_rate, dcf)
        })
        .collect();
    attach_redemption(&mut flows, face_value, redemption_rate);

    for flow in &flows {
        trace!(
            payment_date = %flow.payment_date,
            coupon = flow.coupon_amount,
            redemption = flow.redemption_amount,
            "fixed cash flow"
        );
    }
    flows
}

/// Computes floating coupon flows projected from `forward_curve`.
///
/// Per period: `zc = forward_curve.forward_rate(start, end)`, an annually
/// compounded forward, converted to a simple rate over the period's year
/// fraction, then `coupon = face × simple × day_count_fraction`.
///
/// # Errors
///
/// Returns `CurveLookup` if the curve cannot produce a forward for a period,
/// or `InvalidRate` if the conversion fails.
pub fn compute_floating_cash_flows<C>(
    schedule: &Schedule,
    face_value: f64,
    redemption_rate: f64,
    forward_curve: &C,
) -> BondResult<Vec<CashFlow>>
where
    C: RateCurve + ?Sized,
{
    project_floating(schedule.iter(), face_value, redemption_rate, forward_curve)
}

/// Computes floating flows for the periods paid on or after `from`.
///
/// Periods paid before `from` are skipped without a curve lookup, so a
/// forward curve starting inside the period accruing on `from` is enough.
///
/// # Errors
///
/// See [`compute_floating_cash_flows`].
pub fn compute_live_floating_cash_flows<C>(
    schedule: &Schedule,
    face_value: f64,
    redemption_rate: f64,
    forward_curve: &C,
    from: Date,
) -> BondResult<Vec<CashFlow>>
where
    C: RateCurve + ?Sized,
{
    project_floating(
        schedule.iter().filter(|p| p.end_date >= from),
        face_value,
        redemption_rate,
        forward_curve,
    )
}

fn project_floating<'a, C>(
    periods: impl Iterator<Item = &'a Period>,
    face_value: f64,
    redemption_rate: f64,
    forward_curve: &C,
) -> BondResult<Vec<CashFlow>>
where
    C: RateCurve + ?Sized,
{
    let mut flows = Vec::new();
    for period in periods {
        let zc = forward_curve
            .forward_rate(period.start_date, period.end_date)
            .map_err(|e| BondError::curve_lookup(period.start_date, period.end_date, e))?;
        let simple = zc_to_simple_rate(zc, period.day_count_fraction)?;

        let flow = CashFlow::coupon(period, face_value, simple, period.day_count_fraction);
        trace!(
            payment_date = %flow.payment_date,
            forward = zc,
            simple_rate = simple,
            coupon = flow.coupon_amount,
            "floating cash flow"
        );
        flows.push(flow);
    }
    attach_redemption(&mut flows, face_value, redemption_rate);
    Ok(flows)
}
