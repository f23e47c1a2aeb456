//! Discounting, NPV and duration.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use bondflow_core::Date;
use bondflow_curves::RateCurve;

use crate::accrued::{accrued_interest, AccrualBasis};
use crate::cashflows::CashFlow;
use crate::error::{BondError, BondResult};
use crate::schedule::Schedule;

/// A cash flow with its present value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedCashFlow {
    /// The undiscounted flow.
    pub cash_flow: CashFlow,
    /// `DF(payment) / DF(anchor)`.
    pub discount_factor: f64,
    /// `amount × discount_factor`.
    pub discounted_amount: f64,
    /// Year fraction from the anchor to the payment date.
    pub time: f64,
}

/// Output of [`discount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Date values are discounted to.
    pub anchor_date: Date,
    /// Requested valuation date, `None` for pricing at issue.
    pub valuation_date: Option<Date>,
    /// Sum of discounted amounts.
    pub npv: f64,
    /// Sum of discounted amounts weighted by time.
    pub weighted_present_value: f64,
    /// `weighted_present_value / npv`, in years.
    pub duration: f64,
    /// Interest accrued at the valuation date.
    pub accrued_interest: f64,
    /// The live flows in payment order.
    pub cash_flows: Vec<DiscountedCashFlow>,
}

impl ValuationResult {
    /// NPV net of accrued interest.
    #[must_use]
    pub fn clean_value(&self) -> f64 {
        self.npv - self.accrued_interest
    }
}

/// Discounts `cash_flows` on `discount_curve` to the anchor date.
///
/// The anchor is the issue date when `valuation_date` is `None` or equal to
/// issue; otherwise it is the valuation date and flows paid before it are
/// dropped. Discount factors are relative to the anchor, so the curve's
/// reference date may precede it.
///
/// # Errors
///
/// - `InvalidDateRange` if `valuation_date` is outside `[issue, maturity)`
/// - `CurveLookup` if a discount factor is unavailable
/// - `PricingFailed` if the live flows sum to zero
/// - accrued interest failures
pub fn discount<C>(
    schedule: &Schedule,
    cash_flows: &[CashFlow],
    discount_curve: &C,
    valuation_date: Option<Date>,
    accrual: &AccrualBasis<'_>,
) -> BondResult<ValuationResult>
where
    C: RateCurve + ?Sized,
{
    let issue = schedule.issue_date();
    let maturity = schedule.maturity_date();

    if let Some(date) = valuation_date {
        if date < issue || date >= maturity {
            return Err(BondError::invalid_date_range(date, maturity));
        }
    }

    let anchor = valuation_date.unwrap_or(issue);
    let at_issue = anchor == issue;
    let day_count = schedule.day_count();

    let df_anchor = discount_curve
        .discount_factor(anchor)
        .map_err(|e| BondError::curve_lookup(anchor, anchor, e))?;
    if df_anchor <= 0.0 || !df_anchor.is_finite() {
        return Err(BondError::pricing_failed(format!(
            "discount factor at {anchor} is {df_anchor}"
        )));
    }

    let mut discounted = Vec::with_capacity(cash_flows.len());
    for flow in cash_flows
        .iter()
        .filter(|f| at_issue || f.payment_date >= anchor)
    {
        let df = discount_curve
            .discount_factor(flow.payment_date)
            .map_err(|e| BondError::curve_lookup(flow.payment_date, flow.payment_date, e))?
            / df_anchor;
        let time = day_count.year_fraction(anchor, flow.payment_date);
        let discounted_amount = flow.amount * df;

        trace!(
            payment_date = %flow.payment_date,
            amount = flow.amount,
            discount_factor = df,
            time,
            "discounted cash flow"
        );
        discounted.push(DiscountedCashFlow {
            cash_flow: *flow,
            discount_factor: df,
            discounted_amount,
            time,
        });
    }

    let npv: f64 = discounted.iter().map(|f| f.discounted_amount).sum();
    let weighted_present_value: f64 = discounted.iter().map(|f| f.discounted_amount * f.time).sum();

    if npv == 0.0 || !npv.is_finite() {
        return Err(BondError::pricing_failed(format!(
            "NPV is {npv}; duration is undefined"
        )));
    }
    let duration = weighted_present_value / npv;

    let accrued = if at_issue {
        0.0
    } else {
        accrued_interest(schedule, anchor, accrual)?
    };

    debug!(
        anchor = %anchor,
        flows = discounted.len(),
        npv,
        duration,
        accrued,
        "valuation complete"
    );

    Ok(ValuationResult {
        anchor_date: anchor,
        valuation_date,
        npv,
        weighted_present_value,
        duration,
        accrued_interest: accrued,
        cash_flows: discounted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflows::compute_fixed_cash_flows;
    use crate::schedule::generate_schedule;
    use approx::assert_relative_eq;
    use bondflow_core::{DayCountConvention, Frequency};
    use bondflow_curves::FlatCurve;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn setup() -> (Schedule, Vec<CashFlow>) {
        let schedule = generate_schedule(
            d(2023, 8, 1),
            d(2026, 8, 1),
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap();
        let flows = compute_fixed_cash_flows(&schedule, 100.0, 0.05, 1.0);
        (schedule, flows)
    }

    #[test]
    fn test_zero_rate_curve_npv_is_sum_of_flows() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2023, 8, 1), 0.0);
        let result = discount(
            &schedule,
            &flows,
            &curve,
            None,
            &AccrualBasis::fixed(100.0, 0.05),
        )
        .unwrap();

        let total: f64 = flows.iter().map(|f| f.amount).sum();
        assert_relative_eq!(result.npv, total, epsilon = 1e-12);
        assert_eq!(result.anchor_date, d(2023, 8, 1));
        assert_eq!(result.accrued_interest, 0.0);
        assert!(result.duration > 2.0 && result.duration < 3.0);
    }

    #[test]
    fn test_anchor_relative_discount_factors() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2023, 1, 1), 0.05);
        let result = discount(
            &schedule,
            &flows,
            &curve,
            None,
            &AccrualBasis::fixed(100.0, 0.05),
        )
        .unwrap();

        let first = result.cash_flows[0];
        let expected = curve.discount_factor(d(2024, 8, 1)).unwrap()
            / curve.discount_factor(d(2023, 8, 1)).unwrap();
        assert_relative_eq!(first.discount_factor, expected, epsilon = 1e-14);
        assert_relative_eq!(
            first.time,
            153.0 / 365.0 + 213.0 / 366.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_mid_life_drops_paid_flows() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2023, 8, 1), 0.03);
        let valuation = d(2024, 9, 1);
        let result = discount(
            &schedule,
            &flows,
            &curve,
            Some(valuation),
            &AccrualBasis::fixed(100.0, 0.05),
        )
        .unwrap();

        assert_eq!(result.cash_flows.len(), 2);
        assert_eq!(result.anchor_date, valuation);
        assert_relative_eq!(result.accrued_interest, 100.0 * 0.05 * 31.0 / 360.0, epsilon = 1e-12);
        assert_relative_eq!(
            result.clean_value(),
            result.npv - result.accrued_interest,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_flow_on_valuation_date_is_live() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2023, 8, 1), 0.03);
        let result = discount(
            &schedule,
            &flows,
            &curve,
            Some(d(2024, 8, 1)),
            &AccrualBasis::fixed(100.0, 0.05),
        )
        .unwrap();

        assert_eq!(result.cash_flows.len(), 3);
        assert_eq!(result.cash_flows[0].discount_factor, 1.0);
        assert_eq!(result.cash_flows[0].time, 0.0);
        assert_eq!(result.accrued_interest, 0.0);
    }

    #[test]
    fn test_valuation_outside_life_fails() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2020, 1, 1), 0.03);
        let basis = AccrualBasis::fixed(100.0, 0.05);

        for date in [d(2023, 7, 31), d(2026, 8, 1), d(2027, 1, 1)] {
            let err = discount(&schedule, &flows, &curve, Some(date), &basis).unwrap_err();
            assert_eq!(err.code(), "InvalidDateRange");
        }
    }

    #[test]
    fn test_zero_npv_fails() {
        let (schedule, flows) = setup();
        let zeroed: Vec<CashFlow> = flows
            .iter()
            .map(|f| CashFlow {
                coupon_amount: 0.0,
                redemption_amount: 0.0,
                amount: 0.0,
                ..*f
            })
            .collect();
        let curve = FlatCurve::new(d(2023, 8, 1), 0.03);
        let err = discount(
            &schedule,
            &zeroed,
            &curve,
            None,
            &AccrualBasis::fixed(100.0, 0.0),
        )
        .unwrap_err();
        assert_eq!(err.code(), "PricingFailed");
    }

    #[test]
    fn test_curve_after_anchor_fails() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2024, 1, 1), 0.03);
        let err = discount(
            &schedule,
            &flows,
            &curve,
            None,
            &AccrualBasis::fixed(100.0, 0.05),
        )
        .unwrap_err();
        assert_eq!(err.code(), "CurveLookupError");
    }

    #[test]
    fn test_result_serializes() {
        let (schedule, flows) = setup();
        let curve = FlatCurve::new(d(2023, 8, 1), 0.03);
        let result = discount(
            &schedule,
            &flows,
            &curve,
            None,
            &AccrualBasis::fixed(100.0, 0.05),
        )
        .unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["anchor_date"], "2023-08-01");
        assert!(json["valuation_date"].is_null());
        assert_eq!(json["cash_flows"].as_array().unwrap().len(), 3);
    }
}
