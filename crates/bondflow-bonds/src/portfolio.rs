//! Batch valuation of independent instruments.
//!
//! With the `parallel` feature the batch is spread over rayon's thread pool;
//! curves are shared read-only. Results come back in input order either way.

use tracing::debug;

use bondflow_core::Date;
use bondflow_curves::RateCurve;

use crate::error::BondResult;
use crate::instruments::Instrument;
use crate::valuation::ValuationResult;

/// Values every instrument in `instruments`.
///
/// Each entry succeeds or fails on its own; one failure does not abort the
/// batch.
#[cfg(feature = "parallel")]
pub fn value_batch(
    instruments: &[Instrument],
    discount_curve: &dyn RateCurve,
    forward_curve: Option<&dyn RateCurve>,
    valuation_date: Option<Date>,
) -> Vec<BondResult<ValuationResult>> {
    use rayon::prelude::*;

    debug!(instruments = instruments.len(), "valuing batch in parallel");
    instruments
        .par_iter()
        .map(|instrument| instrument.value(discount_curve, forward_curve, valuation_date))
        .collect()
}

/// Values every instrument in `instruments`.
///
/// Each entry succeeds or fails on its own; one failure does not abort the
/// batch.
#[cfg(not(feature = "parallel"))]
pub fn value_batch(
    instruments: &[Instrument],
    discount_curve: &dyn RateCurve,
    forward_curve: Option<&dyn RateCurve>,
    valuation_date: Option<Date>,
) -> Vec<BondResult<ValuationResult>> {
    debug!(instruments = instruments.len(), "valuing batch");
    instruments
        .iter()
        .map(|instrument| instrument.value(discount_curve, forward_curve, valuation_date))
        .collect()
}

/// Sum of NPVs over the successful results.
#[must_use]
pub fn total_npv(results: &[BondResult<ValuationResult>]) -> f64 {
    results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|r| r.npv)
        .sum()
}
