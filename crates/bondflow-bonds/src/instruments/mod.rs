//! Instrument types.
//!
//! - [`FixedRateBond`]: fixed coupon bullet bond
//! - [`FloatingRateNote`]: coupons projected from a forward curve
//! - [`Instrument`]: either of the above, for heterogeneous batches
//!
//! Both can be built from an [`InstrumentSpec`], the plain-data form used in
//! pricing request files.

mod fixed_rate;
mod floating_rate;
mod spec;

pub use fixed_rate::{FixedRateBond, FixedRateBondBuilder};
pub use floating_rate::{FloatingRateNote, FloatingRateNoteBuilder};
pub use spec::{InstrumentConventions, InstrumentKind, InstrumentSpec};

use serde::{Deserialize, Serialize};

use bondflow_core::Date;
use bondflow_curves::RateCurve;

use crate::cashflows::CashFlow;
use crate::error::{BondError, BondResult};
use crate::schedule::Schedule;
use crate::valuation::ValuationResult;

/// A fixed or floating instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instrument {
    /// Fixed coupon bond.
    Fixed(FixedRateBond),
    /// Floating rate note.
    Floating(FloatingRateNote),
}

impl Instrument {
    /// Builds the instrument a spec describes, with default conventions.
    pub fn from_spec(spec: &InstrumentSpec) -> BondResult<Self> {
        Self::from_spec_with(spec, &InstrumentConventions::default())
    }

    /// Builds the instrument a spec describes.
    pub fn from_spec_with(
        spec: &InstrumentSpec,
        conventions: &InstrumentConventions,
    ) -> BondResult<Self> {
        match spec.kind {
            InstrumentKind::Fixed => {
                FixedRateBond::from_spec_with(spec, conventions).map(Self::Fixed)
            }
            InstrumentKind::Floating => {
                FloatingRateNote::from_spec_with(spec, conventions).map(Self::Floating)
            }
        }
    }

    /// Returns the instrument kind.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Self::Fixed(_) => InstrumentKind::Fixed,
            Self::Floating(_) => InstrumentKind::Floating,
        }
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        match self {
            Self::Fixed(b) => b.issue_date(),
            Self::Floating(n) => n.issue_date(),
        }
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        match self {
            Self::Fixed(b) => b.maturity_date(),
            Self::Floating(n) => n.maturity_date(),
        }
    }

    /// Returns the face value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        match self {
            Self::Fixed(b) => b.face_value(),
            Self::Floating(n) => n.face_value(),
        }
    }

    /// Generates the accrual schedule.
    pub fn schedule(&self) -> BondResult<Schedule> {
        match self {
            Self::Fixed(b) => b.schedule(),
            Self::Floating(n) => n.schedule(),
        }
    }

    /// Computes the cash flows. Floating notes need `forward_curve`.
    pub fn cash_flows(&self, forward_curve: Option<&dyn RateCurve>) -> BondResult<Vec<CashFlow>> {
        match self {
            Self::Fixed(b) => b.cash_flows(),
            Self::Floating(n) => n.cash_flows(require_forward(forward_curve)?),
        }
    }

    /// Values the instrument. Floating notes need `forward_curve`.
    pub fn value(
        &self,
        discount_curve: &dyn RateCurve,
        forward_curve: Option<&dyn RateCurve>,
        valuation_date: Option<Date>,
    ) -> BondResult<ValuationResult> {
        match self {
            Self::Fixed(b) => b.value(discount_curve, valuation_date),
            Self::Floating(n) => n.value(
                discount_curve,
                require_forward(forward_curve)?,
                valuation_date,
            ),
        }
    }
}

fn require_forward(forward_curve: Option<&dyn RateCurve>) -> BondResult<&dyn RateCurve> {
    forward_curve.ok_or_else(|| BondError::missing_field("forward_curve"))
}

impl From<FixedRateBond> for Instrument {
    fn from(bond: FixedRateBond) -> Self {
        Self::Fixed(bond)
    }
}

impl From<FloatingRateNote> for Instrument {
    fn from(note: FloatingRateNote) -> Self {
        Self::Floating(note)
    }
}
