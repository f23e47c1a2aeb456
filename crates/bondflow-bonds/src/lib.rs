//! # Bondflow Bonds
//!
//! Cash-flow engine for fixed coupon bonds and floating rate notes.
//!
//! The pipeline runs strictly upward, each stage a pure function over the
//! previous stage's immutable output:
//!
//! 1. [`schedule`]: accrual periods rolled backward from maturity
//! 2. [`cashflows`]: fixed (ACT/360) or forward-projected floating coupons
//!    plus bullet redemption
//! 3. [`valuation`]: discounting to an anchor date for NPV and duration
//! 4. [`accrued`]: accrued interest at the valuation date, compounded daily
//!    for floating notes
//!
//! [`instruments`] wraps the pipeline behind builders and [`portfolio`]
//! values batches of independent instruments.
//!
//! ## Example
//!
//! ```rust
//! use bondflow_bonds::prelude::*;
//! use bondflow_core::{Date, Frequency};
//! use bondflow_curves::FlatCurve;
//!
//! let bond = FixedRateBond::builder()
//!     .issue_date(Date::from_ymd(2023, 8, 1).unwrap())
//!     .maturity_date(Date::from_ymd(2026, 8, 1).unwrap())
//!     .face_value(1_500_000_000.0)
//!     .coupon_rate(0.035)
//!     .frequency(Frequency::Annual)
//!     .build()
//!     .unwrap();
//!
//! let curve = FlatCurve::new(Date::from_ymd(2023, 8, 1).unwrap(), 0.03);
//! let result = bond.value(&curve, Some(Date::from_ymd(2024, 2, 1).unwrap())).unwrap();
//! assert!(result.accrued_interest > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::return_self_not_must_use)]

pub mod accrued;
pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod portfolio;
pub mod schedule;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accrued::{accrued_interest, AccrualBasis};
    pub use crate::cashflows::{
        compute_fixed_cash_flows, compute_floating_cash_flows, compute_live_floating_cash_flows,
        CashFlow,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{
        FixedRateBond, FloatingRateNote, Instrument, InstrumentConventions, InstrumentKind,
        InstrumentSpec,
    };
    pub use crate::portfolio::value_batch;
    pub use crate::schedule::{generate_schedule, Period, Schedule, ScheduleConfig};
    pub use crate::valuation::{discount, DiscountedCashFlow, ValuationResult};
}

pub use accrued::AccrualBasis;
pub use cashflows::CashFlow;
pub use error::{BondError, BondResult};
pub use instruments::{FixedRateBond, FloatingRateNote, Instrument, InstrumentSpec};
pub use schedule::{Period, Schedule};
pub use valuation::{DiscountedCashFlow, ValuationResult};
