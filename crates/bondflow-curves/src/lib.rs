//! # Bondflow Curves
//!
//! Discount and forward curves for the Bondflow cash-flow engine.
//!
//! The pricing pipeline only ever asks a curve two questions, captured by the
//! [`RateCurve`] trait:
//!
//! - `discount_factor(date)`: present value of one unit paid on `date`
//! - `forward_rate(start, end)`: annually compounded zero-coupon forward
//!   rate for the period
//!
//! Two implementations are provided:
//!
//! - [`ZeroCurve`]: pillar zero rates with linear or log-linear interpolation
//! - [`FlatCurve`]: one rate at every horizon
//!
//! ## Quick Start
//!
//! ```rust
//! use bondflow_core::{Compounding, Date};
//! use bondflow_curves::prelude::*;
//!
//! let today = Date::from_ymd(2025, 1, 1).unwrap();
//! let curve = ZeroCurveBuilder::new(today)
//!     .add_rate(Date::from_ymd(2026, 1, 1).unwrap(), 0.03)
//!     .add_rate(Date::from_ymd(2030, 1, 1).unwrap(), 0.035)
//!     .compounding(Compounding::Annual)
//!     .build()
//!     .unwrap();
//!
//! let df = curve.discount_factor(Date::from_ymd(2027, 1, 1).unwrap()).unwrap();
//! assert!(df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

pub mod curves;
pub mod error;
pub mod interpolation;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{FlatCurve, ZeroCurve, ZeroCurveBuilder};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::interpolation::InterpolationMethod;
    pub use crate::traits::RateCurve;
}

pub use curves::{FlatCurve, ZeroCurve, ZeroCurveBuilder};
pub use error::{CurveError, CurveResult};
pub use interpolation::InterpolationMethod;
pub use traits::RateCurve;
