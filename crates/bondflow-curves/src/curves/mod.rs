//! Curve implementations.
//!
//! - [`ZeroCurve`]: pillar zero rates with interpolation, built through
//!   [`ZeroCurveBuilder`]
//! - [`FlatCurve`]: a single rate at every horizon

mod flat;
mod zero;

pub use flat::FlatCurve;
pub use zero::{ZeroCurve, ZeroCurveBuilder};
