//! Domain types for the cash-flow engine.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`Frequency`]: Coupon payment frequency
//! - [`Compounding`]: Interest compounding convention

mod date;
mod frequency;

pub use date::Date;
pub use frequency::{Compounding, Frequency};
