//! # Bondflow Core
//!
//! Leaf building blocks for the Bondflow cash-flow and discounting engine:
//!
//! - **Types**: [`Date`], [`Frequency`], [`Compounding`]
//! - **Day Count Conventions**: accrual fractions between two dates
//! - **Rates**: conversion between compounded zero-coupon rates and simple rates
//!
//! ## Example
//!
//! ```rust
//! use bondflow_core::prelude::*;
//!
//! let start = Date::parse("2024-01-01").unwrap();
//! let end = Date::parse("2024-04-01").unwrap();
//!
//! let dcf = day_count(start, end, DayCountConvention::Act360).unwrap();
//! assert_eq!(dcf, 91.0 / 360.0);
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
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{day_count, DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rates::{simple_to_zc_rate, zc_to_simple_rate};
    pub use crate::types::{Compounding, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use daycounts::{day_count, DayCountConvention};
pub use error::{CoreError, CoreResult};
pub use types::{Compounding, Date, Frequency};
