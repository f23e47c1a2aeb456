//! Error types for schedule generation and pricing.

use bondflow_core::{CoreError, Date};
use bondflow_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while building instruments or pricing them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid instrument specification.
    #[error("Invalid instrument specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Pricing produced no usable result.
    #[error("Pricing failed: {reason}")]
    PricingFailed {
        /// Description of the failure.
        reason: String,
    },

    /// A curve could not answer a discount factor or forward rate query.
    #[error("Curve lookup failed for {start} to {end}: {source}")]
    CurveLookup {
        /// Start of the queried period (the date itself for discount factors).
        start: Date,
        /// End of the queried period.
        end: Date,
        /// The underlying curve error.
        #[source]
        source: CurveError,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a pricing failed error.
    #[must_use]
    pub fn pricing_failed(reason: impl Into<String>) -> Self {
        Self::PricingFailed {
            reason: reason.into(),
        }
    }

    /// Creates a curve lookup error for the period `start..end`.
    #[must_use]
    pub fn curve_lookup(start: Date, end: Date, source: CurveError) -> Self {
        Self::CurveLookup { start, end, source }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_date_range(start: Date, end: Date) -> Self {
        Self::Core(CoreError::invalid_date_range(start, end))
    }

    /// Returns the stable error code reported to callers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSpec { .. } => "InvalidSpec",
            Self::MissingField { .. } => "MissingField",
            Self::PricingFailed { .. } => "PricingFailed",
            Self::CurveLookup { .. } => "CurveLookupError",
            Self::Core(err) => match err {
                CoreError::InvalidDate { .. } => "InvalidDate",
                CoreError::InvalidDateRange { .. } => "InvalidDateRange",
                CoreError::UnknownFrequency { .. } => "UnknownFrequency",
                CoreError::UnknownDayCount { .. } => "UnknownDayCount",
                CoreError::InvalidRate { .. } => "InvalidRate",
            },
        }
    }
}
