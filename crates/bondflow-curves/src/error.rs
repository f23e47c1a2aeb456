//! Error types for curve construction and lookups.

use bondflow_core::{CoreError, Date};
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Requested date is outside the dates the curve has data for.
    #[error("Date {date} out of curve range [{min}, {max}]")]
    OutOfRange {
        /// The requested date.
        date: Date,
        /// First date the curve covers (its reference date).
        min: Date,
        /// Last date the curve covers.
        max: String,
    },

    /// A forward period whose end does not follow its start.
    #[error("Invalid forward period: {start} to {end}")]
    InvalidRange {
        /// Period start.
        start: Date,
        /// Period end.
        end: Date,
    },

    /// Not enough pillars to build a curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Pillar dates are not strictly increasing after the reference date.
    #[error("Non-monotonic pillar dates at index {index}: {prev} >= {current}")]
    NonMonotonicDates {
        /// Index where the violation occurred.
        index: usize,
        /// Previous pillar date (or the reference date).
        prev: Date,
        /// Offending pillar date.
        current: Date,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates an out-of-range error for `date`.
    #[must_use]
    pub fn out_of_range(date: Date, min: Date, max: Option<Date>) -> Self {
        Self::OutOfRange {
            date,
            min,
            max: max.map_or_else(|| "unbounded".to_string(), |d| d.to_string()),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = CurveError::out_of_range(
            Date::from_ymd(2040, 1, 1).unwrap(),
            Date::from_ymd(2025, 1, 1).unwrap(),
            Some(Date::from_ymd(2035, 1, 1).unwrap()),
        );
        assert_eq!(
            err.to_string(),
            "Date 2040-01-01 out of curve range [2025-01-01, 2035-01-01]"
        );
    }
}
