//! Error types for the core date and rate utilities.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, day counts and rate conversions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A date could not be constructed or parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A date range that is empty, inverted, or outside the allowed window.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// Range start (ISO-8601).
        start: String,
        /// Range end (ISO-8601).
        end: String,
    },

    /// Unsupported payment frequency.
    #[error("Unknown frequency: '{value}'")]
    UnknownFrequency {
        /// The rejected input.
        value: String,
    },

    /// Unsupported day count convention.
    #[error("Unknown day count convention: '{value}'")]
    UnknownDayCount {
        /// The rejected input.
        value: String,
    },

    /// A rate conversion received an unusable input.
    #[error("Invalid rate: {reason}")]
    InvalidRate {
        /// Why the conversion was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_date_range(start: impl ToString, end: impl ToString) -> Self {
        Self::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Creates an unknown frequency error.
    #[must_use]
    pub fn unknown_frequency(value: impl Into<String>) -> Self {
        Self::UnknownFrequency {
            value: value.into(),
        }
    }

    /// Creates an unknown day count error.
    #[must_use]
    pub fn unknown_day_count(value: impl Into<String>) -> Self {
        Self::UnknownDayCount {
            value: value.into(),
        }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_date_range_display() {
        let err = CoreError::invalid_date_range("2025-06-15", "2025-06-01");
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2025-06-15 to 2025-06-01"
        );
    }

    #[test]
    fn test_unknown_frequency_display() {
        let err = CoreError::unknown_frequency("FORTNIGHTLY");
        assert!(err.to_string().contains("FORTNIGHTLY"));
    }
}
