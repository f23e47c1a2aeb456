//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// An argument value that does not parse.
    #[error("Invalid {name}: {value}. Expected one of: {expected}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Accepted values.
        expected: String,
    },

    /// Configuration or request failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
