//! Pricing conventions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use bondflow_bonds::instruments::InstrumentConventions;
use bondflow_core::DayCountConvention;
use bondflow_curves::InterpolationMethod;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Conventions applied to every pricing run.
///
/// Every field has a default, so an empty document is a valid configuration:
///
/// ```toml
/// schedule_day_count = "ACT/ACT ISDA"
/// fixed_accrual_day_count = "ACT/360"
/// interpolation = "linear"
/// allow_extrapolation = false
/// amount_precision = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Day count for schedule period fractions and duration times.
    #[serde(default = "default_schedule_day_count")]
    pub schedule_day_count: DayCountConvention,

    /// Day count for fixed coupons and fixed accrued interest.
    ///
    /// Market practice for the notes priced here is ACT/360, and every
    /// default path uses it. Other conventions are an opt-in override.
    #[serde(default = "default_fixed_accrual_day_count")]
    pub fixed_accrual_day_count: DayCountConvention,

    /// Interpolation for pillar curves that don't set their own.
    #[serde(default)]
    pub interpolation: InterpolationMethod,

    /// Hold the last pillar rate flat beyond the curve's last date.
    #[serde(default)]
    pub allow_extrapolation: bool,

    /// Decimal places for reported amounts.
    #[serde(default = "default_amount_precision")]
    pub amount_precision: u32,
}

fn default_schedule_day_count() -> DayCountConvention {
    DayCountConvention::ActActIsda
}

fn default_fixed_accrual_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

fn default_amount_precision() -> u32 {
    2
}

/// Largest supported `amount_precision`.
pub const MAX_AMOUNT_PRECISION: u32 = 12;

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            schedule_day_count: default_schedule_day_count(),
            fixed_accrual_day_count: default_fixed_accrual_day_count(),
            interpolation: InterpolationMethod::default(),
            allow_extrapolation: false,
            amount_precision: default_amount_precision(),
        }
    }
}

impl PricingConfig {
    /// Parses a configuration from TOML.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        Self::from_toml_str(&crate::read_file(path)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Sets the schedule day count.
    #[must_use]
    pub fn with_schedule_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.schedule_day_count = day_count;
        self
    }

    /// Sets the interpolation method.
    #[must_use]
    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Enables or disables flat extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Returns the instrument conventions this configuration implies.
    #[must_use]
    pub fn conventions(&self) -> InstrumentConventions {
        InstrumentConventions {
            schedule_day_count: self.schedule_day_count,
            fixed_accrual_day_count: self.fixed_accrual_day_count,
        }
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.amount_precision > MAX_AMOUNT_PRECISION {
            errors.push(ValidationError::with_rule(
                "amount_precision",
                format!(
                    "Amount precision {} exceeds maximum of {MAX_AMOUNT_PRECISION}",
                    self.amount_precision
                ),
                "max_precision",
            ));
        }

        errors
    }
}

impl std::str::FromStr for PricingConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
