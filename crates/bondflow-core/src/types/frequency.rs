//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Coupon payment frequency.
///
/// Each variant is a fixed month-count step used by schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// Annual payments (every 12 months)
    Annual,
    /// Semi-annual payments (every 6 months)
    #[default]
    SemiAnnual,
    /// Quarterly payments (every 3 months)
    Quarterly,
    /// Monthly payments (every month)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
        }
    }

    /// Canonical upper-case name (`ANNUAL`, `SEMI-ANNUAL`, ...).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "ANNUAL",
            Frequency::SemiAnnual => "SEMI-ANNUAL",
            Frequency::Quarterly => "QUARTERLY",
            Frequency::Monthly => "MONTHLY",
        }
    }

    /// Returns all supported frequencies.
    #[must_use]
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    /// Parses a frequency from its name, a one-letter code or the number of
    /// payments per year. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', ' '], "-");

        match normalized.as_str() {
            "ANNUAL" | "A" | "1" | "12M" | "1Y" => Ok(Frequency::Annual),
            "SEMI-ANNUAL" | "SEMIANNUAL" | "S" | "2" | "6M" => Ok(Frequency::SemiAnnual),
            "QUARTERLY" | "Q" | "4" | "3M" => Ok(Frequency::Quarterly),
            "MONTHLY" | "M" | "12" | "1M" => Ok(Frequency::Monthly),
            _ => Err(CoreError::unknown_frequency(s)),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.name().to_string()
    }
}

/// Interest compounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest (no compounding)
    Simple,
    /// Annual compounding (1x per year)
    #[default]
    Annual,
    /// Semi-annual compounding (2x per year)
    SemiAnnual,
    /// Quarterly compounding (4x per year)
    Quarterly,
    /// Monthly compounding (12x per year)
    Monthly,
    /// Continuous compounding
    Continuous,
}

impl Compounding {
    /// Returns the number of compounding periods per year, if discrete.
    #[must_use]
    pub fn periods_per_year_opt(&self) -> Option<u32> {
        match self {
            Compounding::Simple | Compounding::Continuous => None,
            Compounding::Annual => Some(1),
            Compounding::SemiAnnual => Some(2),
            Compounding::Quarterly => Some(4),
            Compounding::Monthly => Some(12),
        }
    }

    /// Growth of one unit invested at `rate` for `t` years.
    #[must_use]
    pub fn growth_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Simple => 1.0 + rate * t,
            Compounding::Continuous => (rate * t).exp(),
            _ => {
                let n = f64::from(self.periods_per_year_opt().unwrap_or(1));
                (1.0 + rate / n).powf(n * t)
            }
        }
    }

    /// Discount factor for `rate` over `t` years; 1.0 at `t == 0`.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        if t == 0.0 {
            return 1.0;
        }
        1.0 / self.growth_factor(rate, t)
    }

    /// Rate that produces `growth` over `t` years. Inverse of
    /// [`growth_factor`](Self::growth_factor); requires `t > 0`.
    #[must_use]
    pub fn rate_from_growth(&self, growth: f64, t: f64) -> f64 {
        match self {
            Compounding::Simple => (growth - 1.0) / t,
            Compounding::Continuous => growth.ln() / t,
            _ => {
                let n = f64::from(self.periods_per_year_opt().unwrap_or(1));
                n * (growth.powf(1.0 / (n * t)) - 1.0)
            }
        }
    }

    /// Zero rate implied by discount factor `df` at `t` years.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        self.rate_from_growth(1.0 / df, t)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "Simple",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}
