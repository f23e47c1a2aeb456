//! Plain-data instrument descriptions.

use serde::{Deserialize, Serialize};

use bondflow_core::{Date, DayCountConvention, Frequency};

use crate::cashflows::FIXED_ACCRUAL_DAY_COUNT;
use crate::error::{BondError, BondResult};

/// Instrument type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Fixed coupon bond.
    Fixed,
    /// Floating rate note.
    Floating,
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Floating => write!(f, "floating"),
        }
    }
}

fn default_frequency() -> String {
    Frequency::default().name().to_string()
}

fn default_redemption_rate() -> f64 {
    1.0
}

/// Instrument parameters as they arrive at the boundary: dates and
/// conventions are strings and are parsed when the instrument is built.
///
/// ```toml
/// kind = "fixed"
/// issue_date = "2023-08-01"
/// maturity_date = "2026-08-01"
/// face_value = 1500000000.0
/// coupon_rate = 0.035
/// frequency = "ANNUAL"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentSpec {
    /// Fixed or floating.
    pub kind: InstrumentKind,
    /// Issue date, `YYYY-MM-DD`.
    pub issue_date: String,
    /// Maturity date, `YYYY-MM-DD`.
    pub maturity_date: String,
    /// Face value.
    pub face_value: f64,
    /// Annual coupon rate; required for fixed instruments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_rate: Option<f64>,
    /// Payment frequency name.
    #[serde(default = "default_frequency")]
    pub frequency: String,
    /// Fraction of face repaid at maturity.
    #[serde(default = "default_redemption_rate")]
    pub redemption_rate: f64,
    /// Schedule day count; the pricing default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count: Option<String>,
}

impl InstrumentSpec {
    pub(crate) fn issue(&self) -> BondResult<Date> {
        Ok(Date::parse(&self.issue_date)?)
    }

    pub(crate) fn maturity(&self) -> BondResult<Date> {
        Ok(Date::parse(&self.maturity_date)?)
    }

    pub(crate) fn parsed_frequency(&self) -> BondResult<Frequency> {
        Ok(self.frequency.parse()?)
    }

    pub(crate) fn schedule_day_count(
        &self,
        conventions: &InstrumentConventions,
    ) -> BondResult<DayCountConvention> {
        match &self.day_count {
            Some(name) => Ok(name.parse()?),
            None => Ok(conventions.schedule_day_count),
        }
    }

    pub(crate) fn expect_kind(&self, kind: InstrumentKind) -> BondResult<()> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(BondError::invalid_spec(format!(
                "expected a {kind} instrument, got {}",
                self.kind
            )))
        }
    }
}

/// Conventions applied to instruments built from specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConventions {
    /// Day count for schedule period fractions and duration times.
    pub schedule_day_count: DayCountConvention,
    /// Day count for fixed coupons and fixed accrued interest.
    pub fixed_accrual_day_count: DayCountConvention,
}

impl Default for InstrumentConventions {
    fn default() -> Self {
        Self {
            schedule_day_count: DayCountConvention::ActActIsda,
            fixed_accrual_day_count: FIXED_ACCRUAL_DAY_COUNT,
        }
    }
}

/// Shared instrument validation.
pub(crate) fn validate_terms(
    issue: Date,
    maturity: Date,
    face_value: f64,
    redemption_rate: f64,
) -> BondResult<()> {
    if maturity <= issue {
        return Err(BondError::invalid_date_range(issue, maturity));
    }
    if !face_value.is_finite() || face_value <= 0.0 {
        return Err(BondError::invalid_spec(format!(
            "face_value must be positive, got {face_value}"
        )));
    }
    if !redemption_rate.is_finite() || redemption_rate < 0.0 {
        return Err(BondError::invalid_spec(format!(
            "redemption_rate must be non-negative, got {redemption_rate}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let spec: InstrumentSpec = serde_json::from_str(
            r#"{
                "kind": "floating",
                "issue_date": "2025-01-15",
                "maturity_date": "2028-01-15",
                "face_value": 1000000.0
            }"#,
        )
        .unwrap();

        assert_eq!(spec.kind, InstrumentKind::Floating);
        assert_eq!(spec.frequency, "SEMI-ANNUAL");
        assert_eq!(spec.redemption_rate, 1.0);
        assert!(spec.coupon_rate.is_none());
        assert_eq!(spec.parsed_frequency().unwrap(), Frequency::SemiAnnual);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<InstrumentSpec, _> = serde_json::from_str(
            r#"{
                "kind": "fixed",
                "issue_date": "2025-01-15",
                "maturity_date": "2028-01-15",
                "face_value": 100.0,
                "coupon": 0.05
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_day_count_override() {
        let spec = InstrumentSpec {
            kind: InstrumentKind::Fixed,
            issue_date: "2025-01-15".into(),
            maturity_date: "2028-01-15".into(),
            face_value: 100.0,
            coupon_rate: Some(0.05),
            frequency: "A".into(),
            redemption_rate: 1.0,
            day_count: Some("30/360".into()),
        };
        let conventions = InstrumentConventions::default();
        assert_eq!(
            spec.schedule_day_count(&conventions).unwrap(),
            DayCountConvention::Thirty360US
        );
    }

    #[test]
    fn test_validate_terms() {
        let issue = Date::from_ymd(2025, 1, 1).unwrap();
        let maturity = Date::from_ymd(2030, 1, 1).unwrap();
        assert!(validate_terms(issue, maturity, 100.0, 1.0).is_ok());
        assert_eq!(
            validate_terms(maturity, issue, 100.0, 1.0).unwrap_err().code(),
            "InvalidDateRange"
        );
        assert_eq!(
            validate_terms(issue, maturity, 0.0, 1.0).unwrap_err().code(),
            "InvalidSpec"
        );
        assert_eq!(
            validate_terms(issue, maturity, 100.0, -0.1).unwrap_err().code(),
            "InvalidSpec"
        );
    }
}
