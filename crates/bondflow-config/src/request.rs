//! Pricing request documents.
//!
//! A request names one instrument, the curve to discount it on and, for
//! floating notes, the curve to project coupons from:
//!
//! ```toml
//! valuation_date = "2024-02-01"
//!
//! [instrument]
//! kind = "fixed"
//! issue_date = "2023-08-01"
//! maturity_date = "2026-08-01"
//! face_value = 1500000000.0
//! coupon_rate = 0.035
//! frequency = "ANNUAL"
//!
//! [discount_curve]
//! reference_date = "2023-08-01"
//! pillars = [
//!     { date = "2024-08-01", rate = 0.030 },
//!     { date = "2026-08-01", rate = 0.034 },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bondflow_bonds::instruments::{Instrument, InstrumentKind, InstrumentSpec};
use bondflow_core::{Compounding, Date};
use bondflow_curves::{FlatCurve, InterpolationMethod, RateCurve, ZeroCurveBuilder};

use crate::error::{ConfigResult, Validate, ValidationError};
use crate::pricing::PricingConfig;

/// One pillar of a curve document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PillarSpec {
    /// Pillar date, `YYYY-MM-DD`.
    pub date: String,
    /// Zero rate at the pillar.
    pub rate: f64,
}

/// A curve described either by pillars or by a single flat rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveSpec {
    /// Curve reference date, `YYYY-MM-DD`.
    pub reference_date: String,
    /// Pillar zero rates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pillars: Vec<PillarSpec>,
    /// A single rate for every horizon, instead of pillars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_rate: Option<f64>,
    /// Compounding of the quoted rates (annual by default).
    #[serde(default)]
    pub compounding: Compounding,
    /// Interpolation override; the pricing configuration applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolation: Option<InterpolationMethod>,
}

impl CurveSpec {
    /// Builds the described curve.
    pub fn build(&self, config: &PricingConfig) -> ConfigResult<Box<dyn RateCurve>> {
        let reference_date = Date::parse(&self.reference_date)?;

        if let Some(rate) = self.flat_rate {
            debug!(reference_date = %reference_date, rate, "building flat curve");
            return Ok(Box::new(FlatCurve::with_compounding(
                reference_date,
                rate,
                self.compounding,
            )));
        }

        let pillars = self
            .pillars
            .iter()
            .map(|p| Ok((Date::parse(&p.date)?, p.rate)))
            .collect::<ConfigResult<Vec<_>>>()?;

        let curve = ZeroCurveBuilder::new(reference_date)
            .add_rates(pillars)
            .compounding(self.compounding)
            .interpolation(self.interpolation.unwrap_or(config.interpolation))
            .allow_extrapolation(config.allow_extrapolation)
            .build()?;
        Ok(Box::new(curve))
    }
}

impl Validate for CurveSpec {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = Date::parse(&self.reference_date) {
            errors.push(ValidationError::new("reference_date", e.to_string()));
        }

        match (self.flat_rate, self.pillars.is_empty()) {
            (Some(_), false) => errors.push(ValidationError::with_rule(
                "flat_rate",
                "Give either flat_rate or pillars, not both",
                "single_source",
            )),
            (None, true) => errors.push(ValidationError::with_rule(
                "pillars",
                "A curve needs pillars or a flat_rate",
                "single_source",
            )),
            (Some(rate), true) if !rate.is_finite() => {
                errors.push(ValidationError::new("flat_rate", "Rate must be finite"));
            }
            _ => {}
        }

        for (i, pillar) in self.pillars.iter().enumerate() {
            let parent = format!("pillars[{i}]");
            if let Err(e) = Date::parse(&pillar.date) {
                errors.push(ValidationError::new("date", e.to_string()).nested(&parent));
            }
            if !pillar.rate.is_finite() {
                errors.push(ValidationError::new("rate", "Rate must be finite").nested(&parent));
            }
        }

        errors
    }
}

/// A complete pricing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRequest {
    /// Valuation date; pricing is at issue when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<String>,
    /// The instrument to price.
    pub instrument: InstrumentSpec,
    /// Curve the flows are discounted on.
    pub discount_curve: CurveSpec,
    /// Curve floating coupons are projected from; required for floating notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_curve: Option<CurveSpec>,
}

impl PricingRequest {
    /// Parses a request from TOML.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML request file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_str(&crate::read_file(path.as_ref())?)
    }

    /// Parses a request from JSON.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Returns the parsed valuation date.
    pub fn valuation_date(&self) -> ConfigResult<Option<Date>> {
        self.valuation_date
            .as_deref()
            .map(Date::parse)
            .transpose()
            .map_err(Into::into)
    }

    /// Builds the instrument with the configuration's conventions.
    pub fn instrument(&self, config: &PricingConfig) -> ConfigResult<Instrument> {
        Ok(Instrument::from_spec_with(
            &self.instrument,
            &config.conventions(),
        )?)
    }

    /// Builds the discount curve.
    pub fn discount_curve(&self, config: &PricingConfig) -> ConfigResult<Box<dyn RateCurve>> {
        self.discount_curve.build(config)
    }

    /// Builds the forward curve, if the request has one.
    pub fn forward_curve(
        &self,
        config: &PricingConfig,
    ) -> ConfigResult<Option<Box<dyn RateCurve>>> {
        self.forward_curve
            .as_ref()
            .map(|spec| spec.build(config))
            .transpose()
    }
}

impl Validate for PricingRequest {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.valuation_date() {
            errors.push(ValidationError::new("valuation_date", e.to_string()));
        }

        if let Err(e) = Instrument::from_spec(&self.instrument) {
            errors.push(ValidationError::with_rule(
                "instrument",
                e.to_string(),
                e.code(),
            ));
        }

        errors.extend(
            self.discount_curve
                .validate()
                .into_iter()
                .map(|e| e.nested("discount_curve")),
        );

        match (&self.forward_curve, self.instrument.kind) {
            (Some(spec), _) => errors.extend(
                spec.validate()
                    .into_iter()
                    .map(|e| e.nested("forward_curve")),
            ),
            (None, InstrumentKind::Floating) => errors.push(ValidationError::with_rule(
                "forward_curve",
                "Floating notes need a forward curve",
                "floating_requires_forward",
            )),
            (None, InstrumentKind::Fixed) => {}
        }

        errors
    }
}
