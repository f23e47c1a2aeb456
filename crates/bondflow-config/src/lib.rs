//! # Bondflow Config
//!
//! Pricing conventions and pricing request documents.
//!
//! - [`PricingConfig`]: day counts, curve interpolation and output
//!   precision, loaded from TOML
//! - [`ConfigLoader`]: finds the configuration file (explicit path, then
//!   `BONDFLOW_CONFIG`, then defaults)
//! - [`PricingRequest`]: one instrument with the curves to value it on
//!
//! ## Example
//!
//! ```rust
//! use bondflow_config::{PricingConfig, PricingRequest, Validate};
//!
//! let config = PricingConfig::from_toml_str("interpolation = \"log_linear\"").unwrap();
//! assert!(config.is_valid());
//!
//! let request = PricingRequest::from_toml_str(r#"
//!     [instrument]
//!     kind = "fixed"
//!     issue_date = "2024-01-15"
//!     maturity_date = "2027-01-15"
//!     face_value = 100.0
//!     coupon_rate = 0.04
//!
//!     [discount_curve]
//!     reference_date = "2024-01-15"
//!     flat_rate = 0.035
//! "#).unwrap();
//! assert!(request.is_valid());
//! let bond = request.instrument(&config).unwrap();
//! let curve = request.discount_curve(&config).unwrap();
//! let result = bond.value(curve.as_ref(), None, None).unwrap();
//! assert!(result.npv > 100.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

use std::path::Path;

pub mod error;
pub mod loader;
pub mod pricing;
pub mod request;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use loader::{ConfigLoader, ConfigSource, CONFIG_ENV_VAR};
pub use pricing::{PricingConfig, MAX_AMOUNT_PRECISION};
pub use request::{CurveSpec, PillarSpec, PricingRequest};

/// Reads a whole file, separating a missing file from other I/O failures.
pub(crate) fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
