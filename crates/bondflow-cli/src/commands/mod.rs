//! CLI command implementations.

pub mod config;
pub mod daycount;
pub mod price;
pub mod schedule;

pub use config::ConfigArgs;
pub use daycount::DaycountArgs;
pub use price::PriceArgs;
pub use schedule::ScheduleArgs;

use std::path::PathBuf;

use bondflow_config::{ConfigLoader, ConfigSource, PricingConfig};
use bondflow_core::{Date, DayCountConvention, Frequency};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and status lines.
    pub quiet: bool,
    /// Explicit configuration path.
    pub config: Option<PathBuf>,
}

impl Context {
    /// Loads the pricing configuration for this invocation.
    pub fn load_config(&self) -> anyhow::Result<(PricingConfig, ConfigSource)> {
        Ok(ConfigLoader::new()
            .with_path(self.config.as_deref())
            .load()?)
    }

    /// True when decorations (headers, status lines) should be printed.
    pub fn decorated(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a coupon frequency name.
pub fn parse_frequency(s: &str) -> CliResult<Frequency> {
    s.parse().map_err(|_| CliError::InvalidArgument {
        name: "frequency",
        value: s.to_string(),
        expected: Frequency::all()
            .iter()
            .map(Frequency::name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Parses a day count convention name.
pub fn parse_day_count(s: &str) -> CliResult<DayCountConvention> {
    s.parse().map_err(|_| CliError::InvalidArgument {
        name: "day count",
        value: s.to_string(),
        expected: DayCountConvention::all()
            .iter()
            .map(DayCountConvention::name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
