//! Locating the pricing configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigResult, Validate};
use crate::pricing::PricingConfig;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "BONDFLOW_CONFIG";

/// Where a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A path given by the caller.
    Explicit(PathBuf),
    /// A path read from the environment.
    Environment(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// Returns the file path, if there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Environment(path) => Some(path),
            Self::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{}", path.display()),
            Self::Environment(path) => write!(f, "{} (from ${CONFIG_ENV_VAR})", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Resolves and loads a [`PricingConfig`].
///
/// Lookup order: the explicit path, then the environment variable, then
/// defaults. A path that is named but missing is an error, never a silent
/// fall back to defaults.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env_var: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading [`CONFIG_ENV_VAR`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: None,
            env_var: CONFIG_ENV_VAR.to_string(),
        }
    }

    /// Uses `path` ahead of the environment.
    #[must_use]
    pub fn with_path(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.path = path.map(Into::into);
        self
    }

    /// Reads a different environment variable.
    #[must_use]
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Decides which source to load from.
    #[must_use]
    pub fn resolve(&self) -> ConfigSource {
        if let Some(path) = &self.path {
            return ConfigSource::Explicit(path.clone());
        }
        match std::env::var_os(&self.env_var) {
            Some(value) if !value.is_empty() => ConfigSource::Environment(PathBuf::from(value)),
            _ => ConfigSource::Defaults,
        }
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> ConfigResult<(PricingConfig, ConfigSource)> {
        let source = self.resolve();
        debug!(source = %source, "loading pricing configuration");

        let config = match source.path() {
            Some(path) => PricingConfig::from_toml_file(path)?,
            None => PricingConfig::default(),
        };
        config.validate_or_error()?;
        Ok((config, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    const UNSET_VAR: &str = "BONDFLOW_CONFIG_LOADER_TEST_UNSET";

    #[test]
    fn test_defaults_when_nothing_given() {
        let loader = ConfigLoader::new().with_env_var(UNSET_VAR);
        assert_eq!(loader.resolve(), ConfigSource::Defaults);

        let (config, source) = loader.load().unwrap();
        assert_eq!(config, PricingConfig::default());
        assert!(source.path().is_none());
        assert_eq!(source.to_string(), "built-in defaults");
    }

    #[test]
    fn test_explicit_path_wins() {
        let loader = ConfigLoader::new()
            .with_env_var(UNSET_VAR)
            .with_path(Some("pricing.toml"));
        assert_eq!(
            loader.resolve(),
            ConfigSource::Explicit(PathBuf::from("pricing.toml"))
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ConfigLoader::new()
            .with_path(Some("/definitely/not/here/pricing.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
