//! Runner configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use u_cartonize_core::{Error, PackingConfig, Result};
use u_cartonize_fulfillment::RateTable;

/// Contents of the optional `--config` TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Packing defaults; per-order fields still win.
    pub packing: PackingConfig,

    /// Rate table for quote requests that carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<RateTable>,
}

impl CliConfig {
    /// Loads the file at `path`, or defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates both sections.
    pub fn validate(&self) -> Result<()> {
        self.packing.validate()?;
        if let Some(rates) = &self.shipping {
            rates.validate()?;
        }
        Ok(())
    }
}
