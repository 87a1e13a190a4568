//! Packing configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common configuration for the cartonization solver.
///
/// Values set on an individual order request take precedence over these.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PackingConfig {
    /// Carrier divisor for volumetric weight (cm³ per kg).
    pub volumetric_divisor: f64,

    /// Clearance added to each inner dimension when reporting outer dimensions.
    /// Never used during placement.
    pub packing_clearance_cm: f64,
}

impl PackingConfig {
    /// Default carrier divisor.
    pub const DEFAULT_VOLUMETRIC_DIVISOR: f64 = 5000.0;

    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the volumetric divisor.
    pub fn with_volumetric_divisor(mut self, divisor: f64) -> Self {
        self.volumetric_divisor = divisor;
        self
    }

    /// Sets the packing clearance.
    pub fn with_packing_clearance(mut self, clearance_cm: f64) -> Self {
        self.packing_clearance_cm = clearance_cm;
        self
    }

    /// Returns a copy with any per-request overrides applied.
    pub fn with_overrides(&self, divisor: Option<f64>, clearance_cm: Option<f64>) -> Self {
        Self {
            volumetric_divisor: divisor.unwrap_or(self.volumetric_divisor),
            packing_clearance_cm: clearance_cm.unwrap_or(self.packing_clearance_cm),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.volumetric_divisor.is_finite() || self.volumetric_divisor <= 0.0 {
            return Err(Error::ConfigError(format!(
                "Volumetric divisor must be positive, got {}",
                self.volumetric_divisor
            )));
        }
        if !self.packing_clearance_cm.is_finite() || self.packing_clearance_cm < 0.0 {
            return Err(Error::ConfigError(format!(
                "Packing clearance cannot be negative, got {}",
                self.packing_clearance_cm
            )));
        }
        Ok(())
    }
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            volumetric_divisor: Self::DEFAULT_VOLUMETRIC_DIVISOR,
            packing_clearance_cm: 0.0,
        }
    }
}
