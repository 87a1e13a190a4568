//! Carton types (the catalog of available boxes).

use u_cartonize_core::geometry::Dimensions;
use u_cartonize_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box type from the catalog. The same type may be used for several
/// cartons in one plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CartonType {
    /// Carton type identifier.
    pub carton_id: String,

    /// Usable interior (length, width, height).
    pub inner_dimensions_cm: Dimensions,

    /// Tare weight of the empty carton.
    #[cfg_attr(feature = "serde", serde(default))]
    pub empty_weight_kg: f64,

    /// Maximum gross weight (tare included).
    pub max_weight_kg: f64,
}

impl CartonType {
    /// Creates a new carton type with zero tare.
    pub fn new(carton_id: impl Into<String>, l: f64, w: f64, h: f64, max_weight_kg: f64) -> Self {
        Self {
            carton_id: carton_id.into(),
            inner_dimensions_cm: Dimensions::new(l, w, h),
            empty_weight_kg: 0.0,
            max_weight_kg,
        }
    }

    /// Sets the tare weight.
    pub fn with_empty_weight(mut self, kg: f64) -> Self {
        self.empty_weight_kg = kg;
        self
    }

    /// Returns the interior length.
    pub fn length(&self) -> f64 {
        self.inner_dimensions_cm.l
    }

    /// Returns the interior width.
    pub fn width(&self) -> f64 {
        self.inner_dimensions_cm.w
    }

    /// Returns the interior height.
    pub fn height(&self) -> f64 {
        self.inner_dimensions_cm.h
    }

    /// Returns the interior volume.
    pub fn inner_volume(&self) -> f64 {
        self.inner_dimensions_cm.volume()
    }

    /// Inner volume divided by the carrier divisor.
    pub fn volumetric_weight(&self, divisor: f64) -> f64 {
        self.inner_volume() / divisor
    }

    /// Validates the carton type.
    pub fn validate(&self) -> Result<()> {
        if self.carton_id.trim().is_empty() {
            return Err(Error::InvalidCarton("Carton id must not be empty".into()));
        }

        if let Some((axis, value)) = self.inner_dimensions_cm.invalid_axis() {
            return Err(Error::InvalidCarton(format!(
                "Inner dimension {} for '{}' must be positive, got {}",
                axis, self.carton_id, value
            )));
        }

        if !self.empty_weight_kg.is_finite() || self.empty_weight_kg < 0.0 {
            return Err(Error::InvalidCarton(format!(
                "Empty weight for '{}' cannot be negative, got {}",
                self.carton_id, self.empty_weight_kg
            )));
        }

        if !self.max_weight_kg.is_finite() || self.max_weight_kg <= 0.0 {
            return Err(Error::InvalidCarton(format!(
                "Maximum weight for '{}' must be positive, got {}",
                self.carton_id, self.max_weight_kg
            )));
        }

        Ok(())
    }
}
