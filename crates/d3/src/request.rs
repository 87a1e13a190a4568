//! Cartonization request.

use crate::carton::CartonType;
use crate::item::LineItem;
use u_cartonize_core::{PackingConfig, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An order to cartonize together with the carton catalog to choose from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrderRequest {
    /// Order identifier, echoed on the plan.
    pub order_id: String,

    /// Overrides the configured volumetric divisor.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub volumetric_divisor: Option<f64>,

    /// Overrides the configured packing clearance.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub packing_clearance_cm: Option<f64>,

    /// Order lines.
    pub items: Vec<LineItem>,

    /// Available carton types, in preference order for exact ties.
    pub cartons: Vec<CartonType>,
}

impl OrderRequest {
    /// Creates an empty request.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            ..Default::default()
        }
    }

    /// Adds an order line.
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Adds a carton type.
    pub fn with_carton(mut self, carton: CartonType) -> Self {
        self.cartons.push(carton);
        self
    }

    /// Sets the volumetric divisor override.
    pub fn with_volumetric_divisor(mut self, divisor: f64) -> Self {
        self.volumetric_divisor = Some(divisor);
        self
    }

    /// Sets the packing clearance override.
    pub fn with_packing_clearance(mut self, clearance_cm: f64) -> Self {
        self.packing_clearance_cm = Some(clearance_cm);
        self
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> usize {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Resolves the effective configuration for this request.
    pub fn effective_config(&self, base: &PackingConfig) -> PackingConfig {
        base.with_overrides(self.volumetric_divisor, self.packing_clearance_cm)
    }

    /// Validates every line and carton type and the effective configuration.
    pub fn validate(&self, base: &PackingConfig) -> Result<()> {
        self.effective_config(base).validate()?;
        for item in &self.items {
            item.validate()?;
        }
        for carton in &self.cartons {
            carton.validate()?;
        }
        Ok(())
    }

    /// Parses a request from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| u_cartonize_core::Error::SerializationError(e.to_string()))
    }
}
