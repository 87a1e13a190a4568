//! Order lines and their unit-level expansion.

use std::collections::HashMap;

use crate::orientation::OrientationConstraint;
use u_cartonize_core::geometry::Dimensions;
use u_cartonize_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One line of an order: a SKU, how many units, and the physical description
/// shared by every unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LineItem {
    /// Stock keeping unit.
    pub sku: String,

    /// Number of units on the line.
    #[cfg_attr(feature = "serde", serde(default = "default_quantity", alias = "qty"))]
    pub quantity: usize,

    /// Weight of one unit.
    pub weight_kg: f64,

    /// Dimensions of one unit in its natural (upright) orientation.
    pub dimensions_cm: Dimensions,

    /// Whether the unit may be turned at all.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub rotatable: bool,

    /// Keeps the original height axis vertical; length and width may swap.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upright_only: bool,

    /// Nothing may be stacked on a fragile unit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fragile: bool,
}

#[cfg(feature = "serde")]
fn default_quantity() -> usize {
    1
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl LineItem {
    /// Creates a rotatable, non-fragile line with quantity 1.
    pub fn new(sku: impl Into<String>, weight_kg: f64, l: f64, w: f64, h: f64) -> Self {
        Self {
            sku: sku.into(),
            quantity: 1,
            weight_kg,
            dimensions_cm: Dimensions::new(l, w, h),
            rotatable: true,
            upright_only: false,
            fragile: false,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    /// Sets whether the unit may be rotated.
    pub fn with_rotatable(mut self, rotatable: bool) -> Self {
        self.rotatable = rotatable;
        self
    }

    /// Sets the upright-only constraint.
    pub fn with_upright_only(mut self, upright_only: bool) -> Self {
        self.upright_only = upright_only;
        self
    }

    /// Sets the fragile flag.
    pub fn with_fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    /// Returns the orientation constraint implied by the flags.
    ///
    /// A non-rotatable unit is fixed even when it is also marked upright-only.
    pub fn orientation_constraint(&self) -> OrientationConstraint {
        if !self.rotatable {
            OrientationConstraint::Fixed
        } else if self.upright_only {
            OrientationConstraint::Upright
        } else {
            OrientationConstraint::Any
        }
    }

    /// Validates the line.
    pub fn validate(&self) -> Result<()> {
        if self.sku.trim().is_empty() {
            return Err(Error::InvalidItem("SKU must not be empty".into()));
        }

        if self.quantity == 0 {
            return Err(Error::InvalidItem(format!(
                "Quantity for '{}' must be at least 1",
                self.sku
            )));
        }

        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(Error::InvalidItem(format!(
                "Weight for '{}' must be positive, got {}",
                self.sku, self.weight_kg
            )));
        }

        if let Some((axis, value)) = self.dimensions_cm.invalid_axis() {
            return Err(Error::InvalidItem(format!(
                "Dimension {} for '{}' must be positive, got {}",
                axis, self.sku, value
            )));
        }

        Ok(())
    }
}

/// A single physical unit produced by expanding a line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInstance {
    /// Unique id: the SKU followed by the unit's ordinal within that SKU.
    pub id: String,
    /// SKU of the source line.
    pub sku: String,
    pub weight_kg: f64,
    pub dimensions_cm: Dimensions,
    pub orientation: OrientationConstraint,
    pub fragile: bool,
}

impl ItemInstance {
    /// Volume of the unit.
    pub fn volume(&self) -> f64 {
        self.dimensions_cm.volume()
    }
}

/// Expands order lines into one instance per unit.
///
/// Ordinals run per SKU across the whole order, so two lines with the same SKU
/// still produce distinct ids (`A-0`, `A-1`, `A-2`, ...).
pub fn expand_lines(lines: &[LineItem]) -> Vec<ItemInstance> {
    let mut ordinals: HashMap<&str, usize> = HashMap::new();
    let mut instances = Vec::with_capacity(lines.iter().map(|l| l.quantity).sum());

    for line in lines {
        let orientation = line.orientation_constraint();
        for _ in 0..line.quantity {
            let ordinal = ordinals.entry(line.sku.as_str()).or_insert(0);
            instances.push(ItemInstance {
                id: format!("{}-{}", line.sku, ordinal),
                sku: line.sku.clone(),
                weight_kg: line.weight_kg,
                dimensions_cm: line.dimensions_cm,
                orientation,
                fragile: line.fragile,
            });
            *ordinal += 1;
        }
    }

    instances
}
