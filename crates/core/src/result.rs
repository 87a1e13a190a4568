//! Packing plan representation.

use crate::geometry::Dimensions;
use crate::placement::ItemPlacement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One horizontal slice of a committed carton.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Layer {
    /// Layer index from the bottom (0-based).
    pub index: usize,
    /// Floor height of the layer inside the carton.
    pub z_offset_cm: f64,
    /// Height of the tallest item placed in the layer.
    pub height_cm: f64,
    /// SKUs placed in the layer, in placement order.
    pub items: Vec<String>,
    /// Full placement records for the layer.
    pub placements: Vec<ItemPlacement>,
}

impl Layer {
    /// Returns the height of the layer's ceiling.
    pub fn top(&self) -> f64 {
        self.z_offset_cm + self.height_cm
    }
}

/// A carton chosen for the plan together with its contents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CommittedCarton {
    /// Carton type id.
    pub carton_id: String,
    /// Inner dimensions used for placement.
    pub inner_dimensions_cm: Dimensions,
    /// Reported outer dimensions (inner plus clearance).
    pub final_dimensions_cm: Dimensions,
    /// Tare plus packed item weights.
    pub dead_weight_kg: f64,
    /// Inner volume over the volumetric divisor.
    pub volumetric_weight_kg: f64,
    /// Greater of dead and volumetric weight.
    pub billable_weight_kg: f64,
    /// SKUs of every packed unit, bottom layer first.
    pub items_packed: Vec<String>,
    /// Unit ids of every packed unit, same order as `items_packed`.
    pub unit_ids: Vec<String>,
    /// Layer breakdown, bottom first.
    pub layers: Vec<Layer>,
    /// Packed item volume over inner volume (0.0 - 1.0).
    pub utilization: f64,
}

impl CommittedCarton {
    /// Number of packed units.
    pub fn item_count(&self) -> usize {
        self.unit_ids.len()
    }

    /// Sum of committed layer heights.
    pub fn used_height(&self) -> f64 {
        self.layers.iter().map(|l| l.height_cm).sum()
    }

    /// Iterates over every placement in the carton.
    pub fn placements(&self) -> impl Iterator<Item = &ItemPlacement> {
        self.layers.iter().flat_map(|l| l.placements.iter())
    }
}

/// Output of a cartonization run.
///
/// A plan may be partial: cartons committed before the driver stalled are kept
/// and the stranded units are described in `constraint_violations`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PackingPlan {
    /// Order this plan belongs to.
    pub order_id: String,
    /// Committed cartons in selection order.
    pub recommended_cartons: Vec<CommittedCarton>,
    /// Human-readable reasons for each selection.
    pub optimization_reason: Vec<String>,
    /// Human-readable constraint violations.
    pub constraint_violations: Vec<String>,
    /// Unit ids that could not be packed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unpacked_items: Vec<String>,
}

impl PackingPlan {
    /// Creates an empty plan for an order.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            ..Default::default()
        }
    }

    /// Returns true if every unit was packed.
    pub fn is_complete(&self) -> bool {
        self.constraint_violations.is_empty() && self.unpacked_items.is_empty()
    }

    /// Number of committed cartons.
    pub fn carton_count(&self) -> usize {
        self.recommended_cartons.len()
    }

    /// Number of packed units across all cartons.
    pub fn packed_count(&self) -> usize {
        self.recommended_cartons.iter().map(|c| c.item_count()).sum()
    }

    /// Number of units left unpacked.
    pub fn unpacked_count(&self) -> usize {
        self.unpacked_items.len()
    }

    /// Sum of billable weights.
    pub fn total_billable_weight(&self) -> f64 {
        self.recommended_cartons
            .iter()
            .map(|c| c.billable_weight_kg)
            .sum()
    }

    /// Sum of dead weights.
    pub fn total_dead_weight(&self) -> f64 {
        self.recommended_cartons.iter().map(|c| c.dead_weight_kg).sum()
    }
}

/// Summary statistics for a plan.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanSummary {
    pub order_id: String,
    pub cartons: usize,
    pub packed: usize,
    pub unpacked: usize,
    pub total_billable_weight_kg: f64,
    /// Mean carton utilization in percent.
    pub mean_utilization_percent: f64,
}

impl From<&PackingPlan> for PlanSummary {
    fn from(plan: &PackingPlan) -> Self {
        let mean_utilization = if plan.recommended_cartons.is_empty() {
            0.0
        } else {
            plan.recommended_cartons
                .iter()
                .map(|c| c.utilization)
                .sum::<f64>()
                / plan.recommended_cartons.len() as f64
        };
        Self {
            order_id: plan.order_id.clone(),
            cartons: plan.carton_count(),
            packed: plan.packed_count(),
            unpacked: plan.unpacked_count(),
            total_billable_weight_kg: plan.total_billable_weight(),
            mean_utilization_percent: mean_utilization * 100.0,
        }
    }
}
