//! Packing driver.
//!
//! Expands the order into units, then repeatedly asks every carton type for its
//! best single-box packing of what is left, commits the winner and removes its
//! units from the pool. The loop ends when the pool is empty or when no carton
//! type can take any remaining unit; in the latter case the plan built so far
//! is returned with a constraint violation describing the stranded units.

use rayon::prelude::*;

use crate::carton::CartonType;
use crate::evaluator::{evaluate_catalog, select_best, CartonCandidate};
use crate::item::{expand_lines, ItemInstance};
use crate::request::OrderRequest;
use u_cartonize_core::result::{CommittedCarton, Layer, PackingPlan};
use u_cartonize_core::{ItemPlacement, PackingConfig, Result, Solver};

/// Multi-carton packing solver.
#[derive(Debug, Clone, Default)]
pub struct Cartonizer {
    config: PackingConfig,
}

impl Cartonizer {
    /// Creates a solver with the given configuration.
    pub fn new(config: PackingConfig) -> Self {
        Self { config }
    }

    /// Creates a solver with default configuration.
    pub fn default_config() -> Self {
        Self::new(PackingConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PackingConfig {
        &self.config
    }

    /// Cartonizes one order.
    ///
    /// Fails only on malformed input. Units that fit no carton are reported on
    /// the returned plan.
    pub fn pack(&self, request: &OrderRequest) -> Result<PackingPlan> {
        request.validate(&self.config)?;
        let config = request.effective_config(&self.config);

        let instances = expand_lines(&request.items);
        let mut remaining: Vec<usize> = (0..instances.len()).collect();
        remaining.sort_by(|&a, &b| instances[b].volume().total_cmp(&instances[a].volume()));

        let mut plan = PackingPlan::new(request.order_id.clone());

        while !remaining.is_empty() {
            let candidates = evaluate_catalog(
                &instances,
                &remaining,
                &request.cartons,
                config.volumetric_divisor,
            );
            let rivals = candidates.len();
            let Some(best) = select_best(&candidates) else {
                break;
            };

            let tied = candidates
                .iter()
                .filter(|c| c.packed_count() == best.packed_count())
                .count();
            plan.optimization_reason.push(selection_reason(
                plan.recommended_cartons.len() + 1,
                &request.cartons[best.carton_index],
                best,
                remaining.len(),
                rivals,
                tied,
            ));

            let mut packed = vec![false; instances.len()];
            for idx in best.fill.packed_instances() {
                packed[idx] = true;
            }
            remaining.retain(|idx| !packed[*idx]);

            let carton = commit(&instances, &request.cartons, best, &config);
            log::debug!(
                "order {}: committed {} with {} unit(s), billable {:.2} kg, {} unit(s) left",
                request.order_id,
                carton.carton_id,
                carton.item_count(),
                carton.billable_weight_kg,
                remaining.len()
            );
            plan.recommended_cartons.push(carton);
        }

        let total = instances.len();
        if !remaining.is_empty() {
            log::warn!(
                "order {}: {} of {} unit(s) fit no available carton",
                request.order_id,
                remaining.len(),
                total
            );
            plan.constraint_violations.push(format!(
                "{} item(s) could not be packed: no available carton can accept them ({})",
                remaining.len(),
                stranded_skus(&instances, &remaining)
            ));
            plan.unpacked_items = remaining
                .iter()
                .map(|&idx| instances[idx].id.clone())
                .collect();
        }

        plan.optimization_reason.push(format!(
            "Packed {} of {} item(s) into {} carton(s), total billable weight {:.2} kg",
            plan.packed_count(),
            total,
            plan.carton_count(),
            plan.total_billable_weight()
        ));

        Ok(plan)
    }

    /// Cartonizes many independent orders in parallel.
    ///
    /// Results are returned in input order; one malformed order does not affect
    /// the others.
    pub fn pack_batch(&self, requests: &[OrderRequest]) -> Vec<Result<PackingPlan>> {
        requests.par_iter().map(|r| self.pack(r)).collect()
    }
}

impl Solver for Cartonizer {
    type Request = OrderRequest;
    type Output = PackingPlan;

    fn solve(&self, request: &OrderRequest) -> Result<PackingPlan> {
        self.pack(request)
    }
}

/// Turns the winning candidate into a plan entry.
fn commit(
    instances: &[ItemInstance],
    catalog: &[CartonType],
    candidate: &CartonCandidate,
    config: &PackingConfig,
) -> CommittedCarton {
    let carton = &catalog[candidate.carton_index];

    let layers: Vec<Layer> = candidate
        .fill
        .layers
        .iter()
        .enumerate()
        .map(|(index, filled)| {
            let placements: Vec<ItemPlacement> = filled
                .units
                .iter()
                .map(|unit| {
                    let item = &instances[unit.instance];
                    ItemPlacement::new(
                        item.id.clone(),
                        item.sku.clone(),
                        unit.footprint,
                        filled.z,
                        unit.height,
                    )
                })
                .collect();
            Layer {
                index,
                z_offset_cm: filled.z,
                height_cm: filled.height,
                items: placements.iter().map(|p| p.sku.clone()).collect(),
                placements,
            }
        })
        .collect();

    let (items_packed, unit_ids): (Vec<String>, Vec<String>) = layers
        .iter()
        .flat_map(|l| l.placements.iter())
        .map(|p| (p.sku.clone(), p.id.clone()))
        .unzip();

    CommittedCarton {
        carton_id: carton.carton_id.clone(),
        inner_dimensions_cm: carton.inner_dimensions_cm,
        final_dimensions_cm: carton
            .inner_dimensions_cm
            .grown(config.packing_clearance_cm),
        dead_weight_kg: candidate.dead_weight_kg,
        volumetric_weight_kg: candidate.volumetric_weight_kg,
        billable_weight_kg: candidate.billable_weight_kg,
        items_packed,
        unit_ids,
        layers,
        utilization: candidate.fill.packed_volume / carton.inner_volume(),
    }
}

fn selection_reason(
    ordinal: usize,
    carton: &CartonType,
    best: &CartonCandidate,
    remaining: usize,
    rivals: usize,
    tied: usize,
) -> String {
    let decided_by = if tied > 1 {
        format!(
            "lowest billable weight among {} carton type(s) packing {} item(s)",
            tied,
            best.packed_count()
        )
    } else if rivals > 1 {
        format!("most items packed of {} feasible carton type(s)", rivals)
    } else {
        "only feasible carton type".to_string()
    };

    format!(
        "Carton {}: {} packs {} of {} remaining item(s); billable {:.2} kg (dead {:.2} kg, volumetric {:.2} kg); {}",
        ordinal,
        carton.carton_id,
        best.packed_count(),
        remaining,
        best.billable_weight_kg,
        best.dead_weight_kg,
        best.volumetric_weight_kg,
        decided_by
    )
}

/// Lists stranded SKUs with counts, in first-seen order.
fn stranded_skus(instances: &[ItemInstance], remaining: &[usize]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &idx in remaining {
        let sku = instances[idx].sku.as_str();
        match counts.iter_mut().find(|(s, _)| *s == sku) {
            Some((_, n)) => *n += 1,
            None => counts.push((sku, 1)),
        }
    }
    counts
        .iter()
        .map(|(sku, n)| format!("{} x{}", sku, n))
        .collect::<Vec<_>>()
        .join(", ")
}
