//! Carton candidate evaluator.
//!
//! Scores the best single-box packing each carton type achieves for the
//! current pool, and picks between carton types with a two-key greedy rule:
//! most units packed first, then lowest billable weight. Exact ties keep the
//! carton listed first in the catalog.

use std::cmp::Ordering;

use crate::carton::CartonType;
use crate::item::ItemInstance;
use crate::layer::{pack_carton, CartonFill};

/// The packing one carton type achieves for the current pool.
#[derive(Debug, Clone)]
pub struct CartonCandidate {
    /// Index of the carton type in the catalog.
    pub carton_index: usize,
    pub fill: CartonFill,
    /// Tare plus packed weight.
    pub dead_weight_kg: f64,
    /// Inner volume over the divisor.
    pub volumetric_weight_kg: f64,
    /// Greater of dead and volumetric weight.
    pub billable_weight_kg: f64,
}

impl CartonCandidate {
    /// Number of packed units.
    pub fn packed_count(&self) -> usize {
        self.fill.packed_count()
    }

    /// Selection order: `Greater` means `self` should be chosen over `other`.
    pub fn compare(&self, other: &CartonCandidate) -> Ordering {
        self.packed_count()
            .cmp(&other.packed_count())
            .then_with(|| other.billable_weight_kg.total_cmp(&self.billable_weight_kg))
    }
}

/// Packs the pool into one carton of the given type.
///
/// Returns `None` when not a single unit fits.
pub fn evaluate_carton(
    instances: &[ItemInstance],
    pool: &[usize],
    catalog: &[CartonType],
    carton_index: usize,
    volumetric_divisor: f64,
) -> Option<CartonCandidate> {
    let carton = &catalog[carton_index];
    let fill = pack_carton(instances, pool, carton);
    if fill.packed_count() == 0 {
        return None;
    }

    let dead_weight_kg = fill.load_kg;
    let volumetric_weight_kg = carton.volumetric_weight(volumetric_divisor);

    Some(CartonCandidate {
        carton_index,
        fill,
        dead_weight_kg,
        volumetric_weight_kg,
        billable_weight_kg: dead_weight_kg.max(volumetric_weight_kg),
    })
}

/// Evaluates every carton type and returns all candidates that packed something,
/// in catalog order.
pub fn evaluate_catalog(
    instances: &[ItemInstance],
    pool: &[usize],
    catalog: &[CartonType],
    volumetric_divisor: f64,
) -> Vec<CartonCandidate> {
    (0..catalog.len())
        .filter_map(|i| evaluate_carton(instances, pool, catalog, i, volumetric_divisor))
        .collect()
}

/// Picks the winning candidate; the earliest one wins exact ties.
pub fn select_best(candidates: &[CartonCandidate]) -> Option<&CartonCandidate> {
    candidates.iter().reduce(|best, candidate| {
        if candidate.compare(best) == Ordering::Greater {
            candidate
        } else {
            best
        }
    })
}
