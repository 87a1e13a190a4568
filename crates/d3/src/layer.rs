//! Layer packer.
//!
//! Fills one carton from the floor upward. Each layer is a 2D shelf-packing
//! fill over the candidate pool; its height is the tallest item placed in it.
//! Non-fragile units are stacked first. Fragile units are held back until no
//! further non-fragile unit fits, then go on top: as their own final layer, or
//! on the free floor of the top layer when no headroom is left. Nothing is
//! ever placed above a fragile unit.

use crate::carton::CartonType;
use crate::item::ItemInstance;
use crate::orientation::resolve_orientations;
use crate::shelf::find_position;
use u_cartonize_core::geometry::{Rect, EPSILON};

/// One unit placed by the layer packer, still referring to the instance table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedUnit {
    /// Index into the instance table.
    pub instance: usize,
    /// Floor rectangle on the layer.
    pub footprint: Rect,
    /// Oriented height.
    pub height: f64,
}

/// A committed layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledLayer {
    /// Floor height of the layer.
    pub z: f64,
    /// Height of the tallest unit in the layer.
    pub height: f64,
    pub units: Vec<PlacedUnit>,
}

impl FilledLayer {
    fn contains(&self, idx: usize) -> bool {
        self.units.iter().any(|u| u.instance == idx)
    }
}

/// Working state for packing one carton, owned by a single `pack_carton` call.
#[derive(Debug, Clone)]
struct PackingState {
    /// Gross weight so far (tare plus placed units).
    load_kg: f64,
    /// Sum of committed layer heights.
    height_used: f64,
    /// Committed layers, bottom first.
    layers: Vec<FilledLayer>,
}

impl PackingState {
    fn new(carton: &CartonType) -> Self {
        Self {
            load_kg: carton.empty_weight_kg,
            height_used: 0.0,
            layers: Vec::new(),
        }
    }

    /// Fills a new layer at the current height from `candidates`.
    ///
    /// Returns `None` when there is no headroom or nothing fits.
    fn open_layer(
        &mut self,
        instances: &[ItemInstance],
        candidates: &[usize],
        carton: &CartonType,
    ) -> Option<FilledLayer> {
        let headroom = carton.height() - self.height_used;
        if headroom <= EPSILON {
            return None;
        }

        let mut units = Vec::new();
        fill_floor(
            instances,
            candidates,
            carton,
            headroom,
            &mut self.load_kg,
            &mut units,
        );
        if units.is_empty() {
            return None;
        }

        let height = units.iter().map(|u| u.height).fold(0.0, f64::max);
        Some(FilledLayer {
            z: self.height_used,
            height,
            units,
        })
    }

    fn commit(&mut self, layer: FilledLayer, carton: &CartonType) {
        self.height_used += layer.height;
        log::trace!(
            "carton {}: layer {} at z={} height={} units={}",
            carton.carton_id,
            self.layers.len(),
            layer.z,
            layer.height,
            layer.units.len()
        );
        self.layers.push(layer);
    }

    /// Places `candidates` on the free floor of the top layer, which may grow
    /// up to the carton ceiling. Returns the number of units added.
    fn top_up(
        &mut self,
        instances: &[ItemInstance],
        candidates: &[usize],
        carton: &CartonType,
    ) -> usize {
        let Some(top) = self.layers.last_mut() else {
            return 0;
        };
        let before = top.units.len();
        fill_floor(
            instances,
            candidates,
            carton,
            carton.height() - top.z,
            &mut self.load_kg,
            &mut top.units,
        );

        top.height = top.units.iter().map(|u| u.height).fold(0.0, f64::max);
        self.height_used = top.z + top.height;
        top.units.len() - before
    }
}

/// Result of packing one carton.
#[derive(Debug, Clone)]
pub struct CartonFill {
    /// Committed layers, bottom first.
    pub layers: Vec<FilledLayer>,
    /// Gross weight (tare plus packed units).
    pub load_kg: f64,
    /// Sum of packed unit volumes.
    pub packed_volume: f64,
}

impl CartonFill {
    /// Number of packed units.
    pub fn packed_count(&self) -> usize {
        self.layers.iter().map(|l| l.units.len()).sum()
    }

    /// Instance indices of every packed unit, bottom layer first.
    pub fn packed_instances(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers
            .iter()
            .flat_map(|l| l.units.iter().map(|u| u.instance))
    }

    /// Sum of committed layer heights.
    pub fn used_height(&self) -> f64 {
        self.layers.iter().map(|l| l.height).sum()
    }
}

/// Orders a pool for layer filling: non-fragile first, then by descending volume.
///
/// The sort is stable, so equal keys keep the incoming order.
pub fn order_pool(instances: &[ItemInstance], pool: &[usize]) -> Vec<usize> {
    let mut ordered = pool.to_vec();
    ordered.sort_by(|&a, &b| {
        let (ia, ib) = (&instances[a], &instances[b]);
        ia.fragile
            .cmp(&ib.fragile)
            .then_with(|| ib.volume().total_cmp(&ia.volume()))
    });
    ordered
}

/// Packs as much of `pool` as possible into one carton.
///
/// `pool` holds indices into `instances`. Units that do not fit are simply
/// left out; the caller decides what to do with them.
pub fn pack_carton(instances: &[ItemInstance], pool: &[usize], carton: &CartonType) -> CartonFill {
    let (mut sturdy, fragile): (Vec<usize>, Vec<usize>) = order_pool(instances, pool)
        .into_iter()
        .partition(|&idx| !instances[idx].fragile);
    let mut state = PackingState::new(carton);

    while !sturdy.is_empty() {
        let Some(layer) = state.open_layer(instances, &sturdy, carton) else {
            break;
        };
        sturdy.retain(|&idx| !layer.contains(idx));
        state.commit(layer, carton);
    }

    if !fragile.is_empty() {
        match state.open_layer(instances, &fragile, carton) {
            Some(layer) => state.commit(layer, carton),
            None => {
                let added = state.top_up(instances, &fragile, carton);
                if added > 0 {
                    log::trace!(
                        "carton {}: {} fragile unit(s) added to the top layer",
                        carton.carton_id,
                        added
                    );
                }
            }
        }
    }

    let packed_volume = state
        .layers
        .iter()
        .flat_map(|l| l.units.iter())
        .map(|u| instances[u.instance].volume())
        .sum();

    CartonFill {
        layers: state.layers,
        load_kg: state.load_kg,
        packed_volume,
    }
}

/// Places candidates on one layer floor until a full pass places nothing.
///
/// `units` may already hold placements; their footprints are respected.
/// Each pass offers the still-unplaced candidates in pool order, so a unit
/// skipped early is retried once later units have opened new anchors.
fn fill_floor(
    instances: &[ItemInstance],
    candidates: &[usize],
    carton: &CartonType,
    headroom: f64,
    load_kg: &mut f64,
    units: &mut Vec<PlacedUnit>,
) {
    let mut footprints: Vec<Rect> = units.iter().map(|u| u.footprint).collect();
    let mut pending: Vec<usize> = candidates.to_vec();

    loop {
        let before = pending.len();
        pending.retain(|&idx| {
            let item = &instances[idx];
            if *load_kg + item.weight_kg > carton.max_weight_kg + EPSILON {
                return true;
            }

            let orientations = resolve_orientations(&item.dimensions_cm, item.orientation, headroom);
            let placed = orientations.iter().find_map(|o| {
                find_position(&footprints, o.l, o.w, carton.length(), carton.width())
                    .map(|rect| (rect, o.h))
            });

            match placed {
                Some((rect, h)) => {
                    footprints.push(rect);
                    units.push(PlacedUnit {
                        instance: idx,
                        footprint: rect,
                        height: h,
                    });
                    *load_kg += item.weight_kg;
                    false
                }
                None => true,
            }
        });

        if pending.is_empty() || pending.len() == before {
            break;
        }
    }
}
