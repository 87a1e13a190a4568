//! Orientation resolver.
//!
//! Turns an item's natural dimensions and rotation permissions into the list
//! of axis-aligned `(l, w, h)` triples that may be tried on a layer.

use u_cartonize_core::geometry::{Dimensions, EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation constraint for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationConstraint {
    /// Any axis may point up; footprint may be turned.
    #[default]
    Any,
    /// Original height stays vertical; length and width may swap.
    Upright,
    /// No rotation allowed.
    Fixed,
}

impl OrientationConstraint {
    /// Axis permutations allowed by the constraint, as indices into `(L, W, H)`.
    ///
    /// For `Any` the order is: H up, then W up, then L up, each followed by its
    /// footprint swap.
    pub fn allowed_axes(&self) -> &'static [(usize, usize, usize)] {
        match self {
            OrientationConstraint::Fixed => &[(0, 1, 2)],
            OrientationConstraint::Upright => &[(0, 1, 2), (1, 0, 2)],
            OrientationConstraint::Any => &[
                (0, 1, 2),
                (1, 0, 2),
                (0, 2, 1),
                (2, 0, 1),
                (1, 2, 0),
                (2, 1, 0),
            ],
        }
    }
}

/// Enumerates the orientations of `dims` whose height fits under `max_height`.
///
/// Duplicate triples (cubes, square footprints) are removed keeping the first
/// occurrence, and the result is ordered by descending footprint area so wide
/// placements are attempted first. Equal areas keep enumeration order.
pub fn resolve_orientations(
    dims: &Dimensions,
    constraint: OrientationConstraint,
    max_height: f64,
) -> Vec<Dimensions> {
    let axes = [dims.l, dims.w, dims.h];
    let mut orientations: Vec<Dimensions> = Vec::with_capacity(6);

    for &(li, wi, hi) in constraint.allowed_axes() {
        let candidate = Dimensions::new(axes[li], axes[wi], axes[hi]);
        if candidate.h > max_height + EPSILON {
            continue;
        }
        if !orientations.contains(&candidate) {
            orientations.push(candidate);
        }
    }

    orientations.sort_by(|a, b| b.footprint_area().total_cmp(&a.footprint_area()));
    orientations
}
