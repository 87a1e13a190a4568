//! Axis-aligned dimension and footprint primitives.
//!
//! All lengths are centimetres. Boxes are never rotated by arbitrary angles,
//! only re-assigned to a different axis, so every shape is a plain triple or
//! an axis-aligned rectangle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used for bound and height comparisons.
pub const EPSILON: f64 = 1e-9;

/// Length x width x height of an item or a carton interior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimensions {
    /// Length (x axis).
    #[cfg_attr(feature = "serde", serde(rename = "L", alias = "l", alias = "length"))]
    pub l: f64,
    /// Width (y axis).
    #[cfg_attr(feature = "serde", serde(rename = "W", alias = "w", alias = "width"))]
    pub w: f64,
    /// Height (z axis).
    #[cfg_attr(feature = "serde", serde(rename = "H", alias = "h", alias = "height"))]
    pub h: f64,
}

impl Dimensions {
    /// Creates a new dimension triple.
    pub fn new(l: f64, w: f64, h: f64) -> Self {
        Self { l, w, h }
    }

    /// Returns the enclosed volume.
    pub fn volume(&self) -> f64 {
        self.l * self.w * self.h
    }

    /// Returns the base area (`l * w`).
    pub fn footprint_area(&self) -> f64 {
        self.l * self.w
    }

    /// Returns a copy grown by `amount` on every axis.
    pub fn grown(&self, amount: f64) -> Self {
        Self::new(self.l + amount, self.w + amount, self.h + amount)
    }

    /// Returns the values sorted ascending.
    pub fn sorted(&self) -> [f64; 3] {
        let mut values = [self.l, self.w, self.h];
        values.sort_by(f64::total_cmp);
        values
    }

    /// Returns true if `other` uses exactly the same three values in some order.
    pub fn is_permutation_of(&self, other: &Dimensions) -> bool {
        self.sorted() == other.sorted()
    }

    /// Returns the first axis that is not a finite positive number, if any.
    pub fn invalid_axis(&self) -> Option<(&'static str, f64)> {
        [("L", self.l), ("W", self.w), ("H", self.h)]
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
    }
}

/// An axis-aligned rectangle on a layer's floor.
///
/// `(x, y)` is the anchor corner; the rectangle covers `[x, x + l) x [y, y + w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub l: f64,
    pub w: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, l: f64, w: f64) -> Self {
        Self { x, y, l, w }
    }

    /// Returns the far x edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.l
    }

    /// Returns the far y edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.w
    }

    /// Returns the area.
    pub fn area(&self) -> f64 {
        self.l * self.w
    }

    /// Half-open intersection test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let no_overlap_x = self.x >= other.max_x() - EPSILON || other.x >= self.max_x() - EPSILON;
        let no_overlap_y = self.y >= other.max_y() - EPSILON || other.y >= self.max_y() - EPSILON;
        !(no_overlap_x || no_overlap_y)
    }

    /// Returns true if the rectangle lies inside `[0, max_l] x [0, max_w]`.
    pub fn fits_within(&self, max_l: f64, max_w: f64) -> bool {
        self.x >= -EPSILON
            && self.y >= -EPSILON
            && self.max_x() <= max_l + EPSILON
            && self.max_y() <= max_w + EPSILON
    }
}
