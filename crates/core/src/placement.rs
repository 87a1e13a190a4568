//! Placement of one item instance inside a carton.

use crate::geometry::{Dimensions, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and oriented size of a packed item instance.
///
/// `(x, y)` is the anchor corner on the layer floor and `z` is the floor height
/// of the layer the item sits in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemPlacement {
    /// Unique unit id (`sku` plus ordinal).
    pub id: String,
    /// SKU of the order line the unit came from.
    pub sku: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Oriented length.
    pub l: f64,
    /// Oriented width.
    pub w: f64,
    /// Oriented height.
    pub h: f64,
}

impl ItemPlacement {
    /// Creates a new placement.
    pub fn new(
        id: impl Into<String>,
        sku: impl Into<String>,
        footprint: Rect,
        z: f64,
        h: f64,
    ) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            x: footprint.x,
            y: footprint.y,
            z,
            l: footprint.l,
            w: footprint.w,
            h,
        }
    }

    /// Returns the floor rectangle covered by this item.
    pub fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.l, self.w)
    }

    /// Returns the oriented dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.l, self.w, self.h)
    }

    /// Returns the height of the item's top face.
    pub fn top(&self) -> f64 {
        self.z + self.h
    }
}
