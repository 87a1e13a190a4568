//! Shelf placer: corner-anchor placement of footprints on one layer floor.
//!
//! Candidate anchors are the origin plus, for every rectangle already on the
//! floor, its right-edge corner `(x + l, y)` and its far-edge corner
//! `(x, y + w)`. Anchors are scanned top-left first (ascending `y`, then `x`)
//! and the first in-bounds, collision-free one wins.

use u_cartonize_core::geometry::Rect;

/// Collects candidate anchors in scan order.
///
/// Duplicates are kept; they evaluate identically, so only the first copy can
/// ever be returned.
pub fn candidate_anchors(placed: &[Rect]) -> Vec<(f64, f64)> {
    let mut anchors = Vec::with_capacity(1 + placed.len() * 2);
    anchors.push((0.0, 0.0));
    for rect in placed {
        anchors.push((rect.max_x(), rect.y));
        anchors.push((rect.x, rect.max_y()));
    }

    anchors.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.total_cmp(&b.0)));
    anchors
}

/// Finds a position for an `l x w` footprint on a `max_l x max_w` floor.
///
/// Returns `None` when no anchor works; the caller then leaves the item for a
/// later layer.
pub fn find_position(placed: &[Rect], l: f64, w: f64, max_l: f64, max_w: f64) -> Option<Rect> {
    candidate_anchors(placed)
        .into_iter()
        .map(|(x, y)| Rect::new(x, y, l, w))
        .find(|candidate| {
            candidate.fits_within(max_l, max_w) && !placed.iter().any(|p| p.overlaps(candidate))
        })
}
