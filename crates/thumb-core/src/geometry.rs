//! Grid snapping and alignment guides.
//!
//! Pure functions, no state. `compute_alignment_guides` runs on every
//! pointer-move of a drag, so it is a single linear pass over the other
//! elements.

use crate::model::{Bounds, Position};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default closeness (px) under which two edges produce a guide.
pub const DEFAULT_GUIDE_TOLERANCE: f32 = 5.0;
/// Guides shown at once during a drag.
pub const MAX_VISIBLE_GUIDES: usize = 4;
/// Smallest usable grid cell.
pub const MIN_GRID_SIZE: f32 = 1.0;

/// A transient alignment line.
///
/// `is_horizontal` guides are y-positions (top/middle/bottom matches),
/// the others are x-positions (left/center/right matches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub position: f32,
    pub is_horizontal: bool,
    pub diff: f32,
}

/// The six reference lines of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Bounds {
    pub fn edges(&self) -> Edges {
        Edges {
            left: self.x,
            right: self.x + self.width,
            top: self.y,
            bottom: self.y + self.height,
            center_x: self.x + self.width / 2.0,
            center_y: self.y + self.height / 2.0,
        }
    }
}

/// Round each axis to the nearest multiple of `grid_size`.
/// Non-positive grid sizes are treated as [`MIN_GRID_SIZE`].
pub fn snap_to_grid(position: Position, grid_size: f32) -> Position {
    let g = if grid_size.is_finite() {
        grid_size.max(MIN_GRID_SIZE)
    } else {
        MIN_GRID_SIZE
    };
    Position::new((position.x / g).round() * g, (position.y / g).round() * g)
}

/// Guides between `moving` and every box in `others`, closest first.
///
/// A guide sits on the other box's edge and is emitted whenever the
/// matching edge of the moving box is strictly within `tolerance`.
pub fn compute_alignment_guides<'a, I>(moving: &Bounds, others: I, tolerance: f32) -> Vec<Guide>
where
    I: IntoIterator<Item = &'a Bounds>,
{
    let m = moving.edges();
    let mut guides = Vec::new();

    let mut push_if_close = |value: f32, target: f32, is_horizontal: bool| {
        let diff = (value - target).abs();
        if diff < tolerance {
            guides.push(Guide {
                position: target,
                is_horizontal,
                diff,
            });
        }
    };

    for other in others {
        let o = other.edges();
        // Vertical lines
        push_if_close(m.left, o.left, false);
        push_if_close(m.center_x, o.center_x, false);
        push_if_close(m.right, o.right, false);
        // Horizontal lines
        push_if_close(m.top, o.top, true);
        push_if_close(m.center_y, o.center_y, true);
        push_if_close(m.bottom, o.bottom, true);
    }

    guides.sort_by(|a, b| a.diff.total_cmp(&b.diff));
    log::trace!("guides: {} candidates", guides.len());
    guides
}

/// Keep the `limit` closest guides of an already sorted list.
pub fn closest_guides(guides: &[Guide], limit: usize) -> SmallVec<[Guide; MAX_VISIBLE_GUIDES]> {
    guides.iter().take(limit).copied().collect()
}
