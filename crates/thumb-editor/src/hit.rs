//! Hit testing: point → element lookup.
//!
//! Text is painted above every asset (headline, then subtitle), so it is
//! tested first, then assets front-to-back. The background layer is never
//! hit; clicking it counts as clicking empty canvas. Boxes are axis-aligned
//! and ignore rotation.

use thumb_core::{ElementId, TextRole, ThumbnailDocument};

const TEXT_FRONT_TO_BACK: [TextRole; 2] = [TextRole::Subtitle, TextRole::Headline];

/// Find the topmost element at canvas position (px, py).
/// Returns `None` for empty canvas.
pub fn hit_test(doc: &ThumbnailDocument, px: f32, py: f32) -> Option<ElementId> {
    for role in TEXT_FRONT_TO_BACK {
        let id = ElementId::Text(role);
        if doc.element_bounds(id).is_some_and(|b| b.contains(px, py)) {
            return Some(id);
        }
    }

    doc.paint_order()
        .into_iter()
        .rev()
        .filter(|a| !a.is_background)
        .find(|a| a.bounds().contains(px, py))
        .map(|a| ElementId::Asset(a.id))
}
