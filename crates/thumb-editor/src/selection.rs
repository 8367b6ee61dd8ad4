//! The single-element selection and its overlay geometry.

use serde::Serialize;
use thumb_core::{Bounds, ElementId, Position, ThumbnailDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectedType {
    Asset,
    Text,
}

impl From<ElementId> for SelectedType {
    fn from(id: ElementId) -> Self {
        match id {
            ElementId::Asset(_) => Self::Asset,
            ElementId::Text(_) => Self::Text,
        }
    }
}

/// What is selected, plus cached geometry for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    selected: Option<ElementId>,
    /// First-use onboarding hint; cleared for good by the first selection.
    hint_visible: bool,
    bounds: Option<Bounds>,
    anchor: Option<Position>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            selected: None,
            hint_visible: true,
            bounds: None,
            anchor: None,
        }
    }
}

impl Selection {
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_type(&self) -> Option<SelectedType> {
        self.selected.map(SelectedType::from)
    }

    pub fn selected_asset(&self) -> Option<thumb_core::AssetId> {
        self.selected.and_then(|id| id.as_asset())
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Anchor reported next to the overlay (text origin or asset centre).
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Select `id`. Returns `false` (and leaves the selection alone) if it
    /// names an asset that does not exist or is the background layer.
    pub fn select(&mut self, doc: &ThumbnailDocument, id: ElementId) -> bool {
        if !doc.is_selectable(id) {
            return false;
        }
        self.selected = Some(id);
        self.hint_visible = false;
        self.refresh(doc);
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.bounds = None;
        self.anchor = None;
    }

    /// Recompute the cached geometry. A selection whose asset has been
    /// removed or turned into the background is dropped.
    pub fn refresh(&mut self, doc: &ThumbnailDocument) {
        let Some(id) = self.selected else {
            return;
        };
        match doc.element_bounds(id).filter(|_| doc.is_selectable(id)) {
            Some(bounds) => {
                self.bounds = Some(bounds);
                self.anchor = doc.element_anchor(id);
            }
            None => self.clear(),
        }
    }

    /// Move the cached overlay during a drag without touching the document.
    pub(crate) fn preview(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }
}
