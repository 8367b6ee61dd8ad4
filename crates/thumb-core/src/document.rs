//! The canonical state of one thumbnail composition.
//!
//! `ThumbnailDocument` is the single source of truth the editor mutates
//! and the rendering surface draws from. All writes go through the
//! methods here so that the cross-field rules hold:
//!
//! - new assets paint above every existing asset,
//! - at most one asset is the background layer,
//! - asset ids are unique,
//! - asset sizes never drop below [`MIN_ASSET_SIZE`],
//! - toggling the text outline keeps `font_outline_width` in sync.

use crate::error::{DocumentError, DocumentResult};
use crate::id::AssetId;
use crate::layout;
use crate::model::*;
use crate::patch::{AssetPatch, StylePatch, TextPatch};
use crate::preset::StylePreset;
use crate::zorder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailDocument {
    canvas: CanvasSize,
    style: Style,
    text: TextSettings,
}

impl Default for ThumbnailDocument {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::HD,
            style: Style::default(),
            text: TextSettings::default(),
        }
    }
}

impl ThumbnailDocument {
    /// Create a document with default style and text and no assets.
    pub fn new(canvas: CanvasSize) -> DocumentResult<Self> {
        if !canvas.is_valid() {
            return Err(DocumentError::InvalidCanvasSize {
                width: canvas.width,
                height: canvas.height,
            });
        }
        Ok(Self {
            canvas,
            ..Self::default()
        })
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> DocumentResult<()> {
        if !self.canvas.is_valid() {
            return Err(DocumentError::InvalidCanvasSize {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        let backgrounds = self.style.assets.iter().filter(|a| a.is_background).count();
        if backgrounds > 1 {
            return Err(DocumentError::MultipleBackgrounds(backgrounds));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.style.assets.iter().find(|a| !seen.insert(a.id)) {
            return Err(DocumentError::DuplicateAssetId(dup.id.to_string()));
        }
        Ok(())
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn text(&self) -> &TextSettings {
        &self.text
    }

    pub fn assets(&self) -> &[Asset] {
        &self.style.assets
    }

    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.style.assets.iter().find(|a| a.id == id)
    }

    pub fn background_asset(&self) -> Option<&Asset> {
        self.style.assets.iter().find(|a| a.is_background)
    }

    pub fn headline_position(&self) -> Position {
        layout::headline_position(&self.text, self.canvas)
    }

    pub fn subtitle_position(&self) -> Position {
        layout::subtitle_position(&self.text, self.canvas)
    }

    pub fn text_position(&self, role: TextRole) -> Position {
        layout::text_position(&self.text, self.canvas, role)
    }

    /// Current box of any element, `None` for an unknown asset.
    pub fn element_bounds(&self, id: ElementId) -> Option<Bounds> {
        match id {
            ElementId::Text(role) => Some(layout::text_bounds(&self.text, self.canvas, role)),
            ElementId::Asset(asset_id) => self.asset(asset_id).map(Asset::bounds),
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        match id {
            ElementId::Text(_) => true,
            ElementId::Asset(asset_id) => self.asset(asset_id).is_some(),
        }
    }

    /// Whether the element can be selected on the canvas. The background
    /// layer is a backdrop, not an editable element.
    pub fn is_selectable(&self, id: ElementId) -> bool {
        match id {
            ElementId::Text(_) => true,
            ElementId::Asset(asset_id) => self.asset(asset_id).is_some_and(|a| !a.is_background),
        }
    }

    /// The point a selection overlay reports: a text role's anchor, or the
    /// centre of an asset.
    pub fn element_anchor(&self, id: ElementId) -> Option<Position> {
        match id {
            ElementId::Text(role) => Some(self.text_position(role)),
            ElementId::Asset(asset_id) => self.asset(asset_id).map(|a| {
                let (x, y) = a.bounds().center();
                Position::new(x, y)
            }),
        }
    }

    /// Human-readable name of an element for the selection overlay.
    pub fn element_name(&self, id: ElementId) -> &'static str {
        match id {
            ElementId::Text(TextRole::Headline) => "Headline",
            ElementId::Text(TextRole::Subtitle) => "Subtitle",
            ElementId::Asset(asset_id) => self
                .asset(asset_id)
                .map_or("Asset", |a| a.category.label()),
        }
    }

    /// `"X: 12, Y: 34"` for the element's anchor, empty if it is gone.
    pub fn coordinates_label(&self, id: ElementId) -> String {
        self.element_anchor(id)
            .map(|p| format!("X: {}, Y: {}", p.x.round(), p.y.round()))
            .unwrap_or_default()
    }

    /// Assets in paint order (background first).
    pub fn paint_order(&self) -> Vec<&Asset> {
        zorder::paint_order(&self.style.assets)
    }

    // ─── Style / text ────────────────────────────────────────────────────

    /// Merge a style patch. Nested regions merge field by field.
    pub fn update_style(&mut self, patch: &StylePatch) {
        patch.apply(&mut self.style);
        if patch.assets.is_some() {
            self.normalize_assets();
        }
        log::debug!("style updated");
    }

    /// Merge a text patch. Toggling `text_outline` also sets the style's
    /// outline width to 1 (on) or 0 (off).
    pub fn update_text(&mut self, patch: &TextPatch) {
        let was_outlined = self.text.text_outline;
        patch.apply(&mut self.text);
        if let Some(outline) = patch.text_outline
            && outline != was_outlined
        {
            self.style.font_outline_width = if outline { 1.0 } else { 0.0 };
        }
        log::debug!("text updated");
    }

    /// Apply a template preset. Text content and placement are untouched.
    pub fn apply_preset(&mut self, preset: &StylePreset) {
        log::debug!("applying preset {}", preset.id);
        self.update_style(&preset.to_patch());
    }

    pub fn set_headline_position(&mut self, pos: Option<Position>) {
        self.set_text_position(TextRole::Headline, pos);
    }

    pub fn set_subtitle_position(&mut self, pos: Option<Position>) {
        self.set_text_position(TextRole::Subtitle, pos);
    }

    /// Pin a text role to an absolute position, or `None` to return it to
    /// alignment-derived placement.
    pub fn set_text_position(&mut self, role: TextRole, pos: Option<Position>) {
        *self.text.custom_position_mut(role) = pos;
        log::debug!("{role:?} position -> {pos:?}");
    }

    /// Set the wrap width of a text role, floored at [`MIN_TEXT_WIDTH`].
    pub fn set_text_width(&mut self, role: TextRole, width: f32) {
        *self.text.wrap_width_mut(role) = Some(width.max(MIN_TEXT_WIDTH));
    }

    // ─── Assets ──────────────────────────────────────────────────────────

    /// Append an asset above all current ones and return its fresh id.
    pub fn add_asset(&mut self, new: NewAsset) -> AssetId {
        let id = AssetId::generate();
        let z_index = zorder::next_front_z(&mut self.style.assets);
        if new.is_background {
            self.clear_background_flag();
        }
        let mut transform = new.transform;
        transform.clamp();
        self.style.assets.push(Asset {
            id,
            src: new.src,
            category: new.category,
            placement: new.placement,
            transform,
            z_index,
            is_background: new.is_background,
        });
        log::debug!("added asset {id} at z {z_index}");
        id
    }

    /// Add an asset picked in the library, filling in default geometry.
    /// Background picks become a full-bleed layer.
    pub fn add_picked_asset(&mut self, pick: AssetPick) -> AssetId {
        let transform = if pick.is_background_intent {
            AssetTransform {
                x: 0.0,
                y: 0.0,
                width: self.canvas.width_f(),
                height: self.canvas.height_f(),
                rotation: 0.0,
                opacity: 1.0,
            }
        } else {
            let size = pick.category.default_size();
            AssetTransform {
                x: pick.placement.default_x(),
                y: 300.0,
                width: size,
                height: size,
                rotation: 0.0,
                opacity: 1.0,
            }
        };
        self.add_asset(NewAsset {
            src: pick.src,
            category: pick.category,
            placement: pick.placement,
            transform,
            is_background: pick.is_background_intent,
        })
    }

    /// Merge `patch` into the asset. Returns `false` if `id` is unknown.
    pub fn update_asset(&mut self, id: AssetId, patch: &AssetPatch) -> bool {
        let Some(idx) = self.style.assets.iter().position(|a| a.id == id) else {
            log::debug!("update_asset: {id} not found");
            return false;
        };
        if patch.is_background == Some(true) {
            self.clear_background_flag();
        }
        patch.apply(&mut self.style.assets[idx]);
        true
    }

    pub fn remove_asset(&mut self, id: AssetId) -> Option<Asset> {
        let idx = self.style.assets.iter().position(|a| a.id == id)?;
        log::debug!("removed asset {id}");
        Some(self.style.assets.remove(idx))
    }

    pub fn remove_background(&mut self) -> Option<Asset> {
        let id = self.background_asset()?.id;
        self.remove_asset(id)
    }

    pub fn bring_forward(&mut self, id: AssetId) -> bool {
        zorder::bring_forward(&mut self.style.assets, id)
    }

    pub fn send_backward(&mut self, id: AssetId) -> bool {
        zorder::send_backward(&mut self.style.assets, id)
    }

    pub fn bring_to_front(&mut self, id: AssetId) -> bool {
        zorder::bring_to_front(&mut self.style.assets, id)
    }

    pub fn send_to_back(&mut self, id: AssetId) -> bool {
        zorder::send_to_back(&mut self.style.assets, id)
    }

    fn clear_background_flag(&mut self) {
        for asset in &mut self.style.assets {
            asset.is_background = false;
        }
    }

    /// Re-establish asset invariants after a wholesale list replacement:
    /// the last entry for a repeated id wins, sizes are floored, and only
    /// the last background-flagged asset keeps its flag.
    fn normalize_assets(&mut self) {
        let mut seen = HashSet::new();
        let mut kept: Vec<Asset> = std::mem::take(&mut self.style.assets)
            .into_iter()
            .rev()
            .filter(|a| seen.insert(a.id))
            .collect();
        kept.reverse();
        self.style.assets = kept;

        let last_bg = self.style.assets.iter().rposition(|a| a.is_background);
        for (i, asset) in self.style.assets.iter_mut().enumerate() {
            asset.transform.clamp();
            if Some(i) != last_bg {
                asset.is_background = false;
            }
        }
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            style: self.style.clone(),
            text: self.text.clone(),
        }
    }

    /// Replace style and text wholesale.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.style = snapshot.style;
        self.text = snapshot.text;
    }

    /// Whether the live style/text equal `snapshot`.
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.style == snapshot.style && self.text == snapshot.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::ShadowPatch;

    fn new_asset(src: &str) -> NewAsset {
        NewAsset {
            src: src.into(),
            transform: AssetTransform {
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 100.0,
                rotation: 0.0,
                opacity: 1.0,
            },
            ..NewAsset::default()
        }
    }

    #[test]
    fn rejects_empty_canvas() {
        let err = ThumbnailDocument::new(CanvasSize {
            width: 0,
            height: 720,
        })
        .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidCanvasSize { width: 0, .. }));
    }

    #[test]
    fn first_asset_gets_z_one_and_later_ones_stack() {
        let mut doc = ThumbnailDocument::default();
        let a = doc.add_asset(new_asset("a.png"));
        assert_eq!(doc.asset(a).unwrap().z_index, 1);
        doc.bring_to_front(a);
        let b = doc.add_asset(new_asset("b.png"));
        assert_eq!(doc.asset(b).unwrap().z_index, 3);
    }

    #[test]
    fn only_one_background() {
        let mut doc = ThumbnailDocument::default();
        let first = doc.add_picked_asset(AssetPick {
            src: "bg1.jpg".into(),
            is_background_intent: true,
            ..AssetPick::default()
        });
        let second = doc.add_picked_asset(AssetPick {
            src: "bg2.jpg".into(),
            is_background_intent: true,
            ..AssetPick::default()
        });
        assert!(!doc.asset(first).unwrap().is_background);
        assert!(doc.asset(second).unwrap().is_background);
        assert_eq!(doc.background_asset().unwrap().id, second);

        doc.update_asset(
            first,
            &AssetPatch {
                is_background: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(doc.background_asset().unwrap().id, first);
        assert_eq!(doc.assets().iter().filter(|a| a.is_background).count(), 1);
    }

    #[test]
    fn picked_asset_defaults() {
        let mut doc = ThumbnailDocument::default();
        let icon = doc.add_picked_asset(AssetPick {
            src: "icon.svg".into(),
            category: AssetCategory::Icon,
            placement: Placement::Right,
            is_background_intent: false,
        });
        let t = doc.asset(icon).unwrap().transform;
        assert_eq!((t.x, t.y, t.width, t.height), (800.0, 300.0, 200.0, 200.0));
        assert_eq!((t.rotation, t.opacity), (0.0, 1.0));

        let bg = doc.add_picked_asset(AssetPick {
            src: "bg.jpg".into(),
            is_background_intent: true,
            ..AssetPick::default()
        });
        let t = doc.asset(bg).unwrap().transform;
        assert_eq!((t.x, t.y, t.width, t.height), (0.0, 0.0, 1280.0, 720.0));
    }

    #[test]
    fn update_and_remove_unknown_asset_is_noop() {
        let mut doc = ThumbnailDocument::default();
        let before = doc.clone();
        let ghost = AssetId::intern("ghost_asset");
        assert!(!doc.update_asset(ghost, &AssetPatch::moved_to(Position::new(1.0, 1.0))));
        assert!(doc.remove_asset(ghost).is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn background_patch_on_unknown_asset_keeps_backdrop() {
        let mut doc = ThumbnailDocument::default();
        let bg = doc.add_picked_asset(AssetPick {
            src: "bg.jpg".into(),
            is_background_intent: true,
            ..AssetPick::default()
        });
        let before = doc.clone();
        let patch = AssetPatch {
            is_background: Some(true),
            ..Default::default()
        };
        assert!(!doc.update_asset(AssetId::intern("ghost_backdrop"), &patch));
        assert_eq!(doc, before);
        assert_eq!(doc.background_asset().map(|a| a.id), Some(bg));
    }

    #[test]
    fn background_is_not_selectable() {
        let mut doc = ThumbnailDocument::default();
        let bg = doc.add_picked_asset(AssetPick {
            src: "bg.jpg".into(),
            is_background_intent: true,
            ..AssetPick::default()
        });
        let fg = doc.add_asset(new_asset("fg.png"));
        assert!(doc.contains(ElementId::Asset(bg)));
        assert!(!doc.is_selectable(ElementId::Asset(bg)));
        assert!(doc.is_selectable(ElementId::Asset(fg)));
        assert!(doc.is_selectable(ElementId::HEADLINE));
    }

    #[test]
    fn add_asset_at_top_of_z_range_does_not_overflow() {
        let mut doc = ThumbnailDocument::default();
        let top = doc.add_asset(new_asset("top.png"));
        let mut assets = doc.assets().to_vec();
        assets[0].z_index = i32::MAX;
        doc.update_style(&StylePatch {
            assets: Some(assets),
            ..Default::default()
        });
        let next = doc.add_asset(new_asset("next.png"));
        let z = |id| doc.asset(id).unwrap().z_index;
        assert!(z(next) > z(top));
    }

    #[test]
    fn replaced_asset_list_keeps_last_of_repeated_ids() {
        let mut doc = ThumbnailDocument::default();
        let id = doc.add_asset(new_asset("first.png"));
        let mut first = doc.asset(id).unwrap().clone();
        let mut second = first.clone();
        first.transform.x = 1.0;
        second.transform.x = 2.0;
        doc.update_style(&StylePatch {
            assets: Some(vec![first, second]),
            ..Default::default()
        });
        assert_eq!(doc.assets().len(), 1);
        assert_eq!(doc.asset(id).unwrap().transform.x, 2.0);
    }

    #[test]
    fn shadow_merge_preserves_siblings() {
        let mut doc = ThumbnailDocument::default();
        doc.update_style(&StylePatch {
            font_shadow: Some(ShadowPatch::replace(&Shadow {
                enabled: true,
                color: "#000".into(),
                blur: 1.0,
                offset_x: 2.0,
                offset_y: 2.0,
            })),
            ..Default::default()
        });
        doc.update_style(&StylePatch {
            font_shadow: Some(ShadowPatch {
                blur: Some(9.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        let s = &doc.style().font_shadow;
        assert_eq!(s.color, "#000");
        assert_eq!((s.blur, s.offset_x, s.offset_y), (9.0, 2.0, 2.0));
    }

    #[test]
    fn outline_toggle_syncs_width() {
        let mut doc = ThumbnailDocument::default();
        assert_eq!(doc.style().font_outline_width, 0.0);
        doc.update_text(&TextPatch {
            text_outline: Some(true),
            ..Default::default()
        });
        assert_eq!(doc.style().font_outline_width, 1.0);

        // Re-sending the same value keeps a custom width.
        doc.update_style(&StylePatch {
            font_outline_width: Some(4.0),
            ..Default::default()
        });
        doc.update_text(&TextPatch {
            text_outline: Some(true),
            ..Default::default()
        });
        assert_eq!(doc.style().font_outline_width, 4.0);

        doc.update_text(&TextPatch {
            text_outline: Some(false),
            ..Default::default()
        });
        assert_eq!(doc.style().font_outline_width, 0.0);
    }

    #[test]
    fn reset_text_position() {
        let mut doc = ThumbnailDocument::default();
        doc.set_headline_position(Some(Position::new(5.0, 6.0)));
        assert_eq!(doc.headline_position(), Position::new(5.0, 6.0));
        doc.set_headline_position(None);
        assert_eq!(doc.headline_position(), Position::new(640.0, 360.0));
    }

    #[test]
    fn selection_labels() {
        let mut doc = ThumbnailDocument::default();
        let id = doc.add_picked_asset(AssetPick {
            src: "logo.svg".into(),
            category: AssetCategory::Icon,
            placement: Placement::Left,
            is_background_intent: false,
        });
        assert_eq!(doc.element_name(ElementId::Asset(id)), "Icon");
        assert_eq!(doc.element_name(ElementId::HEADLINE), "Headline");
        assert_eq!(doc.coordinates_label(ElementId::Asset(id)), "X: 300, Y: 400");
        assert_eq!(doc.coordinates_label(ElementId::SUBTITLE), "X: 640, Y: 428");
        doc.remove_asset(id);
        assert_eq!(doc.coordinates_label(ElementId::Asset(id)), "");
    }

    #[test]
    fn json_roundtrip_and_validation() {
        let mut doc = ThumbnailDocument::default();
        doc.add_asset(new_asset("a.png"));
        let json = doc.to_json().unwrap();
        let back = ThumbnailDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);

        let bad = json.replace("\"width\":1280", "\"width\":0");
        assert!(matches!(
            ThumbnailDocument::from_json(&bad),
            Err(DocumentError::InvalidCanvasSize { .. })
        ));
        assert!(matches!(
            ThumbnailDocument::from_json("{"),
            Err(DocumentError::Json(_))
        ));
    }
}
