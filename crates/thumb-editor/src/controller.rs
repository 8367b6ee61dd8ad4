//! Selection and gesture state machine.
//!
//! ```text
//! Idle ──select──▶ Selected ──begin_drag──────▶ Dragging ──commit──▶ Selected
//!                     │     ──begin_transform─▶ Transforming ─commit─▶ Selected
//!                     └── deselect / Escape / asset delete ──▶ Idle
//! ```
//!
//! The controller never owns the document or the history; callers pass
//! them in. History is saved at the *start* of each gesture, and pointer
//! moves during a drag only compute guides, so the document is written
//! exactly once per gesture.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Arrow keys |
//! |----------|------------|
//! | none | Nudge by `nudge_step` (or the grid size while snapping) |
//! | **Shift** | Nudge by `nudge_step_large` (or the grid size) |

use crate::history::History;
use crate::input::Direction;
use crate::selection::Selection;
use crate::settings::EditorSettings;
use smallvec::SmallVec;
use thumb_core::geometry::{MAX_VISIBLE_GUIDES, closest_guides, compute_alignment_guides};
use thumb_core::model::MIN_TEXT_WIDTH;
use thumb_core::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Selected,
    Dragging,
    Transforming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    None,
    Drag(ElementId),
    Transform(ElementId),
}

/// Final node geometry reported when a resize/rotate gesture ends.
///
/// `width`/`height` are the node's unscaled size; the gesture's scale
/// factors are folded in on commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEnd {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

pub struct InteractionController {
    selection: Selection,
    gesture: Gesture,
    guides: SmallVec<[Guide; MAX_VISIBLE_GUIDES]>,
    settings: EditorSettings,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl InteractionController {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            selection: Selection::default(),
            gesture: Gesture::None,
            guides: SmallVec::new(),
            settings,
        }
    }

    pub fn state(&self) -> InteractionState {
        match (self.gesture, self.selection.selected()) {
            (Gesture::Drag(_), _) => InteractionState::Dragging,
            (Gesture::Transform(_), _) => InteractionState::Transforming,
            (Gesture::None, Some(_)) => InteractionState::Selected,
            (Gesture::None, None) => InteractionState::Idle,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selection.selected()
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, doc: &ThumbnailDocument, id: ElementId) -> bool {
        let ok = self.selection.select(doc, id);
        if ok {
            log::debug!("selected {}", id.as_str());
        }
        ok
    }

    /// Clear the selection and abandon any gesture in progress.
    pub fn deselect(&mut self) {
        if self.gesture != Gesture::None {
            log::debug!("abandoned {:?}", self.gesture);
        }
        self.selection.clear();
        self.gesture = Gesture::None;
        self.guides.clear();
    }

    /// Resync cached overlay geometry after the document changed under us
    /// (undo, variation switch, external patch).
    pub fn refresh(&mut self, doc: &ThumbnailDocument) {
        self.selection.refresh(doc);
        if self.selection.selected().is_none() {
            self.gesture = Gesture::None;
            self.guides.clear();
        }
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Start moving `id`: snapshot for undo and select it.
    pub fn begin_drag(
        &mut self,
        doc: &ThumbnailDocument,
        history: &mut History,
        id: ElementId,
    ) -> bool {
        if !self.select(doc, id) {
            return false;
        }
        history.save(doc);
        self.gesture = Gesture::Drag(id);
        self.guides.clear();
        log::debug!("drag start {}", id.as_str());
        true
    }

    /// Guides for `id` proposed at `proposed`. Visual only: the document is
    /// not written until [`commit_drag`](Self::commit_drag).
    pub fn on_drag_move(&mut self, doc: &ThumbnailDocument, id: ElementId, proposed: Bounds) -> &[Guide] {
        if self.selection.is_selected(id) {
            self.selection.preview(proposed);
        }
        self.guides.clear();
        if !self.settings.show_guides {
            return &self.guides;
        }
        let others = alignment_targets(doc, id);
        let all = compute_alignment_guides(&proposed, &others, self.settings.guide_tolerance);
        self.guides = closest_guides(&all, self.settings.max_guides);
        log::trace!("drag move {} -> {} guides", id.as_str(), self.guides.len());
        &self.guides
    }

    /// Write the final position of a drag, snapped to the grid when
    /// snapping is on. Without a matching `begin_drag` this is a plain
    /// geometry write. Returns the position written, or `None` for an
    /// unknown asset.
    pub fn commit_drag(&mut self, doc: &mut ThumbnailDocument, id: ElementId, end: Position) -> Option<Position> {
        let pos = if self.settings.snap_to_grid {
            snap_to_grid(end, self.settings.grid_size)
        } else {
            end
        };
        let written = match id {
            ElementId::Text(role) => {
                doc.set_text_position(role, Some(pos));
                true
            }
            ElementId::Asset(asset_id) => doc.update_asset(asset_id, &AssetPatch::moved_to(pos)),
        };
        if self.gesture == Gesture::Drag(id) {
            self.gesture = Gesture::None;
        }
        self.guides.clear();
        self.selection.refresh(doc);
        written.then_some(pos)
    }

    // ─── Transform ───────────────────────────────────────────────────────

    pub fn begin_transform(
        &mut self,
        doc: &ThumbnailDocument,
        history: &mut History,
        id: ElementId,
    ) -> bool {
        if !self.select(doc, id) {
            return false;
        }
        history.save(doc);
        self.gesture = Gesture::Transform(id);
        self.guides.clear();
        log::debug!("transform start {}", id.as_str());
        true
    }

    /// Apply the end of a resize/rotate gesture. Assets take position,
    /// rotation and scaled size; text only takes a new wrap width.
    pub fn commit_transform(&mut self, doc: &mut ThumbnailDocument, id: ElementId, end: TransformEnd) -> bool {
        let written = match id {
            ElementId::Asset(asset_id) => doc.update_asset(
                asset_id,
                &AssetPatch {
                    x: Some(end.x),
                    y: Some(end.y),
                    rotation: Some(end.rotation),
                    width: Some((end.width * end.scale_x).max(MIN_ASSET_SIZE)),
                    height: Some((end.height * end.scale_y).max(MIN_ASSET_SIZE)),
                    ..AssetPatch::default()
                },
            ),
            ElementId::Text(role) => {
                doc.set_text_width(role, (end.width * end.scale_x).round().max(MIN_TEXT_WIDTH));
                true
            }
        };
        if self.gesture == Gesture::Transform(id) {
            self.gesture = Gesture::None;
        }
        self.selection.refresh(doc);
        written
    }

    // ─── Keyboard edits ──────────────────────────────────────────────────

    /// Delete the selection: text returns to derived placement (and stays
    /// selected), an asset is removed and the selection cleared.
    pub fn delete_selected(&mut self, doc: &mut ThumbnailDocument, history: &mut History) -> bool {
        let Some(id) = self.selection.selected() else {
            return false;
        };
        history.save(doc);
        match id {
            ElementId::Text(role) => {
                doc.set_text_position(role, None);
                self.gesture = Gesture::None;
                self.selection.refresh(doc);
            }
            ElementId::Asset(asset_id) => {
                doc.remove_asset(asset_id);
                self.deselect();
            }
        }
        true
    }

    /// Move the selection one step in `direction`. Text leaves derived
    /// placement and becomes custom-positioned.
    pub fn nudge(
        &mut self,
        doc: &mut ThumbnailDocument,
        history: &mut History,
        direction: Direction,
        shift: bool,
    ) -> bool {
        let Some(id) = self.selection.selected() else {
            return false;
        };
        if self.gesture != Gesture::None {
            return false;
        }
        let step = self.settings.nudge_distance(shift);
        let (dx, dy) = direction.delta();
        history.save(doc);
        let moved = match id {
            ElementId::Text(role) => {
                let p = doc.text_position(role);
                doc.set_text_position(role, Some(Position::new(p.x + dx * step, p.y + dy * step)));
                true
            }
            ElementId::Asset(asset_id) => match doc.asset(asset_id) {
                Some(asset) => {
                    let t = asset.transform;
                    let to = Position::new(t.x + dx * step, t.y + dy * step);
                    doc.update_asset(asset_id, &AssetPatch::moved_to(to))
                }
                None => false,
            },
        };
        self.selection.refresh(doc);
        moved
    }

    /// Apply a z-order operation to the selected asset. Text has no
    /// z-index, so this is a no-op for text selections.
    pub fn reorder(
        &mut self,
        doc: &mut ThumbnailDocument,
        history: &mut History,
        op: fn(&mut ThumbnailDocument, AssetId) -> bool,
    ) -> bool {
        let Some(asset_id) = self.selection.selected_asset() else {
            return false;
        };
        history.save(doc);
        op(doc, asset_id)
    }

    pub fn bring_forward(&mut self, doc: &mut ThumbnailDocument, history: &mut History) -> bool {
        self.reorder(doc, history, ThumbnailDocument::bring_forward)
    }

    pub fn send_backward(&mut self, doc: &mut ThumbnailDocument, history: &mut History) -> bool {
        self.reorder(doc, history, ThumbnailDocument::send_backward)
    }

    pub fn bring_to_front(&mut self, doc: &mut ThumbnailDocument, history: &mut History) -> bool {
        self.reorder(doc, history, ThumbnailDocument::bring_to_front)
    }

    pub fn send_to_back(&mut self, doc: &mut ThumbnailDocument, history: &mut History) -> bool {
        self.reorder(doc, history, ThumbnailDocument::send_to_back)
    }

    pub fn escape(&mut self) {
        self.deselect();
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.settings.toggle_snap()
    }

    pub fn toggle_guides(&mut self) -> bool {
        let on = self.settings.toggle_guides();
        if !on {
            self.guides.clear();
        }
        on
    }

    pub fn set_grid_size(&mut self, size: f32) {
        self.settings.set_grid_size(size);
    }
}

/// Boxes a moving element aligns against: both text roles and every
/// foreground asset, minus the element itself.
fn alignment_targets(doc: &ThumbnailDocument, moving: ElementId) -> Vec<Bounds> {
    let text = [ElementId::HEADLINE, ElementId::SUBTITLE]
        .into_iter()
        .filter(|&id| id != moving)
        .filter_map(|id| doc.element_bounds(id));
    let assets = doc
        .assets()
        .iter()
        .filter(|a| !a.is_background && ElementId::Asset(a.id) != moving)
        .map(Asset::bounds);
    text.chain(assets).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc_with_asset(x: f32, y: f32) -> (ThumbnailDocument, AssetId) {
        let mut doc = ThumbnailDocument::default();
        let id = doc.add_asset(NewAsset {
            src: "a.png".into(),
            transform: AssetTransform {
                x,
                y,
                width: 100.0,
                height: 100.0,
                rotation: 0.0,
                opacity: 1.0,
            },
            ..NewAsset::default()
        });
        (doc, id)
    }

    #[test]
    fn state_transitions() {
        let (mut doc, id) = doc_with_asset(0.0, 0.0);
        let mut history = History::default();
        let mut ctl = InteractionController::default();
        let el = ElementId::Asset(id);

        assert_eq!(ctl.state(), InteractionState::Idle);
        assert!(ctl.select(&doc, el));
        assert_eq!(ctl.state(), InteractionState::Selected);
        assert!(ctl.begin_drag(&doc, &mut history, el));
        assert_eq!(ctl.state(), InteractionState::Dragging);
        ctl.commit_drag(&mut doc, el, Position::new(10.0, 10.0));
        assert_eq!(ctl.state(), InteractionState::Selected);
        assert!(ctl.begin_transform(&doc, &mut history, el));
        assert_eq!(ctl.state(), InteractionState::Transforming);
        ctl.escape();
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn background_cannot_be_dragged_or_transformed() {
        let mut doc = ThumbnailDocument::default();
        let bg = doc.add_picked_asset(AssetPick {
            src: "bg.jpg".into(),
            is_background_intent: true,
            ..AssetPick::default()
        });
        let mut history = History::default();
        let mut ctl = InteractionController::default();
        let el = ElementId::Asset(bg);

        assert!(!ctl.select(&doc, el));
        assert!(!ctl.begin_drag(&doc, &mut history, el));
        assert!(!ctl.begin_transform(&doc, &mut history, el));
        assert_eq!(ctl.state(), InteractionState::Idle);
        assert!(history.is_empty());
    }

    #[test]
    fn drag_move_is_visual_only() {
        let (doc, id) = doc_with_asset(0.0, 0.0);
        let before = doc.clone();
        let mut ctl = InteractionController::default();
        let guides = ctl
            .on_drag_move(&doc, ElementId::Asset(id), Bounds::new(52.0, 500.0, 100.0, 100.0))
            .to_vec();
        assert_eq!(doc, before);
        // The centered headline box spans 50..1230.
        assert!(guides.iter().any(|g| !g.is_horizontal && g.position == 50.0));
    }

    #[test]
    fn guides_hidden_when_disabled() {
        let (doc, id) = doc_with_asset(0.0, 0.0);
        let mut ctl = InteractionController::default();
        ctl.toggle_guides();
        let guides = ctl.on_drag_move(&doc, ElementId::Asset(id), Bounds::new(638.0, 360.0, 100.0, 100.0));
        assert!(guides.is_empty());
    }

    #[test]
    fn commit_snaps_to_grid() {
        let (mut doc, id) = doc_with_asset(0.0, 0.0);
        let mut ctl = InteractionController::default();
        let written = ctl.commit_drag(&mut doc, ElementId::Asset(id), Position::new(74.0, 126.0));
        assert_eq!(written, Some(Position::new(50.0, 150.0)));
        let t = doc.asset(id).unwrap().transform;
        assert_eq!((t.x, t.y), (50.0, 150.0));

        ctl.toggle_snap();
        ctl.commit_drag(&mut doc, ElementId::HEADLINE, Position::new(74.0, 126.0));
        assert_eq!(doc.headline_position(), Position::new(74.0, 126.0));
    }

    #[test]
    fn transform_folds_scale_and_floors() {
        let (mut doc, id) = doc_with_asset(0.0, 0.0);
        let mut ctl = InteractionController::default();
        let end = TransformEnd {
            x: 5.0,
            y: 6.0,
            width: 100.0,
            height: 100.0,
            rotation: 30.0,
            scale_x: 1.5,
            scale_y: 0.01,
        };
        assert!(ctl.commit_transform(&mut doc, ElementId::Asset(id), end));
        let t = doc.asset(id).unwrap().transform;
        assert_eq!((t.x, t.y, t.width, t.height, t.rotation), (5.0, 6.0, 150.0, 5.0, 30.0));

        let text_end = TransformEnd { width: 600.0, scale_x: 0.05, ..end };
        ctl.commit_transform(&mut doc, ElementId::SUBTITLE, text_end);
        assert_eq!(doc.text().subtitle_width, Some(50.0));
        assert_eq!(doc.text().subtitle_custom_position, None);
    }

    #[test]
    fn nudge_steps() {
        let (mut doc, id) = doc_with_asset(100.0, 100.0);
        let mut history = History::default();
        let mut ctl = InteractionController::default();
        ctl.select(&doc, ElementId::Asset(id));

        ctl.nudge(&mut doc, &mut history, Direction::Right, false);
        assert_eq!(doc.asset(id).unwrap().transform.x, 150.0);

        ctl.toggle_snap();
        ctl.nudge(&mut doc, &mut history, Direction::Up, true);
        assert_eq!(doc.asset(id).unwrap().transform.y, 90.0);
        ctl.nudge(&mut doc, &mut history, Direction::Left, false);
        assert_eq!(doc.asset(id).unwrap().transform.x, 149.0);
    }

    #[test]
    fn reorder_ignores_text() {
        let (mut doc, _) = doc_with_asset(0.0, 0.0);
        let mut history = History::default();
        let mut ctl = InteractionController::default();
        ctl.select(&doc, ElementId::HEADLINE);
        assert!(!ctl.bring_to_front(&mut doc, &mut history));
        assert!(history.is_empty());
    }

    #[test]
    fn delete_text_resets_position_and_keeps_selection() {
        let mut doc = ThumbnailDocument::default();
        let mut history = History::default();
        let mut ctl = InteractionController::default();
        doc.set_subtitle_position(Some(Position::new(1.0, 1.0)));
        ctl.select(&doc, ElementId::SUBTITLE);
        assert!(ctl.delete_selected(&mut doc, &mut history));
        assert_eq!(doc.text().subtitle_custom_position, None);
        assert_eq!(ctl.selected(), Some(ElementId::SUBTITLE));
    }
}
