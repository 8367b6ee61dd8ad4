//! One editing session: the document plus everything that edits it.
//!
//! `Editor` owns the document, its history, the interaction controller
//! and, while the variation view is open, the variation session. Front
//! ends (native or the browser bridge) talk only to this type.

use crate::controller::{InteractionController, TransformEnd};
use crate::history::History;
use crate::hit::hit_test;
use crate::input::Modifiers;
use crate::settings::EditorSettings;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::surface::{Frame, RasterImage, RenderSurface};
use thumb_core::*;

pub struct Editor {
    doc: ThumbnailDocument,
    history: History,
    controller: InteractionController,
    variations: Option<VariationSession>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_document(ThumbnailDocument::default(), EditorSettings::default())
    }
}

impl Editor {
    pub fn new(canvas: CanvasSize, settings: EditorSettings) -> DocumentResult<Self> {
        Ok(Self::with_document(ThumbnailDocument::new(canvas)?, settings))
    }

    pub fn with_document(doc: ThumbnailDocument, settings: EditorSettings) -> Self {
        Self {
            doc,
            history: History::new(settings.history_depth),
            controller: InteractionController::new(settings),
            variations: None,
        }
    }

    pub fn document(&self) -> &ThumbnailDocument {
        &self.doc
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn settings(&self) -> &EditorSettings {
        self.controller.settings()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.controller.selected()
    }

    // ─── Document edits from the side panels ─────────────────────────────

    /// Style edits from the panel. Not recorded individually; the next
    /// undo returns to the last recorded state.
    pub fn update_style(&mut self, patch: &StylePatch) {
        self.doc.update_style(patch);
        self.controller.refresh(&self.doc);
    }

    pub fn update_text(&mut self, patch: &TextPatch) {
        self.doc.update_text(patch);
        self.controller.refresh(&self.doc);
    }

    pub fn update_asset(&mut self, id: AssetId, patch: &AssetPatch) -> bool {
        let ok = self.doc.update_asset(id, patch);
        self.controller.refresh(&self.doc);
        ok
    }

    pub fn apply_preset(&mut self, preset: &StylePreset) {
        self.history.save(&self.doc);
        self.doc.apply_preset(preset);
        self.controller.refresh(&self.doc);
    }

    /// Add a library pick. The new asset is selected.
    pub fn add_picked_asset(&mut self, pick: AssetPick) -> AssetId {
        self.history.save(&self.doc);
        let id = self.doc.add_picked_asset(pick);
        self.controller.select(&self.doc, ElementId::Asset(id));
        id
    }

    pub fn add_asset(&mut self, asset: NewAsset) -> AssetId {
        self.history.save(&self.doc);
        self.doc.add_asset(asset)
    }

    pub fn remove_background(&mut self) -> Option<Asset> {
        self.history.save(&self.doc);
        let removed = self.doc.remove_background();
        self.controller.refresh(&self.doc);
        removed
    }

    // ─── Pointer and gestures ────────────────────────────────────────────

    /// Click at canvas position (x, y): select the topmost element or,
    /// on empty canvas, deselect.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<ElementId> {
        match hit_test(&self.doc, x, y) {
            Some(id) => {
                self.controller.select(&self.doc, id);
                Some(id)
            }
            None => {
                self.controller.deselect();
                None
            }
        }
    }

    pub fn select(&mut self, id: ElementId) -> bool {
        self.controller.select(&self.doc, id)
    }

    pub fn deselect(&mut self) {
        self.controller.deselect();
    }

    pub fn begin_drag(&mut self, id: ElementId) -> bool {
        self.controller.begin_drag(&self.doc, &mut self.history, id)
    }

    pub fn drag_move(&mut self, id: ElementId, proposed: Bounds) -> &[Guide] {
        self.controller.on_drag_move(&self.doc, id, proposed)
    }

    pub fn commit_drag(&mut self, id: ElementId, end: Position) -> Option<Position> {
        self.controller.commit_drag(&mut self.doc, id, end)
    }

    pub fn begin_transform(&mut self, id: ElementId) -> bool {
        self.controller.begin_transform(&self.doc, &mut self.history, id)
    }

    pub fn commit_transform(&mut self, id: ElementId, end: TransformEnd) -> bool {
        self.controller.commit_transform(&mut self.doc, id, end)
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Dispatch a key press. Keys are ignored while focus is in a text
    /// input. Returns the resolved action and whether it changed anything.
    pub fn handle_key(
        &mut self,
        key: &str,
        mods: Modifiers,
        in_text_input: bool,
    ) -> Option<(ShortcutAction, bool)> {
        if in_text_input {
            return None;
        }
        let action = ShortcutMap::resolve(key, mods.ctrl, mods.shift, mods.alt, mods.meta)?;
        let changed = self.dispatch(action);
        log::debug!("key {key:?} -> {} (changed: {changed})", action.name());
        Some((action, changed))
    }

    pub fn dispatch(&mut self, action: ShortcutAction) -> bool {
        let doc = &mut self.doc;
        let history = &mut self.history;
        let ctl = &mut self.controller;
        match action {
            ShortcutAction::Undo => return self.undo(),
            ShortcutAction::Redo => return self.redo(),
            ShortcutAction::Delete => ctl.delete_selected(doc, history),
            ShortcutAction::Nudge(dir) => ctl.nudge(doc, history, dir, false),
            ShortcutAction::NudgeLarge(dir) => ctl.nudge(doc, history, dir, true),
            ShortcutAction::BringForward => ctl.bring_forward(doc, history),
            ShortcutAction::SendBackward => ctl.send_backward(doc, history),
            ShortcutAction::BringToFront => ctl.bring_to_front(doc, history),
            ShortcutAction::SendToBack => ctl.send_to_back(doc, history),
            ShortcutAction::ToggleSnap => {
                ctl.toggle_snap();
                true
            }
            ShortcutAction::ToggleGuides => {
                ctl.toggle_guides();
                true
            }
            ShortcutAction::Deselect => {
                let had = ctl.selected().is_some();
                ctl.escape();
                had
            }
        }
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.controller.toggle_snap()
    }

    pub fn toggle_guides(&mut self) -> bool {
        self.controller.toggle_guides()
    }

    pub fn set_grid_size(&mut self, size: f32) {
        self.controller.set_grid_size(size);
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.doc);
        if changed {
            self.controller.refresh(&self.doc);
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.doc);
        if changed {
            self.controller.refresh(&self.doc);
        }
        changed
    }

    // ─── Variations ──────────────────────────────────────────────────────

    /// Open the variation view. The baseline is captured on first entry
    /// only; re-entering keeps it.
    pub fn enter_variations(&mut self) -> &VariationSession {
        let doc = &self.doc;
        self.variations
            .get_or_insert_with(|| VariationSession::enter(doc))
    }

    pub fn variations(&self) -> Option<&VariationSession> {
        self.variations.as_ref()
    }

    pub fn select_variation(&mut self, index: usize) -> bool {
        let Some(session) = self.variations.as_mut() else {
            return false;
        };
        if index >= session.variations().len() {
            return false;
        }
        self.history.save(&self.doc);
        let ok = session.select(&mut self.doc, index);
        self.controller.refresh(&self.doc);
        ok
    }

    pub fn regenerate_variations(&mut self) -> bool {
        match self.variations.as_mut() {
            Some(session) => {
                session.regenerate();
                true
            }
            None => false,
        }
    }

    /// Close the variation view. The document keeps the applied variation.
    pub fn exit_variations(&mut self) {
        self.variations = None;
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// The frame to paint, overlays included.
    pub fn frame(&self) -> Frame<'_> {
        let settings = self.controller.settings();
        let selection = self.controller.selection();
        Frame {
            document: &self.doc,
            selection: selection.bounds(),
            guides: self.controller.guides(),
            grid: settings.snap_to_grid.then_some(settings.grid_size),
            show_hint: selection.hint_visible(),
        }
    }

    pub fn redraw(&self, surface: &mut dyn RenderSurface) {
        surface.draw(&self.frame());
    }

    /// Rasterize the bare composition, with every editing aid hidden.
    /// The surface is left showing the editing frame again afterwards.
    pub fn export(&self, surface: &mut dyn RenderSurface) -> RasterImage {
        surface.draw(&Frame::clean(&self.doc));
        let image = surface.rasterize();
        surface.draw(&self.frame());
        log::debug!("exported {}x{}", image.width, image.height);
        image
    }
}
