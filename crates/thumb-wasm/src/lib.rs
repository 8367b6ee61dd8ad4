//! WASM bridge for Thumbnail Studio: exposes the editing session to the
//! browser front end.
//!
//! Compiled via `wasm-pack build --target web`. Structured values cross
//! the boundary as camelCase JSON strings; element ids use their wire form
//! (`"headline"`, `"subtitle"` or the asset id).

use serde::Serialize;
use thumb_core::*;
use thumb_editor::{Editor, EditorSettings, Modifiers, TransformEnd};
use wasm_bindgen::prelude::*;

/// The browser-facing canvas controller. All interaction from the page
/// goes through this struct.
#[wasm_bindgen]
pub struct ThumbCanvas {
    editor: Editor,
}

#[wasm_bindgen]
impl ThumbCanvas {
    /// Create an editor over an empty composition of the given size.
    /// Invalid dimensions fall back to 1280x720.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        console_error_panic_hook_setup();
        let canvas = CanvasSize { width, height };
        let editor = match Editor::new(canvas, EditorSettings::default()) {
            Ok(editor) => editor,
            Err(err) => {
                warn(&format!("invalid canvas {width}x{height}: {err}"));
                Editor::default()
            }
        };
        Self { editor }
    }

    // ─── Document ────────────────────────────────────────────────────────

    pub fn get_document_json(&self) -> String {
        self.editor.document().to_json().unwrap_or_else(|err| {
            warn(&format!("document serialization failed: {err}"));
            String::new()
        })
    }

    /// Replace the whole document. History and selection start over.
    pub fn load_document_json(&mut self, json: &str) -> bool {
        match ThumbnailDocument::from_json(json) {
            Ok(doc) => {
                let settings = self.editor.settings().clone();
                self.editor = Editor::with_document(doc, settings);
                true
            }
            Err(err) => {
                warn(&format!("rejected document: {err}"));
                false
            }
        }
    }

    pub fn update_style_json(&mut self, json: &str) -> bool {
        let Some(patch) = parse::<StylePatch>("style patch", json) else {
            return false;
        };
        self.editor.update_style(&patch);
        true
    }

    pub fn update_text_json(&mut self, json: &str) -> bool {
        let Some(patch) = parse::<TextPatch>("text patch", json) else {
            return false;
        };
        self.editor.update_text(&patch);
        true
    }

    pub fn update_asset_json(&mut self, id: &str, json: &str) -> bool {
        let Some(patch) = parse::<AssetPatch>("asset patch", json) else {
            return false;
        };
        AssetId::lookup(id).is_some_and(|id| self.editor.update_asset(id, &patch))
    }

    /// Add a library pick. Returns the new asset id, or empty on bad input.
    pub fn add_asset_json(&mut self, json: &str) -> String {
        parse::<AssetPick>("asset pick", json)
            .map(|pick| self.editor.add_picked_asset(pick).as_str().to_string())
            .unwrap_or_default()
    }

    pub fn apply_preset_json(&mut self, json: &str) -> bool {
        let Some(preset) = parse::<StylePreset>("preset", json) else {
            return false;
        };
        self.editor.apply_preset(&preset);
        true
    }

    pub fn remove_background(&mut self) -> bool {
        self.editor.remove_background().is_some()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select by wire id. An empty id deselects.
    pub fn select(&mut self, id: &str) -> bool {
        if id.is_empty() {
            self.editor.deselect();
            return true;
        }
        ElementId::parse(id).is_some_and(|el| self.editor.select(el))
    }

    pub fn deselect(&mut self) {
        self.editor.deselect();
    }

    /// Click at canvas coordinates. Returns the hit element id or empty.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> String {
        self.editor
            .pointer_down(x, y)
            .map(|el| el.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn get_selected_id(&self) -> String {
        self.editor
            .selected()
            .map(|el| el.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    pub fn begin_drag(&mut self, id: &str) -> bool {
        ElementId::parse(id).is_some_and(|el| self.editor.begin_drag(el))
    }

    /// Live drag update. Returns the guides to show as a JSON array.
    pub fn drag_move(&mut self, id: &str, x: f32, y: f32, width: f32, height: f32) -> String {
        let Some(el) = ElementId::parse(id) else {
            return "[]".to_string();
        };
        let guides = self.editor.drag_move(el, Bounds::new(x, y, width, height));
        serde_json::to_string(guides).unwrap_or_else(|_| "[]".to_string())
    }

    /// Finish a drag. Returns the committed position as JSON, or empty.
    pub fn commit_drag(&mut self, id: &str, x: f32, y: f32) -> String {
        ElementId::parse(id)
            .and_then(|el| self.editor.commit_drag(el, Position::new(x, y)))
            .and_then(|pos| serde_json::to_string(&pos).ok())
            .unwrap_or_default()
    }

    pub fn begin_transform(&mut self, id: &str) -> bool {
        ElementId::parse(id).is_some_and(|el| self.editor.begin_transform(el))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn commit_transform(
        &mut self,
        id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation: f32,
        scale_x: f32,
        scale_y: f32,
    ) -> bool {
        let end = TransformEnd {
            x,
            y,
            width,
            height,
            rotation,
            scale_x,
            scale_y,
        };
        ElementId::parse(id).is_some_and(|el| self.editor.commit_transform(el, end))
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a key press. Returns `{"changed":bool,"action":"<name>"}`;
    /// the action is empty when the key is unbound or ignored.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        in_text_input: bool,
    ) -> String {
        let mods = Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        };
        let (action, changed) = match self.editor.handle_key(key, mods, in_text_input) {
            Some((action, changed)) => (action.name(), changed),
            None => ("", false),
        };
        format!(r#"{{"changed":{changed},"action":"{action}"}}"#)
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn bring_forward(&mut self) -> bool {
        self.editor.dispatch(thumb_editor::ShortcutAction::BringForward)
    }

    pub fn send_backward(&mut self) -> bool {
        self.editor.dispatch(thumb_editor::ShortcutAction::SendBackward)
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.editor.dispatch(thumb_editor::ShortcutAction::BringToFront)
    }

    pub fn send_to_back(&mut self) -> bool {
        self.editor.dispatch(thumb_editor::ShortcutAction::SendToBack)
    }

    // ─── Canvas aids ─────────────────────────────────────────────────────

    pub fn toggle_snap(&mut self) -> bool {
        self.editor.toggle_snap()
    }

    pub fn toggle_guides(&mut self) -> bool {
        self.editor.toggle_guides()
    }

    pub fn set_grid_size(&mut self, size: f32) {
        self.editor.set_grid_size(size);
    }

    pub fn get_settings_json(&self) -> String {
        self.editor.settings().to_json().unwrap_or_default()
    }

    /// Overlay state for the current frame, as JSON.
    pub fn get_frame_json(&self) -> String {
        let frame = self.editor.frame();
        let selected = self.editor.selected();
        let doc = self.editor.document();
        let state = FrameState {
            selected: selected.map(|el| el.as_str().to_string()),
            name: selected.map(|el| doc.element_name(el)),
            coordinates: selected
                .map(|el| doc.coordinates_label(el))
                .unwrap_or_default(),
            selection: frame.selection,
            guides: frame.guides,
            grid: frame.grid,
            show_hint: frame.show_hint,
        };
        serde_json::to_string(&state).unwrap_or_default()
    }

    // ─── Variations ──────────────────────────────────────────────────────

    /// Open the variation view. Returns the generated variations as JSON.
    pub fn enter_variations(&mut self) -> String {
        let session = self.editor.enter_variations();
        serde_json::to_string(session.variations()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn select_variation(&mut self, index: usize) -> bool {
        self.editor.select_variation(index)
    }

    pub fn regenerate_variations(&mut self) -> String {
        if !self.editor.regenerate_variations() {
            return "[]".to_string();
        }
        self.editor
            .variations()
            .and_then(|session| serde_json::to_string(session.variations()).ok())
            .unwrap_or_else(|| "[]".to_string())
    }

    pub fn exit_variations(&mut self) {
        self.editor.exit_variations();
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameState<'a> {
    selected: Option<String>,
    name: Option<&'static str>,
    coordinates: String,
    selection: Option<Bounds>,
    guides: &'a [Guide],
    grid: Option<f32>,
    show_hint: bool,
}

fn parse<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(err) => {
            warn(&format!("malformed {what}: {err}"));
            None
        }
    }
}

fn warn(msg: &str) {
    log::warn!("{msg}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Thumbnail Studio WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn malformed_json_is_rejected_quietly() {
        let mut canvas = ThumbCanvas::new(1280, 720);
        let before = canvas.get_document_json();
        assert!(!canvas.update_style_json("{not json"));
        assert!(!canvas.apply_preset_json("[]"));
        assert_eq!(canvas.add_asset_json("nope"), "");
        assert!(!canvas.load_document_json("{}"));
        assert_eq!(canvas.get_document_json(), before);
    }

    #[test]
    fn invalid_canvas_falls_back() {
        let canvas = ThumbCanvas::new(0, 0);
        assert!(canvas.get_document_json().contains("1280"));
    }

    #[test]
    fn pick_select_and_delete_by_key() {
        let mut canvas = ThumbCanvas::new(1280, 720);
        let id = canvas.add_asset_json(r#"{"src":"cat.png","type":"image","position":"center"}"#);
        assert!(!id.is_empty());
        assert_eq!(canvas.get_selected_id(), id);

        let frame = canvas.get_frame_json();
        assert!(frame.contains(r#""showHint":false"#));
        assert!(frame.contains(r#""coordinates":"X: 700, Y: 500""#));

        let result = canvas.handle_key("Delete", false, false, false, false, false);
        assert_eq!(result, r#"{"changed":true,"action":"delete"}"#);
        assert_eq!(canvas.get_selected_id(), "");
        assert!(canvas.undo());
    }

    #[test]
    fn unknown_and_background_ids_are_refused() {
        let mut canvas = ThumbCanvas::new(1280, 720);
        let bg = canvas.add_asset_json(r#"{"src":"bg.jpg","isBackgroundIntent":true}"#);
        assert!(!bg.is_empty());
        assert!(!canvas.select(&bg));
        assert!(!canvas.begin_drag(&bg));
        assert!(!canvas.select("bridge_never_created"));
        assert!(!canvas.begin_drag("bridge_never_created"));
        assert!(!canvas.update_asset_json("bridge_never_created", r#"{"isBackground":true}"#));
        assert_eq!(AssetId::lookup("bridge_never_created"), None);
        assert!(canvas.get_document_json().contains(r#""isBackground":true"#));
        assert!(canvas.select(""));
    }

    #[test]
    fn keys_in_text_inputs_report_no_action() {
        let mut canvas = ThumbCanvas::new(1280, 720);
        let result = canvas.handle_key("z", true, false, false, false, true);
        assert_eq!(result, r#"{"changed":false,"action":""}"#);
    }

    #[test]
    fn text_drag_reports_committed_position() {
        let mut canvas = ThumbCanvas::new(1280, 720);
        assert!(canvas.begin_drag("headline"));
        canvas.drag_move("headline", 500.0, 300.0, 200.0, 60.0);
        assert_eq!(canvas.commit_drag("headline", 120.0, 80.0), r#"{"x":100.0,"y":100.0}"#);
        assert!(!canvas.begin_drag(""));
    }

    #[test]
    fn variations_cross_as_json() {
        let mut canvas = ThumbCanvas::new(1280, 720);
        let json = canvas.enter_variations();
        assert!(json.starts_with('['));
        assert!(canvas.select_variation(0));
        assert!(!canvas.select_variation(9));
        canvas.exit_variations();
        assert_eq!(canvas.regenerate_variations(), "[]");
    }
}
