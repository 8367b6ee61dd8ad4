//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map is
//! shared by the native editor and the browser bridge.
//!
//! | Keys | Action |
//! |------|--------|
//! | Arrows (Shift) | Nudge selection |
//! | Delete / Backspace | Delete selection |
//! | Escape | Deselect, abandon gesture |
//! | ⌘Z / ⌘⇧Z / ⌘Y | Undo / redo |
//! | ⌘] / ⌘[ | Bring forward / send backward |
//! | ⌘⇧] / ⌘⇧[ | Bring to front / send to back |
//! | ⌘G / ⌘A | Toggle grid snap / alignment guides |

use crate::input::Direction;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Undo,
    Redo,
    Delete,
    Nudge(Direction),
    NudgeLarge(Direction),

    // ── Z-order ──
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,

    // ── Canvas aids ──
    ToggleSnap,
    ToggleGuides,

    // ── UI ──
    Deselect,
}

impl ShortcutAction {
    /// Stable name used across the browser bridge.
    pub fn name(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Delete => "delete",
            Self::Nudge(_) => "nudge",
            Self::NudgeLarge(_) => "nudge_large",
            Self::BringForward => "bring_forward",
            Self::SendBackward => "send_backward",
            Self::BringToFront => "bring_to_front",
            Self::SendToBack => "send_to_back",
            Self::ToggleSnap => "toggle_snap",
            Self::ToggleGuides => "toggle_guides",
            Self::Deselect => "deselect",
        }
    }
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"ArrowLeft"`).
    /// `ctrl` and `meta` are interchangeable. Returns `None` if the combo
    /// has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if key == "Escape" {
            return Some(ShortcutAction::Deselect);
        }

        // Browsers report the shifted glyph for brackets on most layouts.
        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                "[" | "{" => Some(ShortcutAction::SendToBack),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "]" => Some(ShortcutAction::BringForward),
                "[" => Some(ShortcutAction::SendBackward),
                "g" | "G" => Some(ShortcutAction::ToggleSnap),
                "a" | "A" => Some(ShortcutAction::ToggleGuides),
                _ => None,
            };
        }

        if let Some(direction) = Direction::from_key(key) {
            return Some(if shift {
                ShortcutAction::NudgeLarge(direction)
            } else {
                ShortcutAction::Nudge(direction)
            });
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            _ => None,
        }
    }
}
