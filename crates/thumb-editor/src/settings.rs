//! Editor settings.
//!
//! Canvas aids (grid, guides), nudge distances and history depth. These
//! belong to the editing session, not to the document, and are never
//! recorded in undo history.

use crate::history::DEFAULT_HISTORY_DEPTH;
use serde::{Deserialize, Serialize};
use thumb_core::DocumentResult;
use thumb_core::geometry::{DEFAULT_GUIDE_TOLERANCE, MAX_VISIBLE_GUIDES, MIN_GRID_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Grid cell in canvas pixels. Default: **50**.
    pub grid_size: f32,
    /// Snap committed drags to the grid. Default: **true**.
    pub snap_to_grid: bool,
    /// Show alignment guides while dragging. Default: **true**.
    pub show_guides: bool,
    pub guide_tolerance: f32,
    pub max_guides: usize,
    /// Arrow-key step without snapping.
    pub nudge_step: f32,
    /// Arrow-key step with Shift held, without snapping.
    pub nudge_step_large: f32,
    pub history_depth: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            snap_to_grid: true,
            show_guides: true,
            guide_tolerance: DEFAULT_GUIDE_TOLERANCE,
            max_guides: MAX_VISIBLE_GUIDES,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl EditorSettings {
    /// Load settings from JSON. Missing fields take their defaults and
    /// out-of-range values are clamped.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn sanitize(&mut self) {
        let defaults = Self::default();
        self.set_grid_size(self.grid_size);
        self.guide_tolerance = positive_or(self.guide_tolerance, defaults.guide_tolerance);
        self.max_guides = self.max_guides.min(MAX_VISIBLE_GUIDES);
        self.nudge_step = positive_or(self.nudge_step, defaults.nudge_step);
        self.nudge_step_large = positive_or(self.nudge_step_large, defaults.nudge_step_large);
        self.history_depth = self.history_depth.max(2);
    }

    /// Grid sizes below one pixel are clamped to one.
    pub fn set_grid_size(&mut self, size: f32) {
        self.grid_size = if size.is_finite() {
            size.max(MIN_GRID_SIZE)
        } else {
            MIN_GRID_SIZE
        };
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.snap_to_grid = !self.snap_to_grid;
        log::info!("snap to grid: {}", self.snap_to_grid);
        self.snap_to_grid
    }

    pub fn toggle_guides(&mut self) -> bool {
        self.show_guides = !self.show_guides;
        log::info!("alignment guides: {}", self.show_guides);
        self.show_guides
    }

    /// Arrow-key distance: the grid size while snapping, else the small or
    /// (with Shift) large step.
    pub fn nudge_distance(&self, shift: bool) -> f32 {
        if self.snap_to_grid {
            self.grid_size
        } else if shift {
            self.nudge_step_large
        } else {
            self.nudge_step
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.grid_size, 50.0);
        assert!(s.snap_to_grid && s.show_guides);
        assert_eq!(s.guide_tolerance, 5.0);
        assert_eq!(s.max_guides, 4);
        assert_eq!(s.history_depth, 100);
    }

    #[test]
    fn partial_json_is_clamped() {
        let s = EditorSettings::from_json(r#"{"gridSize": -3, "snapToGrid": false, "maxGuides": 9}"#)
            .unwrap();
        assert_eq!(s.grid_size, 1.0);
        assert!(!s.snap_to_grid);
        assert_eq!(s.max_guides, 4);
        assert_eq!(s.nudge_step_large, 10.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EditorSettings::from_json("[1, 2").is_err());
    }

    #[test]
    fn nudge_distance_follows_snap() {
        let mut s = EditorSettings::default();
        assert_eq!(s.nudge_distance(true), 50.0);
        s.toggle_snap();
        assert_eq!(s.nudge_distance(false), 1.0);
        assert_eq!(s.nudge_distance(true), 10.0);
    }
}
