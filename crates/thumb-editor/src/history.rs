//! Undo/redo history.
//!
//! History is a linear list of document snapshots with a cursor. Gestures
//! call [`History::save`] at their *start*, so one drag or transform
//! produces exactly one entry however many pointer moves it spans.
//!
//! The live document is not stored until it is needed: the first undo
//! after a save pushes the live state onto the tail, which is what makes
//! the following redo return to it.

use thumb_core::{Snapshot, ThumbnailDocument};

pub const DEFAULT_HISTORY_DEPTH: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_depth: max_depth.max(2),
        }
    }

    /// Record the document's current style and text. Any redo tail is
    /// discarded. Saving a state equal to the cursor entry only drops the
    /// tail.
    pub fn save(&mut self, doc: &ThumbnailDocument) {
        if let Some(c) = self.cursor
            && doc.matches(&self.entries[c])
        {
            self.entries.truncate(c + 1);
            return;
        }
        self.push(doc.snapshot());
        log::debug!("history: saved entry {}", self.entries.len());
    }

    fn push(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut ThumbnailDocument) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        if !doc.matches(&self.entries[cursor]) {
            // Unsaved edits since the cursor entry: keep them for redo.
            let target = self.entries[cursor].clone();
            self.push(doc.snapshot());
            let restored_at = self.entries.len().saturating_sub(2);
            self.cursor = Some(restored_at);
            doc.restore(target);
            log::debug!("history: undo to {restored_at}");
            return true;
        }
        if cursor == 0 {
            return false;
        }
        self.cursor = Some(cursor - 1);
        doc.restore(self.entries[cursor - 1].clone());
        log::debug!("history: undo to {}", cursor - 1);
        true
    }

    /// Step forward one entry. Returns `false` at the tail.
    pub fn redo(&mut self, doc: &mut ThumbnailDocument) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let next = cursor + 1;
        let Some(snapshot) = self.entries.get(next) else {
            return false;
        };
        doc.restore(snapshot.clone());
        self.cursor = Some(next);
        log::debug!("history: redo to {next}");
        true
    }

    pub fn can_undo(&self, doc: &ThumbnailDocument) -> bool {
        match self.cursor {
            Some(c) => c > 0 || !doc.matches(&self.entries[c]),
            None => false,
        }
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
