//! Undo/Redo history for defect annotations.
//!
//! History is a linear timeline of whole-store snapshots with a cursor pointing
//! at the current entry. Undo and redo only move the cursor; recording a new
//! snapshot prunes everything after the cursor before appending. The number of
//! kept snapshots is bounded by `max_history`, which caps memory at that many
//! copies of the defect list.

use crate::annotation::Snapshot;
use crate::constants::DEFAULT_MAX_HISTORY;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the history log
#[derive(Debug, Clone)]
pub struct UndoConfig {
    /// Maximum number of snapshots to keep
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

// ============================================================================
// History Log
// ============================================================================

/// Bounded linear undo/redo timeline of defect snapshots.
///
/// The cursor is `None` when the log is empty or when everything has been
/// undone (the state before any recorded history).
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    /// Recorded snapshots, oldest first
    entries: Vec<Snapshot>,
    /// Index of the current entry
    cursor: Option<usize>,
    /// Configuration
    config: UndoConfig,
}

impl HistoryLog {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Record a copy of `state` as the new current entry.
    ///
    /// Entries after the cursor are discarded first. When the log grows past
    /// `max_history` the oldest entries are dropped; the cursor always ends on
    /// the entry just recorded.
    pub fn record(&mut self, state: &Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);

        self.entries.push(state.clone());

        let max = self.config.max_history.max(1);
        if self.entries.len() > max {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
        }
        self.cursor = Some(self.entries.len() - 1);

        log::debug!(
            "History: recorded state {} of {}",
            self.entries.len(),
            max
        );
    }

    /// Step back one entry. Fails only if nothing is left to undo.
    ///
    /// Undoing from the first entry moves to the "no history" state.
    pub fn undo(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        self.cursor = cursor.checked_sub(1);
        log::debug!("History: undo, cursor now {:?}", self.cursor);
        true
    }

    /// Step forward one entry. Fails if already at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor = Some(self.cursor.map_or(0, |c| c + 1));
        log::debug!("History: redo, cursor now {:?}", self.cursor);
        true
    }

    /// Whether the undo action should be offered.
    ///
    /// This is stricter than [`HistoryLog::undo`]: the first entry is never
    /// offered as undoable, so the UI cannot step back to the empty state.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Whether there is a newer entry to redo to.
    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 < self.entries.len(),
            None => !self.entries.is_empty(),
        }
    }

    /// Copy of the current entry, or None before any recorded history.
    pub fn current(&self) -> Option<Snapshot> {
        self.cursor.and_then(|c| self.entries.get(c)).cloned()
    }

    /// Index of the current entry
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_history(&self) -> usize {
        self.config.max_history
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        log::debug!("History cleared");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Defect, RectCoords, Rectangle};

    /// Snapshot with `n` defects, each carrying one rectangle tagged with `n`.
    fn state(n: usize) -> Snapshot {
        (0..n)
            .map(|i| {
                let mut d = Defect::new(Defect::default_name(i + 1), "x", Category::default());
                d.rectangles
                    .push(Rectangle::new(RectCoords::new(n as i32, 0, 10, 10)));
                d
            })
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryLog::new();
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_record_moves_cursor_to_tail() {
        let mut history = HistoryLog::new();
        history.record(&state(0));
        history.record(&state(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.current(), Some(state(1)));
    }

    #[test]
    fn test_can_undo_is_stricter_than_undo() {
        let mut history = HistoryLog::new();
        history.record(&state(1));
        assert!(!history.can_undo());

        // undo still permits stepping to the pre-history state
        assert!(history.undo());
        assert_eq!(history.cursor(), None);
        assert!(history.current().is_none());
        assert!(!history.undo());

        assert!(history.can_redo());
        assert!(history.redo());
        assert_eq!(history.current(), Some(state(1)));
    }

    #[test]
    fn test_record_undo_redo_round_trip() {
        let mut history = HistoryLog::new();
        for n in 0..5 {
            history.record(&state(n));
        }
        let before = history.current();

        assert!(history.undo());
        assert_eq!(history.current(), Some(state(3)));
        assert!(history.redo());
        assert_eq!(history.current(), before);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_prunes_redo_branch() {
        let mut history = HistoryLog::new();
        for n in 0..4 {
            history.record(&state(n));
        }
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), Some(1));

        history.record(&state(9));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(state(9)));

        history.undo();
        assert_eq!(history.current(), Some(state(1)));
    }

    #[test]
    fn test_record_after_undo_to_start() {
        let mut history = HistoryLog::new();
        history.record(&state(1));
        history.record(&state(2));
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), None);

        history.record(&state(5));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_max_history() {
        let max = 20;
        for k in 1..5 {
            let mut history = HistoryLog::with_config(UndoConfig { max_history: max });
            for n in 0..max + k {
                history.record(&state(n));
            }
            assert_eq!(history.len(), max);
            assert_eq!(history.cursor(), Some(max - 1));
            assert_eq!(history.current(), Some(state(max + k - 1)));

            // Oldest kept entry is the (k)th recorded state
            while history.can_undo() {
                history.undo();
            }
            assert_eq!(history.current(), Some(state(k)));
        }
    }

    #[test]
    fn test_recorded_entry_is_isolated() {
        let mut history = HistoryLog::new();
        let mut live = state(1);
        history.record(&live);

        live[0].rectangles[0].coords.x2 = 999;
        live[0].result_text.push_str("edited");

        let stored = history.current().unwrap();
        assert_eq!(stored[0].rectangles[0].coords.x2, 10);
        assert!(stored[0].result_text.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryLog::new();
        history.record(&state(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert_eq!(history.max_history(), DEFAULT_MAX_HISTORY);
    }
}
