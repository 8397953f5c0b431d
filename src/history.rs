use log::debug;

use crate::element::DrawingElement;

/// Full copy of the element collection at one point in time
pub type Snapshot = Vec<DrawingElement>;

/// Linear undo/redo ledger of document snapshots.
///
/// `snapshots[0]` is always the empty document and `cursor` always points at
/// the visible snapshot. Committing after an undo discards the redo-able future.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    /// 0 means unbounded
    max_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates a history holding only the empty document
    pub fn new() -> Self {
        Self::with_limit(0)
    }

    /// Creates a history that keeps at most `max_len` snapshots after the
    /// initial empty one. 0 keeps everything.
    ///
    /// The empty document is never dropped, so once older snapshots have been
    /// discarded, undoing past the oldest kept one lands on the empty canvas.
    pub fn with_limit(max_len: usize) -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
            max_len,
        }
    }

    /// Truncate everything after the cursor, append `snapshot` and move the
    /// cursor onto it. This is the only way snapshots enter the ledger.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;

        if self.max_len > 0 && self.snapshots.len() > self.max_len + 1 {
            // Keep snapshot[0] as the empty document and drop the oldest after it
            let excess = self.snapshots.len() - (self.max_len + 1);
            self.snapshots.drain(1..1 + excess);
            self.cursor -= excess;
        }

        debug!("History commit: cursor={} len={}", self.cursor, self.snapshots.len());
    }

    /// Step back one snapshot. Returns false at the beginning of history.
    pub fn undo(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// The visible document
    pub fn current(&self) -> &[DrawingElement] {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots, including the initial empty one
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// A history always holds at least the initial snapshot
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_empty_document() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest_but_keeps_visible_document() {
        let mut history = History::with_limit(2);
        for _ in 0..5 {
            history.commit(Vec::new());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
    }

    #[test]
    fn test_limit_undo_past_oldest_kept_reaches_empty_document() {
        let mut history = History::with_limit(2);
        for n in 1..=4 {
            history.commit(vec![crate::element::factory::create_path(
                egui::Pos2::new(n as f32, 0.0),
                egui::Color32::BLACK,
                1.0,
            )
            .into()]);
        }
        // Only the last two commits survive next to the empty document
        assert!(history.undo());
        assert_eq!(history.current().len(), 1);
        assert!(history.undo());
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
    }
}
