//! Bounded undo/redo history of serialized world snapshots

use std::collections::VecDeque;

/// Snapshot-based undo/redo stacks.
///
/// Every edit records the pre-edit payload. The undo stack holds at most
/// `limit` snapshots; when full, the oldest one is evicted.
#[derive(Clone, Debug)]
pub struct UndoHistory {
    undo: VecDeque<String>,
    redo: Vec<String>,
    limit: usize,
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Record the state before an edit. Clears the redo stack.
    pub fn record(&mut self, snapshot: String) {
        self.redo.clear();
        self.push_undo(snapshot);
    }

    /// Step back: returns the snapshot to restore and keeps `current` for redo.
    /// `None` (and `current` dropped) when there is nothing to undo.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward: mirror of [`undo`](Self::undo)
    pub fn redo(&mut self, current: String) -> Option<String> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        Some(next)
    }

    fn push_undo(&mut self, snapshot: String) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop both stacks
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
