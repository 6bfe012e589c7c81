//! Undo/redo history with gesture batching.
//!
//! Every entry is a snapshot of the edited state taken immediately before a
//! change. Drag gestures write through [`UndoRedoManager::apply_transient`]
//! on every move, which captures a single pre-action snapshot, and finish
//! with one [`UndoRedoManager::commit`]. Discrete edits call
//! [`UndoRedoManager::record`] directly.

use std::collections::VecDeque;

/// Bounded snapshot history with a single pending slot.
#[derive(Debug, Clone)]
pub struct UndoRedoManager<S> {
    past: VecDeque<S>,
    future: Vec<S>,
    pending: Option<S>,
    capacity: usize,
}

impl<S: Clone> UndoRedoManager<S> {
    /// Creates a history keeping at most `capacity` undo entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(capacity.min(64)),
            future: Vec::new(),
            pending: None,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Notes that `current` is about to change without recording it yet.
    ///
    /// Only the first call of a batch stores a snapshot; later calls are
    /// free until the batch is committed.
    pub fn apply_transient(&mut self, current: &S) {
        if self.pending.is_none() {
            self.pending = Some(current.clone());
        }
    }

    /// Closes the open batch as one undo entry.
    ///
    /// Returns `false` when no transient change was made since the last
    /// commit.
    pub fn commit(&mut self) -> bool {
        match self.pending.take() {
            Some(snapshot) => {
                self.push_undo(snapshot);
                true
            }
            None => false,
        }
    }

    /// Records a discrete change whose pre-action state is `before`.
    ///
    /// An open transient batch is committed first so the two stay separate
    /// steps.
    pub fn record(&mut self, before: S) {
        self.commit();
        self.push_undo(before);
    }

    fn push_undo(&mut self, snapshot: S) {
        self.future.clear();
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }

    /// Steps back. `current` is parked on the redo stack and the previous
    /// snapshot is returned for the caller to restore.
    ///
    /// Returns `None` when there is nothing to undo or a batch is open.
    pub fn undo(&mut self, current: S) -> Option<S> {
        if self.pending.is_some() {
            return None;
        }
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, current: S) -> Option<S> {
        if self.pending.is_some() {
            return None;
        }
        let next = self.future.pop()?;
        self.past.push_back(current);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Whether a transient batch is open.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.pending = None;
    }
}

impl<S: Clone> Default for UndoRedoManager<S> {
    fn default() -> Self {
        Self::new(cropkit_core::constants::HISTORY_CAPACITY)
    }
}
