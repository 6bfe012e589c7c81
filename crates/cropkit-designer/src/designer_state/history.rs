//! Silent and recorded writes, undo and redo.

use super::DesignerState;
use crate::model::{ItemId, ItemUpdate, Page};

impl DesignerState {
    /// Applies `change` to a copy of the current page and, if anything
    /// differs, swaps it in as one undo step.
    pub(crate) fn record_change<F>(&mut self, label: &str, change: F) -> bool
    where
        F: FnOnce(&mut Page) -> bool,
    {
        let slot = self.slot_mut();
        let mut next = slot.page.clone();
        if !change(&mut next) || next == slot.page {
            return false;
        }
        let before = std::mem::replace(&mut slot.page, next);
        slot.history.record(before);
        tracing::debug!("Recorded {}", label);
        true
    }

    /// Like [`record_change`](Self::record_change) but only opens (or
    /// extends) the transient batch.
    pub(crate) fn transient_change<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&mut Page) -> bool,
    {
        let slot = self.slot_mut();
        let mut next = slot.page.clone();
        if !change(&mut next) || next == slot.page {
            return false;
        }
        slot.history.apply_transient(&slot.page);
        slot.page = next;
        true
    }

    /// Applies `update` to an item as a single undoable step.
    ///
    /// An update that touches the box is floored at the minimum item size
    /// and kept inside the page.
    pub fn update_item(&mut self, id: ItemId, update: &ItemUpdate) -> bool {
        if self.item(id).is_none() {
            tracing::warn!("update_item: no item {}", id);
            return false;
        }
        let min_size = self.limits.min_item_size;
        self.record_change("item update", |page| apply_item_update(page, id, update, min_size))
    }

    /// Applies `update` immediately without recording it.
    ///
    /// The first silent write after a commit snapshots the page; call
    /// [`commit`](Self::commit) to turn the batch into one undo step.
    pub fn update_item_silent(&mut self, id: ItemId, update: &ItemUpdate) -> bool {
        if self.item(id).is_none() {
            tracing::warn!("update_item_silent: no item {}", id);
            return false;
        }
        let min_size = self.limits.min_item_size;
        self.transient_change(|page| apply_item_update(page, id, update, min_size))
    }

    /// Closes the current batch of silent writes as one history entry.
    pub fn commit(&mut self) -> bool {
        let committed = self.slot_mut().history.commit();
        if committed {
            tracing::debug!(
                "Committed gesture, undo depth {}",
                self.slot().history.undo_depth()
            );
        }
        committed
    }

    /// Whether silent writes are waiting for a commit.
    pub fn has_pending_changes(&self) -> bool {
        self.slot().history.has_pending()
    }

    /// Restores the page as it was before the last recorded step.
    pub fn undo(&mut self) -> bool {
        let slot = self.slot_mut();
        if slot.history.has_pending() {
            tracing::warn!("Undo ignored while a gesture is uncommitted");
            return false;
        }
        let current = slot.page.clone();
        match slot.history.undo(current) {
            Some(previous) => {
                slot.page = previous;
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone step.
    pub fn redo(&mut self) -> bool {
        let slot = self.slot_mut();
        if slot.history.has_pending() {
            tracing::warn!("Redo ignored while a gesture is uncommitted");
            return false;
        }
        let current = slot.page.clone();
        match slot.history.redo(current) {
            Some(next) => {
                slot.page = next;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.slot().history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.slot().history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.slot().history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.slot().history.redo_depth()
    }
}

fn apply_item_update(page: &mut Page, id: ItemId, update: &ItemUpdate, min_size: f64) -> bool {
    let Some(index) = page.index_of(id) else {
        return false;
    };
    let mut next = page.items[index].apply(update);
    if update.changes_box() {
        page.fit_item(&mut next, min_size);
    }
    page.items[index] = next;
    true
}
