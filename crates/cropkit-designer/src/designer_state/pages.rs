//! Page list management and page-level edits.

use cropkit_core::{LookupError, Result};

use super::{DesignerState, PageSlot};
use crate::model::{Page, PageUpdate};

impl DesignerState {
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.slots.iter().map(|slot| &slot.page)
    }

    pub fn page_count(&self) -> usize {
        self.slots.len()
    }

    pub fn current_page_index(&self) -> usize {
        self.current
    }

    /// Makes another page current. Uncommitted silent writes on the page
    /// being left are committed first.
    pub fn set_current_page(&mut self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            return Err(LookupError::PageOutOfRange {
                index,
                count: self.slots.len(),
            }
            .into());
        }
        if index != self.current {
            self.commit();
            self.current = index;
            tracing::debug!("Switched to page {}", index);
        }
        Ok(())
    }

    /// Appends a page built from the page template and makes it current.
    pub fn add_page(&mut self) -> usize {
        self.commit();
        let min = self.limits.min_canvas_size;
        let page = Page::new(
            self.template.width.max(min),
            self.template.height.max(min),
            self.template.background_color.clone(),
        );
        self.slots
            .push(PageSlot::new(page, self.limits.history_capacity));
        self.current = self.slots.len() - 1;
        tracing::debug!("Added page {}", self.current);
        self.current
    }

    /// Removes a page and its history. The last remaining page cannot be
    /// removed.
    pub fn remove_page(&mut self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            return Err(LookupError::PageOutOfRange {
                index,
                count: self.slots.len(),
            }
            .into());
        }
        if self.slots.len() == 1 {
            return Err(cropkit_core::Error::other("cannot remove the only page"));
        }
        self.slots.remove(index);
        if self.current > index || self.current >= self.slots.len() {
            self.current = self.current.saturating_sub(1);
        }
        tracing::debug!("Removed page {}, current is {}", index, self.current);
        Ok(())
    }

    /// Applies a page update as one undo step. Sizes are floored at the
    /// minimum canvas size; items are left where they are.
    pub fn update_page_size(&mut self, update: &PageUpdate) -> bool {
        let update = self.floor_page_update(update);
        self.record_change("page update", |page| {
            *page = page.apply(&update);
            true
        })
    }

    /// Silent counterpart of [`update_page_size`](Self::update_page_size),
    /// used while a page edge is dragged.
    pub fn update_page_size_silent(&mut self, update: &PageUpdate) -> bool {
        let update = self.floor_page_update(update);
        self.transient_change(|page| {
            *page = page.apply(&update);
            true
        })
    }

    fn floor_page_update(&self, update: &PageUpdate) -> PageUpdate {
        let min = self.limits.min_canvas_size;
        PageUpdate {
            width: update.width.map(|w| w.max(min)),
            height: update.height.map(|h| h.max(min)),
            background_color: update.background_color.clone(),
        }
    }
}
