//! Designer state: the single mutable store of pages and items.
//!
//! This module is split into submodules:
//! - `items`: item creation, deletion, property setters
//! - `history`: silent vs recorded writes, undo/redo
//! - `pages`: page list management and page-size edits
//!
//! Readers (renderers, exporters) only borrow; every mutation goes through
//! the methods here or through the drag controller, which calls them.

mod history;
mod items;
mod pages;

use cropkit_core::constants::{DEFAULT_BACKGROUND, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use std::collections::HashSet;

use cropkit_core::{CompositionError, Limits, LookupError, Result};

use crate::history::UndoRedoManager;
use crate::model::{ItemId, Page, PlacedItem};

/// A page together with its own undo history.
#[derive(Debug, Clone)]
pub(crate) struct PageSlot {
    pub(crate) page: Page,
    pub(crate) history: UndoRedoManager<Page>,
}

impl PageSlot {
    fn new(page: Page, capacity: usize) -> Self {
        Self {
            page,
            history: UndoRedoManager::new(capacity),
        }
    }
}

/// Defaults for pages created by [`DesignerState::add_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPageTemplate {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
}

impl Default for NewPageTemplate {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// Composition store: pages, the current page and per-page history.
#[derive(Debug, Clone)]
pub struct DesignerState {
    pub(crate) slots: Vec<PageSlot>,
    pub(crate) current: usize,
    pub(crate) limits: Limits,
    pub(crate) template: NewPageTemplate,
    pub(crate) next_id: ItemId,
}

impl DesignerState {
    /// Creates a store with default limits and one default page.
    pub fn new() -> Self {
        Self::with_settings(Limits::default(), NewPageTemplate::default())
    }

    /// Creates a store with one page built from `template`.
    pub fn with_settings(limits: Limits, template: NewPageTemplate) -> Self {
        let width = template.width.max(limits.min_canvas_size);
        let height = template.height.max(limits.min_canvas_size);
        let page = Page::new(width, height, template.background_color.clone());
        Self {
            slots: vec![PageSlot::new(page, limits.history_capacity)],
            current: 0,
            limits,
            template,
            next_id: 1,
        }
    }

    /// Rebuilds a store from saved pages. History starts empty.
    ///
    /// Items are normalized and floored at the minimum size. Their position
    /// is kept, since a shrunk page may legitimately leave items overhanging.
    pub fn from_pages(mut pages: Vec<Page>, current: usize, limits: Limits) -> Result<Self> {
        if pages.is_empty() {
            return Err(CompositionError::Invalid {
                reason: "composition has no pages".to_string(),
            }
            .into());
        }
        if current >= pages.len() {
            return Err(LookupError::PageOutOfRange {
                index: current,
                count: pages.len(),
            }
            .into());
        }

        check_unique_ids(&pages)?;
        for item in pages.iter_mut().flat_map(|p| p.items.iter_mut()) {
            item.normalize();
            item.width = item.width.max(limits.min_item_size);
            item.height = item.height.max(limits.min_item_size);
        }

        let next_id = pages
            .iter()
            .flat_map(|p| p.items.iter().map(|i| i.id))
            .max()
            .map_or(1, |max| max + 1);

        Ok(Self {
            slots: pages
                .into_iter()
                .map(|page| PageSlot::new(page, limits.history_capacity))
                .collect(),
            current,
            limits,
            template: NewPageTemplate::default(),
            next_id,
        })
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn set_page_template(&mut self, template: NewPageTemplate) {
        self.template = template;
    }

    /// The current page.
    pub fn page(&self) -> &Page {
        &self.slots[self.current].page
    }

    /// Items of the current page in paint order.
    pub fn items(&self) -> &[PlacedItem] {
        &self.page().items
    }

    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.page().item(id)
    }

    pub fn item_or_err(&self, id: ItemId) -> Result<&PlacedItem> {
        self.item(id)
            .ok_or_else(|| LookupError::ItemNotFound { id }.into())
    }

    pub(crate) fn slot(&self) -> &PageSlot {
        &self.slots[self.current]
    }

    pub(crate) fn slot_mut(&mut self) -> &mut PageSlot {
        &mut self.slots[self.current]
    }

    pub(crate) fn generate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Item ids must be unique across the whole composition.
pub(crate) fn check_unique_ids(pages: &[Page]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in pages.iter().flat_map(|p| p.items.iter()) {
        if !seen.insert(item.id) {
            return Err(CompositionError::Invalid {
                reason: format!("duplicate item id {}", item.id),
            }
            .into());
        }
    }
    Ok(())
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
