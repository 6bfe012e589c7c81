use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::{ItemId, PlacedItem};

/// A composition page: the surface items are arranged on.
///
/// The whole struct doubles as the history snapshot for its page, so it
/// holds only edit-relevant state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Back-to-front paint order
    pub items: Vec<PlacedItem>,
}

impl Page {
    pub fn new(width: f64, height: f64, background_color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            height,
            background_color: background_color.into(),
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut PlacedItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Clamps a box origin so the box lies inside the page.
    ///
    /// Boxes larger than the page are pinned to the top-left corner.
    pub fn clamp_origin(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        let max_x = (self.width - width).max(0.0);
        let max_y = (self.height - height).max(0.0);
        (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
    }

    /// Floors the item box at `min_size` and moves it inside the page.
    pub fn fit_item(&self, item: &mut PlacedItem, min_size: f64) {
        item.width = item.width.max(min_size);
        item.height = item.height.max(min_size);
        let (x, y) = self.clamp_origin(item.x, item.y, item.width, item.height);
        item.x = x;
        item.y = y;
    }

    /// Returns a copy of this page with `update` applied.
    pub fn apply(&self, update: &PageUpdate) -> Page {
        let mut next = self.clone();
        if let Some(width) = update.width {
            next.width = width;
        }
        if let Some(height) = update.height {
            next.height = height;
        }
        if let Some(color) = &update.background_color {
            next.background_color = color.clone();
        }
        next
    }
}

/// Typed partial update for page-level fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageUpdate {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
}

impl PageUpdate {
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            background_color: None,
        }
    }
}
