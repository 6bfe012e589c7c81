//! Item creation, deletion and discrete property edits.
//!
//! Everything here is a recorded change: one call, one undo step.

use super::DesignerState;
use crate::model::{Crop, ItemId, PlacedItem};
use crate::shapes::FrameShape;

/// Distance a duplicate is shifted from its source, in page units.
const DUPLICATE_OFFSET: f64 = 20.0;

impl DesignerState {
    /// Places `crop` on the current page and returns the new item's id.
    ///
    /// The box is floored at the minimum item size and moved inside the page.
    pub fn add_item(&mut self, crop: &Crop, x: f64, y: f64, width: f64, height: f64) -> ItemId {
        let id = self.generate_id();
        let min = self.limits.min_item_size;
        let width = width.max(min);
        let height = height.max(min);
        let (x, y) = self.page().clamp_origin(x, y, width, height);
        let item = PlacedItem::new(id, crop, x, y, width, height);

        self.record_change("add item", |page| {
            page.items.push(item);
            true
        });
        tracing::debug!("Added item {} for crop {}", id, crop.id);
        id
    }

    /// Removes an item. Returns `false` if it does not exist.
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let Some(index) = self.page().index_of(id) else {
            tracing::warn!("delete_item: no item {}", id);
            return false;
        };
        self.record_change("delete item", |page| {
            page.items.remove(index);
            true
        })
    }

    /// Moves an item by `(dx, dy)` page units, kept inside the page.
    pub fn nudge_item(&mut self, id: ItemId, dx: f64, dy: f64) -> bool {
        let Some(item) = self.item(id) else {
            tracing::warn!("nudge_item: no item {}", id);
            return false;
        };
        let (x, y) = self
            .page()
            .clamp_origin(item.x + dx, item.y + dy, item.width, item.height);
        self.record_change("nudge item", |page| {
            if let Some(item) = page.item_mut(id) {
                item.x = x;
                item.y = y;
            }
            true
        })
    }

    /// Copies an item under a fresh id, shifted down and right, on top of
    /// the paint order.
    pub fn duplicate_item(&mut self, id: ItemId) -> Option<ItemId> {
        let Some(source) = self.item(id).cloned() else {
            tracing::warn!("duplicate_item: no item {}", id);
            return None;
        };
        let new_id = self.generate_id();
        let (x, y) = self.page().clamp_origin(
            source.x + DUPLICATE_OFFSET,
            source.y + DUPLICATE_OFFSET,
            source.width,
            source.height,
        );
        let copy = PlacedItem {
            id: new_id,
            x,
            y,
            ..source
        };
        self.record_change("duplicate item", |page| {
            page.items.push(copy);
            true
        });
        Some(new_id)
    }

    /// Moves an item to the end of the paint order.
    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        self.reorder(id, |items, index| {
            let item = items.remove(index);
            items.push(item);
        })
    }

    /// Moves an item to the start of the paint order.
    pub fn send_to_back(&mut self, id: ItemId) -> bool {
        self.reorder(id, |items, index| {
            let item = items.remove(index);
            items.insert(0, item);
        })
    }

    fn reorder<F>(&mut self, id: ItemId, reorder: F) -> bool
    where
        F: FnOnce(&mut Vec<PlacedItem>, usize),
    {
        let Some(index) = self.page().index_of(id) else {
            tracing::warn!("reorder: no item {}", id);
            return false;
        };
        self.record_change("reorder items", |page| {
            reorder(&mut page.items, index);
            true
        })
    }

    /// Switches to a preset frame shape, dropping any custom polygon.
    pub fn set_frame_shape(&mut self, id: ItemId, shape: FrameShape) -> bool {
        self.edit_item("set frame shape", id, |item| {
            item.frame_shape = shape;
            item.custom_points = None;
        })
    }

    /// Copies the current preset's vertices into `custom_points` so they can
    /// be edited. Does nothing if the item already has custom points.
    pub fn begin_custom_shape(&mut self, id: ItemId) -> bool {
        self.edit_item("begin custom shape", id, |item| {
            if item.custom_points.is_none() {
                item.custom_points = Some(item.frame_shape.points());
            }
        })
    }

    /// Drops the custom polygon; the item falls back to its preset.
    pub fn clear_custom_points(&mut self, id: ItemId) -> bool {
        self.edit_item("clear custom points", id, |item| {
            item.custom_points = None;
        })
    }

    pub fn reset_crop_offset(&mut self, id: ItemId) -> bool {
        self.edit_item("reset crop offset", id, |item| {
            item.crop_offset_x = 0.0;
            item.crop_offset_y = 0.0;
        })
    }

    fn edit_item<F>(&mut self, label: &str, id: ItemId, edit: F) -> bool
    where
        F: FnOnce(&mut PlacedItem),
    {
        if self.item(id).is_none() {
            tracing::warn!("{}: no item {}", label, id);
            return false;
        }
        self.record_change(label, |page| match page.item_mut(id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        })
    }
}
