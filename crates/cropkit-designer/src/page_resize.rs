//! Page edge dragging.
//!
//! The surface itself changes size while the page is resized, so deltas are
//! converted with the page-to-surface ratio captured at press time rather
//! than the live viewport.

use serde::{Deserialize, Serialize};

use cropkit_core::constants::DEGENERATE_EPSILON;
use cropkit_core::Point;

use crate::viewport::SurfaceRect;

/// Page edge handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl PageEdge {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, PageEdge::Left | PageEdge::Right)
    }
}

/// State captured when a page edge is pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageResizeGesture {
    edge: PageEdge,
    start_pointer: Point,
    start_width: f64,
    start_height: f64,
    units_per_pixel_x: f64,
    units_per_pixel_y: f64,
}

impl PageResizeGesture {
    pub fn new(
        edge: PageEdge,
        pointer: Point,
        page_width: f64,
        page_height: f64,
        surface: SurfaceRect,
    ) -> Self {
        Self {
            edge,
            start_pointer: pointer,
            start_width: page_width,
            start_height: page_height,
            units_per_pixel_x: ratio(page_width, surface.width),
            units_per_pixel_y: ratio(page_height, surface.height),
        }
    }

    pub fn edge(&self) -> PageEdge {
        self.edge
    }

    /// Page size for the pointer at `pointer`. Only the dragged dimension
    /// changes, floored at `min_size`.
    pub fn size_at(&self, pointer: Point, min_size: f64) -> (f64, f64) {
        let dx = (pointer.x - self.start_pointer.x) * self.units_per_pixel_x;
        let dy = (pointer.y - self.start_pointer.y) * self.units_per_pixel_y;

        let (width, height) = match self.edge {
            PageEdge::Right => (self.start_width + dx, self.start_height),
            PageEdge::Left => (self.start_width - dx, self.start_height),
            PageEdge::Bottom => (self.start_width, self.start_height + dy),
            PageEdge::Top => (self.start_width, self.start_height - dy),
        };

        (width.max(min_size), height.max(min_size))
    }
}

fn ratio(page_extent: f64, surface_extent: f64) -> f64 {
    if surface_extent.abs() < DEGENERATE_EPSILON {
        0.0
    } else {
        page_extent / surface_extent
    }
}
