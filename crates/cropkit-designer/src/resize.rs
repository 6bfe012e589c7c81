//! Aspect-locked corner resize.
//!
//! The dragged corner follows the dominant axis of the pointer delta, the
//! other dimension follows the crop's aspect ratio, and the diagonally
//! opposite corner stays where it was.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{ItemUpdate, PlacedItem};

/// Corner resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// The anchor corner held fixed while this one is dragged.
    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Page position of this corner on `rect`.
    pub fn position_on(&self, rect: &BoxGeometry) -> (f64, f64) {
        let x = if self.is_left() { rect.x } else { rect.x + rect.width };
        let y = if self.is_top() { rect.y } else { rect.y + rect.height };
        (x, y)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corner::TopLeft => "tl",
            Corner::TopRight => "tr",
            Corner::BottomLeft => "bl",
            Corner::BottomRight => "br",
        };
        f.write_str(name)
    }
}

/// Axis-aligned item box in page units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_item(item: &PlacedItem) -> Self {
        Self::new(item.x, item.y, item.width, item.height)
    }

    pub fn to_update(self) -> ItemUpdate {
        ItemUpdate::rect(self.x, self.y, self.width, self.height)
    }
}

/// Page extent and size floor a resize must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeBounds {
    pub page_width: f64,
    pub page_height: f64,
    pub min_size: f64,
}

/// Solves a corner drag against the box captured at gesture start.
///
/// `dx`/`dy` are the total page-space delta since the gesture began and
/// `aspect` is `crop.width / crop.height` (must be positive and finite).
pub fn solve_resize(
    corner: Corner,
    dx: f64,
    dy: f64,
    start: &BoxGeometry,
    aspect: f64,
    bounds: &ResizeBounds,
) -> BoxGeometry {
    let left = corner.is_left();
    let top = corner.is_top();
    let (anchor_x, anchor_y) = corner.opposite().position_on(start);

    // Dragging a left/top handle outward is a negative delta.
    let grow_x = if left { -dx } else { dx };
    let grow_y = if top { -dy } else { dy };

    let requested = if dx.abs() >= dy.abs() {
        start.width + grow_x
    } else {
        (start.height + grow_y) * aspect
    };

    let min_width = bounds.min_size.max(bounds.min_size * aspect);
    let room_x = if left {
        anchor_x
    } else {
        bounds.page_width - anchor_x
    };
    let room_y = if top {
        anchor_y
    } else {
        bounds.page_height - anchor_y
    };
    let max_width = room_x.min(room_y * aspect);

    let width = if max_width >= min_width {
        requested.clamp(min_width, max_width)
    } else {
        min_width
    };
    let height = width / aspect;

    let x = if left { anchor_x - width } else { anchor_x };
    let y = if top { anchor_y - height } else { anchor_y };

    // The floor can exceed the room at the anchor; the box then moves
    // back onto the page.
    let x = x.min(bounds.page_width - width).max(0.0);
    let y = y.min(bounds.page_height - height).max(0.0);

    BoxGeometry::new(x, y, width, height)
}
