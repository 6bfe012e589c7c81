//! Viewport and coordinate transformation for the page surface.
//!
//! Handles conversion between device pixels (where pointer events arrive)
//! and page units (where item geometry lives). The page surface may be shown
//! at any zoom, so every pointer delta passes through here before a solver
//! sees it.

use serde::{Deserialize, Serialize};

use cropkit_core::constants::DEGENERATE_EPSILON;
use cropkit_core::Point;

/// On-screen rectangle currently occupied by the page surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether the surface has no usable area.
    pub fn is_degenerate(&self) -> bool {
        self.width.abs() < DEGENERATE_EPSILON || self.height.abs() < DEGENERATE_EPSILON
    }
}

/// Mapping between a page of a given size and the surface displaying it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    surface: SurfaceRect,
    page_width: f64,
    page_height: f64,
}

impl Viewport {
    pub fn new(surface: SurfaceRect, page_width: f64, page_height: f64) -> Self {
        Self {
            surface,
            page_width,
            page_height,
        }
    }

    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    /// Device pixels per page unit along X; 0 for a degenerate surface.
    pub fn scale_x(&self) -> f64 {
        if self.surface.is_degenerate() || self.page_width.abs() < DEGENERATE_EPSILON {
            0.0
        } else {
            self.surface.width / self.page_width
        }
    }

    /// Device pixels per page unit along Y; 0 for a degenerate surface.
    pub fn scale_y(&self) -> f64 {
        if self.surface.is_degenerate() || self.page_height.abs() < DEGENERATE_EPSILON {
            0.0
        } else {
            self.surface.height / self.page_height
        }
    }

    /// Converts a device-pixel delta into page units.
    ///
    /// Formula:
    /// ```text
    /// dx_page = dx_device / surface_width  * page_width
    /// dy_page = dy_device / surface_height * page_height
    /// ```
    ///
    /// A zero-sized surface yields a zero delta.
    pub fn delta_to_page(&self, dx_device: f64, dy_device: f64) -> (f64, f64) {
        if self.surface.is_degenerate() {
            return (0.0, 0.0);
        }
        (
            dx_device / self.surface.width * self.page_width,
            dy_device / self.surface.height * self.page_height,
        )
    }

    /// Converts a device-pixel position to a page position.
    pub fn pixel_to_page(&self, pixel: Point) -> Point {
        let (x, y) = self.delta_to_page(pixel.x - self.surface.left, pixel.y - self.surface.top);
        Point::new(x, y)
    }

    /// Converts a page position to device pixels.
    pub fn page_to_pixel(&self, page: Point) -> Point {
        Point::new(
            self.surface.left + page.x * self.scale_x(),
            self.surface.top + page.y * self.scale_y(),
        )
    }

    /// Converts a page-unit length along X to device pixels.
    pub fn page_width_to_pixels(&self, width: f64) -> f64 {
        width * self.scale_x()
    }

    /// Converts a page-unit length along Y to device pixels.
    pub fn page_height_to_pixels(&self, height: f64) -> f64 {
        height * self.scale_y()
    }
}
