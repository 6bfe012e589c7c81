//! Rotation and crop-pan math.
//!
//! Angles follow screen conventions: Y points down, positive degrees turn
//! clockwise. Image rotation and frame rotation use the same gesture math
//! but are stored independently on the item.

use nalgebra::{Rotation2, Vector2};

use cropkit_core::constants::DEGENERATE_EPSILON;
use cropkit_core::{normalize_degrees, Point};

use crate::model::{Crop, PlacedItem};

/// Rounds `angle` to the nearest multiple of `step`; `step <= 0` disables it.
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return angle;
    }
    normalize_degrees((angle / step).round() * step)
}

/// A rotate-image or rotate-frame drag, measured around a fixed screen point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationGesture {
    center: Point,
    start_pointer_angle: f64,
    initial_angle: f64,
}

impl RotationGesture {
    /// `center` and `pointer` are screen positions; `initial_angle` is the
    /// stored rotation at press time.
    pub fn new(center: Point, pointer: Point, initial_angle: f64) -> Self {
        Self {
            center,
            start_pointer_angle: pointer.angle_from(&center),
            initial_angle,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Rotation for the pointer at `pointer`, normalized to `(-180, 180]`.
    pub fn angle_at(&self, pointer: Point, snap_step: f64) -> f64 {
        let current = pointer.angle_from(&self.center);
        let angle = normalize_degrees(self.initial_angle + (current - self.start_pointer_angle));
        snap_angle(angle, snap_step)
    }
}

/// Ratio of source pixels to display pixels, or 1 for a degenerate display.
pub fn pan_scale(source_extent: f64, display_extent: f64) -> f64 {
    if display_extent.abs() < DEGENERATE_EPSILON || !display_extent.is_finite() {
        1.0
    } else {
        source_extent / display_extent
    }
}

/// Rotates a screen delta by `-degrees`, undoing a visual rotation.
pub fn unrotate(dx: f64, dy: f64, degrees: f64) -> (f64, f64) {
    let v = Rotation2::new(-degrees.to_radians()) * Vector2::new(dx, dy);
    (v.x, v.y)
}

/// A modifier-held drag that pans the source image inside the crop window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPanGesture {
    initial_offset: (f64, f64),
    combined_rotation: f64,
    scale_x: f64,
    scale_y: f64,
}

impl CropPanGesture {
    /// `display_width`/`display_height` are the item's on-screen size in
    /// device pixels.
    pub fn new(item: &PlacedItem, crop: &Crop, display_width: f64, display_height: f64) -> Self {
        Self {
            initial_offset: (item.crop_offset_x, item.crop_offset_y),
            combined_rotation: item.frame_rotation - item.rotation,
            scale_x: pan_scale(crop.width, display_width),
            scale_y: pan_scale(crop.height, display_height),
        }
    }

    pub fn combined_rotation(&self) -> f64 {
        self.combined_rotation
    }

    /// Offset after a total screen delta of `(dx, dy)` since press.
    ///
    /// The delta is carried into source-image space and subtracted, so
    /// dragging right reveals content to the left. No clamping is applied.
    pub fn offset_for(&self, dx: f64, dy: f64) -> (f64, f64) {
        let (rx, ry) = unrotate(dx, dy, self.combined_rotation);
        (
            self.initial_offset.0 - rx * self.scale_x,
            self.initial_offset.1 - ry * self.scale_y,
        )
    }
}
