//! Engine-wide defaults.
//!
//! These are the values used when no configuration file overrides them.

/// Smallest width or height a placed item may be resized to, in page units.
pub const MIN_ITEM_SIZE: f64 = 50.0;

/// Smallest width or height a page may be resized to, in page units.
pub const MIN_CANVAS_SIZE: f64 = 100.0;

/// Number of undo steps kept per page before the oldest are dropped.
pub const HISTORY_CAPACITY: usize = 50;

/// Default page width for new compositions (portrait 4:5).
pub const DEFAULT_PAGE_WIDTH: f64 = 1080.0;

/// Default page height for new compositions.
pub const DEFAULT_PAGE_HEIGHT: f64 = 1350.0;

/// Default page background.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Side length of the normalized square custom polygon points live in.
pub const SHAPE_UNIT: f64 = 100.0;

/// Below this many screen pixels a display dimension is treated as degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-6;
