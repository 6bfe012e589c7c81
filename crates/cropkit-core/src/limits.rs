//! Size and history limits shared by the engine and its configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{HISTORY_CAPACITY, MIN_CANVAS_SIZE, MIN_ITEM_SIZE};

/// Hard limits every committed edit respects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Floor for item width and height, in page units
    pub min_item_size: f64,
    /// Floor for page width and height, in page units
    pub min_canvas_size: f64,
    /// Maximum number of undo entries per page
    pub history_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_item_size: MIN_ITEM_SIZE,
            min_canvas_size: MIN_CANVAS_SIZE,
            history_capacity: HISTORY_CAPACITY,
        }
    }
}

impl Limits {
    /// Returns a description of the first invalid limit, if any.
    pub fn check(&self) -> Option<String> {
        if !(self.min_item_size.is_finite() && self.min_item_size > 0.0) {
            return Some(format!(
                "min_item_size must be positive, got {}",
                self.min_item_size
            ));
        }
        if !(self.min_canvas_size.is_finite() && self.min_canvas_size > 0.0) {
            return Some(format!(
                "min_canvas_size must be positive, got {}",
                self.min_canvas_size
            ));
        }
        if self.history_capacity == 0 {
            return Some("history_capacity must be > 0".to_string());
        }
        None
    }
}
