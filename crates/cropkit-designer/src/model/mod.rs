//! Composition data model: crops, placed items and pages.

mod crop;
mod item;
mod page;

pub use crop::{Crop, CropCatalog, CropId, CropStore};
pub use item::{BorderStyle, ItemId, ItemUpdate, ObjectFit, PhoneMockup, PlacedItem};
pub use page::{Page, PageUpdate};

pub use cropkit_core::{Point, Size};
