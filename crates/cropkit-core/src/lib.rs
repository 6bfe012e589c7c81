//! # CropKit Core
//!
//! Core types shared by every CropKit crate: the error hierarchy, engine
//! limits and the small geometry primitives the designer and settings
//! crates exchange.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod limits;

pub use error::{CompositionError, Error, LookupError, Result};
pub use geometry::{normalize_degrees, Point, Size};
pub use limits::Limits;
