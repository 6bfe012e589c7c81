use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use cropkit_core::{LookupError, Result, Size};

/// Key of a crop in the external crop store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(pub String);

impl CropId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A detail cut out of a source image: its window within the source and
/// the size of the source itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: CropId,
    /// Left of the crop window in source pixels
    pub x: f64,
    /// Top of the crop window in source pixels
    pub y: f64,
    /// Width of the crop window in source pixels
    pub width: f64,
    /// Height of the crop window in source pixels
    pub height: f64,
    /// Rotation of the crop selection on the source, in degrees
    pub rotation: f64,
    pub original_image_width: f64,
    pub original_image_height: f64,
}

impl Crop {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: CropId::new(id),
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation: 0.0,
            original_image_width: width,
            original_image_height: height,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Crop width over height; `None` for a degenerate crop.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.size().aspect_ratio()
    }
}

/// Read access to crops by id. The engine never owns or mutates crops.
pub trait CropStore {
    fn crop(&self, id: &CropId) -> Option<&Crop>;

    fn crop_or_err(&self, id: &CropId) -> Result<&Crop> {
        self.crop(id).ok_or_else(|| {
            LookupError::CropNotFound {
                id: id.as_str().to_string(),
            }
            .into()
        })
    }
}

/// In-memory crop store, used by the replay tool and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropCatalog {
    crops: HashMap<CropId, Crop>,
}

impl CropCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, crop: Crop) {
        self.crops.insert(crop.id.clone(), crop);
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Crop> {
        self.crops.values()
    }
}

impl CropStore for CropCatalog {
    fn crop(&self, id: &CropId) -> Option<&Crop> {
        self.crops.get(id)
    }
}

impl FromIterator<Crop> for CropCatalog {
    fn from_iter<I: IntoIterator<Item = Crop>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for crop in iter {
            catalog.insert(crop);
        }
        catalog
    }
}
