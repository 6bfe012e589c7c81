//! Serialization and deserialization for composition files.
//!
//! A composition file is a JSON document holding every page, the current
//! page index and the crops the items reference. History is not saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cropkit_core::{CompositionError, Limits, Result};

use crate::designer_state::{check_unique_ids, DesignerState};
use crate::model::{CropCatalog, CropStore, Page};

/// Composition file format version
pub const FILE_FORMAT_VERSION: u32 = 1;

/// Composition metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub name: String,
}

impl Default for CompositionMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created: now,
            modified: now,
            name: String::new(),
        }
    }
}

/// Complete composition file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionFile {
    pub version: u32,
    #[serde(default)]
    pub metadata: CompositionMetadata,
    pub pages: Vec<Page>,
    #[serde(default)]
    pub current_page: usize,
    #[serde(default)]
    pub crops: CropCatalog,
}

impl CompositionFile {
    /// Captures the pages of `state` together with `crops`.
    pub fn from_state(state: &DesignerState, crops: &CropCatalog) -> Self {
        Self {
            version: FILE_FORMAT_VERSION,
            metadata: CompositionMetadata::default(),
            pages: state.pages().cloned().collect(),
            current_page: state.current_page_index(),
            crops: crops.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(CompositionError::from)?)
    }

    /// Parses and validates a composition document. Item rotations and
    /// custom polygons are normalized.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut file: CompositionFile =
            serde_json::from_str(json).map_err(CompositionError::from)?;
        file.validate()?;
        for item in file.pages.iter_mut().flat_map(|p| p.items.iter_mut()) {
            item.normalize();
        }
        Ok(file)
    }

    /// Checks the version, page list, item ids and crop references.
    pub fn validate(&self) -> Result<()> {
        if self.version != FILE_FORMAT_VERSION {
            return Err(CompositionError::UnsupportedVersion {
                found: self.version,
                expected: FILE_FORMAT_VERSION,
            }
            .into());
        }
        if self.pages.is_empty() {
            return Err(invalid("composition has no pages"));
        }
        if self.current_page >= self.pages.len() {
            return Err(invalid(format!(
                "current page {} out of range ({} pages)",
                self.current_page,
                self.pages.len()
            )));
        }
        check_unique_ids(&self.pages)?;
        for item in self.pages.iter().flat_map(|p| p.items.iter()) {
            if self.crops.crop(&item.crop_id).is_none() {
                // Allowed: crop-dependent gestures on such items are no-ops.
                tracing::warn!("Item {} references unknown crop {}", item.id, item.crop_id);
            }
        }
        Ok(())
    }

    /// Splits the file into a fresh store and its crop catalog.
    pub fn into_state(self, limits: Limits) -> Result<(DesignerState, CropCatalog)> {
        let state = DesignerState::from_pages(self.pages, self.current_page, limits)?;
        Ok((state, self.crops))
    }
}

fn invalid(reason: impl Into<String>) -> cropkit_core::Error {
    CompositionError::Invalid {
        reason: reason.into(),
    }
    .into()
}
