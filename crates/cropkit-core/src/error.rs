//! Error handling for CropKit
//!
//! The geometry engine recovers locally from malformed gestures, so these
//! errors only surface from explicit lookups and from composition
//! (de)serialization. All error types use `thiserror`.

use thiserror::Error;

/// Lookup errors for entities held by the composition store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No placed item with the given id exists on the current page
    #[error("Item {id} not found")]
    ItemNotFound {
        /// The requested item id.
        id: u64,
    },

    /// The crop store has no crop with the given id
    #[error("Crop {id} not found")]
    CropNotFound {
        /// The requested crop id.
        id: String,
    },

    /// Page index is outside the page list
    #[error("Page {index} out of range (pages: {count})")]
    PageOutOfRange {
        /// The requested page index.
        index: usize,
        /// Number of pages in the composition.
        count: usize,
    },
}

/// Errors raised while loading or saving a composition.
#[derive(Error, Debug)]
pub enum CompositionError {
    /// The file was written by an incompatible format version
    #[error("Unsupported composition version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// The composition parsed but violates a structural rule
    #[error("Invalid composition: {reason}")]
    Invalid {
        /// Description of the violated rule.
        reason: String,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for CropKit
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Composition error
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a free-form message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error is a missing-entity lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Lookup(LookupError::ItemNotFound { .. })
                | Error::Lookup(LookupError::CropNotFound { .. })
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Composition(CompositionError::Json(err))
    }
}

/// Result type for CropKit operations
pub type Result<T> = std::result::Result<T, Error>;
