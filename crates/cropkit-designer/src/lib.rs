//! # CropKit Designer
//!
//! The freeform composition engine: crops placed as items on fixed-size
//! pages, manipulated by pointer gestures and property setters.
//!
//! ## Core Components
//!
//! - **Viewport**: device pixels to page units for every pointer delta
//! - **Shapes**: preset and custom frame polygons, clip geometry
//! - **Resize**: aspect-locked corner resize with an anchored opposite corner
//! - **Rotation**: image/frame rotation and rotation-aware crop panning
//! - **Drag**: the pointer state machine that drives all of the above
//! - **History**: per-page undo/redo with one entry per gesture
//! - **Page resize**: edge drags on the page itself
//!
//! ## Architecture
//!
//! ```text
//! PointerEvent ──> DragController ──> solvers (resize, rotation, shapes)
//!                        │
//!                        └─> DesignerState (silent writes, commit)
//!                                 └── Page + UndoRedoManager<Page>
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cropkit_designer::{Crop, CropCatalog, DesignerState, DragController};
//!
//! let crop = Crop::new("c1", 400.0, 200.0);
//! let mut state = DesignerState::new();
//! let id = state.add_item(&crop, 100.0, 100.0, 200.0, 100.0);
//! let crops: CropCatalog = [crop].into_iter().collect();
//!
//! let mut drag = DragController::new();
//! drag.handle_event(&mut state, &crops, surface, &event);
//! ```

pub mod designer_state;
pub mod drag;
pub mod history;
pub mod model;
pub mod page_resize;
pub mod resize;
pub mod rotation;
pub mod serialization;
pub mod shapes;
pub mod viewport;

pub use designer_state::{DesignerState, NewPageTemplate};
pub use drag::{DragController, DragMode, HitTarget, ItemHandle, PointerEvent};
pub use history::UndoRedoManager;
pub use model::{
    BorderStyle, Crop, CropCatalog, CropId, CropStore, ItemId, ItemUpdate, ObjectFit, Page,
    PageUpdate, PhoneMockup, PlacedItem,
};
pub use page_resize::{PageEdge, PageResizeGesture};
pub use resize::{solve_resize, BoxGeometry, Corner, ResizeBounds};
pub use rotation::{CropPanGesture, RotationGesture};
pub use serialization::{CompositionFile, CompositionMetadata, FILE_FORMAT_VERSION};
pub use shapes::{FrameShape, ShapePoint};
pub use viewport::{SurfaceRect, Viewport};
