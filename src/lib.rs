//! # CropKit
//!
//! A freeform photo-composition engine. Crops cut from source images are
//! placed on fixed-size pages and arranged with pointer gestures: move,
//! aspect-locked resize, image and frame rotation, crop panning and polygon
//! corner editing, all with per-gesture undo.
//!
//! ## Architecture
//!
//! CropKit is organized as a workspace with multiple crates:
//!
//! 1. **cropkit-core** - Errors, limits and shared geometry primitives
//! 2. **cropkit-settings** - Engine configuration (JSON/TOML)
//! 3. **cropkit-designer** - The composition engine: drag controller,
//!    solvers, frame shapes and history
//! 4. **cropkit** - This crate: logging, file I/O and the headless replay tool

pub mod replay;

pub use cropkit_core::{CompositionError, Error, Limits, LookupError, Point, Result, Size};
pub use cropkit_designer as designer;
pub use cropkit_designer::{
    CompositionFile, Corner, Crop, CropCatalog, DesignerState, DragController, DragMode,
    FrameShape, HitTarget, ItemHandle, ItemUpdate, NewPageTemplate, Page, PageEdge, PageUpdate,
    PlacedItem, PointerEvent, SurfaceRect,
};
pub use cropkit_settings::{Config, EditingSettings, PageDefaults};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so command output on stdout stays clean. The level
/// defaults to INFO and can be overridden with `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Page template for new pages, taken from the configured page defaults.
pub fn page_template(config: &Config) -> NewPageTemplate {
    NewPageTemplate {
        width: config.page.width,
        height: config.page.height,
        background_color: config.page.background_color.clone(),
    }
}
