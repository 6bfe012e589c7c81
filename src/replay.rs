//! Headless gesture replay.
//!
//! A replay script is a JSON list of steps: raw pointer events for the drag
//! controller plus the discrete edits a property panel or keyboard would
//! issue. Running it against a composition file yields the edited file,
//! which makes gesture behavior reproducible without a UI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cropkit_designer::model::ItemId;
use cropkit_designer::{
    CompositionFile, CropCatalog, DesignerState, DragController, FrameShape, ItemUpdate,
    PageUpdate, PointerEvent, SurfaceRect,
};
use cropkit_settings::Config;

/// Arrow-key direction for nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NudgeDirection {
    fn delta(self, step: f64) -> (f64, f64) {
        match self {
            NudgeDirection::Left => (-step, 0.0),
            NudgeDirection::Right => (step, 0.0),
            NudgeDirection::Up => (0.0, -step),
            NudgeDirection::Down => (0.0, step),
        }
    }
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ReplayStep {
    /// Pointer input; `surface` overrides the script's surface for this event
    Pointer {
        event: PointerEvent,
        #[serde(default)]
        surface: Option<SurfaceRect>,
    },
    Undo,
    Redo,
    Nudge {
        id: ItemId,
        direction: NudgeDirection,
        #[serde(default)]
        large: bool,
    },
    Delete {
        id: ItemId,
    },
    Duplicate {
        id: ItemId,
    },
    BringToFront {
        id: ItemId,
    },
    SendToBack {
        id: ItemId,
    },
    SetFrameShape {
        id: ItemId,
        shape: FrameShape,
    },
    ClearCustomPoints {
        id: ItemId,
    },
    ResetCropOffset {
        id: ItemId,
    },
    /// Enter corner-edit for `id`, or leave it with `null`
    CornerEdit {
        id: Option<ItemId>,
    },
    Update {
        id: ItemId,
        update: ItemUpdate,
    },
    Page {
        update: PageUpdate,
    },
    AddPage,
    SelectPage {
        index: usize,
    },
}

/// A full replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Where the page is shown; defaults to the page at 1:1 at the origin
    #[serde(default)]
    pub surface: Option<SurfaceRect>,
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Counts of steps that changed the composition and steps that did not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub ignored: usize,
}

/// Drives a composition through a replay script.
pub struct Replayer {
    state: DesignerState,
    crops: CropCatalog,
    drag: DragController,
    nudge_step: f64,
    nudge_step_large: f64,
}

impl Replayer {
    pub fn new(file: CompositionFile, config: &Config) -> Result<Self> {
        let (mut state, crops) = file
            .into_state(config.limits)
            .context("Composition cannot be loaded")?;
        state.set_page_template(crate::page_template(config));

        let mut drag = DragController::new();
        drag.set_rotation_snap(config.editing.rotation_snap_degrees);

        Ok(Self {
            state,
            crops,
            drag,
            nudge_step: config.editing.nudge_step,
            nudge_step_large: config.editing.nudge_step_large,
        })
    }

    pub fn state(&self) -> &DesignerState {
        &self.state
    }

    /// Runs every step in order.
    pub fn run(&mut self, script: &ReplayScript) -> Result<ReplayReport> {
        let mut report = ReplayReport::default();
        for (index, step) in script.steps.iter().enumerate() {
            let changed = self
                .step(step, script.surface)
                .with_context(|| format!("Replay step {} failed", index))?;
            if changed {
                report.applied += 1;
            } else {
                tracing::debug!("Step {} had no effect: {:?}", index, step);
                report.ignored += 1;
            }
        }
        Ok(report)
    }

    /// Applies one step. Returns whether it was accepted.
    pub fn step(&mut self, step: &ReplayStep, surface: Option<SurfaceRect>) -> Result<bool> {
        let state = &mut self.state;
        let changed = match step {
            ReplayStep::Pointer {
                event,
                surface: event_surface,
            } => {
                let surface = event_surface.or(surface).unwrap_or_else(|| {
                    SurfaceRect::new(0.0, 0.0, state.page().width, state.page().height)
                });
                self.drag.handle_event(state, &self.crops, surface, event)
            }
            ReplayStep::Undo => self.drag.undo(state),
            ReplayStep::Redo => self.drag.redo(state),
            ReplayStep::Nudge { id, direction, large } => {
                let step = if *large {
                    self.nudge_step_large
                } else {
                    self.nudge_step
                };
                let (dx, dy) = direction.delta(step);
                state.nudge_item(*id, dx, dy)
            }
            ReplayStep::Delete { id } => state.delete_item(*id),
            ReplayStep::Duplicate { id } => state.duplicate_item(*id).is_some(),
            ReplayStep::BringToFront { id } => state.bring_to_front(*id),
            ReplayStep::SendToBack { id } => state.send_to_back(*id),
            ReplayStep::SetFrameShape { id, shape } => state.set_frame_shape(*id, *shape),
            ReplayStep::ClearCustomPoints { id } => state.clear_custom_points(*id),
            ReplayStep::ResetCropOffset { id } => state.reset_crop_offset(*id),
            ReplayStep::CornerEdit { id } => self.drag.set_corner_edit(state, *id),
            ReplayStep::Update { id, update } => state.update_item(*id, update),
            ReplayStep::Page { update } => state.update_page_size(update),
            ReplayStep::AddPage => {
                state.add_page();
                true
            }
            ReplayStep::SelectPage { index } => {
                state.set_current_page(*index)?;
                true
            }
        };
        self.drag.sync(&self.state);
        Ok(changed)
    }

    /// Ends any open drag the way a pointer leaving the surface would and
    /// returns the resulting composition.
    pub fn finish(mut self) -> CompositionFile {
        if self.drag.is_dragging() {
            tracing::warn!("Script ended mid-drag; committing the open gesture");
            self.drag.pointer_leave(&mut self.state);
        }
        CompositionFile::from_state(&self.state, &self.crops)
    }
}

/// Reads and validates a composition file.
pub fn load_composition(path: &Path) -> Result<CompositionFile> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read composition {}", path.display()))?;
    CompositionFile::from_json(&json)
        .with_context(|| format!("Invalid composition {}", path.display()))
}

/// Writes a composition file as pretty JSON.
pub fn save_composition(path: &Path, file: &CompositionFile) -> Result<()> {
    let json = file.to_json()?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write composition {}", path.display()))?;
    tracing::info!("Wrote composition to {}", path.display());
    Ok(())
}
