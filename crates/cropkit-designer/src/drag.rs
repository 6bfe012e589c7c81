//! Pointer-driven drag controller.
//!
//! A press classifies the gesture from what was hit and captures everything
//! the mode needs (start snapshot, anchor data). Each move recomputes a full
//! update from that capture and writes it silently, so the newest move
//! replaces the previous one instead of stacking on it. Release, or the
//! pointer leaving the surface, commits the batch as a single undo step.

use serde::{Deserialize, Serialize};
use std::fmt;

use cropkit_core::constants::SHAPE_UNIT;
use cropkit_core::{Point, Result};

use crate::designer_state::DesignerState;
use crate::model::{Crop, CropStore, ItemId, ItemUpdate, PageUpdate, PlacedItem};
use crate::page_resize::{PageEdge, PageResizeGesture};
use crate::resize::{solve_resize, BoxGeometry, Corner, ResizeBounds};
use crate::rotation::{CropPanGesture, RotationGesture};
use crate::shapes::{move_vertex, ShapePoint};
use crate::viewport::{SurfaceRect, Viewport};

/// Part of an item the pointer landed on, as classified by the hit tester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemHandle {
    Body,
    Corner(Corner),
    RotationRing,
    FrameRotationHandle,
    Vertex(usize),
}

/// What a pointer-down hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "kebab-case")]
pub enum HitTarget {
    Item { id: ItemId, handle: ItemHandle },
    PageEdge { edge: PageEdge },
}

/// Pointer input in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        modifier: bool,
        target: HitTarget,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
    Leave,
}

/// Mode of the active drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize(Corner),
    RotateImage,
    RotateFrame,
    CropPan,
    CornerEdit { vertex: usize },
    PageResize(PageEdge),
}

impl fmt::Display for DragMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragMode::Move => write!(f, "move"),
            DragMode::Resize(corner) => write!(f, "resize-{}", corner),
            DragMode::RotateImage => write!(f, "rotate-image"),
            DragMode::RotateFrame => write!(f, "rotate-frame"),
            DragMode::CropPan => write!(f, "crop-pan"),
            DragMode::CornerEdit { vertex } => write!(f, "corner-edit[{}]", vertex),
            DragMode::PageResize(edge) => write!(f, "page-resize-{:?}", edge),
        }
    }
}

#[derive(Debug, Clone)]
enum ItemGesture {
    Move,
    Resize { corner: Corner, aspect: f64 },
    RotateImage(RotationGesture),
    RotateFrame(RotationGesture),
    CropPan(CropPanGesture),
    CornerEdit { vertex: usize, points: Vec<ShapePoint> },
}

#[derive(Debug, Clone)]
struct ItemSession {
    item_id: ItemId,
    start_pointer: Point,
    start_item: PlacedItem,
    gesture: ItemGesture,
}

#[derive(Debug, Clone)]
enum Session {
    Item(ItemSession),
    Page(PageResizeGesture),
}

/// Turns pointer events into item and page edits on a [`DesignerState`].
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<Session>,
    corner_edit: Option<ItemId>,
    rotation_snap: f64,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap step for rotate gestures in degrees; `0` disables snapping.
    pub fn set_rotation_snap(&mut self, degrees: f64) {
        self.rotation_snap = degrees.max(0.0);
    }

    pub fn rotation_snap(&self) -> f64 {
        self.rotation_snap
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Mode of the active session, if any.
    pub fn mode(&self) -> Option<DragMode> {
        self.session.as_ref().map(|session| match session {
            Session::Page(gesture) => DragMode::PageResize(gesture.edge()),
            Session::Item(item) => match &item.gesture {
                ItemGesture::Move => DragMode::Move,
                ItemGesture::Resize { corner, .. } => DragMode::Resize(*corner),
                ItemGesture::RotateImage(_) => DragMode::RotateImage,
                ItemGesture::RotateFrame(_) => DragMode::RotateFrame,
                ItemGesture::CropPan(_) => DragMode::CropPan,
                ItemGesture::CornerEdit { vertex, .. } => DragMode::CornerEdit { vertex: *vertex },
            },
        })
    }

    /// Id of the item being dragged, if any.
    pub fn active_item(&self) -> Option<ItemId> {
        match &self.session {
            Some(Session::Item(item)) => Some(item.item_id),
            _ => None,
        }
    }

    /// Item whose polygon vertices are currently editable.
    pub fn corner_edit_item(&self) -> Option<ItemId> {
        self.corner_edit
    }

    /// Enters or leaves corner-edit. Entering materializes the item's preset
    /// as custom points, which is itself an undo step.
    pub fn set_corner_edit(&mut self, state: &mut DesignerState, item: Option<ItemId>) -> bool {
        if self.session.is_some() {
            tracing::warn!("Corner-edit toggle ignored during a drag");
            return false;
        }
        match item {
            Some(id) => {
                if state.item(id).is_none() {
                    tracing::warn!("Corner-edit requested for missing item {}", id);
                    return false;
                }
                state.begin_custom_shape(id);
                self.corner_edit = Some(id);
            }
            None => self.corner_edit = None,
        }
        true
    }

    /// Drops the corner-edit target, and any session, whose item is no
    /// longer on the current page. Call after edits made around the
    /// controller: deletes, page switches, undo and redo.
    pub fn sync(&mut self, state: &DesignerState) {
        if let Some(id) = self.corner_edit {
            if state.item(id).is_none() {
                tracing::debug!("Corner-edit item {} is gone", id);
                self.corner_edit = None;
            }
        }
        if let Some(id) = self.active_item() {
            if state.item(id).is_none() {
                tracing::warn!("Dragged item {} is gone; dropping the session", id);
                self.session = None;
            }
        }
    }

    /// Undo that refuses to run while a drag holds a start snapshot.
    pub fn undo(&mut self, state: &mut DesignerState) -> bool {
        if self.session.is_some() {
            tracing::warn!("Undo ignored during a drag");
            return false;
        }
        let undone = state.undo();
        self.sync(state);
        undone
    }

    /// Redo counterpart of [`undo`](Self::undo).
    pub fn redo(&mut self, state: &mut DesignerState) -> bool {
        if self.session.is_some() {
            tracing::warn!("Redo ignored during a drag");
            return false;
        }
        let redone = state.redo();
        self.sync(state);
        redone
    }

    /// Dispatches one pointer event.
    pub fn handle_event<C: CropStore>(
        &mut self,
        state: &mut DesignerState,
        crops: &C,
        surface: SurfaceRect,
        event: &PointerEvent,
    ) -> bool {
        match *event {
            PointerEvent::Down {
                x,
                y,
                modifier,
                target,
            } => self.pointer_down(state, crops, surface, target, Point::new(x, y), modifier),
            PointerEvent::Move { x, y } => self.pointer_move(state, surface, Point::new(x, y)),
            PointerEvent::Up => self.pointer_up(state),
            PointerEvent::Leave => self.pointer_leave(state),
        }
    }

    /// Starts a session. Returns `false` when the press is rejected: another
    /// session is active, the item or its crop is missing, or the hit is a
    /// vertex outside corner-edit.
    pub fn pointer_down<C: CropStore>(
        &mut self,
        state: &mut DesignerState,
        crops: &C,
        surface: SurfaceRect,
        target: HitTarget,
        pointer: Point,
        modifier: bool,
    ) -> bool {
        if self.session.is_some() {
            tracing::warn!("Pointer down ignored: a drag is already active");
            return false;
        }

        let session = match target {
            HitTarget::PageEdge { edge } => {
                let page = state.page();
                Session::Page(PageResizeGesture::new(
                    edge,
                    pointer,
                    page.width,
                    page.height,
                    surface,
                ))
            }
            HitTarget::Item { id, handle } => {
                match self.begin_item(state, crops, surface, id, handle, pointer, modifier) {
                    Some(session) => Session::Item(session),
                    None => return false,
                }
            }
        };

        self.session = Some(session);
        if let Some(mode) = self.mode() {
            tracing::debug!("Drag started: {}", mode);
        }
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn begin_item<C: CropStore>(
        &self,
        state: &DesignerState,
        crops: &C,
        surface: SurfaceRect,
        id: ItemId,
        handle: ItemHandle,
        pointer: Point,
        modifier: bool,
    ) -> Option<ItemSession> {
        let Some(item) = state.item(id) else {
            tracing::warn!("Pointer down on missing item {}", id);
            return None;
        };
        let viewport = Viewport::new(surface, state.page().width, state.page().height);
        let crop = crops.crop_or_err(&item.crop_id);
        let screen_center = viewport.page_to_pixel(item.center());

        let gesture = match handle {
            ItemHandle::Body if !modifier => ItemGesture::Move,
            ItemHandle::Body => {
                let crop = require_crop(&crop, item)?;
                ItemGesture::CropPan(CropPanGesture::new(
                    item,
                    crop,
                    viewport.page_width_to_pixels(item.width),
                    viewport.page_height_to_pixels(item.height),
                ))
            }
            ItemHandle::Corner(corner) => {
                let crop = require_crop(&crop, item)?;
                let Some(aspect) = crop.aspect_ratio() else {
                    tracing::warn!("Crop {} has no usable aspect ratio", crop.id);
                    return None;
                };
                ItemGesture::Resize { corner, aspect }
            }
            ItemHandle::RotationRing => {
                require_crop(&crop, item)?;
                ItemGesture::RotateImage(RotationGesture::new(screen_center, pointer, item.rotation))
            }
            ItemHandle::FrameRotationHandle => {
                require_crop(&crop, item)?;
                ItemGesture::RotateFrame(RotationGesture::new(
                    screen_center,
                    pointer,
                    item.frame_rotation,
                ))
            }
            ItemHandle::Vertex(vertex) => {
                if self.corner_edit != Some(id) {
                    tracing::warn!("Vertex hit on item {} outside corner-edit", id);
                    return None;
                }
                let points = item.shape_points();
                if vertex >= points.len() {
                    tracing::warn!(
                        "Vertex {} out of range for item {} ({} points)",
                        vertex,
                        id,
                        points.len()
                    );
                    return None;
                }
                ItemGesture::CornerEdit { vertex, points }
            }
        };

        Some(ItemSession {
            item_id: id,
            start_pointer: pointer,
            start_item: item.clone(),
            gesture,
        })
    }

    /// Advances the active session. Ignored when no session is active.
    pub fn pointer_move(&mut self, state: &mut DesignerState, surface: SurfaceRect, pointer: Point) -> bool {
        let Some(session) = &self.session else {
            return false;
        };

        match session {
            Session::Page(gesture) => {
                let (width, height) = gesture.size_at(pointer, state.limits().min_canvas_size);
                tracing::trace!("Page resize to {}x{}", width, height);
                state.update_page_size_silent(&PageUpdate::size(width, height))
            }
            Session::Item(session) => {
                let Some(update) = self.item_update(session, state, surface, pointer) else {
                    return false;
                };
                tracing::trace!("Drag update for item {}: {:?}", session.item_id, update);
                state.update_item_silent(session.item_id, &update)
            }
        }
    }

    fn item_update(
        &self,
        session: &ItemSession,
        state: &DesignerState,
        surface: SurfaceRect,
        pointer: Point,
    ) -> Option<ItemUpdate> {
        let page = state.page();
        let start = &session.start_item;
        let device_dx = pointer.x - session.start_pointer.x;
        let device_dy = pointer.y - session.start_pointer.y;
        let (dx, dy) = Viewport::new(surface, page.width, page.height).delta_to_page(device_dx, device_dy);

        let update = match &session.gesture {
            ItemGesture::Move => {
                let (x, y) = page.clamp_origin(start.x + dx, start.y + dy, start.width, start.height);
                ItemUpdate::position(x, y)
            }
            ItemGesture::Resize { corner, aspect } => {
                let bounds = ResizeBounds {
                    page_width: page.width,
                    page_height: page.height,
                    min_size: state.limits().min_item_size,
                };
                solve_resize(*corner, dx, dy, &BoxGeometry::from_item(start), *aspect, &bounds)
                    .to_update()
            }
            ItemGesture::RotateImage(gesture) => {
                ItemUpdate::rotation(gesture.angle_at(pointer, self.rotation_snap))
            }
            ItemGesture::RotateFrame(gesture) => {
                ItemUpdate::frame_rotation(gesture.angle_at(pointer, self.rotation_snap))
            }
            ItemGesture::CropPan(gesture) => {
                let (x, y) = gesture.offset_for(device_dx, device_dy);
                ItemUpdate::crop_offset(x, y)
            }
            ItemGesture::CornerEdit { vertex, points } => {
                if start.width <= 0.0 || start.height <= 0.0 {
                    return None;
                }
                let dx_pct = dx / start.width * SHAPE_UNIT;
                let dy_pct = dy / start.height * SHAPE_UNIT;
                ItemUpdate::custom_points(move_vertex(points, *vertex, dx_pct, dy_pct)?)
            }
        };
        Some(update)
    }

    /// Ends the session and commits its changes as one undo step.
    pub fn pointer_up(&mut self, state: &mut DesignerState) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let committed = state.commit();
        match session {
            Session::Item(item) => {
                tracing::debug!("Drag on item {} ended, committed: {}", item.item_id, committed)
            }
            Session::Page(gesture) => {
                tracing::debug!("Page resize {:?} ended, committed: {}", gesture.edge(), committed)
            }
        }
        committed
    }

    /// The pointer left the surface; finishes exactly like a release.
    pub fn pointer_leave(&mut self, state: &mut DesignerState) -> bool {
        self.pointer_up(state)
    }
}

fn require_crop<'a>(crop: &Result<&'a Crop>, item: &PlacedItem) -> Option<&'a Crop> {
    match crop {
        Ok(crop) => Some(*crop),
        Err(err) => {
            tracing::warn!("{} for item {}; gesture ignored", err, item.id);
            None
        }
    }
}
