use cropkit_core::Point;
use cropkit_designer::{
    Corner, Crop, CropCatalog, DesignerState, DragController, DragMode, FrameShape, HitTarget,
    ItemHandle, ItemUpdate, PageEdge, PointerEvent, SurfaceRect,
};

/// Page shown 1:1.
fn full_surface() -> SurfaceRect {
    SurfaceRect::new(0.0, 0.0, 1080.0, 1350.0)
}

/// Page shown at half size.
fn half_surface() -> SurfaceRect {
    SurfaceRect::new(0.0, 0.0, 540.0, 675.0)
}

fn setup(x: f64, y: f64, width: f64, height: f64) -> (DesignerState, CropCatalog, u64) {
    let crop = Crop::new("c1", 400.0, 200.0);
    let mut state = DesignerState::new();
    let id = state.add_item(&crop, x, y, width, height);
    let crops: CropCatalog = [crop].into_iter().collect();
    (state, crops, id)
}

fn press(
    drag: &mut DragController,
    state: &mut DesignerState,
    crops: &CropCatalog,
    surface: SurfaceRect,
    id: u64,
    handle: ItemHandle,
    at: Point,
) -> bool {
    drag.pointer_down(state, crops, surface, HitTarget::Item { id, handle }, at, false)
}

#[test]
fn test_move_gesture_scaled_by_surface() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    assert!(press(&mut drag, &mut state, &crops, half_surface(), id, ItemHandle::Body, Point::new(100.0, 75.0)));
    assert_eq!(drag.mode(), Some(DragMode::Move));
    assert_eq!(drag.active_item(), Some(id));

    drag.pointer_move(&mut state, half_surface(), Point::new(120.0, 80.0));
    drag.pointer_move(&mut state, half_surface(), Point::new(150.0, 100.0));
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y), (200.0, 150.0));

    assert!(drag.pointer_up(&mut state));
    assert!(!drag.is_dragging());
    assert_eq!(state.undo_depth(), 2);

    assert!(state.undo());
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y), (100.0, 100.0));
}

#[test]
fn test_move_clamped_to_page() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Body, Point::new(150.0, 150.0));
    drag.pointer_move(&mut state, full_surface(), Point::new(9000.0, 9000.0));
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y), (880.0, 1250.0));

    drag.pointer_move(&mut state, full_surface(), Point::new(-9000.0, -9000.0));
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y), (0.0, 0.0));
}

#[test]
fn test_gesture_creates_exactly_one_entry() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let before = state.page().clone();
    let depth = state.undo_depth();
    let mut drag = DragController::new();

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Body, Point::new(150.0, 150.0));
    for step in 1..=25 {
        drag.pointer_move(&mut state, full_surface(), Point::new(150.0 + step as f64, 150.0));
    }
    drag.pointer_up(&mut state);

    assert_eq!(state.undo_depth(), depth + 1);
    assert!(state.undo());
    assert_eq!(state.page(), &before);
}

#[test]
fn test_resize_scenario_through_controller() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 200.0);
    let mut drag = DragController::new();

    let handle = ItemHandle::Corner(Corner::BottomRight);
    assert!(press(&mut drag, &mut state, &crops, full_surface(), id, handle, Point::new(300.0, 300.0)));
    assert_eq!(drag.mode(), Some(DragMode::Resize(Corner::BottomRight)));

    drag.pointer_move(&mut state, full_surface(), Point::new(400.0, 310.0));
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y, item.width, item.height), (100.0, 100.0, 300.0, 150.0));
}

#[test]
fn test_each_move_replaces_previous() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    let handle = ItemHandle::Corner(Corner::BottomRight);
    press(&mut drag, &mut state, &crops, full_surface(), id, handle, Point::new(300.0, 200.0));
    drag.pointer_move(&mut state, full_surface(), Point::new(400.0, 200.0));
    drag.pointer_move(&mut state, full_surface(), Point::new(340.0, 200.0));
    let item = state.item(id).unwrap();
    assert_eq!((item.width, item.height), (240.0, 120.0));
}

#[test]
fn test_rotate_frame_scenario() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 200.0);
    state.update_item(id, &ItemUpdate::frame_rotation(170.0));
    let mut drag = DragController::new();

    // Item center is (200, 200) on a 1:1 surface.
    let handle = ItemHandle::FrameRotationHandle;
    assert!(press(&mut drag, &mut state, &crops, full_surface(), id, handle, Point::new(300.0, 200.0)));
    assert_eq!(drag.mode(), Some(DragMode::RotateFrame));

    let (sin, cos) = 20f64.to_radians().sin_cos();
    drag.pointer_move(&mut state, full_surface(), Point::new(200.0 + 100.0 * cos, 200.0 + 100.0 * sin));
    drag.pointer_up(&mut state);

    let item = state.item(id).unwrap();
    assert!((item.frame_rotation - -170.0).abs() < 1e-9, "got {}", item.frame_rotation);
    assert_eq!(item.rotation, 0.0);
}

#[test]
fn test_rotate_image_with_snap() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 200.0);
    let mut drag = DragController::new();
    drag.set_rotation_snap(15.0);

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::RotationRing, Point::new(300.0, 200.0));
    assert_eq!(drag.mode(), Some(DragMode::RotateImage));

    let (sin, cos) = 44f64.to_radians().sin_cos();
    drag.pointer_move(&mut state, full_surface(), Point::new(200.0 + 50.0 * cos, 200.0 + 50.0 * sin));
    let item = state.item(id).unwrap();
    assert_eq!(item.rotation, 45.0);
    assert_eq!(item.frame_rotation, 0.0);
}

#[test]
fn test_modifier_turns_move_into_crop_pan() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    let target = HitTarget::Item { id, handle: ItemHandle::Body };
    assert!(drag.pointer_down(&mut state, &crops, half_surface(), target, Point::new(100.0, 75.0), true));
    assert_eq!(drag.mode(), Some(DragMode::CropPan));

    // 200 page units shown as 100 pixels of a 400 pixel crop.
    drag.pointer_move(&mut state, half_surface(), Point::new(110.0, 75.0));
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y), (100.0, 100.0));
    assert!((item.crop_offset_x - -40.0).abs() < 1e-9);
    assert!(item.crop_offset_y.abs() < 1e-9);
}

#[test]
fn test_vertex_requires_corner_edit() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    assert!(!press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Vertex(0), Point::new(100.0, 100.0)));
    assert!(!drag.is_dragging());

    assert!(drag.set_corner_edit(&mut state, Some(id)));
    assert_eq!(drag.corner_edit_item(), Some(id));
    assert_eq!(state.item(id).unwrap().custom_points, Some(FrameShape::Rectangle.points()));

    let other = state.add_item(&Crop::new("c1", 400.0, 200.0), 500.0, 500.0, 100.0, 100.0);
    assert!(!press(&mut drag, &mut state, &crops, full_surface(), other, ItemHandle::Vertex(0), Point::new(500.0, 500.0)));

    assert!(drag.set_corner_edit(&mut state, None));
    assert_eq!(drag.corner_edit_item(), None);
}

#[test]
fn test_corner_edit_moves_one_vertex_and_clamps() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();
    drag.set_corner_edit(&mut state, Some(id));

    assert!(press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Vertex(0), Point::new(100.0, 100.0)));
    assert_eq!(drag.mode(), Some(DragMode::CornerEdit { vertex: 0 }));

    drag.pointer_move(&mut state, full_surface(), Point::new(125.0, 112.5));
    let points = state.item(id).unwrap().custom_points.clone().unwrap();
    assert_eq!(points[0], [12.5, 12.5]);
    assert_eq!(&points[1..], &FrameShape::Rectangle.points()[1..]);

    drag.pointer_move(&mut state, full_surface(), Point::new(100_000.0, -100_000.0));
    let points = state.item(id).unwrap().custom_points.clone().unwrap();
    assert_eq!(points[0], [100.0, 0.0]);
    drag.pointer_up(&mut state);
}

#[test]
fn test_corner_edit_index_out_of_range() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();
    drag.set_corner_edit(&mut state, Some(id));

    let before = state.page().clone();
    assert!(!press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Vertex(4), Point::new(0.0, 0.0)));
    assert!(!drag.pointer_move(&mut state, full_surface(), Point::new(50.0, 50.0)));
    assert_eq!(state.page(), &before);
}

#[test]
fn test_second_pointer_down_rejected() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Body, Point::new(150.0, 150.0));
    let second = press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::RotationRing, Point::new(0.0, 0.0));
    assert!(!second);
    assert_eq!(drag.mode(), Some(DragMode::Move));

    assert!(!drag.set_corner_edit(&mut state, Some(id)));
}

#[test]
fn test_move_without_session_is_ignored() {
    let (mut state, _, _) = setup(100.0, 100.0, 200.0, 100.0);
    let before = state.page().clone();
    let mut drag = DragController::new();

    assert!(!drag.pointer_move(&mut state, full_surface(), Point::new(10.0, 10.0)));
    assert!(!drag.pointer_up(&mut state));
    assert_eq!(state.page(), &before);
}

#[test]
fn test_leave_commits_like_release() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Body, Point::new(150.0, 150.0));
    drag.pointer_move(&mut state, full_surface(), Point::new(170.0, 150.0));
    assert!(!state.undo());

    assert!(drag.pointer_leave(&mut state));
    assert!(!drag.is_dragging());
    assert!(!state.has_pending_changes());
    assert_eq!(state.item(id).unwrap().x, 120.0);
    assert_eq!(state.undo_depth(), 2);
}

#[test]
fn test_release_without_movement_adds_nothing() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Body, Point::new(150.0, 150.0));
    drag.pointer_move(&mut state, full_surface(), Point::new(150.0, 150.0));
    assert!(!drag.pointer_up(&mut state));
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_missing_crop_is_noop() {
    let (mut state, _, id) = setup(100.0, 100.0, 200.0, 100.0);
    let empty = CropCatalog::new();
    let before = state.page().clone();
    let mut drag = DragController::new();

    for handle in [
        ItemHandle::Corner(Corner::TopLeft),
        ItemHandle::RotationRing,
        ItemHandle::FrameRotationHandle,
    ] {
        assert!(!press(&mut drag, &mut state, &empty, full_surface(), id, handle, Point::new(100.0, 100.0)));
        drag.pointer_move(&mut state, full_surface(), Point::new(400.0, 400.0));
        drag.pointer_up(&mut state);
    }
    let target = HitTarget::Item { id, handle: ItemHandle::Body };
    assert!(!drag.pointer_down(&mut state, &empty, full_surface(), target, Point::new(0.0, 0.0), true));
    assert_eq!(state.page(), &before);
}

#[test]
fn test_missing_item_rejected() {
    let (mut state, crops, _) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();
    assert!(!press(&mut drag, &mut state, &crops, full_surface(), 42, ItemHandle::Body, Point::new(0.0, 0.0)));
}

#[test]
fn test_page_edge_drag() {
    let (mut state, crops, _) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    let target = HitTarget::PageEdge { edge: PageEdge::Right };
    assert!(drag.pointer_down(&mut state, &crops, half_surface(), target, Point::new(540.0, 300.0), false));
    assert_eq!(drag.mode(), Some(DragMode::PageResize(PageEdge::Right)));

    // The surface grows with the page, but the press-time ratio still rules.
    drag.pointer_move(&mut state, SurfaceRect::new(0.0, 0.0, 565.0, 675.0), Point::new(565.0, 300.0));
    drag.pointer_move(&mut state, SurfaceRect::new(0.0, 0.0, 590.0, 675.0), Point::new(590.0, 300.0));
    assert_eq!((state.page().width, state.page().height), (1180.0, 1350.0));

    assert!(drag.pointer_up(&mut state));
    assert_eq!(state.undo_depth(), 2);
    assert!(state.undo());
    assert_eq!(state.page().width, 1080.0);
}

#[test]
fn test_page_edge_floor() {
    let (mut state, crops, _) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();

    let target = HitTarget::PageEdge { edge: PageEdge::Top };
    drag.pointer_down(&mut state, &crops, half_surface(), target, Point::new(200.0, 0.0), false);
    drag.pointer_move(&mut state, half_surface(), Point::new(200.0, 5000.0));
    assert_eq!(state.page().height, 100.0);
}

#[test]
fn test_handle_event_dispatch() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();
    let events = [
        PointerEvent::Down {
            x: 150.0,
            y: 150.0,
            modifier: false,
            target: HitTarget::Item { id, handle: ItemHandle::Body },
        },
        PointerEvent::Move { x: 160.0, y: 170.0 },
        PointerEvent::Up,
    ];
    for event in &events {
        drag.handle_event(&mut state, &crops, full_surface(), event);
    }
    let item = state.item(id).unwrap();
    assert_eq!((item.x, item.y), (110.0, 120.0));
    assert!(!drag.is_dragging());
}

#[test]
fn test_pointer_event_json() {
    let json = r#"{"kind":"down","x":1.0,"y":2.0,"target":{"on":"item","id":3,"handle":{"corner":"tl"}}}"#;
    let event: PointerEvent = serde_json::from_str(json).unwrap();
    assert_eq!(
        event,
        PointerEvent::Down {
            x: 1.0,
            y: 2.0,
            modifier: false,
            target: HitTarget::Item {
                id: 3,
                handle: ItemHandle::Corner(Corner::TopLeft),
            },
        }
    );

    let event: PointerEvent =
        serde_json::from_str(r#"{"kind":"down","x":0,"y":0,"target":{"on":"page-edge","edge":"left"}}"#)
            .unwrap();
    assert!(matches!(
        event,
        PointerEvent::Down { target: HitTarget::PageEdge { edge: PageEdge::Left }, .. }
    ));
}

#[test]
fn test_resize_floor_stays_on_page_near_edge() {
    // Square box on a 2:1 crop, pushed against the right edge.
    let (mut state, crops, id) = setup(1000.0, 100.0, 60.0, 60.0);
    let mut drag = DragController::new();

    let handle = ItemHandle::Corner(Corner::BottomRight);
    assert!(press(&mut drag, &mut state, &crops, full_surface(), id, handle, Point::new(1060.0, 160.0)));
    drag.pointer_move(&mut state, full_surface(), Point::new(1061.0, 160.0));
    drag.pointer_up(&mut state);

    let item = state.item(id).unwrap();
    assert_eq!((item.width, item.height), (100.0, 50.0));
    assert!(item.x + item.width <= 1080.0);
    assert!(item.y + item.height <= 1350.0);
    assert!(item.x >= 0.0 && item.y >= 0.0);
}

#[test]
fn test_undo_refused_while_dragging() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    state.update_item(id, &ItemUpdate::position(300.0, 300.0));
    let mut drag = DragController::new();

    press(&mut drag, &mut state, &crops, full_surface(), id, ItemHandle::Body, Point::new(350.0, 350.0));
    assert!(!drag.undo(&mut state));
    assert!(!drag.redo(&mut state));

    drag.pointer_move(&mut state, full_surface(), Point::new(360.0, 350.0));
    drag.pointer_up(&mut state);
    assert_eq!(state.item(id).unwrap().x, 310.0);

    assert!(drag.undo(&mut state));
    assert_eq!(state.item(id).unwrap().x, 300.0);
}

#[test]
fn test_sync_clears_corner_edit_of_deleted_item() {
    let (mut state, crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();
    drag.set_corner_edit(&mut state, Some(id));

    state.delete_item(id);
    drag.sync(&state);
    assert_eq!(drag.corner_edit_item(), None);

    // Undoing the delete brings the item back, but not the edit mode.
    assert!(drag.undo(&mut state));
    assert!(state.item(id).is_some());
    assert_eq!(drag.corner_edit_item(), None);
    let vertex = ItemHandle::Vertex(0);
    assert!(!press(&mut drag, &mut state, &crops, full_surface(), id, vertex, Point::new(100.0, 100.0)));
}

#[test]
fn test_sync_after_page_switch() {
    let (mut state, _crops, id) = setup(100.0, 100.0, 200.0, 100.0);
    let mut drag = DragController::new();
    drag.set_corner_edit(&mut state, Some(id));

    state.add_page();
    drag.sync(&state);
    assert_eq!(drag.corner_edit_item(), None);
}
