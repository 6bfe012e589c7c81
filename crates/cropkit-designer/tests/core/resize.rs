use cropkit_designer::{solve_resize, BoxGeometry, Corner, ResizeBounds};
use proptest::prelude::*;

const BOUNDS: ResizeBounds = ResizeBounds {
    page_width: 1000.0,
    page_height: 1000.0,
    min_size: 50.0,
};

#[test]
fn test_bottom_right_x_dominant_scenario() {
    let start = BoxGeometry::new(100.0, 100.0, 200.0, 200.0);
    let out = solve_resize(Corner::BottomRight, 100.0, 10.0, &start, 2.0, &BOUNDS);
    assert_eq!(out.width, 300.0);
    assert_eq!(out.height, 150.0);
    assert_eq!(out.x, 100.0);
    assert_eq!(out.y, 100.0);
}

#[test]
fn test_each_corner_keeps_its_own_anchor() {
    let start = BoxGeometry::new(300.0, 300.0, 200.0, 100.0);
    let deltas = [
        (Corner::TopLeft, -40.0, 0.0),
        (Corner::TopRight, 40.0, 0.0),
        (Corner::BottomLeft, -40.0, 0.0),
        (Corner::BottomRight, 40.0, 0.0),
    ];
    for (corner, dx, dy) in deltas {
        let out = solve_resize(corner, dx, dy, &start, 2.0, &BOUNDS);
        assert!((out.width - 240.0).abs() < 1e-9, "{}: {:?}", corner, out);
        assert!((out.height - 120.0).abs() < 1e-9, "{}: {:?}", corner, out);

        let (ax, ay) = corner.opposite().position_on(&start);
        let (bx, by) = corner.opposite().position_on(&out);
        assert!((ax - bx).abs() < 1e-9 && (ay - by).abs() < 1e-9, "{} moved its anchor", corner);
    }
}

#[test]
fn test_tie_uses_x_axis() {
    let start = BoxGeometry::new(100.0, 100.0, 200.0, 100.0);
    let out = solve_resize(Corner::BottomRight, 20.0, 20.0, &start, 2.0, &BOUNDS);
    assert!((out.width - 220.0).abs() < 1e-9);
    assert!((out.height - 110.0).abs() < 1e-9);
}

#[test]
fn test_shrink_floors_at_min_size() {
    let start = BoxGeometry::new(100.0, 100.0, 100.0, 200.0);
    let out = solve_resize(Corner::TopLeft, 500.0, 500.0, &start, 0.5, &BOUNDS);
    assert!(out.width >= 50.0 && out.height >= 50.0);
    assert!((out.width / out.height - 0.5).abs() < 1e-9);
    assert!((out.x + out.width - 200.0).abs() < 1e-9);
    assert!((out.y + out.height - 300.0).abs() < 1e-9);
}

#[test]
fn test_result_stays_on_page() {
    let start = BoxGeometry::new(700.0, 700.0, 200.0, 200.0);
    let out = solve_resize(Corner::BottomRight, 5000.0, 0.0, &start, 1.0, &BOUNDS);
    assert!(out.x + out.width <= 1000.0 + 1e-9);
    assert!(out.y + out.height <= 1000.0 + 1e-9);
    assert_eq!((out.x, out.y), (700.0, 700.0));
}

fn corner() -> impl Strategy<Value = Corner> {
    prop_oneof![
        Just(Corner::TopLeft),
        Just(Corner::TopRight),
        Just(Corner::BottomLeft),
        Just(Corner::BottomRight),
    ]
}

proptest! {
    #[test]
    fn resize_keeps_crop_aspect(
        corner in corner(),
        x in 200.0f64..400.0,
        y in 200.0f64..400.0,
        width in 100.0f64..300.0,
        height in 100.0f64..300.0,
        aspect in 0.5f64..2.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
    ) {
        let start = BoxGeometry::new(x, y, width, height);
        let out = solve_resize(corner, dx, dy, &start, aspect, &BOUNDS);
        prop_assert!((out.width / out.height - aspect).abs() < 1e-9);
        prop_assert!(out.width >= BOUNDS.min_size - 1e-9);
        prop_assert!(out.height >= BOUNDS.min_size - 1e-9);
    }

    #[test]
    fn resize_never_moves_anchor(
        corner in corner(),
        x in 200.0f64..400.0,
        y in 200.0f64..400.0,
        width in 100.0f64..300.0,
        height in 100.0f64..300.0,
        aspect in 0.5f64..2.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
    ) {
        let start = BoxGeometry::new(x, y, width, height);
        let out = solve_resize(corner, dx, dy, &start, aspect, &BOUNDS);
        let (ax, ay) = corner.opposite().position_on(&start);
        let (bx, by) = corner.opposite().position_on(&out);
        prop_assert!((ax - bx).abs() < 1e-6);
        prop_assert!((ay - by).abs() < 1e-6);
        prop_assert!(out.x >= 0.0 && out.y >= 0.0);
        prop_assert!(out.x + out.width <= BOUNDS.page_width + 1e-6);
        prop_assert!(out.y + out.height <= BOUNDS.page_height + 1e-6);
    }

    #[test]
    fn resize_from_anywhere_stays_on_page(
        corner in corner(),
        width in 50.0f64..300.0,
        height in 50.0f64..300.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        aspect in 0.5f64..2.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
    ) {
        let x = fx * (BOUNDS.page_width - width);
        let y = fy * (BOUNDS.page_height - height);
        let start = BoxGeometry::new(x, y, width, height);
        let out = solve_resize(corner, dx, dy, &start, aspect, &BOUNDS);
        prop_assert!((out.width / out.height - aspect).abs() < 1e-9);
        prop_assert!(out.x >= 0.0 && out.y >= 0.0);
        prop_assert!(out.x + out.width <= BOUNDS.page_width + 1e-6);
        prop_assert!(out.y + out.height <= BOUNDS.page_height + 1e-6);
    }
}
