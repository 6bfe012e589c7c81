//! Frame polygons.
//!
//! Every frame shape is a closed polygon whose vertices live in a normalized
//! 0..100 square laid over the item box. Presets are fixed vertex lists; a
//! custom polygon is any list of at least three clamped vertices.

use lyon::math::{point, Angle, Transform};
use lyon::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use cropkit_core::constants::SHAPE_UNIT;
use cropkit_core::Point;

use crate::model::PlacedItem;

/// A polygon vertex as `[x%, y%]` of the item box.
pub type ShapePoint = [f64; 2];

/// Preset frame polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameShape {
    #[default]
    Rectangle,
    Triangle,
    Diamond,
    Pentagon,
    Hexagon,
    Octagon,
    Parallelogram,
    Trapezoid,
    Arrow,
    Chevron,
    Notch,
    Star,
    Burst,
    Cross,
    Message,
}

impl FrameShape {
    pub const ALL: [FrameShape; 15] = [
        FrameShape::Rectangle,
        FrameShape::Triangle,
        FrameShape::Diamond,
        FrameShape::Pentagon,
        FrameShape::Hexagon,
        FrameShape::Octagon,
        FrameShape::Parallelogram,
        FrameShape::Trapezoid,
        FrameShape::Arrow,
        FrameShape::Chevron,
        FrameShape::Notch,
        FrameShape::Star,
        FrameShape::Burst,
        FrameShape::Cross,
        FrameShape::Message,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FrameShape::Rectangle => "rectangle",
            FrameShape::Triangle => "triangle",
            FrameShape::Diamond => "diamond",
            FrameShape::Pentagon => "pentagon",
            FrameShape::Hexagon => "hexagon",
            FrameShape::Octagon => "octagon",
            FrameShape::Parallelogram => "parallelogram",
            FrameShape::Trapezoid => "trapezoid",
            FrameShape::Arrow => "arrow",
            FrameShape::Chevron => "chevron",
            FrameShape::Notch => "notch",
            FrameShape::Star => "star",
            FrameShape::Burst => "burst",
            FrameShape::Cross => "cross",
            FrameShape::Message => "message",
        }
    }

    /// Fresh copy of the preset's vertex list.
    pub fn points(&self) -> Vec<ShapePoint> {
        match self {
            FrameShape::Rectangle => vec![[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]],
            FrameShape::Triangle => vec![[50.0, 0.0], [100.0, 100.0], [0.0, 100.0]],
            FrameShape::Diamond => vec![[50.0, 0.0], [100.0, 50.0], [50.0, 100.0], [0.0, 50.0]],
            FrameShape::Pentagon => vec![
                [50.0, 0.0],
                [100.0, 38.0],
                [82.0, 100.0],
                [18.0, 100.0],
                [0.0, 38.0],
            ],
            FrameShape::Hexagon => vec![
                [25.0, 0.0],
                [75.0, 0.0],
                [100.0, 50.0],
                [75.0, 100.0],
                [25.0, 100.0],
                [0.0, 50.0],
            ],
            FrameShape::Octagon => vec![
                [30.0, 0.0],
                [70.0, 0.0],
                [100.0, 30.0],
                [100.0, 70.0],
                [70.0, 100.0],
                [30.0, 100.0],
                [0.0, 70.0],
                [0.0, 30.0],
            ],
            FrameShape::Parallelogram => {
                vec![[25.0, 0.0], [100.0, 0.0], [75.0, 100.0], [0.0, 100.0]]
            }
            FrameShape::Trapezoid => vec![[20.0, 0.0], [80.0, 0.0], [100.0, 100.0], [0.0, 100.0]],
            FrameShape::Arrow => vec![
                [0.0, 20.0],
                [60.0, 20.0],
                [60.0, 0.0],
                [100.0, 50.0],
                [60.0, 100.0],
                [60.0, 80.0],
                [0.0, 80.0],
            ],
            FrameShape::Chevron => vec![
                [75.0, 0.0],
                [100.0, 50.0],
                [75.0, 100.0],
                [0.0, 100.0],
                [25.0, 50.0],
                [0.0, 0.0],
            ],
            FrameShape::Notch => vec![
                [0.0, 0.0],
                [80.0, 0.0],
                [100.0, 20.0],
                [100.0, 100.0],
                [0.0, 100.0],
            ],
            FrameShape::Star => vec![
                [50.0, 0.0],
                [61.0, 35.0],
                [98.0, 35.0],
                [68.0, 57.0],
                [79.0, 91.0],
                [50.0, 70.0],
                [21.0, 91.0],
                [32.0, 57.0],
                [2.0, 35.0],
                [39.0, 35.0],
            ],
            FrameShape::Burst => burst_points(12, 50.0, 38.0),
            FrameShape::Cross => vec![
                [35.0, 0.0],
                [65.0, 0.0],
                [65.0, 35.0],
                [100.0, 35.0],
                [100.0, 65.0],
                [65.0, 65.0],
                [65.0, 100.0],
                [35.0, 100.0],
                [35.0, 65.0],
                [0.0, 65.0],
                [0.0, 35.0],
                [35.0, 35.0],
            ],
            FrameShape::Message => vec![
                [0.0, 0.0],
                [100.0, 0.0],
                [100.0, 75.0],
                [75.0, 75.0],
                [75.0, 100.0],
                [50.0, 75.0],
                [0.0, 75.0],
            ],
        }
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FrameShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name() == wanted)
            .ok_or_else(|| format!("Unknown frame shape: {}", s))
    }
}

/// Alternating outer/inner radius star with `spikes` tips, rounded to 0.01.
fn burst_points(spikes: usize, outer: f64, inner: f64) -> Vec<ShapePoint> {
    let count = spikes * 2;
    (0..count)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let theta = -std::f64::consts::FRAC_PI_2
                + 2.0 * std::f64::consts::PI * (i as f64) / (count as f64);
            [
                round2(50.0 + radius * theta.cos()),
                round2(50.0 + radius * theta.sin()),
            ]
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn clamp_point(p: ShapePoint) -> ShapePoint {
    [p[0].clamp(0.0, SHAPE_UNIT), p[1].clamp(0.0, SHAPE_UNIT)]
}

pub fn clamp_points(points: &[ShapePoint]) -> Vec<ShapePoint> {
    points.iter().copied().map(clamp_point).collect()
}

/// Moves vertex `index` by a delta in percent units, clamped to the unit
/// square. Returns `None` when the index is out of range.
pub fn move_vertex(
    points: &[ShapePoint],
    index: usize,
    dx_pct: f64,
    dy_pct: f64,
) -> Option<Vec<ShapePoint>> {
    let old = *points.get(index)?;
    let mut next = points.to_vec();
    next[index] = clamp_point([old[0] + dx_pct, old[1] + dy_pct]);
    Some(next)
}

/// Vertex average of the polygon.
pub fn centroid(points: &[ShapePoint]) -> ShapePoint {
    if points.is_empty() {
        return [SHAPE_UNIT / 2.0, SHAPE_UNIT / 2.0];
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    [sx / n, sy / n]
}

/// Pulls every vertex toward the centroid by `distance`, never past it.
///
/// Used for the inner line of double borders.
pub fn inset_points(points: &[ShapePoint], distance: f64) -> Vec<ShapePoint> {
    let [cx, cy] = centroid(points);
    points
        .iter()
        .map(|&[x, y]| {
            let dx = cx - x;
            let dy = cy - y;
            let len = (dx * dx + dy * dy).sqrt();
            if len <= f64::EPSILON {
                return [x, y];
            }
            let step = distance.min(len) / len;
            [x + dx * step, y + dy * step]
        })
        .collect()
}

/// CSS `clip-path` value for the polygon.
pub fn clip_path_css(points: &[ShapePoint]) -> String {
    let body = points
        .iter()
        .map(|p| format!("{}% {}%", round2(p[0]), round2(p[1])))
        .collect::<Vec<_>>()
        .join(", ");
    format!("polygon({})", body)
}

/// The item's frame polygon in page units, with frame rotation applied
/// around the item center.
pub fn page_points(item: &PlacedItem) -> Vec<Point> {
    let center = item.center();
    let (sin, cos) = item.frame_rotation.to_radians().sin_cos();
    item.shape_points()
        .iter()
        .map(|&[px, py]| {
            let lx = item.x + px / SHAPE_UNIT * item.width - center.x;
            let ly = item.y + py / SHAPE_UNIT * item.height - center.y;
            Point::new(
                center.x + lx * cos - ly * sin,
                center.y + lx * sin + ly * cos,
            )
        })
        .collect()
}

/// Clip path of the item in page units, for renderers and exporters.
pub fn clip_path(item: &PlacedItem) -> Path {
    let mut builder = Path::builder();
    for (i, [px, py]) in item.shape_points().into_iter().enumerate() {
        // Local coordinates centred on the item so rotation happens in place.
        let p = point(
            ((px / SHAPE_UNIT - 0.5) * item.width) as f32,
            ((py / SHAPE_UNIT - 0.5) * item.height) as f32,
        );
        if i == 0 {
            builder.begin(p);
        } else {
            builder.line_to(p);
        }
    }
    builder.close();

    let path = builder.build();

    let center = item.center();
    let mut transform = Transform::identity();
    if item.frame_rotation.abs() > 1e-6 {
        transform = transform.then_rotate(Angle::radians(item.frame_rotation.to_radians() as f32));
    }
    transform = transform.then_translate(lyon::math::vector(center.x as f32, center.y as f32));

    path.transformed(&transform)
}

/// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` of the clip path.
pub fn clip_bounds(item: &PlacedItem) -> (f64, f64, f64, f64) {
    let path = clip_path(item);
    let bb = lyon::algorithms::aabb::bounding_box(path.iter());
    (
        bb.min.x as f64,
        bb.min.y as f64,
        bb.max.x as f64,
        bb.max.y as f64,
    )
}
