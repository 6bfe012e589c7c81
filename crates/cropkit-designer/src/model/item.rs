use serde::{Deserialize, Deserializer, Serialize};

use cropkit_core::{normalize_degrees, Point};

use super::crop::{Crop, CropId};
use crate::shapes::{clamp_points, FrameShape, ShapePoint};

/// Stable identity of a placed item within a composition.
pub type ItemId = u64;

/// Border drawn around an item's frame polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
    Double,
}

/// How the crop image fills the item rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

/// Device chrome drawn around the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneMockup {
    #[default]
    None,
    Iphone,
    Android,
}

/// One crop instance placed on a page.
///
/// `x`, `y`, `width` and `height` describe the axis-aligned box before frame
/// rotation is applied. Rotations are stored in degrees in `(-180, 180]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: ItemId,
    pub crop_id: CropId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation of the image inside the frame
    pub rotation: f64,
    /// Rotation of the whole frame around its center
    pub frame_rotation: f64,
    /// Pan of the crop window, in source image pixels
    pub crop_offset_x: f64,
    pub crop_offset_y: f64,
    /// Named preset; inert while `custom_points` is set
    pub frame_shape: FrameShape,
    pub custom_points: Option<Vec<ShapePoint>>,
    pub border_style: BorderStyle,
    pub border_color: String,
    pub border_width: f64,
    pub phone_mockup: PhoneMockup,
    pub object_fit: ObjectFit,
}

impl PlacedItem {
    /// Creates an item for `crop`, inheriting the crop's rotation.
    pub fn new(id: ItemId, crop: &Crop, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            crop_id: crop.id.clone(),
            x,
            y,
            width,
            height,
            rotation: normalize_degrees(crop.rotation),
            frame_rotation: 0.0,
            crop_offset_x: 0.0,
            crop_offset_y: 0.0,
            frame_shape: FrameShape::Rectangle,
            custom_points: None,
            border_style: BorderStyle::None,
            border_color: "#000000".to_string(),
            border_width: 0.0,
            phone_mockup: PhoneMockup::None,
            object_fit: ObjectFit::Cover,
        }
    }

    /// Center of the item box in page units.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a custom polygon currently overrides the preset.
    pub fn has_custom_shape(&self) -> bool {
        self.custom_points.is_some()
    }

    /// The polygon the frame is clipped to, in shape percent units.
    pub fn shape_points(&self) -> Vec<ShapePoint> {
        match &self.custom_points {
            Some(points) => points.clone(),
            None => self.frame_shape.points(),
        }
    }

    /// Restores the field invariants on an item that did not come through
    /// [`apply`](Self::apply), such as one read from a file.
    pub fn normalize(&mut self) {
        self.rotation = normalize_degrees(self.rotation);
        self.frame_rotation = normalize_degrees(self.frame_rotation);
        self.border_width = self.border_width.max(0.0);
        self.custom_points = match self.custom_points.take() {
            Some(points) if points.len() >= 3 => Some(clamp_points(&points)),
            Some(points) => {
                tracing::warn!(
                    "Dropping custom polygon with {} vertices on item {}",
                    points.len(),
                    self.id
                );
                None
            }
            None => None,
        };
    }

    /// Returns a copy of this item with `update` applied.
    ///
    /// Rotations are normalized, custom points clamped into the unit square,
    /// and a custom polygon with fewer than three vertices is ignored.
    pub fn apply(&self, update: &ItemUpdate) -> PlacedItem {
        let mut next = self.clone();

        if let Some(x) = update.x {
            next.x = x;
        }
        if let Some(y) = update.y {
            next.y = y;
        }
        if let Some(width) = update.width {
            next.width = width;
        }
        if let Some(height) = update.height {
            next.height = height;
        }
        if let Some(rotation) = update.rotation {
            next.rotation = normalize_degrees(rotation);
        }
        if let Some(frame_rotation) = update.frame_rotation {
            next.frame_rotation = normalize_degrees(frame_rotation);
        }
        if let Some(offset_x) = update.crop_offset_x {
            next.crop_offset_x = offset_x;
        }
        if let Some(offset_y) = update.crop_offset_y {
            next.crop_offset_y = offset_y;
        }
        if let Some(shape) = update.frame_shape {
            next.frame_shape = shape;
        }
        match &update.custom_points {
            Some(Some(points)) if points.len() >= 3 => {
                next.custom_points = Some(clamp_points(points));
            }
            Some(Some(points)) => {
                tracing::warn!(
                    "Ignoring custom polygon with {} vertices on item {}",
                    points.len(),
                    self.id
                );
            }
            Some(None) => next.custom_points = None,
            None => {}
        }
        if let Some(style) = update.border_style {
            next.border_style = style;
        }
        if let Some(color) = &update.border_color {
            next.border_color = color.clone();
        }
        if let Some(width) = update.border_width {
            next.border_width = width.max(0.0);
        }
        if let Some(mockup) = update.phone_mockup {
            next.phone_mockup = mockup;
        }
        if let Some(fit) = update.object_fit {
            next.object_fit = fit;
        }

        next
    }
}

/// Typed partial update for a [`PlacedItem`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub frame_rotation: Option<f64>,
    pub crop_offset_x: Option<f64>,
    pub crop_offset_y: Option<f64>,
    pub frame_shape: Option<FrameShape>,
    /// `Some(None)` clears the custom polygon
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_points: Option<Option<Vec<ShapePoint>>>,
    pub border_style: Option<BorderStyle>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub phone_mockup: Option<PhoneMockup>,
    pub object_fit: Option<ObjectFit>,
}

impl ItemUpdate {
    /// Whether the update touches the item box.
    pub fn changes_box(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    pub fn frame_rotation(degrees: f64) -> Self {
        Self {
            frame_rotation: Some(degrees),
            ..Self::default()
        }
    }

    pub fn crop_offset(x: f64, y: f64) -> Self {
        Self {
            crop_offset_x: Some(x),
            crop_offset_y: Some(y),
            ..Self::default()
        }
    }

    pub fn custom_points(points: Vec<ShapePoint>) -> Self {
        Self {
            custom_points: Some(Some(points)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Distinguishes an explicit `null` (clear) from an absent field (keep).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
