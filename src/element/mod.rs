use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

mod common;
pub(crate) mod image;
pub(crate) mod path;
pub(crate) mod shape;

pub use common::{DEFAULT_HIT_TOLERANCE, TEXT_CHAR_WIDTH_FACTOR, TEXT_HEIGHT_FACTOR};
pub use image::ImageElement;
pub use path::DrawingPath;
pub use shape::{Shape, ShapeKind};

use crate::id_generator::ElementId;

/// Common trait that all document elements must implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Get the bounding rectangle for this element
    fn rect(&self) -> Rect;

    /// Test if the element is hit at the given position
    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool;
}

/// Discriminant of [`DrawingElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Path,
    Shape,
    Image,
}

/// Enumeration of all element types in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum DrawingElement {
    Path(DrawingPath),
    Shape(Shape),
    Image(ImageElement),
}

impl DrawingElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Path(_) => ElementKind::Path,
            Self::Shape(_) => ElementKind::Shape,
            Self::Image(_) => ElementKind::Image,
        }
    }

    pub fn as_path(&self) -> Option<&DrawingPath> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Self::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    pub(crate) fn as_image_mut(&mut self) -> Option<&mut ImageElement> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }
}

impl Element for DrawingElement {
    fn id(&self) -> ElementId {
        match self {
            Self::Path(p) => p.id(),
            Self::Shape(s) => s.id(),
            Self::Image(i) => i.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            Self::Path(p) => p.element_type(),
            Self::Shape(s) => s.element_type(),
            Self::Image(i) => i.element_type(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            Self::Path(p) => p.rect(),
            Self::Shape(s) => s.rect(),
            Self::Image(i) => i.rect(),
        }
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        match self {
            Self::Path(p) => p.hit_test(pos, tolerance),
            Self::Shape(s) => s.hit_test(pos, tolerance),
            Self::Image(i) => i.hit_test(pos, tolerance),
        }
    }
}

impl From<DrawingPath> for DrawingElement {
    fn from(path: DrawingPath) -> Self {
        Self::Path(path)
    }
}

impl From<Shape> for DrawingElement {
    fn from(shape: Shape) -> Self {
        Self::Shape(shape)
    }
}

impl From<ImageElement> for DrawingElement {
    fn from(image: ImageElement) -> Self {
        Self::Image(image)
    }
}

/// Factory functions for creating elements with a fresh id
pub mod factory {
    use super::*;
    use crate::id_generator::generate_id;
    use crate::tools::ToolKind;
    use egui::{Color32, Vec2};
    use std::sync::Arc;

    /// Create a freehand path starting at `start`
    pub fn create_path(start: Pos2, color: Color32, stroke_width: f32) -> DrawingPath {
        create_path_from_points(vec![start], color, stroke_width)
    }

    /// Create a path from an existing list of points
    pub fn create_path_from_points(
        points: Vec<Pos2>,
        color: Color32,
        stroke_width: f32,
    ) -> DrawingPath {
        DrawingPath::new(generate_id(), points, color, stroke_width, ToolKind::Pen)
    }

    /// Create a degenerate shape (start == end) that grows while the pointer moves
    pub fn create_shape(kind: ShapeKind, start: Pos2, color: Color32, stroke_width: f32) -> Shape {
        create_shape_between(kind, start, start, color, stroke_width)
    }

    /// Create a shape spanning two points
    pub fn create_shape_between(
        kind: ShapeKind,
        start: Pos2,
        end: Pos2,
        color: Color32,
        stroke_width: f32,
    ) -> Shape {
        Shape::new(generate_id(), kind, start, end, color, stroke_width, None)
    }

    /// Create a text label. Returns `None` when the text has no visible characters.
    pub fn create_text(
        anchor: Pos2,
        text: &str,
        color: Color32,
        stroke_width: f32,
    ) -> Option<Shape> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Shape::new(
            generate_id(),
            ShapeKind::Text,
            anchor,
            anchor,
            color,
            stroke_width,
            Some(trimmed.to_owned()),
        ))
    }

    /// Create an image placed with its top-left corner at `position`
    pub fn create_image(
        position: Pos2,
        size: Vec2,
        pixel_data: impl Into<Arc<[u8]>>,
        original_size: Vec2,
    ) -> ImageElement {
        ImageElement::new(generate_id(), position, size, pixel_data.into(), original_size)
    }
}
