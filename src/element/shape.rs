use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::Element;
use crate::element::common::{TEXT_CHAR_WIDTH_FACTOR, TEXT_HEIGHT_FACTOR};
use crate::geometry::hit_testing;
use crate::id_generator::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Arrow,
    Text,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// Parametric shape spanned by a start and an end point.
///
/// Circles are drawn with the start/end diagonal as their diameter. Text labels
/// are anchored at `start` (baseline, left edge) and carry their string in `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ElementId,
    kind: ShapeKind,
    start: Pos2,
    end: Pos2,
    color: Color32,
    stroke_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Shape {
    pub(crate) fn new(
        id: ElementId,
        kind: ShapeKind,
        start: Pos2,
        end: Pos2,
        color: Color32,
        stroke_width: f32,
        text: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            start,
            end,
            color,
            stroke_width,
            text,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Text labels without visible characters are never committed
    pub fn has_visible_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.trim().is_empty())
    }

    /// Axis-aligned box spanned by start and end
    pub fn bounds(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    pub fn center(&self) -> Pos2 {
        self.start.lerp(self.end, 0.5)
    }

    /// Half the diagonal of the start/end box
    pub fn radius(&self) -> f32 {
        self.start.distance(self.end) / 2.0
    }

    /// Approximate box covered by a text label, above and right of its anchor
    pub fn text_bounds(&self) -> Rect {
        let char_count = self.text.as_deref().map_or(0, |text| text.chars().count());
        let width = self.stroke_width * TEXT_CHAR_WIDTH_FACTOR * char_count as f32;
        let height = self.stroke_width * TEXT_HEIGHT_FACTOR;
        Rect::from_min_max(
            Pos2::new(self.start.x, self.start.y - height),
            Pos2::new(self.start.x + width, self.start.y),
        )
    }

    pub(crate) fn set_end(&mut self, end: Pos2) {
        self.end = end;
    }
}

impl Element for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        self.kind.name()
    }

    fn rect(&self) -> Rect {
        match self.kind {
            ShapeKind::Rectangle | ShapeKind::Arrow => self.bounds(),
            ShapeKind::Circle => Rect::from_center_size(
                self.center(),
                egui::Vec2::splat(self.radius() * 2.0),
            ),
            ShapeKind::Text => self.text_bounds(),
        }
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        hit_testing::shape_contains(pos, self, tolerance)
    }
}
