use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::Element;
use crate::element::common;
use crate::geometry::hit_testing;
use crate::id_generator::ElementId;
use crate::tools::ToolKind;

/// Freehand stroke made of connected points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingPath {
    id: ElementId,
    points: Vec<Pos2>,
    color: Color32,
    stroke_width: f32,
    tool: ToolKind,
}

impl DrawingPath {
    pub(crate) fn new(
        id: ElementId,
        points: Vec<Pos2>,
        color: Color32,
        stroke_width: f32,
        tool: ToolKind,
    ) -> Self {
        Self {
            id,
            points,
            color,
            stroke_width,
            tool,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// The tool that produced this stroke
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub(crate) fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }
}

impl Element for DrawingPath {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "path"
    }

    fn rect(&self) -> Rect {
        common::calculate_bounds(&self.points, self.stroke_width / 2.0)
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        hit_testing::is_near_path(pos, self, tolerance)
    }
}
