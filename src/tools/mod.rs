use egui::CursorIcon;
use serde::{Deserialize, Serialize};

use crate::element::ShapeKind;

pub mod selection_tool;

pub use selection_tool::{resize_image_rect, Selection, SelectionMode};

/// Enum representing all available tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Rectangle,
    Circle,
    Arrow,
    Text,
    Eraser,
    Image,
    Select,
}

impl ToolKind {
    /// Toolbar order
    pub const ALL: [ToolKind; 8] = [
        Self::Select,
        Self::Pen,
        Self::Rectangle,
        Self::Circle,
        Self::Arrow,
        Self::Text,
        Self::Image,
        Self::Eraser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Arrow => "arrow",
            Self::Text => "text",
            Self::Eraser => "eraser",
            Self::Image => "image",
            Self::Select => "select",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Arrow => "Arrow",
            Self::Text => "Text",
            Self::Eraser => "Eraser",
            Self::Image => "Image",
            Self::Select => "Select",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Pen => "✏",
            Self::Rectangle => "⬜",
            Self::Circle => "⭕",
            Self::Arrow => "➡",
            Self::Text => "T",
            Self::Eraser => "⌫",
            Self::Image => "🖼",
            Self::Select => "⬉",
        }
    }

    /// The shape a drag with this tool produces, if any
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Arrow => Some(ShapeKind::Arrow),
            Self::Text => Some(ShapeKind::Text),
            Self::Pen | Self::Eraser | Self::Image | Self::Select => None,
        }
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Self::Eraser => CursorIcon::PointingHand,
            Self::Text => CursorIcon::Text,
            Self::Image => CursorIcon::Copy,
            Self::Select => CursorIcon::Default,
            Self::Pen | Self::Rectangle | Self::Circle | Self::Arrow => CursorIcon::Crosshair,
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
