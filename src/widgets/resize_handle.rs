use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};
use serde::{Deserialize, Serialize};

const HANDLE_FILL: Color32 = Color32::from_rgb(0x00, 0x66, 0xCC);

/// One of the eight grab points around a selected image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    W,
    E,
}

impl ResizeHandle {
    /// Order in which handles are hit tested; the first match wins
    pub const HIT_ORDER: [ResizeHandle; 8] = [
        Self::Nw,
        Self::Ne,
        Self::Sw,
        Self::Se,
        Self::N,
        Self::S,
        Self::W,
        Self::E,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Sw => "sw",
            Self::Se => "se",
            Self::N => "n",
            Self::S => "s",
            Self::W => "w",
            Self::E => "e",
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Sw | Self::Se)
    }

    /// Point on the box edge this handle is centered on
    pub fn anchor(&self, rect: Rect) -> Pos2 {
        let center = rect.center();
        match self {
            Self::Nw => rect.left_top(),
            Self::Ne => rect.right_top(),
            Self::Sw => rect.left_bottom(),
            Self::Se => rect.right_bottom(),
            Self::N => Pos2::new(center.x, rect.min.y),
            Self::S => Pos2::new(center.x, rect.max.y),
            Self::W => Pos2::new(rect.min.x, center.y),
            Self::E => Pos2::new(rect.max.x, center.y),
        }
    }

    /// Square grab area of side `size` centered on the anchor
    pub fn handle_rect(&self, rect: Rect, size: f32) -> Rect {
        Rect::from_center_size(self.anchor(rect), Vec2::splat(size))
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Self::Nw | Self::Se => CursorIcon::ResizeNwSe,
            Self::Ne | Self::Sw => CursorIcon::ResizeNeSw,
            Self::N | Self::S => CursorIcon::ResizeVertical,
            Self::W | Self::E => CursorIcon::ResizeHorizontal,
        }
    }
}

/// Draw a handle square: blue fill with a white border
pub fn paint_handle(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, HANDLE_FILL);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::WHITE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_sit_on_the_box() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(ResizeHandle::Nw.anchor(rect), Pos2::new(10.0, 20.0));
        assert_eq!(ResizeHandle::Se.anchor(rect), Pos2::new(110.0, 70.0));
        assert_eq!(ResizeHandle::N.anchor(rect), Pos2::new(60.0, 20.0));
        assert_eq!(ResizeHandle::W.anchor(rect), Pos2::new(10.0, 45.0));
    }

    #[test]
    fn test_handle_rect_is_centered() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(40.0, 40.0));
        let handle = ResizeHandle::E.handle_rect(rect, 8.0);
        assert_eq!(handle.center(), Pos2::new(40.0, 20.0));
        assert_eq!(handle.size(), Vec2::splat(8.0));
    }
}
