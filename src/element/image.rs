use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Element;
use crate::geometry::hit_testing;
use crate::id_generator::ElementId;

/// Placed raster image.
///
/// `width`/`height` are the current render size; `original_width`/`original_height`
/// are the source dimensions and fix the aspect ratio used while resizing.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    id: ElementId,
    position: Pos2,
    width: f32,
    height: f32,
    // Encoded bitmap, shared between history snapshots
    pixel_data: Arc<[u8]>,
    original_width: f32,
    original_height: f32,
}

// Custom Debug implementation to keep the pixel payload out of logs
impl std::fmt::Debug for ImageElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageElement")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.pixel_data.len())
            .field("original_width", &self.original_width)
            .field("original_height", &self.original_height)
            .finish()
    }
}

impl ImageElement {
    pub(crate) fn new(
        id: ElementId,
        position: Pos2,
        size: Vec2,
        pixel_data: Arc<[u8]>,
        original_size: Vec2,
    ) -> Self {
        Self {
            id,
            position,
            width: size.x,
            height: size.y,
            pixel_data,
            original_width: original_size.x,
            original_height: original_size.y,
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn pixel_data(&self) -> &Arc<[u8]> {
        &self.pixel_data
    }

    pub fn original_width(&self) -> f32 {
        self.original_width
    }

    pub fn original_height(&self) -> f32 {
        self.original_height
    }

    /// Width over height of the source bitmap. Falls back to the current box
    /// when the source size is degenerate.
    pub fn aspect_ratio(&self) -> f32 {
        if self.original_width > 0.0 && self.original_height > 0.0 {
            self.original_width / self.original_height
        } else if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub(crate) fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.position = rect.min;
        self.width = rect.width();
        self.height = rect.height();
    }
}

impl Element for ImageElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size())
    }

    fn hit_test(&self, pos: Pos2, _tolerance: f32) -> bool {
        hit_testing::is_inside_image(pos, self)
    }
}
