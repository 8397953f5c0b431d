use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::id_generator::ElementId;
use crate::widgets::ResizeHandle;

/// What the select tool is currently doing with its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionMode {
    Idle,
    Dragging {
        /// Pointer position minus the image's top-left corner at grab time
        offset: Vec2,
    },
    Resizing {
        handle: ResizeHandle,
    },
}

/// A single selected image under the select tool
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    target: ElementId,
    mode: SelectionMode,
}

impl Selection {
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            mode: SelectionMode::Idle,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, SelectionMode::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.mode, SelectionMode::Resizing { .. })
    }

    pub fn is_transforming(&self) -> bool {
        !matches!(self.mode, SelectionMode::Idle)
    }

    pub fn active_handle(&self) -> Option<ResizeHandle> {
        match self.mode {
            SelectionMode::Resizing { handle } => Some(handle),
            _ => None,
        }
    }

    pub fn drag_offset(&self) -> Option<Vec2> {
        match self.mode {
            SelectionMode::Dragging { offset } => Some(offset),
            _ => None,
        }
    }

    pub(crate) fn begin_drag(&mut self, pointer: Pos2, image_position: Pos2) {
        let offset = pointer - image_position;
        debug!("Selection {}: dragging with offset {:?}", self.target, offset);
        self.mode = SelectionMode::Dragging { offset };
    }

    pub(crate) fn begin_resize(&mut self, handle: ResizeHandle) {
        debug!("Selection {}: resizing from {}", self.target, handle.as_str());
        self.mode = SelectionMode::Resizing { handle };
    }

    /// Drop back to idle. Returns whether a drag or resize was in progress.
    pub(crate) fn finish(&mut self) -> bool {
        let was_transforming = self.is_transforming();
        self.mode = SelectionMode::Idle;
        was_transforming
    }
}

/// New box for an image dragged by `handle` to `pointer`.
///
/// The aspect ratio (`width / height`) is always kept. Corner handles take the
/// width from the horizontal distance to the fixed opposite corner and derive
/// the height from it. `E`/`W` work the same way and keep the box vertically
/// centered; `N`/`S` take the height from the vertical distance and keep it
/// horizontally centered. Both dimensions are floored at `min_dimension`.
pub fn resize_image_rect(
    rect: Rect,
    handle: ResizeHandle,
    pointer: Pos2,
    aspect_ratio: f32,
    min_dimension: f32,
) -> Rect {
    let ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    };
    let min_width = min_dimension.max(min_dimension * ratio);
    let min_height = min_dimension.max(min_dimension / ratio);

    let fixed = opposite(handle).anchor(rect);
    let center = rect.center();

    match handle {
        ResizeHandle::N | ResizeHandle::S => {
            let raw_height = match handle {
                ResizeHandle::N => fixed.y - pointer.y,
                _ => pointer.y - fixed.y,
            };
            let height = raw_height.max(min_height);
            let width = height * ratio;
            let top = if handle == ResizeHandle::N {
                fixed.y - height
            } else {
                fixed.y
            };
            Rect::from_min_size(Pos2::new(center.x - width / 2.0, top), Vec2::new(width, height))
        }
        _ => {
            let grows_west = matches!(handle, ResizeHandle::Nw | ResizeHandle::Sw | ResizeHandle::W);
            let raw_width = if grows_west {
                fixed.x - pointer.x
            } else {
                pointer.x - fixed.x
            };
            let width = raw_width.max(min_width);
            let height = width / ratio;

            let left = if grows_west { fixed.x - width } else { fixed.x };
            let top = match handle {
                ResizeHandle::Nw | ResizeHandle::Ne => fixed.y - height,
                ResizeHandle::Sw | ResizeHandle::Se => fixed.y,
                // E / W
                _ => center.y - height / 2.0,
            };
            Rect::from_min_size(Pos2::new(left, top), Vec2::new(width, height))
        }
    }
}

fn opposite(handle: ResizeHandle) -> ResizeHandle {
    match handle {
        ResizeHandle::Nw => ResizeHandle::Se,
        ResizeHandle::Ne => ResizeHandle::Sw,
        ResizeHandle::Sw => ResizeHandle::Ne,
        ResizeHandle::Se => ResizeHandle::Nw,
        ResizeHandle::N => ResizeHandle::S,
        ResizeHandle::S => ResizeHandle::N,
        ResizeHandle::W => ResizeHandle::E,
        ResizeHandle::E => ResizeHandle::W,
    }
}
