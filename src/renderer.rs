use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Shape as EguiShape, Stroke, Vec2};

use crate::element::{DrawingElement, DrawingPath, Element, ImageElement, Shape, ShapeKind, TEXT_HEIGHT_FACTOR};
use crate::id_generator::ElementId;
use crate::image::to_color_image;
use crate::state::EditorState;
use crate::texture_manager::TextureManager;
use crate::tools::ToolKind;
use crate::widgets::paint_handle;

/// Length of the two strokes that form an arrow head
pub const ARROW_HEAD_LENGTH: f32 = 20.0;
/// Angle of each arrow head stroke against the shaft
pub const ARROW_HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
/// Gap between an image and its selection outline
pub const SELECTION_OUTLINE_MARGIN: f32 = 2.0;

const SELECTION_COLOR: Color32 = Color32::from_rgb(0x00, 0x66, 0xCC);
const MISSING_IMAGE_FILL: Color32 = Color32::from_gray(220);
const TEXTURE_CACHE_SIZE: usize = 64;

/// Paints the drawing onto an egui painter.
///
/// Elements are stored in canvas coordinates; `canvas.min` is the on-screen
/// origin.
pub struct Renderer {
    textures: TextureManager,
    /// Images whose bytes failed to decode; logged once each
    broken: HashSet<ElementId>,
    ctx: egui::Context,
}

impl Renderer {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
            broken: HashSet::new(),
            ctx: ctx.clone(),
        }
    }

    /// Renders the current frame: images, then strokes and shapes in paint
    /// order, then the selection overlay
    pub fn render(&mut self, painter: &Painter, canvas: Rect, state: &EditorState) {
        self.textures.begin_frame();
        painter.rect_filled(canvas, 0.0, Color32::WHITE);

        let offset = canvas.min.to_vec2();
        let painter = painter.with_clip_rect(canvas);

        let live: HashSet<ElementId> = state
            .elements()
            .iter()
            .filter_map(DrawingElement::as_image)
            .map(|image| image.id())
            .collect();
        self.textures.retain_elements(|id| live.contains(&id));

        for image in state.elements().iter().filter_map(DrawingElement::as_image) {
            self.paint_image(&painter, image, offset);
        }

        for element in state.elements() {
            match element {
                DrawingElement::Path(path) => paint_path(&painter, path, offset),
                DrawingElement::Shape(shape) => paint_shape(&painter, shape, offset),
                DrawingElement::Image(_) => {}
            }
        }

        if state.tool() == ToolKind::Select {
            if let Some(image) = state.selected_image() {
                paint_selection(&painter, image, offset, state.config().handle_size);
            }
        }
    }

    fn paint_image(&mut self, painter: &Painter, image: &ImageElement, offset: Vec2) {
        let rect = image.rect().translate(offset);
        if self.broken.contains(&image.id()) {
            painter.rect_filled(rect, 0.0, MISSING_IMAGE_FILL);
            return;
        }

        match self
            .textures
            .get_or_create_texture(image.id(), image.pixel_data(), to_color_image, &self.ctx)
        {
            Ok(texture) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
            }
            Err(err) => {
                log::error!("Cannot display image {}: {}", image.id(), err);
                self.broken.insert(image.id());
                painter.rect_filled(rect, 0.0, MISSING_IMAGE_FILL);
            }
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("textures", &self.textures)
            .field("broken", &self.broken.len())
            .finish()
    }
}

fn paint_path(painter: &Painter, path: &DrawingPath, offset: Vec2) {
    let stroke = Stroke::new(path.stroke_width(), path.color());
    match path.points() {
        [] => {}
        [point] => {
            painter.circle_filled(*point + offset, path.stroke_width() / 2.0, path.color());
        }
        points => {
            let points: Vec<Pos2> = points.iter().map(|point| *point + offset).collect();
            painter.add(EguiShape::line(points, stroke));
        }
    }
}

fn paint_shape(painter: &Painter, shape: &Shape, offset: Vec2) {
    let stroke = Stroke::new(shape.stroke_width(), shape.color());
    let start = shape.start() + offset;
    let end = shape.end() + offset;

    match shape.kind() {
        ShapeKind::Rectangle => {
            painter.rect_stroke(Rect::from_two_pos(start, end), 0.0, stroke);
        }
        ShapeKind::Circle => {
            painter.circle_stroke(shape.center() + offset, shape.radius(), stroke);
        }
        ShapeKind::Arrow => {
            painter.line_segment([start, end], stroke);
            for tip in arrow_head(start, end) {
                painter.line_segment([end, tip], stroke);
            }
        }
        ShapeKind::Text => {
            if let Some(text) = shape.text().filter(|_| shape.has_visible_text()) {
                painter.text(
                    start,
                    Align2::LEFT_BOTTOM,
                    text,
                    FontId::proportional(text_font_size(shape.stroke_width())),
                    shape.color(),
                );
            }
        }
    }
}

fn paint_selection(painter: &Painter, image: &ImageElement, offset: Vec2, handle_size: f32) {
    let rect = image.rect().translate(offset);
    let outline = rect.expand(SELECTION_OUTLINE_MARGIN);
    let corners = [
        outline.left_top(),
        outline.right_top(),
        outline.right_bottom(),
        outline.left_bottom(),
        outline.left_top(),
    ];
    painter.extend(EguiShape::dashed_line(
        &corners,
        Stroke::new(1.0, SELECTION_COLOR),
        5.0,
        5.0,
    ));

    for handle in crate::widgets::ResizeHandle::HIT_ORDER {
        paint_handle(painter, handle.handle_rect(rect, handle_size));
    }
}

/// The two outer points of an arrow head at `end`, pointing away from `start`
pub fn arrow_head(start: Pos2, end: Pos2) -> [Pos2; 2] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    [angle - ARROW_HEAD_ANGLE, angle + ARROW_HEAD_ANGLE].map(|side| {
        end - ARROW_HEAD_LENGTH * Vec2::angled(side)
    })
}

/// Text labels scale with the stroke width
pub fn text_font_size(stroke_width: f32) -> f32 {
    stroke_width * TEXT_HEIGHT_FACTOR
}
