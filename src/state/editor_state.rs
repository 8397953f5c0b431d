use egui::{Color32, Pos2};
use log::{debug, info};

use crate::config::EditorConfig;
use crate::element::{factory, DrawingElement, Element, ShapeKind};
use crate::geometry::{hit_test_resize_handle, is_inside_image, topmost_element_at, topmost_image_at};
use crate::history::History;
use crate::id_generator::ElementId;
use crate::image::ImportedImage;
use crate::tools::{resize_image_rect, Selection, ToolKind};

/// Smallest stroke width the editor accepts
pub const MIN_STROKE_WIDTH: f32 = 1.0;

/// What a pointer event asked of the surrounding UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// Nothing happened
    None,
    /// Transient change (drawing, dragging, selection); repaint only
    Updated,
    /// A new snapshot was committed to history
    Committed,
    /// The text tool wants a label at this point
    TextRequested(Pos2),
    /// The image tool wants an image placed at this point
    ImageRequested(Pos2),
}

/// The element currently being drawn. It lives in the element list at
/// `index` until the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InProgress {
    pub id: ElementId,
    pub index: usize,
    pub tool: ToolKind,
}

/// The drawing state machine.
///
/// Owns the live element list, the history ledger and the active tool and
/// style. Pointer events come in canvas coordinates; every completed action
/// commits exactly one snapshot.
#[derive(Debug, Clone)]
pub struct EditorState {
    tool: ToolKind,
    color: Color32,
    stroke_width: f32,
    config: EditorConfig,
    elements: Vec<DrawingElement>,
    history: History,
    in_progress: Option<InProgress>,
    selection: Option<Selection>,
    pending_text: Option<Pos2>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            tool: ToolKind::default(),
            color: config.default_color,
            stroke_width: config.default_stroke_width.max(MIN_STROKE_WIDTH),
            history: History::with_limit(config.max_history),
            config,
            elements: Vec::new(),
            in_progress: None,
            selection: None,
            pending_text: None,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The live element list in paint order, including any element being drawn
    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn in_progress(&self) -> Option<InProgress> {
        self.in_progress
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    /// Where the text tool was last clicked, until the label is submitted or cancelled
    pub fn pending_text(&self) -> Option<Pos2> {
        self.pending_text
    }

    pub fn cancel_pending_text(&mut self) {
        self.pending_text = None;
    }

    /// The selected image, if the selection still points at one
    pub fn selected_image(&self) -> Option<&crate::element::ImageElement> {
        let target = self.selection.as_ref()?.target();
        self.elements
            .iter()
            .find(|element| element.id() == target)
            .and_then(DrawingElement::as_image)
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        info!("Tool changed: {} -> {}", self.tool, tool);
        self.cancel_in_progress();
        if self.tool == ToolKind::Select {
            self.selection = None;
        }
        self.pending_text = None;
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Widths below 1 are clamped
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = if width.is_finite() {
            width.max(MIN_STROKE_WIDTH)
        } else {
            MIN_STROKE_WIDTH
        };
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> Interaction {
        if self.in_progress.is_some() {
            // A second press without a release; finish the first gesture
            self.pointer_up();
        }

        if self.tool != ToolKind::Select {
            self.selection = None;
        }

        match self.tool {
            ToolKind::Select => self.select_at(pos),
            ToolKind::Eraser => self.erase_at(pos),
            ToolKind::Pen => {
                let path = factory::create_path(pos, self.color, self.stroke_width);
                self.begin_element(path.into());
                Interaction::Updated
            }
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow => {
                let Some(kind) = self.tool.shape_kind() else {
                    return Interaction::None;
                };
                let shape = factory::create_shape(kind, pos, self.color, self.stroke_width);
                self.begin_element(shape.into());
                Interaction::Updated
            }
            ToolKind::Text => {
                let shape = factory::create_shape(ShapeKind::Text, pos, self.color, self.stroke_width);
                self.begin_element(shape.into());
                self.pending_text = Some(pos);
                Interaction::TextRequested(pos)
            }
            ToolKind::Image => Interaction::ImageRequested(pos),
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> Interaction {
        if let Some(in_progress) = self.in_progress {
            return match self.elements.get_mut(in_progress.index) {
                Some(DrawingElement::Path(path)) if path.id() == in_progress.id => {
                    path.push_point(pos);
                    Interaction::Updated
                }
                Some(DrawingElement::Shape(shape))
                    if shape.id() == in_progress.id && shape.kind() != ShapeKind::Text =>
                {
                    shape.set_end(pos);
                    Interaction::Updated
                }
                _ => Interaction::None,
            };
        }

        let Some(selection) = self.selection.as_ref() else {
            return Interaction::None;
        };
        if !selection.is_transforming() {
            return Interaction::None;
        }
        let target = selection.target();
        let drag_offset = selection.drag_offset();
        let handle = selection.active_handle();
        let min_dimension = self.config.min_image_dimension;

        let Some(image) = self
            .elements
            .iter_mut()
            .find(|element| element.id() == target)
            .and_then(DrawingElement::as_image_mut)
        else {
            self.selection = None;
            return Interaction::None;
        };

        if let Some(offset) = drag_offset {
            image.set_position(pos - offset);
        } else if let Some(handle) = handle {
            let rect = resize_image_rect(image.rect(), handle, pos, image.aspect_ratio(), min_dimension);
            image.set_rect(rect);
        }
        Interaction::Updated
    }

    pub fn pointer_up(&mut self) -> Interaction {
        if self.in_progress.is_some() {
            // A text press leaves an empty label behind; it is never committed
            self.discard_empty_label();
            let Some(in_progress) = self.in_progress.take() else {
                return Interaction::Updated;
            };
            debug!("Finished drawing {:?}", in_progress.tool);
            self.commit();
            return Interaction::Committed;
        }

        if let Some(selection) = self.selection.as_mut() {
            if selection.finish() {
                self.commit();
                return Interaction::Committed;
            }
        }
        Interaction::None
    }

    /// Place a text label at `pos`. Blank text is dropped without a commit.
    ///
    /// The empty label left by a text press is discarded first, so it can
    /// never reach history even when the release arrives afterwards.
    pub fn add_text(&mut self, pos: Pos2, text: &str) -> bool {
        self.pending_text = None;
        self.discard_empty_label();
        let Some(label) = factory::create_text(pos, text, self.color, self.stroke_width) else {
            debug!("Ignoring blank text at {:?}", pos);
            return false;
        };
        self.append_committed(label.into());
        true
    }

    /// Append an imported image with its top-left corner at `pos`
    pub fn insert_image(&mut self, pos: Pos2, imported: ImportedImage) -> ElementId {
        let size = imported.size();
        let original_size = imported.original_size();
        let image = factory::create_image(pos, size, imported.data, original_size);
        let id = image.id();
        info!(
            "Inserting image {} ({}x{}) at {:?}",
            id, imported.width, imported.height, pos
        );
        self.append_committed(image.into());
        id
    }

    pub fn clear(&mut self) {
        self.cancel_in_progress();
        self.selection = None;
        self.elements.clear();
        self.commit();
        info!("Canvas cleared");
    }

    /// Step back one snapshot. An unfinished gesture is dropped either way,
    /// so the live list always matches the visible snapshot afterwards.
    pub fn undo(&mut self) -> bool {
        self.cancel_in_progress();
        let moved = self.history.undo();
        self.restore_current();
        if moved {
            info!("Undo -> snapshot {}", self.history.cursor());
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_in_progress();
        let moved = self.history.redo();
        self.restore_current();
        if moved {
            info!("Redo -> snapshot {}", self.history.cursor());
        }
        moved
    }

    /// Install a loaded document as one new committed snapshot
    pub fn replace_elements(&mut self, elements: Vec<DrawingElement>) {
        self.cancel_in_progress();
        self.selection = None;
        self.elements = elements;
        self.commit();
        info!("Loaded {} elements", self.elements.len());
    }

    fn select_at(&mut self, pos: Pos2) -> Interaction {
        let handle_size = self.config.handle_size;

        let grab = self.selected_image().map(|image| {
            (
                hit_test_resize_handle(pos, image, handle_size),
                is_inside_image(pos, image),
                image.position(),
            )
        });
        if let (Some((handle, inside, position)), Some(selection)) = (grab, self.selection.as_mut()) {
            // Handles stick out of the box, so they are tested first
            if let Some(handle) = handle {
                selection.begin_resize(handle);
                return Interaction::Updated;
            }
            if inside {
                selection.begin_drag(pos, position);
                return Interaction::Updated;
            }
        }

        let hit = topmost_image_at(pos, &self.elements)
            .and_then(|index| self.elements[index].as_image())
            .map(|image| (image.id(), image.position()));

        match hit {
            Some((id, position)) => {
                debug!("Selected image {}", id);
                let mut selection = Selection::new(id);
                selection.begin_drag(pos, position);
                self.selection = Some(selection);
                Interaction::Updated
            }
            None => {
                if self.selection.take().is_some() {
                    Interaction::Updated
                } else {
                    Interaction::None
                }
            }
        }
    }

    fn erase_at(&mut self, pos: Pos2) -> Interaction {
        let Some(index) = topmost_element_at(pos, &self.elements, self.config.eraser_tolerance) else {
            return Interaction::None;
        };
        let removed = self.elements.remove(index);
        info!("Erased {} {}", removed.element_type(), removed.id());
        if self
            .selection
            .as_ref()
            .is_some_and(|selection| selection.target() == removed.id())
        {
            self.selection = None;
        }
        self.commit();
        Interaction::Committed
    }

    fn begin_element(&mut self, element: DrawingElement) {
        let in_progress = InProgress {
            id: element.id(),
            index: self.elements.len(),
            tool: self.tool,
        };
        self.elements.push(element);
        self.in_progress = Some(in_progress);
    }

    fn cancel_in_progress(&mut self) {
        if let Some(in_progress) = self.in_progress.take() {
            debug!("Cancelled in-progress {:?}", in_progress.tool);
            self.remove_index(in_progress.index);
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.finish();
        }
    }

    fn discard_empty_label(&mut self) {
        let Some(in_progress) = self.in_progress else {
            return;
        };
        let is_empty_label = self
            .elements
            .get(in_progress.index)
            .and_then(DrawingElement::as_shape)
            .is_some_and(|shape| shape.kind() == ShapeKind::Text && !shape.has_visible_text());
        if is_empty_label {
            self.in_progress = None;
            self.remove_index(in_progress.index);
        }
    }

    /// Commit `element` on top of the last committed document. Uncommitted
    /// edits stay live only; an element being drawn stays last.
    fn append_committed(&mut self, element: DrawingElement) {
        let mut snapshot = self.history.current().to_vec();
        snapshot.push(element.clone());
        self.history.commit(snapshot);

        match self.in_progress.as_mut() {
            Some(in_progress) => {
                self.elements.insert(in_progress.index, element);
                in_progress.index += 1;
            }
            None => self.elements.push(element),
        }
    }

    fn remove_index(&mut self, index: usize) {
        if index < self.elements.len() {
            self.elements.remove(index);
        }
    }

    fn restore_current(&mut self) {
        self.elements = self.history.current().to_vec();
        let target_exists = self.selection.as_ref().is_some_and(|selection| {
            self.elements.iter().any(|element| element.id() == selection.target())
        });
        if !target_exists {
            self.selection = None;
        }
    }

    fn commit(&mut self) {
        self.history.commit(self.elements.clone());
    }
}
