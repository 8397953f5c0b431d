use egui::{Context, CursorIcon, Pos2, Rect};

use crate::geometry::{hit_test_resize_handle, is_inside_image};
use crate::state::{EditorState, Interaction};
use crate::tools::ToolKind;

/// Primary-button pointer state for one frame, in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl PointerSample {
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|i| Self {
            position: i.pointer.interact_pos(),
            pressed: i.pointer.primary_pressed(),
            down: i.pointer.primary_down(),
            released: i.pointer.primary_released(),
        })
    }
}

/// A gesture step in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
}

/// Turns egui pointer state into canvas-local gesture steps.
///
/// A gesture starts with a press inside the canvas and ends on release or
/// when the pointer leaves the canvas.
#[derive(Debug, Clone)]
pub struct CanvasInput {
    canvas_rect: Rect,
    active: bool,
    last_position: Option<Pos2>,
}

impl Default for CanvasInput {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl CanvasInput {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            active: false,
            last_position: None,
        }
    }

    pub fn set_canvas_rect(&mut self, canvas_rect: Rect) {
        self.canvas_rect = canvas_rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// True between a press on the canvas and the end of that gesture
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Screen position to canvas coordinates
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        (screen - self.canvas_rect.min).to_pos2()
    }

    /// The gesture steps for one frame
    pub fn step(&mut self, sample: PointerSample) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let inside = sample
            .position
            .filter(|position| self.canvas_rect.contains(*position));

        if !self.active {
            if let (true, Some(position)) = (sample.pressed, inside) {
                self.active = true;
                self.last_position = Some(position);
                events.push(CanvasEvent::Down(self.to_canvas(position)));
            }
            // A click can press and release within the same frame
            if self.active && sample.released {
                self.finish(&mut events);
            }
            return events;
        }

        match inside {
            None => {
                log::debug!("Pointer left the canvas, ending gesture");
                self.finish(&mut events);
                return events;
            }
            Some(position) => {
                if sample.down && self.last_position != Some(position) {
                    self.last_position = Some(position);
                    events.push(CanvasEvent::Move(self.to_canvas(position)));
                }
            }
        }

        if sample.released || !sample.down {
            self.finish(&mut events);
        }
        events
    }

    fn finish(&mut self, events: &mut Vec<CanvasEvent>) {
        self.active = false;
        self.last_position = None;
        events.push(CanvasEvent::Up);
    }
}

/// Feed gesture steps into the state machine, returning what each asked for
pub fn apply_events(state: &mut EditorState, events: &[CanvasEvent]) -> Vec<Interaction> {
    events
        .iter()
        .map(|event| match *event {
            CanvasEvent::Down(position) => state.pointer_down(position),
            CanvasEvent::Move(position) => state.pointer_move(position),
            CanvasEvent::Up => state.pointer_up(),
        })
        .collect()
}

/// Cursor to show while hovering `position` (canvas coordinates)
pub fn cursor_for(state: &EditorState, position: Pos2) -> CursorIcon {
    if state.tool() != ToolKind::Select {
        return state.tool().cursor_icon();
    }

    if let Some(selection) = state.selection() {
        if let Some(handle) = selection.active_handle() {
            return handle.cursor_icon();
        }
        if selection.is_dragging() {
            return CursorIcon::Grabbing;
        }
    }

    if let Some(image) = state.selected_image() {
        if let Some(handle) = hit_test_resize_handle(position, image, state.config().handle_size) {
            return handle.cursor_icon();
        }
    }

    let over_image = state
        .elements()
        .iter()
        .filter_map(|element| element.as_image())
        .any(|image| is_inside_image(position, image));
    if over_image {
        CursorIcon::Grab
    } else {
        ToolKind::Select.cursor_icon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn canvas() -> CanvasInput {
        CanvasInput::new(Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0)))
    }

    fn sample(x: f32, y: f32, pressed: bool, down: bool, released: bool) -> PointerSample {
        PointerSample {
            position: Some(Pos2::new(x, y)),
            pressed,
            down,
            released,
        }
    }

    #[test]
    fn test_press_drag_release() {
        let mut input = canvas();
        assert_eq!(
            input.step(sample(110.0, 60.0, true, true, false)),
            vec![CanvasEvent::Down(Pos2::new(10.0, 10.0))]
        );
        assert_eq!(
            input.step(sample(120.0, 70.0, false, true, false)),
            vec![CanvasEvent::Move(Pos2::new(20.0, 20.0))]
        );
        // No movement, no event
        assert!(input.step(sample(120.0, 70.0, false, true, false)).is_empty());
        assert_eq!(
            input.step(sample(120.0, 70.0, false, false, true)),
            vec![CanvasEvent::Up]
        );
        assert!(!input.is_active());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = canvas();
        assert!(input.step(sample(10.0, 10.0, true, true, false)).is_empty());
        assert!(input.step(sample(150.0, 60.0, false, true, false)).is_empty());
    }

    #[test]
    fn test_leaving_canvas_ends_gesture() {
        let mut input = canvas();
        input.step(sample(110.0, 60.0, true, true, false));
        assert_eq!(
            input.step(sample(600.0, 60.0, false, true, false)),
            vec![CanvasEvent::Up]
        );
        assert!(input.step(sample(110.0, 60.0, false, true, false)).is_empty());
    }

    #[test]
    fn test_click_within_one_frame() {
        let mut input = canvas();
        assert_eq!(
            input.step(sample(110.0, 60.0, true, false, true)),
            vec![CanvasEvent::Down(Pos2::new(10.0, 10.0)), CanvasEvent::Up]
        );
    }
}
