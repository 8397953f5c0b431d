use std::sync::Arc;

use eframe_sketch::config::EditorConfig;
use eframe_sketch::element::{DrawingElement, Element, ElementKind, ShapeKind};
use eframe_sketch::image::ImportedImage;
use eframe_sketch::state::{EditorState, Interaction};
use eframe_sketch::tools::ToolKind;
use eframe_sketch::widgets::ResizeHandle;
use egui::{Color32, Pos2};

const EPS: f32 = 0.001;

fn pos(x: f32, y: f32) -> Pos2 {
    Pos2::new(x, y)
}

fn imported(width: u32, height: u32) -> ImportedImage {
    ImportedImage {
        data: Arc::from(vec![0u8; 16]),
        width,
        height,
        original_width: width,
        original_height: height,
    }
}

fn drag(state: &mut EditorState, from: Pos2, to: Pos2) -> Interaction {
    state.pointer_down(from);
    state.pointer_move(to);
    state.pointer_up()
}

#[test]
fn test_pen_stroke_with_undo_and_redo() {
    let mut state = EditorState::default();
    state.set_color(Color32::from_rgb(0xEF, 0x44, 0x44));
    state.set_stroke_width(4.0);

    state.pointer_down(pos(10.0, 10.0));
    state.pointer_move(pos(20.0, 20.0));
    state.pointer_move(pos(30.0, 25.0));
    assert_eq!(state.pointer_up(), Interaction::Committed);

    assert_eq!(state.elements().len(), 1);
    let path = state.elements()[0].as_path().unwrap();
    assert_eq!(path.points(), &[pos(10.0, 10.0), pos(20.0, 20.0), pos(30.0, 25.0)]);
    assert_eq!(path.color(), Color32::from_rgb(0xEF, 0x44, 0x44));
    assert_eq!(path.stroke_width(), 4.0);
    assert_eq!(state.history().len(), 2);

    assert!(state.undo());
    assert!(state.elements().is_empty());
    assert!(state.redo());
    assert_eq!(state.elements().len(), 1);
}

#[test]
fn test_moves_do_not_commit() {
    let mut state = EditorState::default();
    state.set_tool(ToolKind::Rectangle);
    state.pointer_down(pos(0.0, 0.0));
    for i in 1..20 {
        assert_eq!(state.pointer_move(pos(i as f32, i as f32)), Interaction::Updated);
    }
    assert_eq!(state.history().len(), 1);
    state.pointer_up();
    assert_eq!(state.history().len(), 2);

    let shape = state.elements()[0].as_shape().unwrap();
    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert_eq!(shape.end(), pos(19.0, 19.0));
}

#[test]
fn test_eraser_removes_topmost_element_only() {
    let mut state = EditorState::default();
    state.set_tool(ToolKind::Rectangle);
    drag(&mut state, pos(0.0, 0.0), pos(100.0, 100.0));
    drag(&mut state, pos(40.0, 40.0), pos(60.0, 60.0));
    let bottom = state.elements()[0].id();

    state.set_tool(ToolKind::Eraser);
    assert_eq!(state.pointer_down(pos(50.0, 50.0)), Interaction::Committed);
    state.pointer_up();

    assert_eq!(state.elements().len(), 1);
    assert_eq!(state.elements()[0].id(), bottom);
    assert_eq!(state.history().len(), 4);
}

#[test]
fn test_eraser_miss_changes_nothing() {
    let mut state = EditorState::default();
    drag(&mut state, pos(0.0, 0.0), pos(10.0, 0.0));
    state.set_tool(ToolKind::Eraser);
    assert_eq!(state.pointer_down(pos(500.0, 500.0)), Interaction::None);
    assert_eq!(state.elements().len(), 1);
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_blank_text_is_dropped() {
    let mut state = EditorState::default();
    assert!(!state.add_text(pos(10.0, 10.0), "   "));
    assert!(state.elements().is_empty());
    assert_eq!(state.history().len(), 1);

    assert!(state.add_text(pos(10.0, 10.0), "  note "));
    let label = state.elements()[0].as_shape().unwrap();
    assert_eq!(label.text(), Some("note"));
}

#[test]
fn test_image_request_and_insert() {
    let mut state = EditorState::default();
    state.set_tool(ToolKind::Image);
    let at = pos(30.0, 40.0);
    assert_eq!(state.pointer_down(at), Interaction::ImageRequested(at));
    assert!(!state.is_drawing());
    assert_eq!(state.pointer_up(), Interaction::None);

    let id = state.insert_image(at, imported(200, 100));
    let image = state.elements()[0].as_image().unwrap();
    assert_eq!(image.id(), id);
    assert_eq!(image.position(), at);
    assert_eq!(image.width(), 200.0);
    assert_eq!(state.elements()[0].kind(), ElementKind::Image);
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_drag_moves_selected_image() {
    let mut state = EditorState::default();
    state.insert_image(pos(100.0, 100.0), imported(200, 100));
    state.set_tool(ToolKind::Select);

    state.pointer_down(pos(150.0, 120.0));
    assert!(state.selection().unwrap().is_dragging());
    state.pointer_move(pos(250.0, 220.0));
    assert_eq!(state.pointer_up(), Interaction::Committed);

    let image = state.selected_image().unwrap();
    assert_eq!(image.position(), pos(200.0, 200.0));
    assert!(!state.selection().unwrap().is_transforming());

    // Undo restores the position and keeps the selection
    assert!(state.undo());
    assert_eq!(state.selected_image().unwrap().position(), pos(100.0, 100.0));
}

#[test]
fn test_resize_keeps_aspect_ratio_and_floor() {
    let mut state = EditorState::default();
    state.insert_image(pos(100.0, 100.0), imported(200, 100));
    state.set_tool(ToolKind::Select);
    state.pointer_down(pos(150.0, 150.0));
    state.pointer_up();

    // Grab the south-east handle and pull it far past the north-west corner
    state.pointer_down(pos(300.0, 200.0));
    state.pointer_move(pos(0.0, 0.0));
    state.pointer_up();

    let image = state.selected_image().unwrap();
    assert!((image.width() / image.height() - 2.0).abs() < EPS);
    assert!(image.height() >= 20.0 - EPS);
    assert!(image.width() >= 20.0 - EPS);
    assert_eq!(image.position(), pos(100.0, 100.0));

    // And back out again
    let corner = image.rect().right_bottom();
    state.pointer_down(corner);
    state.pointer_move(pos(500.0, 120.0));
    state.pointer_up();
    let image = state.selected_image().unwrap();
    assert!((image.width() - 400.0).abs() < EPS);
    assert!((image.height() - 200.0).abs() < EPS);
}

#[test]
fn test_clicking_empty_canvas_deselects() {
    let mut state = EditorState::default();
    state.insert_image(pos(0.0, 0.0), imported(50, 50));
    state.set_tool(ToolKind::Select);
    state.pointer_down(pos(10.0, 10.0));
    state.pointer_up();
    assert!(state.selection().is_some());

    state.pointer_down(pos(300.0, 300.0));
    assert!(state.selection().is_none());
}

#[test]
fn test_undo_clears_selection_of_removed_image() {
    let mut state = EditorState::default();
    state.insert_image(pos(0.0, 0.0), imported(50, 50));
    state.set_tool(ToolKind::Select);
    state.pointer_down(pos(10.0, 10.0));
    state.pointer_up();
    let len_before = state.history().len();

    // Back to before the image existed
    while state.undo() {}
    assert!(state.selection().is_none());
    assert!(state.elements().is_empty());
    assert_eq!(state.history().len(), len_before);
}

#[test]
fn test_clear_commits_empty_document() {
    let mut state = EditorState::default();
    drag(&mut state, pos(0.0, 0.0), pos(10.0, 10.0));
    state.clear();
    assert!(state.elements().is_empty());
    assert_eq!(state.history().len(), 3);

    assert!(state.undo());
    assert_eq!(state.elements().len(), 1);
}

#[test]
fn test_switching_tools_cancels_drawing() {
    let mut state = EditorState::default();
    state.pointer_down(pos(0.0, 0.0));
    state.pointer_move(pos(10.0, 10.0));
    state.set_tool(ToolKind::Circle);
    assert!(!state.is_drawing());
    assert!(state.elements().is_empty());
    assert_eq!(state.history().len(), 1);
}

#[test]
fn test_history_limit_from_config() {
    let config = EditorConfig {
        max_history: 3,
        ..EditorConfig::default()
    };
    let mut state = EditorState::new(config);
    for i in 0..6 {
        state.add_text(pos(i as f32, 0.0), "x");
    }
    assert_eq!(state.history().len(), 4);
    assert_eq!(state.elements().len(), 6);

    let mut undone = 0;
    while state.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert!(state.elements().is_empty());
}

#[test]
fn test_arrow_uses_configured_tolerance_for_erasing() {
    let config = EditorConfig {
        eraser_tolerance: 3.0,
        ..EditorConfig::default()
    };
    let mut state = EditorState::new(config);
    state.set_tool(ToolKind::Arrow);
    drag(&mut state, pos(0.0, 0.0), pos(100.0, 0.0));

    state.set_tool(ToolKind::Eraser);
    assert_eq!(state.pointer_down(pos(50.0, 5.0)), Interaction::None);
    assert_eq!(state.pointer_down(pos(50.0, 2.0)), Interaction::Committed);
    assert!(state.elements().iter().all(|element| !matches!(element, DrawingElement::Shape(_))));
}

#[test]
fn test_text_submitted_before_release_commits_only_the_label() {
    let mut state = EditorState::default();
    state.set_tool(ToolKind::Text);
    let at = pos(40.0, 40.0);

    // The popup answers before the release reaches the state machine
    assert_eq!(state.pointer_down(at), Interaction::TextRequested(at));
    assert!(state.add_text(at, "hi"));
    assert_eq!(state.pointer_up(), Interaction::None);

    assert_eq!(state.elements().len(), 1);
    assert_eq!(state.history().current().len(), 1);
    let label = state.history().current()[0].as_shape().unwrap();
    assert_eq!(label.text(), Some("hi"));
    assert!(label.has_visible_text());

    assert!(state.undo());
    assert!(state.elements().is_empty());
    assert!(state.redo());
    assert_eq!(state.elements().len(), 1);
}

#[test]
fn test_import_during_stroke_commits_only_the_image() {
    let mut state = EditorState::default();
    state.pointer_down(pos(0.0, 0.0));
    state.pointer_move(pos(5.0, 5.0));

    state.insert_image(pos(200.0, 200.0), imported(40, 20));
    let committed = state.history().current();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].kind(), ElementKind::Image);

    // The stroke keeps going and stays on top
    assert!(state.is_drawing());
    state.pointer_move(pos(10.0, 10.0));
    assert_eq!(state.pointer_up(), Interaction::Committed);
    let kinds: Vec<ElementKind> = state.history().current().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![ElementKind::Image, ElementKind::Path]);
    assert_eq!(state.elements()[1].as_path().unwrap().points().len(), 3);
}

#[test]
fn test_import_during_drag_keeps_committed_position() {
    let mut state = EditorState::default();
    state.insert_image(pos(100.0, 100.0), imported(200, 100));
    state.set_tool(ToolKind::Select);
    state.pointer_down(pos(150.0, 120.0));
    state.pointer_move(pos(250.0, 220.0));

    state.insert_image(pos(0.0, 0.0), imported(20, 20));
    let committed = state.history().current()[0].as_image().unwrap();
    assert_eq!(committed.position(), pos(100.0, 100.0));
    assert_eq!(state.selected_image().unwrap().position(), pos(200.0, 200.0));

    assert_eq!(state.pointer_up(), Interaction::Committed);
    let committed = state.history().current();
    assert_eq!(committed.len(), 2);
    assert_eq!(committed[0].as_image().unwrap().position(), pos(200.0, 200.0));
}

#[test]
fn test_redo_at_end_drops_uncommitted_drag() {
    let mut state = EditorState::default();
    state.insert_image(pos(100.0, 100.0), imported(200, 100));
    state.set_tool(ToolKind::Select);
    state.pointer_down(pos(110.0, 110.0));
    state.pointer_move(pos(300.0, 300.0));

    assert!(!state.redo());
    assert_eq!(state.selected_image().unwrap().position(), pos(100.0, 100.0));
    assert_eq!(state.elements(), state.history().current());
    assert!(!state.selection().unwrap().is_transforming());
    assert_eq!(state.pointer_up(), Interaction::None);
}

#[test]
fn test_every_handle_resizes_with_aspect_ratio() {
    for handle in ResizeHandle::HIT_ORDER {
        for target in [pos(0.0, 0.0), pos(700.0, 600.0), pos(180.0, 140.0)] {
            let mut state = EditorState::default();
            state.insert_image(pos(100.0, 100.0), imported(200, 100));
            state.set_tool(ToolKind::Select);
            state.pointer_down(pos(200.0, 150.0));
            state.pointer_up();

            let grab = handle.anchor(state.selected_image().unwrap().rect());
            state.pointer_down(grab);
            assert_eq!(state.selection().unwrap().active_handle(), Some(handle));
            state.pointer_move(target);
            assert_eq!(state.pointer_up(), Interaction::Committed);

            let image = state.history().current()[0].as_image().unwrap();
            assert!((image.width() / image.height() - 2.0).abs() < EPS, "{:?} to {:?}", handle, target);
            assert!(image.width() >= 20.0 - EPS && image.height() >= 20.0 - EPS);
        }
    }
}
