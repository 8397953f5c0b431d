use eframe_sketch::element::Element;
use eframe_sketch::state::{load_drawing, save_drawing, EditorState, PersistenceError, SavedDrawing};
use eframe_sketch::tools::ToolKind;
use egui::Pos2;

fn sample_state() -> EditorState {
    let mut state = EditorState::default();
    state.pointer_down(Pos2::new(0.0, 0.0));
    state.pointer_move(Pos2::new(10.0, 5.0));
    state.pointer_up();
    state.set_tool(ToolKind::Circle);
    state.pointer_down(Pos2::new(50.0, 50.0));
    state.pointer_move(Pos2::new(80.0, 90.0));
    state.pointer_up();
    state.add_text(Pos2::new(5.0, 100.0), "label");
    state
}

#[test]
fn test_save_then_load_restores_elements() {
    let original = sample_state();
    let json = save_drawing(&original).unwrap();

    let mut restored = EditorState::default();
    assert_eq!(load_drawing(&mut restored, Some(&json)).unwrap(), 3);
    assert_eq!(restored.elements(), original.elements());
    // Loading is one undoable step
    assert_eq!(restored.history().len(), 2);
    assert!(restored.undo());
    assert!(restored.elements().is_empty());
}

#[test]
fn test_saved_json_is_tagged() {
    let json = save_drawing(&sample_state()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["timestamp"].is_u64());
    let kinds: Vec<&str> = value["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|element| element["element"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["path", "shape", "shape"]);
}

#[test]
fn test_malformed_save_leaves_document_untouched() {
    let mut state = sample_state();
    let before = state.elements().to_vec();
    let history_len = state.history().len();

    let result = load_drawing(&mut state, Some("{\"elements\": [{\"element\": \"blob\"}]}"));
    assert!(matches!(result, Err(PersistenceError::SerializationError(_))));
    assert_eq!(state.elements(), before.as_slice());
    assert_eq!(state.history().len(), history_len);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let state = sample_state();
    let mut saved = SavedDrawing::new(&state);
    saved.elements.push(saved.elements[0].clone());
    let json = saved.to_json().unwrap();

    let err = SavedDrawing::from_json(&json).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidState(_)));
    assert!(err.to_string().contains(&saved.elements[0].id().to_string()));
}
