mod editor_state;
pub mod persistence;

pub use editor_state::{EditorState, InProgress, Interaction, MIN_STROKE_WIDTH};
pub use persistence::{
    load_drawing, save_drawing, PersistenceError, PersistenceResult, SavedDrawing, STORAGE_KEY,
};
