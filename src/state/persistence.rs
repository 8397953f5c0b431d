use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EditorState;
use crate::element::{DrawingElement, Element};
use crate::util::time;

/// Storage slot the drawing is saved under
pub const STORAGE_KEY: &str = "drawing_save";

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize drawing: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write drawing: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("No saved drawing found")]
    NotFound,

    #[error("Invalid drawing data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The document as written to the save slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDrawing {
    pub elements: Vec<DrawingElement>,
    /// Seconds since the UNIX epoch at save time
    pub timestamp: u64,
    /// Version of the application that wrote the save
    pub version: String,
}

impl SavedDrawing {
    /// Snapshot the visible document of `state`
    pub fn new(state: &EditorState) -> Self {
        Self {
            elements: state.history().current().to_vec(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a save. Nothing is returned unless every element is sound.
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let saved: Self = serde_json::from_str(json)?;
        saved.validate()?;
        if saved.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Saved drawing version {} differs from current version {}",
                saved.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(saved)
    }

    fn validate(&self) -> PersistenceResult<()> {
        let mut seen = std::collections::HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id()) {
                return Err(PersistenceError::InvalidState(format!(
                    "duplicate element id {}",
                    element.id()
                )));
            }
            if let DrawingElement::Image(image) = element {
                if !(image.width() > 0.0 && image.height() > 0.0) {
                    return Err(PersistenceError::InvalidState(format!(
                        "image {} has an empty box",
                        image.id()
                    )));
                }
            }
            if let DrawingElement::Path(path) = element {
                if path.stroke_width() <= 0.0 {
                    return Err(PersistenceError::InvalidState(format!(
                        "path {} has no width",
                        path.id()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Serialize the visible document of `state` for the save slot
pub fn save_drawing(state: &EditorState) -> PersistenceResult<String> {
    let json = SavedDrawing::new(state).to_json()?;
    log::info!("Saved {} elements ({} bytes)", state.elements().len(), json.len());
    Ok(json)
}

/// Replace the document with the save in `json`. On any error the state is left untouched.
pub fn load_drawing(state: &mut EditorState, json: Option<&str>) -> PersistenceResult<usize> {
    let json = json.ok_or(PersistenceError::NotFound)?;
    let saved = SavedDrawing::from_json(json).inspect_err(|err| {
        log::error!("Failed to load drawing: {}", err);
    })?;
    let count = saved.elements.len();
    state.replace_elements(saved.elements);
    Ok(count)
}
