use thiserror::Error;

/// Errors raised while bringing an external bitmap into the drawing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("The file must be an image (got {0})")]
    NotAnImage(String),

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to read image file: {0}")]
    ReadFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Errors raised while flattening and writing the rendered canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] ::image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),

    #[error("Export is not supported on this platform")]
    Unsupported,
}

pub type ExportResult<T> = Result<T, ExportError>;

pub use crate::state::PersistenceError;

/// Any failure the editor surfaces to the user
#[derive(Debug, Error)]
pub enum SketchError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
