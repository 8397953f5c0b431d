#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod history;
pub mod id_generator;
pub mod image;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod texture_manager;
pub mod tools;
pub mod util;
pub mod widgets;

pub use app::PaintApp;
pub use config::EditorConfig;
pub use element::{DrawingElement, Element, ElementKind};
pub use error::{ExportError, ImportError, PersistenceError, SketchError};
pub use history::History;
pub use id_generator::ElementId;
pub use renderer::Renderer;
pub use state::{EditorState, Interaction};
pub use tools::ToolKind;
