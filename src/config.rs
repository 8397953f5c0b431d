use egui::Color32;
use serde::{Deserialize, Serialize};

/// Tunables for the editor. Persisted alongside the app state, so every field
/// needs a sensible default when an older save is restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub default_color: Color32,
    pub default_stroke_width: f32,
    /// Maximum distance at which the eraser still picks up a path or an arrow
    pub eraser_tolerance: f32,
    /// Side length of the square resize handles drawn around a selected image
    pub handle_size: f32,
    /// Lower bound for both image dimensions while resizing
    pub min_image_dimension: f32,
    /// Imported bitmaps larger than this are downscaled (aspect preserved)
    pub max_import_width: u32,
    pub max_import_height: u32,
    /// 0 keeps every snapshot
    pub max_history: usize,
    pub palette: Vec<Color32>,
    pub width_presets: Vec<f32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_color: Color32::from_rgb(0x1F, 0x29, 0x37),
            default_stroke_width: 2.0,
            eraser_tolerance: 10.0,
            handle_size: 8.0,
            min_image_dimension: 20.0,
            max_import_width: 400,
            max_import_height: 400,
            max_history: 0,
            palette: vec![
                Color32::from_rgb(0x1F, 0x29, 0x37),
                Color32::from_rgb(0xEF, 0x44, 0x44),
                Color32::from_rgb(0x10, 0xB9, 0x81),
                Color32::from_rgb(0x3B, 0x82, 0xF6),
                Color32::from_rgb(0xF5, 0x9E, 0x0B),
                Color32::from_rgb(0x8B, 0x5C, 0xF6),
                Color32::from_rgb(0x06, 0xB6, 0xD4),
                Color32::from_rgb(0xF9, 0x73, 0x16),
                Color32::from_rgb(0xEC, 0x48, 0x99),
                Color32::from_rgb(0x84, 0xCC, 0x16),
                Color32::from_rgb(0x63, 0x66, 0xF1),
                Color32::from_rgb(0x14, 0xB8, 0xA6),
            ],
            width_presets: vec![1.0, 2.0, 4.0, 6.0, 8.0, 12.0],
        }
    }
}
