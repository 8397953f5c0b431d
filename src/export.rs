use std::io::Cursor;

use ::image::{ImageFormat, RgbImage};
use egui::ColorImage;

use crate::error::{ExportError, ExportResult};

/// `drawing_<timestamp>.png`
pub fn export_file_name(timestamp: u64) -> String {
    format!("drawing_{}.png", timestamp)
}

/// Composite a rendered surface onto opaque white.
///
/// egui colors are premultiplied, so each channel is `c + (255 - a)`.
pub fn flatten_onto_white(surface: &ColorImage) -> ExportResult<RgbImage> {
    let [width, height] = surface.size;
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions { width, height });
    }

    let mut flat = RgbImage::new(width as u32, height as u32);
    for (pixel, color) in flat.pixels_mut().zip(&surface.pixels) {
        let backdrop = 255 - color.a();
        pixel.0 = [
            color.r().saturating_add(backdrop),
            color.g().saturating_add(backdrop),
            color.b().saturating_add(backdrop),
        ];
    }
    Ok(flat)
}

/// Flatten and PNG-encode a rendered surface
pub fn encode_png(surface: &ColorImage) -> ExportResult<Vec<u8>> {
    let flat = flatten_onto_white(surface)?;
    let mut encoded = Cursor::new(Vec::new());
    flat.write_to(&mut encoded, ImageFormat::Png)?;
    Ok(encoded.into_inner())
}

/// Write the surface as a PNG into `dir` and return the file path
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(surface: &ColorImage, dir: &std::path::Path) -> ExportResult<std::path::PathBuf> {
    let bytes = encode_png(surface)?;
    let path = dir.join(export_file_name(crate::util::time::timestamp_secs()));
    std::fs::write(&path, bytes)?;
    log::info!("Exported drawing to {}", path.display());
    Ok(path)
}
