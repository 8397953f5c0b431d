use std::io::Cursor;
use std::sync::Arc;
use std::task::{Context, Poll};

use egui::{ColorImage, Pos2, Vec2};
use futures::future::BoxFuture;
use futures::task::noop_waker_ref;
use futures::FutureExt;
use ::image::imageops::FilterType;
use ::image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::{ImportError, ImportResult};

/// A decoded, possibly downscaled bitmap ready to be placed on the canvas.
///
/// `data` holds the PNG encoding of the (downscaled) bitmap; `width`/`height`
/// are its pixel size and `original_*` the size of the source file.
#[derive(Clone, PartialEq)]
pub struct ImportedImage {
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
    pub original_width: u32,
    pub original_height: u32,
}

impl std::fmt::Debug for ImportedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportedImage")
            .field("data_len", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("original_width", &self.original_width)
            .field("original_height", &self.original_height)
            .finish()
    }
}

impl ImportedImage {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn original_size(&self) -> Vec2 {
        Vec2::new(self.original_width as f32, self.original_height as f32)
    }
}

/// Anything that can hand the editor an image some time later
pub trait ImageSource {
    /// Start a request. The future resolves once the user picked (or refused) a file.
    fn request_image(&mut self) -> BoxFuture<'static, ImportResult<ImportedImage>>;
}

/// True for `image/*` MIME types and, when the MIME type is unknown, for
/// the usual bitmap extensions
pub fn is_image_file(mime: &str, file_name: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    std::path::Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

/// Decode `bytes`, rejecting anything whose MIME type is not an image
pub fn decode_image(bytes: &[u8], mime: &str) -> ImportResult<DynamicImage> {
    if !mime.is_empty() && !mime.starts_with("image/") {
        return Err(ImportError::NotAnImage(mime.to_owned()));
    }
    ::image::load_from_memory(bytes).map_err(|err| {
        log::error!("Failed to decode image: {}", err);
        ImportError::DecodeFailed(err.to_string())
    })
}

/// Size that fits `width`x`height` inside `max_width`x`max_height` with the
/// same aspect ratio. Never grows the image.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }
    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let scaled_width = ((width as f64 * scale).round() as u32).max(1);
    let scaled_height = ((height as f64 * scale).round() as u32).max(1);
    (scaled_width, scaled_height)
}

/// Shrink `image` to fit the bounds, keeping its aspect ratio
pub fn downscale(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (target_width, target_height) = fit_within(width, height, max_width, max_height);
    if (target_width, target_height) == (width, height) {
        return image;
    }
    log::debug!(
        "Downscaling image {}x{} -> {}x{}",
        width,
        height,
        target_width,
        target_height
    );
    image.resize_exact(target_width, target_height, FilterType::Triangle)
}

/// Decode, downscale and re-encode a file into an [`ImportedImage`]
pub fn import_bytes(
    bytes: &[u8],
    mime: &str,
    max_width: u32,
    max_height: u32,
) -> ImportResult<ImportedImage> {
    let decoded = decode_image(bytes, mime)?;
    let (original_width, original_height) = decoded.dimensions();
    let scaled = downscale(decoded, max_width, max_height);
    let (width, height) = scaled.dimensions();

    let mut encoded = Cursor::new(Vec::new());
    scaled
        .write_to(&mut encoded, ImageFormat::Png)
        .map_err(|err| ImportError::EncodeFailed(err.to_string()))?;

    log::info!(
        "Imported image {}x{} (source {}x{})",
        width,
        height,
        original_width,
        original_height
    );
    Ok(ImportedImage {
        data: encoded.into_inner().into(),
        width,
        height,
        original_width,
        original_height,
    })
}

/// Decode stored image bytes into an egui texture source
pub fn to_color_image(data: &[u8]) -> ImportResult<ColorImage> {
    let decoded = ::image::load_from_memory(data)
        .map_err(|err| ImportError::DecodeFailed(err.to_string()))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Image requests that have not resolved yet, each tagged with the canvas
/// point it was requested at
#[derive(Default)]
pub struct PendingImports {
    pending: Vec<(Pos2, BoxFuture<'static, ImportResult<ImportedImage>>)>,
}

impl PendingImports {
    pub fn push(&mut self, at: Pos2, request: BoxFuture<'static, ImportResult<ImportedImage>>) {
        self.pending.push((at, request));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Poll every request once and return the ones that finished, in the
    /// order they were requested
    pub fn poll_ready(&mut self) -> Vec<(Pos2, ImportResult<ImportedImage>)> {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut ready = Vec::new();
        self.pending.retain_mut(|(at, request)| match request.poll_unpin(&mut cx) {
            Poll::Ready(result) => {
                ready.push((*at, result));
                false
            }
            Poll::Pending => true,
        });
        ready
    }
}

impl std::fmt::Debug for PendingImports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingImports")
            .field("pending", &self.pending.len())
            .finish()
    }
}
