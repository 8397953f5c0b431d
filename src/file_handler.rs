use std::collections::VecDeque;

use eframe::egui;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::{ImportError, ImportResult};
use crate::image::{import_bytes, is_image_file, ImageSource, ImportedImage};

/// Turns dropped files into imported images.
///
/// Requests made through [`ImageSource::request_image`] queue up and are
/// answered oldest first, one per dropped file; drops with no request
/// outstanding are handed back
/// to the caller so they can be placed directly.
pub struct FileHandler {
    waiting: VecDeque<oneshot::Sender<ImportResult<ImportedImage>>>,
    max_width: u32,
    max_height: u32,
}

impl FileHandler {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            waiting: VecDeque::new(),
            max_width,
            max_height,
        }
    }

    /// True while a request is waiting for a file
    pub fn is_waiting(&self) -> bool {
        !self.waiting.is_empty()
    }

    /// Number of requests waiting for a file
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Resolve every outstanding request with `NoFileSelected`
    pub fn cancel(&mut self) {
        if self.waiting.is_empty() {
            return;
        }
        log::info!("Cancelling {} image request(s)", self.waiting.len());
        for sender in self.waiting.drain(..) {
            let _ = sender.send(Err(ImportError::NoFileSelected));
        }
    }

    /// Import one file. The oldest request still listening receives the
    /// result and `None` is returned; otherwise the result is returned.
    pub fn accept_file(
        &mut self,
        file_name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Option<ImportResult<ImportedImage>> {
        let mut result = if is_image_file(mime, file_name) {
            log::info!("Processing image: {} ({} bytes)", file_name, bytes.len());
            import_bytes(bytes, mime, self.max_width, self.max_height)
        } else {
            log::warn!("Dropped file is not a supported type: {}", file_name);
            let kind = if mime.is_empty() { file_name } else { mime };
            Err(ImportError::NotAnImage(kind.to_owned()))
        };

        while let Some(sender) = self.waiting.pop_front() {
            // A dropped receiver hands the result back for the next request
            match sender.send(result) {
                Ok(()) => return None,
                Err(unsent) => result = unsent,
            }
        }
        Some(result)
    }

    /// Handle files dropped onto the window this frame. Returns the results
    /// that did not answer a request.
    pub fn process_dropped_files(
        &mut self,
        ctx: &egui::Context,
    ) -> Vec<ImportResult<ImportedImage>> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return Vec::new();
        }
        let mut unsolicited = Vec::new();

        for file in dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            let bytes = match read_dropped_file(&file, &file_name) {
                Ok(bytes) => bytes,
                Err(err) => {
                    unsolicited.push(Err(err));
                    continue;
                }
            };

            if let Some(result) = self.accept_file(&file_name, &file.mime, &bytes) {
                unsolicited.push(result);
            }
        }

        ctx.request_repaint();
        unsolicited
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop image to import:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                }
            }
            text
        });

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

impl Default for FileHandler {
    fn default() -> Self {
        let config = crate::config::EditorConfig::default();
        Self::new(config.max_import_width, config.max_import_height)
    }
}

impl ImageSource for FileHandler {
    fn request_image(&mut self) -> BoxFuture<'static, ImportResult<ImportedImage>> {
        let (sender, receiver) = oneshot::channel();
        self.waiting.push_back(sender);
        log::info!("Waiting for an image file ({} queued)", self.waiting.len());
        receiver
            .map(|received| received.unwrap_or(Err(ImportError::NoFileSelected)))
            .boxed()
    }
}

impl std::fmt::Debug for FileHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandler")
            .field("waiting", &self.waiting.len())
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .finish()
    }
}

fn read_dropped_file(file: &egui::DroppedFile, file_name: &str) -> ImportResult<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }

    // Browsers only hand over bytes, never a readable path
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return std::fs::read(path).map_err(|err| {
                log::error!("Failed to read image file: {}: {}", path.display(), err);
                ImportError::ReadFailed(err.to_string())
            });
        }
    }

    log::warn!("Dropped file has no accessible data: {}", file_name);
    Err(ImportError::ReadFailed(file_name.to_owned()))
}
