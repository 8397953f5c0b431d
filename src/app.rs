use eframe::egui;

use crate::config::EditorConfig;
use crate::error::{ExportError, ImportError, SketchError};
use crate::file_handler::FileHandler;
use crate::image::{ImageSource, PendingImports};
use crate::input::{apply_events, cursor_for, CanvasInput, PointerSample};
use crate::panels::{central_panel, header_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{self, EditorState, Interaction, STORAGE_KEY};
use crate::widgets::{ToastKind, Toasts};

/// Where images dropped without an outstanding request land
const UNSOLICITED_DROP_POSITION: egui::Pos2 = egui::pos2(20.0, 20.0);

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    config: EditorConfig,
    #[serde(skip)]
    state: EditorState,
    // Skip serializing the renderer since it holds GPU textures
    #[serde(skip)]
    renderer: Option<Renderer>,
    #[serde(skip)]
    input: CanvasInput,
    #[serde(skip)]
    file_handler: FileHandler,
    #[serde(skip)]
    imports: PendingImports,
    #[serde(skip)]
    toasts: Toasts,
    /// Contents of the text entry popup
    #[serde(skip)]
    text_entry: String,
    #[serde(skip)]
    export_pending: bool,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: EditorConfig = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintApp>(storage, eframe::APP_KEY))
            .map(|app| app.config)
            .unwrap_or_default();

        let mut app = Self::with_config(config);
        app.renderer = Some(Renderer::new(&cc.egui_ctx));
        app
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            state: EditorState::new(config.clone()),
            file_handler: FileHandler::new(config.max_import_width, config.max_import_height),
            config,
            renderer: None,
            input: CanvasInput::default(),
            imports: PendingImports::default(),
            toasts: Toasts::default(),
            text_entry: String::new(),
            export_pending: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn toast(&mut self, ctx: &egui::Context, kind: ToastKind, message: impl Into<String>) {
        let now = ctx.input(|i| i.time);
        self.toasts.push(kind, message, now);
    }

    fn report(&mut self, ctx: &egui::Context, err: SketchError) {
        self.toast(ctx, ToastKind::Error, err.to_string());
    }

    pub fn undo(&mut self) {
        self.state.undo();
    }

    pub fn redo(&mut self) {
        self.state.redo();
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Write the visible document into the save slot
    pub fn save_drawing(&mut self, ctx: &egui::Context, storage: Option<&mut (dyn eframe::Storage + 'static)>) {
        let Some(storage) = storage else {
            self.toast(ctx, ToastKind::Error, "Saving is not available");
            return;
        };
        match state::save_drawing(&self.state) {
            Ok(json) => {
                storage.set_string(STORAGE_KEY, json);
                storage.flush();
                self.toast(ctx, ToastKind::Success, "Drawing saved");
            }
            Err(err) => self.report(ctx, err.into()),
        }
    }

    /// Replace the document with the save slot contents
    pub fn load_drawing(&mut self, ctx: &egui::Context, storage: Option<&dyn eframe::Storage>) {
        let json = storage.and_then(|storage| storage.get_string(STORAGE_KEY));
        match state::load_drawing(&mut self.state, json.as_deref()) {
            Ok(count) => {
                self.toast(ctx, ToastKind::Success, format!("Loaded {} elements", count));
            }
            Err(err) => self.report(ctx, err.into()),
        }
    }

    /// Ask the backend for a screenshot; the canvas is cropped out of it on arrival
    pub fn request_export(&mut self, ctx: &egui::Context) {
        self.export_pending = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    /// React to what a pointer event asked for
    fn handle_interaction(&mut self, ctx: &egui::Context, interaction: Interaction) {
        match interaction {
            Interaction::TextRequested(_) => {
                self.text_entry.clear();
            }
            Interaction::ImageRequested(at) => {
                let request = self.file_handler.request_image();
                self.imports.push(at, request);
                self.toast(
                    ctx,
                    ToastKind::Info,
                    "Drop an image file onto the window (Esc to cancel)",
                );
            }
            Interaction::None | Interaction::Updated | Interaction::Committed => {}
        }
    }

    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        self.input.set_canvas_rect(canvas_rect);

        // The text popup owns the pointer until it is closed
        if self.state.pending_text().is_none() {
            let events = self.input.step(PointerSample::from_context(ctx));
            for interaction in apply_events(&mut self.state, &events) {
                self.handle_interaction(ctx, interaction);
            }
        }

        if let Some(hover) = ctx.input(|i| i.pointer.hover_pos()) {
            if canvas_rect.contains(hover) {
                let cursor = cursor_for(&self.state, self.input.to_canvas(hover));
                ctx.set_cursor_icon(cursor);
            }
        }
    }

    pub(crate) fn render_canvas(&mut self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(painter, canvas_rect, &self.state);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, KeyboardShortcut, Modifiers};

        if ctx.input(|i| i.key_pressed(Key::Escape)) && self.file_handler.is_waiting() {
            self.file_handler.cancel();
        }
        if ctx.wants_keyboard_input() {
            return;
        }

        let redo_shift = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);

        // Shift+Z must be checked before plain Z, which would also match it
        if ctx.input_mut(|i| i.consume_shortcut(&redo_shift) || i.consume_shortcut(&redo)) {
            self.redo();
        } else if ctx.input_mut(|i| i.consume_shortcut(&undo)) {
            self.undo();
        }
    }

    fn apply_imports(&mut self, ctx: &egui::Context) {
        for result in self.file_handler.process_dropped_files(ctx) {
            match result {
                Ok(imported) => {
                    self.state.insert_image(UNSOLICITED_DROP_POSITION, imported);
                    self.toast(ctx, ToastKind::Success, "Image added");
                }
                Err(err) => self.report(ctx, err.into()),
            }
        }

        for (at, result) in self.imports.poll_ready() {
            match result {
                Ok(imported) => {
                    self.state.insert_image(at, imported);
                    self.toast(ctx, ToastKind::Success, "Image added");
                }
                Err(ImportError::NoFileSelected) => {
                    self.toast(ctx, ToastKind::Info, ImportError::NoFileSelected.to_string());
                }
                Err(err) => self.report(ctx, err.into()),
            }
        }

        if !self.imports.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        if !self.export_pending {
            return;
        }
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        self.export_pending = false;

        let canvas = screenshot.region(&self.input.canvas_rect(), Some(ctx.pixels_per_point()));
        match export_surface(&canvas) {
            Ok(name) => self.toast(ctx, ToastKind::Success, format!("Exported {}", name)),
            Err(err) => self.report(ctx, err.into()),
        }
    }

    fn show_text_entry(&mut self, ctx: &egui::Context) {
        let Some(anchor) = self.state.pending_text() else {
            return;
        };
        let screen_pos = self.input.canvas_rect().min + anchor.to_vec2();

        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new("Add text")
            .id(egui::Id::new("text_entry"))
            .fixed_pos(screen_pos)
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.text_entry)
                        .hint_text("Type and press Enter")
                        .desired_width(200.0),
                );
                response.request_focus();
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancelled = true;
                } else if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
            });

        if cancelled {
            self.state.cancel_pending_text();
            self.text_entry.clear();
        } else if submitted {
            let text = std::mem::take(&mut self.text_entry);
            self.state.add_text(anchor, &text);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_surface(surface: &egui::ColorImage) -> Result<String, ExportError> {
    let dir = std::env::current_dir()?;
    let path = crate::export::save_png(surface, &dir)?;
    Ok(path.display().to_string())
}

#[cfg(target_arch = "wasm32")]
fn export_surface(surface: &egui::ColorImage) -> Result<String, ExportError> {
    // Encode anyway so a broken surface is still reported
    crate::export::encode_png(surface)?;
    Err(ExportError::Unsupported)
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.apply_imports(ctx);
        self.handle_screenshots(ctx);

        header_panel(self, ctx);
        tools_panel(self, ctx, frame);
        central_panel(self, ctx);

        self.show_text_entry(ctx);
        self.toasts.show(ctx);
        self.file_handler.preview_files_being_dropped(ctx);
    }
}
