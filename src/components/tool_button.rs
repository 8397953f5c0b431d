use eframe::egui;

use crate::tools::ToolKind;

const BUTTON_SIZE: f32 = 32.0;
const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(100, 181, 246);
const SELECTED_BORDER: egui::Color32 = egui::Color32::from_rgb(33, 150, 243);

pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(BUTTON_SIZE, BUTTON_SIZE);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                SELECTED_FILL
            } else if response.hovered() {
                egui::Color32::from_gray(70)
            } else {
                egui::Color32::from_gray(45)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(18.0),
                text_color,
            );

            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, egui::Stroke::new(2.0, SELECTED_BORDER));
            }
        }

        response.on_hover_text(self.tool.label())
    }
}

/// A clickable color square; selected swatches get a thick outline
pub fn color_swatch(ui: &mut egui::Ui, color: egui::Color32, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, 3.0, color);
        let outline = if selected {
            egui::Stroke::new(2.0, SELECTED_BORDER)
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(120))
        };
        ui.painter().rect_stroke(rect.expand(1.0), 3.0, outline);
    }
    response
}
