use crate::components::{color_swatch, ToolButton};
use crate::tools::ToolKind;
use crate::PaintApp;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(120.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.horizontal_wrapped(|ui| {
                let active = app.state().tool();
                for tool in ToolKind::ALL {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", tool);
                        app.state_mut().set_tool(tool);
                    }
                }
            });

            ui.separator();
            ui.label("Color");
            ui.horizontal_wrapped(|ui| {
                let current = app.state().color();
                let palette = app.config().palette.clone();
                for color in palette {
                    if color_swatch(ui, color, color == current).clicked() {
                        app.state_mut().set_color(color);
                    }
                }
            });

            ui.separator();
            ui.label("Width");
            ui.horizontal_wrapped(|ui| {
                let current = app.state().stroke_width();
                let presets = app.config().width_presets.clone();
                for width in presets {
                    if ui
                        .selectable_label(current == width, format!("{}", width))
                        .clicked()
                    {
                        app.state_mut().set_stroke_width(width);
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                let can_undo = app.state().can_undo();
                let can_redo = app.state().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.clear();
                }
                if ui.button("Export").clicked() {
                    app.request_export(ctx);
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    app.save_drawing(ctx, frame.storage_mut());
                }
                if ui.button("Load").clicked() {
                    app.load_drawing(ctx, frame.storage());
                }
            });

            ui.separator();
            let history = app.state().history();
            ui.label(format!(
                "History: {}/{}",
                history.cursor(),
                history.len() - 1
            ));
        });
}
