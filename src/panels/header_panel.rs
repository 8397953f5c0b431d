use crate::PaintApp;

/// Title bar with the element count and the active tool
pub fn header_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Sketch");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let state = app.state();
                ui.label(format!("Tool: {}", state.tool().label()));
                ui.separator();
                ui.label(format!("Elements: {}", state.history().current().len()));
            });
        });
    });
}
