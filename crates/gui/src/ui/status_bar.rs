use egui::Ui;

use crate::state::AppState;

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 110, 90);

pub fn show(ui: &mut Ui, state: &AppState) {
    let builder = &state.builder;
    ui.horizontal(|ui| {
        ui.weak(format!("Shapes: {}", builder.shapes().len()));
        ui.separator();
        ui.weak(format!("Snap: {}", builder.snap_mode().display_name()));
        ui.separator();

        match builder.body() {
            Some(body) => ui.weak(format!("Body volume: {:.4}", body.volume)),
            None => ui.weak("Body not drawn"),
        };

        if builder.is_dragging() {
            ui.separator();
            ui.colored_label(egui::Color32::YELLOW, "Dragging");
        }

        if let Some(err) = builder.last_error() {
            ui.separator();
            ui.colored_label(ERROR_COLOR, format!("Rebuild failed: {err}"));
        } else if let Some(msg) = &state.input_error {
            ui.separator();
            ui.colored_label(ERROR_COLOR, msg.as_str());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("XactFit v0.1");
        });
    });
}
