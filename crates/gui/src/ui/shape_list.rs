use egui::Ui;

use crate::state::AppState;

/// Side panel listing placed shapes in catalog (subtraction) order
pub fn show(ui: &mut Ui, state: &AppState) {
    ui.heading("Shapes");
    ui.separator();

    let shapes = state.builder.shapes();
    if shapes.is_empty() {
        ui.weak("No shapes yet");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, shape) in shapes.iter().enumerate() {
            let dragged = state.builder.highlighted() == Some(shape.id.as_str());
            let text = egui::RichText::new(format!("{}. {}", i + 1, shape.params.describe()));
            let text = if dragged { text.strong() } else { text };
            ui.label(text).on_hover_text(shape.id.as_str());
            ui.weak(format!("   at ({:.3}, {:.3})", shape.position.x, shape.position.z));
        }
    });
}
