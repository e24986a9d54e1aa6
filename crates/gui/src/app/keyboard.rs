//! Keyboard shortcut handling

use eframe::egui;
use shared::SnapMode;

use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let mut snap_mode = None;
    let mut redraw = false;
    let mut escape = false;
    let mut toggle_grid = false;

    ctx.input(|i| {
        if i.modifiers.command {
            return;
        }
        // Escape releases a drag in flight
        escape = i.key_pressed(egui::Key::Escape);
        if i.key_pressed(egui::Key::V) {
            snap_mode = Some(SnapMode::Vertex);
        } else if i.key_pressed(egui::Key::L) {
            snap_mode = Some(SnapMode::Line);
        } else if i.key_pressed(egui::Key::N) {
            snap_mode = Some(SnapMode::None);
        }
        redraw = i.key_pressed(egui::Key::R);
        toggle_grid = i.key_pressed(egui::Key::G);
        if i.key_pressed(egui::Key::F) {
            viewport.reset_camera();
        }
    });

    if escape && state.builder.capture_lost().is_some() {
        tracing::debug!("drag released by Escape");
    }
    if let Some(mode) = snap_mode {
        toolbar::action_set_snap_mode(state, mode);
    }
    if redraw {
        state.redraw_body();
    }
    if toggle_grid {
        let view = &mut state.settings.view;
        if view.grid_visible {
            view.hide_grid();
        } else {
            view.show_grid(0, 0);
        }
    }
}
