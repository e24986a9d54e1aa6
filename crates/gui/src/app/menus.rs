//! Application menu bar and settings window

use eframe::egui;
use shared::SnapMode;

use crate::state::{AppState, FitSettings};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("Save settings").clicked() {
            sync_body_size(state);
            state.settings.save();
            ui.close_menu();
        }
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        if ui.button("Frame body").clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        let mut grid = state.settings.view.grid_visible;
        if ui.checkbox(&mut grid, "Grid").changed() {
            if grid {
                state.settings.view.show_grid(0, 0);
            } else {
                state.settings.view.hide_grid();
            }
        }
    });
}

pub fn shapes_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Shapes", |ui| {
        if ui.button("Add box").clicked() {
            toolbar::action_add_box(state);
            ui.close_menu();
        }
        if ui.button("Add cylinder").clicked() {
            toolbar::action_add_cylinder(state);
            ui.close_menu();
        }
        if ui.button("Add sphere").clicked() {
            toolbar::action_add_sphere(state);
            ui.close_menu();
        }
        if ui.button("Add text").clicked() {
            toolbar::action_add_text(state);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Draw body").clicked() {
            state.redraw_body();
            ui.close_menu();
        }
    });
}

pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Settings", |ui| {
        if ui.button("Preferences…").clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_snap_settings(ui, state);
                show_body_settings(ui, state);
                show_drag_settings(ui, state);
                show_view_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_snap_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Snapping");
    ui.horizontal(|ui| {
        ui.label("Mode");
        let mut mode = state.builder.snap_mode();
        egui::ComboBox::from_id_salt("snap_mode_combo")
            .selected_text(mode.display_name())
            .show_ui(ui, |ui| {
                for m in SnapMode::all() {
                    ui.selectable_value(&mut mode, *m, m.display_name());
                }
            });
        if mode != state.builder.snap_mode() {
            toolbar::action_set_snap_mode(state, mode);
        }
    });
    ui.horizontal(|ui| {
        ui.label("Threshold");
        let response = ui.add(
            egui::DragValue::new(&mut state.settings.snap.threshold)
                .speed(0.01)
                .range(0.0..=10.0),
        );
        if response.changed() {
            state.builder.set_snap_threshold(state.settings.snap.threshold);
        }
    });
    ui.add_space(10.0);
}

fn show_body_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Default body");
    ui.horizontal(|ui| {
        ui.label("W × H × D");
        ui.add(egui::DragValue::new(&mut state.settings.body.width).speed(0.05).range(0.01..=100.0));
        ui.add(egui::DragValue::new(&mut state.settings.body.height).speed(0.05).range(0.01..=100.0));
        ui.add(egui::DragValue::new(&mut state.settings.body.depth).speed(0.05).range(0.01..=100.0));
    });
    ui.add_space(10.0);
}

fn show_drag_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Dragging");
    ui.horizontal(|ui| {
        ui.label("Session timeout");
        let response = ui.add(
            egui::DragValue::new(&mut state.settings.drag.session_timeout_ms)
                .speed(100)
                .range(500..=120_000)
                .suffix(" ms"),
        );
        if response.changed() {
            state.builder.set_session_timeout(state.settings.session_timeout());
        }
    });
    ui.add_space(10.0);
}

fn show_view_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Viewport");
    ui.horizontal(|ui| {
        ui.label("Background");
        ui.color_edit_button_srgb(&mut state.settings.view.background_color);
    });
    ui.horizontal(|ui| {
        ui.label("Initial zoom");
        ui.add(
            egui::DragValue::new(&mut state.settings.view.pixels_per_unit)
                .speed(1.0)
                .range(5.0..=2000.0)
                .suffix(" px/unit"),
        );
    });
    ui.checkbox(&mut state.settings.view.grid_visible, "Show grid");
    ui.horizontal(|ui| {
        ui.label("Grid divisions");
        let mut divisions = state.settings.view.divisions_per_unit;
        let mut major = state.settings.view.major_unit_frequency;
        let changed = ui
            .add(egui::DragValue::new(&mut divisions).range(1..=100).suffix(" /unit"))
            .changed()
            | ui
                .add(egui::DragValue::new(&mut major).range(1..=50).prefix("major every "))
                .changed();
        if changed {
            state.settings.view.set_grid_divisions(divisions, major);
        }
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Interface");
    ui.horizontal(|ui| {
        ui.label("Font size");
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            state.settings.save();
        }
        if ui.button("Reset").clicked() {
            state.settings = FitSettings::default();
            state.builder.set_snap_threshold(state.settings.snap.threshold);
            state.builder.set_session_timeout(state.settings.session_timeout());
            toolbar::action_set_snap_mode(state, state.settings.snap.mode);
        }
        if ui.button("Close").clicked() {
            state.show_settings_window = false;
        }
    });
}

/// Persist the body form as the default stock
fn sync_body_size(state: &mut AppState) {
    let [w, h, d] = state.body_size;
    state.settings.body.width = w;
    state.settings.body.height = h;
    state.settings.body.depth = d;
}
