//! Toolbar: shape forms, body size and snap mode

use egui::Ui;
use shared::SnapMode;

use crate::state::AppState;

// ── Public actions (callable from keyboard shortcuts too) ────

pub fn action_add_box(state: &mut AppState) {
    let [w, h, d] = state.forms.box_size;
    let result = state.builder.add_box_shape(w, h, d);
    state.report(result);
}

pub fn action_add_cylinder(state: &mut AppState) {
    let f = &state.forms;
    let result = state.builder.add_cylinder_shape(
        f.cylinder_height,
        f.cylinder_diameters[0],
        f.cylinder_diameters[1],
        f.cylinder_tessellation,
        f.cylinder_horizontal,
    );
    state.report(result);
}

pub fn action_add_sphere(state: &mut AppState) {
    let [dx, dy, dz] = state.forms.sphere_diameters;
    let result = state
        .builder
        .add_sphere_shape(dx, dy, dz, state.forms.sphere_tessellation);
    state.report(result);
}

pub fn action_add_text(state: &mut AppState) {
    let result = state
        .builder
        .add_text_shape(&state.forms.text, state.forms.text_size, state.forms.text_depth);
    state.report(result);
}

pub fn action_set_snap_mode(state: &mut AppState, mode: SnapMode) {
    state.builder.set_snap_mode(mode);
    state.settings.snap.mode = mode;
}

// ── UI ───────────────────────────────────────────────────────

fn size_field(ui: &mut Ui, value: &mut f64) {
    ui.add(egui::DragValue::new(value).speed(0.01).range(0.0..=100.0).max_decimals(3));
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui| {
        ui.label("Box");
        for v in state.forms.box_size.iter_mut() {
            size_field(ui, v);
        }
        if ui.button("Add").on_hover_text("Add box (width, height, depth)").clicked() {
            action_add_box(state);
        }

        ui.separator();

        ui.label("Cylinder");
        size_field(ui, &mut state.forms.cylinder_height);
        for v in state.forms.cylinder_diameters.iter_mut() {
            size_field(ui, v);
        }
        ui.add(egui::DragValue::new(&mut state.forms.cylinder_tessellation).range(3..=128));
        ui.checkbox(&mut state.forms.cylinder_horizontal, "lying");
        if ui
            .button("Add")
            .on_hover_text("Add cylinder (height, top ⌀, bottom ⌀, tessellation)")
            .clicked()
        {
            action_add_cylinder(state);
        }

        ui.separator();

        ui.label("Sphere");
        for v in state.forms.sphere_diameters.iter_mut() {
            size_field(ui, v);
        }
        ui.add(egui::DragValue::new(&mut state.forms.sphere_tessellation).range(3..=128));
        if ui.button("Add").on_hover_text("Add half ellipsoid (⌀x, ⌀y, ⌀z)").clicked() {
            action_add_sphere(state);
        }

        ui.separator();

        ui.label("Text");
        ui.add(egui::TextEdit::singleline(&mut state.forms.text).desired_width(60.0));
        size_field(ui, &mut state.forms.text_size);
        size_field(ui, &mut state.forms.text_depth);
        if ui.button("Add").on_hover_text("Add text (size, depth)").clicked() {
            action_add_text(state);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Body");
        for v in state.body_size.iter_mut() {
            size_field(ui, v);
        }
        if ui.button("Draw body").on_hover_text("Carve all shapes out of the block").clicked() {
            state.redraw_body();
        }

        ui.separator();

        ui.label("Snap");
        let mut mode = state.builder.snap_mode();
        for m in SnapMode::all() {
            ui.selectable_value(&mut mode, *m, m.display_name());
        }
        if mode != state.builder.snap_mode() {
            action_set_snap_mode(state, mode);
        }
    });
}
