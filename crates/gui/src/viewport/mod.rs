//! Plan-view viewport panel

mod camera;
pub use xactfit_lib::viewport::{mesh, picking};
mod overlays;

use std::time::Instant;

use egui::Ui;

use crate::state::AppState;
use camera::PlanCamera;
use picking::pick_ground;

/// Ground plane height used for pointer picks
const GROUND_Y: f64 = 0.0;

/// Plan-view viewport: draws the carved body and routes pointer input to the
/// builder's drag plumbing.
pub struct ViewportPanel {
    camera: PlanCamera,
    /// Stock size the camera was last framed on
    framed_stock: Option<[f64; 3]>,
}

impl ViewportPanel {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self {
            camera: PlanCamera::new(pixels_per_unit),
            framed_stock: None,
        }
    }

    /// Re-frame on the next frame
    pub fn reset_camera(&mut self) {
        self.framed_stock = None;
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if let Some(stock) = state.builder.stock() {
            if self.framed_stock != Some(stock) {
                self.camera.frame(stock[0], stock[2], rect);
                self.framed_stock = Some(stock);
            }
        }

        self.handle_drag(&response, ui, rect, state);
        self.handle_camera(&response, ui, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        let [r, g, b] = state.settings.view.background_color;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(r, g, b));

        if state.settings.view.grid_visible {
            overlays::draw_grid(&painter, rect, &self.camera, &state.settings.view);
        }

        let builder = &state.builder;
        if let Some(body) = builder.body() {
            overlays::draw_body(&painter, rect, &self.camera, body);
        }
        if let Some(stock) = builder.stock() {
            overlays::draw_stock_outline(&painter, rect, &self.camera, stock);
        }
        overlays::draw_footprints(&painter, rect, &self.camera, builder.shapes(), builder.highlighted());
        if let Some(points) = builder.highlighted().and_then(|id| builder.landmarks_of(id)) {
            overlays::draw_landmarks(&painter, rect, &self.camera, &points);
        }
        overlays::draw_guides(&painter, rect, &self.camera, builder.guides());
    }

    fn ground_under(&self, pos: Option<egui::Pos2>, rect: egui::Rect) -> Option<glam::DVec3> {
        let ray = self.camera.screen_to_ray(pos?, rect);
        pick_ground(&ray, GROUND_Y)
    }

    fn handle_drag(&mut self, response: &egui::Response, ui: &Ui, rect: egui::Rect, state: &mut AppState) {
        let now = Instant::now();
        let pointer = response.interact_pointer_pos().or_else(|| response.hover_pos());

        if response.drag_started_by(egui::PointerButton::Primary) {
            // egui reports the drag once the pointer has left its threshold;
            // pick where the button went down so the grab offset is exact
            let press = ui.input(|i| i.pointer.press_origin()).or(pointer);
            if let Some(ground) = self.ground_under(press, rect) {
                if let Some(result) = state.builder.pick_at(ground, now) {
                    state.report(result);
                }
            }
        }

        if !state.builder.is_dragging() {
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let ground = self.ground_under(pointer, rect);
            state.builder.pointer_move(ground, now);
            ui.ctx().request_repaint();
        }

        if response.drag_stopped() {
            state.builder.pick_up();
        } else if !response.dragged() || !ui.input(|i| i.focused) {
            // The button was released outside the view or the window lost focus
            state.builder.capture_lost();
        }
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui, rect: egui::Rect, state: &AppState) {
        if !state.builder.camera_input().attached {
            return;
        }

        if response.dragged_by(egui::PointerButton::Secondary) || response.dragged_by(egui::PointerButton::Middle) {
            self.camera.pan(response.drag_delta());
        }

        if let Some(hover) = response.hover_pos() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom((scroll * 0.002).exp(), hover, rect);
            }
        }
    }
}
