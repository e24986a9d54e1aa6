use eframe::egui;
use glam::{DVec2, DVec3};

use super::picking::Ray;

/// Height the picking rays start from
const RAY_HEIGHT: f64 = 1000.0;

/// Top-down orthographic camera for the plan view.
///
/// World X maps to screen right, world Z to screen down.
pub struct PlanCamera {
    /// World (x, z) shown at the viewport center
    pub center: DVec2,
    pub pixels_per_unit: f32,
}

impl PlanCamera {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self {
            center: DVec2::ZERO,
            pixels_per_unit,
        }
    }

    pub fn zoom(&mut self, factor: f32, anchor: egui::Pos2, rect: egui::Rect) {
        let before = self.screen_to_ground(anchor, rect);
        self.pixels_per_unit = (self.pixels_per_unit * factor).clamp(5.0, 2000.0);
        let after = self.screen_to_ground(anchor, rect);
        // Keep the point under the cursor fixed
        self.center += before - after;
    }

    /// Pan by a screen-space delta in pixels
    pub fn pan(&mut self, delta: egui::Vec2) {
        let ppu = self.pixels_per_unit as f64;
        self.center -= DVec2::new(delta.x as f64 / ppu, delta.y as f64 / ppu);
    }

    /// Fit a width × depth footprint into the viewport
    pub fn frame(&mut self, width: f64, depth: f64, rect: egui::Rect) {
        self.center = DVec2::ZERO;
        let margin = 0.8;
        let sx = rect.width() as f64 * margin / width.max(1e-6);
        let sz = rect.height() as f64 * margin / depth.max(1e-6);
        self.pixels_per_unit = sx.min(sz).clamp(5.0, 2000.0) as f32;
    }

    pub fn world_to_screen(&self, p: DVec3, rect: egui::Rect) -> egui::Pos2 {
        let ppu = self.pixels_per_unit as f64;
        let c = rect.center();
        egui::pos2(
            c.x + ((p.x - self.center.x) * ppu) as f32,
            c.y + ((p.z - self.center.y) * ppu) as f32,
        )
    }

    /// World (x, z) under a screen position
    pub fn screen_to_ground(&self, pos: egui::Pos2, rect: egui::Rect) -> DVec2 {
        let ppu = self.pixels_per_unit as f64;
        let c = rect.center();
        DVec2::new(
            self.center.x + (pos.x - c.x) as f64 / ppu,
            self.center.y + (pos.y - c.y) as f64 / ppu,
        )
    }

    /// Straight-down ray through a screen position
    pub fn screen_to_ray(&self, pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let g = self.screen_to_ground(pos, rect);
        Ray {
            origin: DVec3::new(g.x, RAY_HEIGHT, g.y),
            direction: DVec3::NEG_Y,
        }
    }
}
