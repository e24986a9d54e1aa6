//! Headless test harness driving a [`FitBuilder`] without a window.
//!
//! Pointer input is given directly as ground-plane (x, z) coordinates and time
//! comes from a manual clock, so drags and session timeouts are reproducible.

use std::time::{Duration, Instant};

use glam::DVec3;
use shared::{ShapeId, SnapMode};

use crate::build::{Body, ComposeError};
use crate::builder::FitBuilder;
use crate::interaction::DragError;
use crate::state::catalog::{CatalogError, Shape};
use crate::validation::MeshValidator;

pub struct TestHarness {
    pub builder: FitBuilder,
    clock: Instant,
}

fn ground(x: f64, z: f64) -> DVec3 {
    DVec3::new(x, 0.0, z)
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            builder: FitBuilder::new(),
            clock: Instant::now(),
        }
    }

    pub fn with_builder(builder: FitBuilder) -> Self {
        Self {
            builder,
            clock: Instant::now(),
        }
    }

    // ── Clock ─────────────────────────────────────────────────

    pub fn now(&self) -> Instant {
        self.clock
    }

    /// Advance the manual clock
    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    /// Advance the clock and run the per-frame session check
    pub fn advance_and_tick(&mut self, by: Duration) -> Option<ShapeId> {
        self.advance(by);
        self.builder.tick(self.clock)
    }

    // ── Shapes ────────────────────────────────────────────────

    pub fn add_box(&mut self, w: f64, h: f64, d: f64) -> Result<ShapeId, CatalogError> {
        self.builder.add_box_shape(w, h, d)
    }

    pub fn add_cylinder(
        &mut self,
        h: f64,
        d_top: f64,
        d_bottom: f64,
        tessellation: u32,
        horizontal: bool,
    ) -> Result<ShapeId, CatalogError> {
        self.builder
            .add_cylinder_shape(h, d_top, d_bottom, tessellation, horizontal)
    }

    pub fn add_sphere(&mut self, dx: f64, dy: f64, dz: f64, tessellation: u32) -> Result<ShapeId, CatalogError> {
        self.builder.add_sphere_shape(dx, dy, dz, tessellation)
    }

    pub fn add_text(&mut self, text: &str, size: f64, depth: f64) -> Result<ShapeId, CatalogError> {
        self.builder.add_text_shape(text, size, depth)
    }

    pub fn draw_body(&mut self, w: f64, h: f64, d: f64) -> Result<&Body, ComposeError> {
        self.builder.draw_body(w, h, d)
    }

    pub fn set_snap_mode(&mut self, mode: SnapMode) {
        self.builder.set_snap_mode(mode);
    }

    // ── Pointer ───────────────────────────────────────────────

    /// Press on `id` at ground (x, z) and drain the deferred queue like the
    /// next frame would.
    pub fn press(&mut self, id: &str, x: f64, z: f64) -> Result<(), DragError> {
        self.builder.pick_down(id, Some(ground(x, z)), self.clock)?;
        self.builder.drain_deferred();
        Ok(())
    }

    pub fn move_to(&mut self, x: f64, z: f64) -> Option<DVec3> {
        self.builder.pointer_move(Some(ground(x, z)), self.clock)
    }

    pub fn release(&mut self) -> Option<ShapeId> {
        self.builder.pick_up()
    }

    /// Full drag of a shape: press at its pivot, move by (dx, dz), release.
    /// Returns the committed position.
    pub fn drag_by(&mut self, id: &str, dx: f64, dz: f64) -> Result<DVec3, DragError> {
        let start = self
            .shape(id)
            .map(|s| s.position)
            .ok_or_else(|| DragError::UnknownShape(id.to_string()))?;
        self.press(id, start.x, start.z)?;
        self.move_to(start.x + dx, start.z + dz);
        self.release();
        self.position_of(id)
            .ok_or_else(|| DragError::UnknownShape(id.to_string()))
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.builder.shape(id)
    }

    pub fn shape_count(&self) -> usize {
        self.builder.shapes().len()
    }

    pub fn position_of(&self, id: &str) -> Option<DVec3> {
        self.shape(id).map(|s| s.position)
    }

    pub fn body_volume(&self) -> Option<f64> {
        self.builder.body().map(|b| b.volume)
    }

    pub fn body_generation(&self) -> Option<u64> {
        self.builder.body().map(|b| b.generation)
    }

    pub fn validate_body(&self) -> Option<MeshValidator<'_>> {
        self.builder.body().map(|b| MeshValidator::new(&b.mesh))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.shape_count(), 0);
        assert!(h.body_volume().is_none());
    }

    #[test]
    fn test_drag_by_moves_shape() {
        let mut h = TestHarness::new();
        let id = h.add_box(1.0, 0.6, 2.0).unwrap();
        let pos = h.drag_by(&id, 0.5, -0.25).unwrap();
        assert!((pos - DVec3::new(0.5, -0.3, -0.25)).length() < 1e-12);
        assert!(!h.builder.is_dragging());
    }

    #[test]
    fn test_press_detaches_camera() {
        let mut h = TestHarness::new();
        let id = h.add_box(1.0, 1.0, 1.0).unwrap();
        h.press(&id, 0.0, 0.0).unwrap();
        assert!(!h.builder.camera_input().attached);
        h.release();
        assert!(h.builder.camera_input().attached);
    }

    #[test]
    fn test_body_validates() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 0.6, 2.0).unwrap();
        h.draw_body(3.0, 2.0, 5.0).unwrap();
        let v = h.validate_body().unwrap();
        assert!(v.triangle_count() > 0);
        assert!(v.validate_all().is_empty());
    }
}
