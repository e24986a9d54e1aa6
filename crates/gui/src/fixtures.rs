//! Factory functions for test data: shape parameters, placed shapes and
//! ready-made fitting sessions.

use glam::DVec3;
use shared::*;

use crate::build::primitives::{local_vertex_buffer, DEFAULT_TESSELLATION};
use crate::build::FontGlyphs;
use crate::harness::TestHarness;
use crate::state::catalog::{resting_pose, Shape};

// ── Parameter factories ─────────────────────────────────────────

pub fn box_params(width: f64, height: f64, depth: f64) -> ShapeParams {
    ShapeParams::Box(BoxParams { width, height, depth })
}

pub fn cylinder_params(height: f64, diameter_top: f64, diameter_bottom: f64, is_horizontal: bool) -> ShapeParams {
    ShapeParams::Cylinder(CylinderParams {
        height,
        diameter_top,
        diameter_bottom,
        is_horizontal,
    })
}

pub fn sphere_params(diameter_x: f64, diameter_y: f64, diameter_z: f64) -> ShapeParams {
    ShapeParams::Sphere(SphereParams {
        diameter_x,
        diameter_y,
        diameter_z,
    })
}

pub fn text_params(text: &str, size: f64, depth: f64) -> ShapeParams {
    ShapeParams::Text(TextParams {
        text: text.to_string(),
        size,
        depth,
    })
}

// ── Placed shapes ───────────────────────────────────────────────

/// A shape resting on the ground with its pivot at (x, z), built with the
/// default tessellation.
pub fn shape_at(id: &str, params: ShapeParams, x: f64, z: f64) -> Shape {
    let (y, rotation_x) = resting_pose(&params);
    let local = local_vertex_buffer(id, &params, DEFAULT_TESSELLATION, &FontGlyphs::default());
    Shape::new(
        id.to_string(),
        params,
        DVec3::new(x, y, z),
        rotation_x,
        DEFAULT_TESSELLATION,
        local,
    )
}

// ── Sessions ────────────────────────────────────────────────────

/// Stock used by the reference scenario
pub const REFERENCE_STOCK: [f64; 3] = [3.0, 2.0, 5.0];

/// Reference scenario: a 1×0.6×2 box and a 1.5/1/1 sphere placed in a
/// 3×2×5 body. Returns the harness with the body drawn, the box id and the
/// sphere id.
pub fn reference_session() -> (TestHarness, ShapeId, ShapeId) {
    let mut h = TestHarness::new();
    let [w, ht, d] = REFERENCE_STOCK;
    h.draw_body(w, ht, d).expect("stock body");
    let box_id = h.add_box(1.0, 0.6, 2.0).expect("box");
    let sphere_id = h.add_sphere(1.5, 1.0, 1.0, DEFAULT_TESSELLATION).expect("sphere");
    (h, box_id, sphere_id)
}

/// Two identical 1×0.6×2 boxes, the second moved to x = 1 + `gap` so their
/// facing edges are `gap` apart. No body is drawn.
pub fn two_boxes_apart(gap: f64) -> (TestHarness, ShapeId, ShapeId) {
    let mut h = TestHarness::new();
    let a = h.add_box(1.0, 0.6, 2.0).expect("box a");
    let b = h.add_box(1.0, 0.6, 2.0).expect("box b");
    h.drag_by(&b, 1.0 + gap, 0.0).expect("place box b");
    (h, a, b)
}

/// Volume a shape removes from the stock (the part below the ground)
pub fn removed_volume(params: &ShapeParams) -> f64 {
    use std::f64::consts::PI;
    match params {
        ShapeParams::Box(b) => b.width * b.height * b.depth,
        ShapeParams::Cylinder(c) => {
            let (r1, r2) = (c.diameter_bottom / 2.0, c.diameter_top / 2.0);
            let full = PI * c.height / 3.0 * (r1 * r1 + r1 * r2 + r2 * r2);
            if c.is_horizontal {
                full / 2.0
            } else {
                full
            }
        }
        ShapeParams::Sphere(s) => {
            2.0 / 3.0 * PI * (s.diameter_x / 2.0) * (s.diameter_y / 2.0) * (s.diameter_z / 2.0)
        }
        ShapeParams::Text(_) | ShapeParams::Unknown => 0.0,
    }
}
