//! Plan-view drawing: ground grid, carved body, shape footprints, landmarks
//! and snap guides

use egui::{Color32, Painter, Shape as PaintShape, Stroke};
use glam::{DVec2, DVec3};

use crate::build::Body;
use crate::snap::guides::line_endpoints;
use crate::snap::SnapGuides;
use crate::state::catalog::Shape;
use crate::state::settings::ViewSettings;
use shared::Axis;

use super::camera::PlanCamera;
use super::mesh::{grid_lines, MeshData};
use super::picking::footprint;

const FOOTPRINT_COLOR: Color32 = Color32::from_rgb(120, 180, 230);
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(0, 220, 255);
const LANDMARK_COLOR: Color32 = Color32::from_rgb(255, 255, 120);
const GUIDE_COLOR: Color32 = Color32::from_rgb(255, 120, 60);
const GRID_MINOR_COLOR: Color32 = Color32::from_rgba_premultiplied(70, 70, 78, 110);
const GRID_MAJOR_COLOR: Color32 = Color32::from_rgba_premultiplied(150, 150, 160, 170);

/// Minor lines closer than this on screen are left out
const MIN_GRID_PIXELS: f64 = 6.0;

/// Ground grid across the visible part of the plan view.
pub fn draw_grid(painter: &Painter, rect: egui::Rect, camera: &PlanCamera, view: &ViewSettings) {
    let mut spacing = view.grid_spacing();
    let mut major_every = view.major_unit_frequency;
    if spacing * (camera.pixels_per_unit as f64) < MIN_GRID_PIXELS {
        spacing *= f64::from(major_every.max(1));
        major_every = 1;
    }

    let a = camera.screen_to_ground(rect.min, rect);
    let b = camera.screen_to_ground(rect.max, rect);
    let (min, max) = (a.min(b), a.max(b));

    for line in grid_lines(min, max, spacing, major_every) {
        let (from, to) = match line.axis {
            Axis::X => (DVec3::new(line.value, 0.0, min.y), DVec3::new(line.value, 0.0, max.y)),
            Axis::Z => (DVec3::new(min.x, 0.0, line.value), DVec3::new(max.x, 0.0, line.value)),
        };
        let stroke = if line.major {
            Stroke::new(1.0, GRID_MAJOR_COLOR)
        } else {
            Stroke::new(0.5, GRID_MINOR_COLOR)
        };
        painter.line_segment(
            [camera.world_to_screen(from, rect), camera.world_to_screen(to, rect)],
            stroke,
        );
    }
}

/// Depth-shaded top view of the body mesh.
///
/// Triangles facing up are drawn darker the deeper they sit, so pockets read
/// as holes. Triangles facing away from the camera are skipped.
pub fn draw_body(painter: &Painter, rect: egui::Rect, camera: &PlanCamera, body: &Body) {
    let depth = body.stock[1].max(1e-6);
    let mut mesh = egui::Mesh::default();

    for (t, [a, b, c]) in body.mesh.triangles().enumerate() {
        let normal = body.mesh.normal(t * 3);
        if normal.y <= 0.0 {
            continue;
        }
        let mean_y = (a.y + b.y + c.y) as f64 / 3.0;
        let shade = 1.0 - (-mean_y / depth).clamp(0.0, 1.0) * 0.75;
        let color = body_color(&body.mesh, t * 3, shade as f32);

        let base = mesh.vertices.len() as u32;
        for p in [a, b, c] {
            let pos = camera.world_to_screen(p.as_dvec3(), rect);
            mesh.colored_vertex(pos, color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }

    painter.add(PaintShape::mesh(mesh));
}

fn body_color(mesh: &MeshData, vertex: usize, shade: f32) -> Color32 {
    let base = vertex * crate::viewport::mesh::VERTEX_STRIDE + 6;
    let c = &mesh.vertices[base..base + 3];
    let channel = |v: f32| (v * shade * 255.0).clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(c[0]), channel(c[1]), channel(c[2]))
}

/// Outline of every shape's footprint; the highlighted shape is drawn thicker
pub fn draw_footprints(
    painter: &Painter,
    rect: egui::Rect,
    camera: &PlanCamera,
    shapes: &[Shape],
    highlighted: Option<&str>,
) {
    for shape in shapes {
        let hull = footprint(shape);
        if hull.len() < 2 {
            continue;
        }
        let points: Vec<egui::Pos2> = hull
            .iter()
            .map(|p| camera.world_to_screen(ground(*p), rect))
            .collect();
        let stroke = if highlighted == Some(shape.id.as_str()) {
            Stroke::new(2.5, HIGHLIGHT_COLOR)
        } else {
            Stroke::new(1.0, FOOTPRINT_COLOR)
        };
        painter.add(PaintShape::closed_line(points, stroke));
    }
}

pub fn draw_landmarks(painter: &Painter, rect: egui::Rect, camera: &PlanCamera, points: &[DVec3]) {
    for p in points {
        painter.circle_filled(camera.world_to_screen(*p, rect), 3.0, LANDMARK_COLOR);
    }
}

/// Vertex guide as a ring, line guides as dashed lines across the view
pub fn draw_guides(painter: &Painter, rect: egui::Rect, camera: &PlanCamera, guides: &SnapGuides) {
    let stroke = Stroke::new(1.5, GUIDE_COLOR);

    if let Some(v) = guides.vertex {
        painter.circle_stroke(camera.world_to_screen(ground(v), rect), 7.0, stroke);
    }

    for axis in Axis::both() {
        if let Some(value) = guides.line(axis) {
            let (a, b) = line_endpoints(axis, value);
            let points = [camera.world_to_screen(a, rect), camera.world_to_screen(b, rect)];
            painter.extend(PaintShape::dashed_line(&points, stroke, 6.0, 4.0));
        }
    }
}

/// Rectangle of the stock outline
pub fn draw_stock_outline(painter: &Painter, rect: egui::Rect, camera: &PlanCamera, stock: [f64; 3]) {
    let (hw, hd) = (stock[0] / 2.0, stock[2] / 2.0);
    let min = camera.world_to_screen(DVec3::new(-hw, 0.0, -hd), rect);
    let max = camera.world_to_screen(DVec3::new(hw, 0.0, hd), rect);
    painter.rect_stroke(
        egui::Rect::from_two_pos(min, max),
        0.0,
        Stroke::new(1.0, Color32::from_gray(140)),
        egui::StrokeKind::Middle,
    );
}

fn ground(p: DVec2) -> DVec3 {
    DVec3::new(p.x, 0.0, p.y)
}
