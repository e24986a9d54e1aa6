//! Solid construction for placed shapes and the stock block
//!
//! Every shape is built in its local frame first (centered on the pivot, Y
//! up), then placed with [`place`] using the shape's orientation and
//! position. Half solids (sphere, horizontal cylinder) are cut in the local
//! frame so that the placed solid always lies below the ground plane.

use glam::DVec3;
use shared::{CylinderParams, ShapeParams, SphereParams};
use vcad::{centered_cube, Part};

use super::text::{extrude_text, GlyphOutliner};
use crate::helpers::{points_from_flat, MIN_LAYER_OFFSET};
use crate::state::catalog::Shape;

pub const DEFAULT_TESSELLATION: u32 = 16;

/// Extra size of the half-space cutters so they fully cover the solid
const CUT_MARGIN: f64 = 1.0;

/// Build a shape's solid in its local frame.
///
/// Returns `None` for kinds without geometry (unknown, blank text).
pub fn local_part(
    id: &str,
    params: &ShapeParams,
    tessellation: u32,
    glyphs: &dyn GlyphOutliner,
) -> Option<Part> {
    match params {
        ShapeParams::Box(b) => Some(centered_cube(id, b.width, b.height, b.depth)),
        ShapeParams::Cylinder(c) => Some(cylinder_part(id, c, tessellation)),
        ShapeParams::Sphere(s) => Some(lower_half_sphere(id, s, tessellation)),
        ShapeParams::Text(t) => {
            let outlines = glyphs.outline(&t.text, t.size);
            extrude_text(id, &outlines, t.depth)
        }
        ShapeParams::Unknown => None,
    }
}

/// Build a shape's solid in world space.
pub fn shape_part(shape: &Shape, glyphs: &dyn GlyphOutliner) -> Option<Part> {
    let part = local_part(&shape.id, &shape.params, shape.tessellation, glyphs)?;
    Some(place(part, shape.rotation_x, shape.position))
}

/// Apply the shape orientation (degrees about X) then its position
pub fn place(part: Part, rotation_x: f64, position: DVec3) -> Part {
    let mut p = part;
    if rotation_x != 0.0 {
        p = p.rotate(rotation_x, 0.0, 0.0);
    }
    if position != DVec3::ZERO {
        p = p.translate(position.x, position.y, position.z);
    }
    p
}

/// Stock block whose top face sits just below the ground plane.
pub fn stock_part(width: f64, height: f64, depth: f64) -> Part {
    let inner_height = height - 2.0 * MIN_LAYER_OFFSET;
    centered_cube("stock", width, inner_height, depth).translate(0.0, -height / 2.0, 0.0)
}

/// Raw local vertex buffer of a shape's mesh.
pub fn local_vertex_buffer(
    id: &str,
    params: &ShapeParams,
    tessellation: u32,
    glyphs: &dyn GlyphOutliner,
) -> Vec<DVec3> {
    match local_part(id, params, tessellation, glyphs) {
        Some(part) => {
            let mesh = part.to_mesh();
            let positions = mesh.vertices();
            points_from_flat(&positions)
        }
        None => Vec::new(),
    }
}

/// Frustum along Y, centered, bottom diameter at -h/2.
/// Horizontal cylinders keep only the local z >= 0 half, which the +90°
/// rotation about X turns into the half below the ground.
fn cylinder_part(id: &str, c: &CylinderParams, tessellation: u32) -> Part {
    let r_top = c.diameter_top / 2.0;
    let r_bottom = c.diameter_bottom / 2.0;

    // Z axis -> Y axis, centered on the pivot
    let part = Part::cone(id, r_bottom, r_top, c.height, 2 * tessellation)
        .translate(0.0, 0.0, -c.height / 2.0)
        .rotate(-90.0, 0.0, 0.0);

    if !c.is_horizontal {
        return part;
    }

    let r_max = r_top.max(r_bottom);
    let half = r_max + CUT_MARGIN;
    let cutter = centered_cube("half_cut", 2.0 * half, c.height + 2.0 * CUT_MARGIN, half)
        .translate(0.0, 0.0, half / 2.0);
    part.intersection(&cutter)
}

/// Ellipsoid with the given diameters, keeping the y <= 0 half.
fn lower_half_sphere(id: &str, s: &SphereParams, tessellation: u32) -> Part {
    let (rx, ry, rz) = (s.diameter_x / 2.0, s.diameter_y / 2.0, s.diameter_z / 2.0);
    let sphere = Part::sphere(id, 1.0, 2 * tessellation).scale(rx, ry, rz);

    let cut_height = ry + CUT_MARGIN;
    let cutter = centered_cube(
        "half_cut",
        2.0 * (rx + CUT_MARGIN),
        cut_height,
        2.0 * (rz + CUT_MARGIN),
    )
    .translate(0.0, -cut_height / 2.0, 0.0);
    sphere.intersection(&cutter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::text::BlockGlyphs;
    use shared::{BoxParams, TextParams};

    fn bounds(points: &[DVec3]) -> (DVec3, DVec3) {
        points.iter().fold(
            (DVec3::splat(f64::MAX), DVec3::splat(f64::MIN)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        )
    }

    #[test]
    fn test_box_local_bounds() {
        let params = ShapeParams::Box(BoxParams { width: 1.0, height: 0.6, depth: 2.0 });
        let verts = local_vertex_buffer("b", &params, DEFAULT_TESSELLATION, &BlockGlyphs);
        let (lo, hi) = bounds(&verts);
        assert!((hi.x - 0.5).abs() < 1e-5 && (lo.x + 0.5).abs() < 1e-5);
        assert!((hi.y - 0.3).abs() < 1e-5 && (lo.y + 0.3).abs() < 1e-5);
        assert!((hi.z - 1.0).abs() < 1e-5 && (lo.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_vertical_cylinder_is_centered_on_y() {
        let params = ShapeParams::Cylinder(CylinderParams {
            height: 1.0,
            diameter_top: 1.5,
            diameter_bottom: 1.0,
            is_horizontal: false,
        });
        let verts = local_vertex_buffer("c", &params, 8, &BlockGlyphs);
        let (lo, hi) = bounds(&verts);
        assert!((hi.y - 0.5).abs() < 1e-5);
        assert!((lo.y + 0.5).abs() < 1e-5);
        // Wider end on top
        let top_r = verts
            .iter()
            .filter(|v| (v.y - 0.5).abs() < 1e-5)
            .map(|v| v.x.hypot(v.z))
            .fold(0.0, f64::max);
        assert!((top_r - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_cone_tapers_to_apex() {
        let params = ShapeParams::Cylinder(CylinderParams {
            height: 2.0,
            diameter_top: 0.0,
            diameter_bottom: 1.0,
            is_horizontal: false,
        });
        let verts = local_vertex_buffer("cone", &params, 8, &BlockGlyphs);
        let (lo, hi) = bounds(&verts);
        assert!((lo.y + 1.0).abs() < 1e-5 && (hi.y - 1.0).abs() < 1e-5);
        let bottom_r = verts
            .iter()
            .filter(|v| (v.y + 1.0).abs() < 1e-5)
            .map(|v| v.x.hypot(v.z))
            .fold(0.0, f64::max);
        assert!((bottom_r - 0.5).abs() < 1e-4);
        for v in verts.iter().filter(|v| (v.y - 1.0).abs() < 1e-5) {
            assert!(v.x.hypot(v.z) < 1e-5);
        }
    }

    #[test]
    fn test_horizontal_cylinder_keeps_positive_z_half() {
        let params = ShapeParams::Cylinder(CylinderParams {
            height: 1.0,
            diameter_top: 1.0,
            diameter_bottom: 1.0,
            is_horizontal: true,
        });
        let verts = local_vertex_buffer("c", &params, 8, &BlockGlyphs);
        let (lo, _) = bounds(&verts);
        assert!(lo.z > -1e-5);
    }

    #[test]
    fn test_sphere_lower_half() {
        let params = ShapeParams::Sphere(SphereParams {
            diameter_x: 1.5,
            diameter_y: 1.0,
            diameter_z: 1.0,
        });
        let verts = local_vertex_buffer("s", &params, 8, &BlockGlyphs);
        let (lo, hi) = bounds(&verts);
        assert!(hi.y < 1e-5);
        assert!((lo.y + 0.5).abs() < 0.02);
        assert!((hi.x - 0.75).abs() < 0.02);
    }

    #[test]
    fn test_text_extrudes_along_z() {
        let params = ShapeParams::Text(TextParams {
            text: "HI".to_string(),
            size: 1.0,
            depth: 0.5,
        });
        let verts = local_vertex_buffer("t", &params, DEFAULT_TESSELLATION, &BlockGlyphs);
        let (lo, hi) = bounds(&verts);
        assert!(lo.z.abs() < 1e-5);
        assert!((hi.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_has_no_part() {
        assert!(local_part("u", &ShapeParams::Unknown, 8, &BlockGlyphs).is_none());
        assert!(local_vertex_buffer("u", &ShapeParams::Unknown, 8, &BlockGlyphs).is_empty());
    }

    #[test]
    fn test_stock_top_below_ground() {
        let mesh = stock_part(3.0, 2.0, 5.0).to_mesh();
        let positions = mesh.vertices();
        let verts = points_from_flat(&positions);
        let (lo, hi) = bounds(&verts);
        assert!((hi.y + MIN_LAYER_OFFSET).abs() < 1e-5);
        assert!((lo.y + 2.0 - MIN_LAYER_OFFSET).abs() < 1e-5);
    }
}
