//! Landmark vertices: the canonical points of a shape that snapping aligns.
//!
//! Landmarks live on the ground plane. Each kind contributes a small fixed set
//! of points in its local frame, except horizontal cylinders, which fall back
//! to the full local vertex buffer.

use glam::DVec3;
use shared::ShapeParams;

use crate::helpers::MIN_LAYER_OFFSET;
use crate::state::catalog::Shape;

/// World-space landmarks of a shape, y forced to 0.
///
/// Deterministic for a given shape; empty for text and unknown kinds.
pub fn landmarks(shape: &Shape) -> Vec<DVec3> {
    let local = local_landmarks(shape);
    if local.is_empty() {
        tracing::trace!("no landmarks for {} ({})", shape.id, shape.params.kind_name());
        return local;
    }

    let world = shape.world_matrix();
    merge_overlapping(&local, MIN_LAYER_OFFSET)
        .into_iter()
        .map(|p| {
            let w = world.transform_point3(p);
            DVec3::new(w.x, 0.0, w.z)
        })
        .collect()
}

fn local_landmarks(shape: &Shape) -> Vec<DVec3> {
    match &shape.params {
        ShapeParams::Box(b) => {
            let (hw, hh, hd) = (b.width / 2.0, b.height / 2.0, b.depth / 2.0);
            vec![
                DVec3::new(0.0, hh, 0.0),
                DVec3::new(-hw, hh, -hd),
                DVec3::new(hw, hh, -hd),
                DVec3::new(hw, hh, hd),
                DVec3::new(-hw, hh, hd),
            ]
        }
        ShapeParams::Cylinder(c) if c.is_horizontal => shape.local_vertices().to_vec(),
        ShapeParams::Cylinder(c) => {
            let (r_top, r_bottom, hh) = (c.diameter_top / 2.0, c.diameter_bottom / 2.0, c.height / 2.0);
            vec![
                DVec3::ZERO,
                DVec3::new(-r_top, hh, 0.0),
                DVec3::new(r_top, hh, 0.0),
                DVec3::new(-r_bottom, -hh, 0.0),
                DVec3::new(r_bottom, -hh, 0.0),
            ]
        }
        ShapeParams::Sphere(s) => {
            let (rx, rz) = (s.diameter_x / 2.0, s.diameter_z / 2.0);
            vec![
                DVec3::ZERO,
                DVec3::new(-rx, 0.0, 0.0),
                DVec3::new(rx, 0.0, 0.0),
                DVec3::new(0.0, 0.0, -rz),
                DVec3::new(0.0, 0.0, rz),
            ]
        }
        ShapeParams::Text(_) | ShapeParams::Unknown => Vec::new(),
    }
}

/// Drop points closer than `epsilon` to an already kept point.
///
/// The first point of each cluster wins, so the output order follows the
/// input order.
pub fn merge_overlapping(points: &[DVec3], epsilon: f64) -> Vec<DVec3> {
    let mut kept: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !kept.iter().any(|k| k.distance(*p) < epsilon) {
            kept.push(*p);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared::{BoxParams, CylinderParams, SphereParams, TextParams};

    use crate::state::catalog::resting_pose;

    fn placed(params: ShapeParams, x: f64, z: f64, local: Vec<DVec3>) -> Shape {
        let (y, rotation_x) = resting_pose(&params);
        Shape::new("s".into(), params, DVec3::new(x, y, z), rotation_x, 16, local)
    }

    fn box_shape(w: f64, h: f64, d: f64, x: f64, z: f64) -> Shape {
        placed(ShapeParams::Box(BoxParams { width: w, height: h, depth: d }), x, z, Vec::new())
    }

    #[test]
    fn test_box_landmarks() {
        let pts = landmarks(&box_shape(1.0, 0.6, 2.0, 0.0, 0.0));
        assert_eq!(
            pts,
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(-0.5, 0.0, -1.0),
                DVec3::new(0.5, 0.0, -1.0),
                DVec3::new(0.5, 0.0, 1.0),
                DVec3::new(-0.5, 0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_vertical_cylinder_landmarks() {
        let shape = placed(
            ShapeParams::Cylinder(CylinderParams {
                height: 1.0,
                diameter_top: 1.5,
                diameter_bottom: 1.0,
                is_horizontal: false,
            }),
            2.0,
            0.0,
            Vec::new(),
        );
        let pts = landmarks(&shape);
        assert_eq!(pts.len(), 5);
        assert!(pts.contains(&DVec3::new(2.0, 0.0, 0.0)));
        assert!(pts.contains(&DVec3::new(2.75, 0.0, 0.0)));
        assert!(pts.contains(&DVec3::new(1.25, 0.0, 0.0)));
        assert!(pts.contains(&DVec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_cone_tip_points_merge() {
        let shape = placed(
            ShapeParams::Cylinder(CylinderParams {
                height: 1.0,
                diameter_top: 0.0,
                diameter_bottom: 1.0,
                is_horizontal: false,
            }),
            0.0,
            0.0,
            Vec::new(),
        );
        // Both tip points coincide and merge; the center stays separate
        let pts = landmarks(&shape);
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn test_sphere_landmarks() {
        let shape = placed(
            ShapeParams::Sphere(SphereParams { diameter_x: 1.5, diameter_y: 1.0, diameter_z: 1.0 }),
            0.0,
            0.0,
            Vec::new(),
        );
        let pts = landmarks(&shape);
        assert_eq!(pts.len(), 5);
        assert!(pts.contains(&DVec3::new(0.75, 0.0, 0.0)));
        assert!(pts.contains(&DVec3::new(0.0, 0.0, -0.5)));
    }

    #[test]
    fn test_horizontal_cylinder_uses_vertex_buffer() {
        let local = vec![
            DVec3::new(0.5, 0.5, 0.0),
            DVec3::new(0.5, 0.5, 0.0005),
            DVec3::new(-0.5, -0.5, 0.5),
        ];
        let shape = placed(
            ShapeParams::Cylinder(CylinderParams {
                height: 1.0,
                diameter_top: 1.0,
                diameter_bottom: 1.0,
                is_horizontal: true,
            }),
            1.0,
            1.0,
            local,
        );
        let pts = landmarks(&shape);
        // Second point is within the merge radius of the first
        assert_eq!(pts.len(), 2);
        // Rotation about X maps local y to world z
        assert!((pts[0] - DVec3::new(1.5, 0.0, 1.5)).length() < 1e-12);
        assert!((pts[1] - DVec3::new(0.5, 0.0, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_text_and_unknown_have_no_landmarks() {
        let text = placed(
            ShapeParams::Text(TextParams { text: "A".into(), size: 1.0, depth: 0.2 }),
            0.0,
            0.0,
            vec![DVec3::ONE],
        );
        assert!(landmarks(&text).is_empty());
        assert!(landmarks(&placed(ShapeParams::Unknown, 0.0, 0.0, Vec::new())).is_empty());
    }

    #[test]
    fn test_merge_keeps_first() {
        let pts = [DVec3::ZERO, DVec3::new(0.0009, 0.0, 0.0), DVec3::new(0.002, 0.0, 0.0)];
        let merged = merge_overlapping(&pts, MIN_LAYER_OFFSET);
        assert_eq!(merged, vec![DVec3::ZERO, DVec3::new(0.002, 0.0, 0.0)]);
    }

    proptest! {
        #[test]
        fn prop_box_landmarks_on_ground(
            w in 0.01f64..10.0, h in 0.01f64..10.0, d in 0.01f64..10.0,
            x in -50.0f64..50.0, z in -50.0f64..50.0,
        ) {
            let pts = landmarks(&box_shape(w, h, d, x, z));
            prop_assert!(!pts.is_empty());
            prop_assert!(pts.len() <= 5);
            for p in &pts {
                prop_assert_eq!(p.y, 0.0);
            }
        }

        #[test]
        fn prop_landmarks_are_distinct(
            w in 0.01f64..10.0, h in 0.01f64..10.0, d in 0.01f64..10.0,
        ) {
            let pts = landmarks(&box_shape(w, h, d, 0.0, 0.0));
            for (i, a) in pts.iter().enumerate() {
                for b in &pts[i + 1..] {
                    prop_assert!(a.distance(*b) >= MIN_LAYER_OFFSET * 0.5);
                }
            }
        }

        #[test]
        fn prop_translation_moves_landmarks(
            w in 0.01f64..10.0, d in 0.01f64..10.0,
            dx in -20.0f64..20.0, dz in -20.0f64..20.0,
        ) {
            let origin = landmarks(&box_shape(w, 1.0, d, 0.0, 0.0));
            let moved = landmarks(&box_shape(w, 1.0, d, dx, dz));
            prop_assert_eq!(origin.len(), moved.len());
            for (a, b) in origin.iter().zip(&moved) {
                prop_assert!((b.x - a.x - dx).abs() < 1e-9);
                prop_assert!((b.z - a.z - dz).abs() < 1e-9);
            }
        }
    }
}
