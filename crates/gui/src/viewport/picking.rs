use glam::{DVec2, DVec3, Vec3};

use super::mesh::MeshData;
use crate::helpers::{flatten, ground_xz};
use crate::state::catalog::Shape;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for i in 0..data.vertex_count() {
            let p = data.position(i);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Intersect a ray with the horizontal ground plane at `ground_y`.
///
/// The hit point is returned with y flattened to 0. Rays parallel to the
/// plane or pointing away from it miss.
pub fn pick_ground(ray: &Ray, ground_y: f64) -> Option<DVec3> {
    const EPSILON: f64 = 1e-12;

    if ray.direction.y.abs() < EPSILON {
        return None;
    }
    let t = (ground_y - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    Some(flatten(ray.origin + ray.direction * t))
}

/// Ground-plane footprint of a shape: convex hull of its world-space vertices.
pub fn footprint(shape: &Shape) -> Vec<DVec2> {
    let matrix = shape.world_matrix();
    let points: Vec<DVec2> = shape
        .local_vertices()
        .iter()
        .map(|v| ground_xz(matrix.transform_point3(*v)))
        .collect();
    convex_hull(points)
}

/// Andrew's monotone chain. Returns the hull counter-clockwise without
/// repeating the first point.
pub fn convex_hull(mut points: Vec<DVec2>) -> Vec<DVec2> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    fn cross(o: DVec2, a: DVec2, b: DVec2) -> f64 {
        (a - o).perp_dot(b - o)
    }

    let mut lower: Vec<DVec2> = Vec::new();
    for &p in &points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<DVec2> = Vec::new();
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Even-odd point in polygon test.
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Pick the shape whose footprint contains the ground point.
/// Later shapes win, matching draw order.
pub fn pick_shape<'a>(ground: DVec3, shapes: &'a [Shape]) -> Option<&'a Shape> {
    let point = ground_xz(ground);
    shapes
        .iter()
        .rev()
        .find(|shape| point_in_polygon(point, &footprint(shape)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_ground_straight_down() {
        let ray = Ray {
            origin: DVec3::new(1.5, 10.0, -2.0),
            direction: DVec3::NEG_Y,
        };
        let hit = pick_ground(&ray, -0.001).unwrap();
        assert_eq!(hit, DVec3::new(1.5, 0.0, -2.0));
    }

    #[test]
    fn test_pick_ground_oblique() {
        let ray = Ray {
            origin: DVec3::new(0.0, 4.0, 0.0),
            direction: DVec3::new(1.0, -1.0, 0.0),
        };
        let hit = pick_ground(&ray, 0.0).unwrap();
        assert!((hit.x - 4.0).abs() < 1e-9);
        assert_eq!(hit.y, 0.0);
    }

    #[test]
    fn test_pick_ground_misses_when_parallel_or_away() {
        let parallel = Ray {
            origin: DVec3::new(0.0, 1.0, 0.0),
            direction: DVec3::X,
        };
        assert!(pick_ground(&parallel, 0.0).is_none());

        let away = Ray {
            origin: DVec3::new(0.0, 1.0, 0.0),
            direction: DVec3::Y,
        };
        assert!(pick_ground(&away, 0.0).is_none());
    }

    #[test]
    fn test_convex_hull_square_with_interior_point() {
        let hull = convex_hull(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.5, 0.5),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&DVec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = vec![
            DVec2::new(-1.0, -1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(-1.0, 1.0),
        ];
        assert!(point_in_polygon(DVec2::ZERO, &square));
        assert!(!point_in_polygon(DVec2::new(2.0, 0.0), &square));
        assert!(!point_in_polygon(DVec2::ZERO, &square[..2]));
    }
}
