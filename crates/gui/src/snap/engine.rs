//! Snap computations for a dragged shape.
//!
//! Both snaps work on the landmarks captured at drag start, translated by the
//! pointer displacement, so the result does not depend on where the previous
//! frame left the shape. The y component of the candidate is never touched.

use glam::{DVec2, DVec3};
use shared::Axis;

use crate::helpers::ground_xz;

/// Result of a vertex-to-vertex snap attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSnap {
    pub position: DVec3,
    /// Target landmark on the ground plane, set only when the snap is accepted
    pub guide: Option<DVec2>,
}

impl VertexSnap {
    pub fn accepted(&self) -> bool {
        self.guide.is_some()
    }
}

/// Result of a line snap along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSnap {
    pub position: DVec3,
    /// Foreign coordinate the shape was aligned to
    pub guide: Option<f64>,
}

impl LineSnap {
    pub fn accepted(&self) -> bool {
        self.guide.is_some()
    }
}

/// Snap the closest moving landmark onto the closest foreign landmark.
///
/// `others` holds the landmark sets of every non-dragged shape. The global
/// minimum distance wins, ties keep the first pair found.
pub fn try_snap_vertex(
    candidate: DVec3,
    displacement: DVec3,
    start_landmarks: &[DVec3],
    others: &[Vec<DVec3>],
    threshold: f64,
) -> VertexSnap {
    let mut best: Option<(f64, DVec3, DVec3)> = None;

    for moving in start_landmarks.iter().map(|p| *p + displacement) {
        for target in others.iter().flatten() {
            let distance = moving.distance(*target);
            if best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, moving, *target));
            }
        }
    }

    match best {
        Some((distance, moving, target)) if distance < threshold => {
            let correction = target - moving;
            tracing::debug!("vertex snap: distance {:.4}, target ({:.3}, {:.3})", distance, target.x, target.z);
            VertexSnap {
                position: DVec3::new(candidate.x + correction.x, candidate.y, candidate.z + correction.z),
                guide: Some(ground_xz(target)),
            }
        }
        _ => VertexSnap {
            position: candidate,
            guide: None,
        },
    }
}

/// Align one coordinate of the moving landmarks with a foreign coordinate.
pub fn try_snap_line(
    candidate: DVec3,
    displacement: DVec3,
    start_landmarks: &[DVec3],
    others: &[Vec<DVec3>],
    axis: Axis,
    threshold: f64,
) -> LineSnap {
    let i = axis.index();
    let moving = distinct_values(start_landmarks.iter().map(|p| (*p + displacement)[i]));
    let foreign = distinct_values(others.iter().flatten().map(|p| p[i]));

    let mut best: Option<(f64, f64)> = None;
    for m in &moving {
        for f in &foreign {
            let delta = f - m;
            if best.map_or(true, |(d, _)| delta.abs() < d.abs()) {
                best = Some((delta, *f));
            }
        }
    }

    match best {
        Some((delta, value)) if delta.abs() < threshold => {
            tracing::debug!("line snap {:?}: {:.4} -> {:.3}", axis, delta, value);
            let mut position = candidate;
            position[i] += delta;
            LineSnap {
                position,
                guide: Some(value),
            }
        }
        _ => LineSnap {
            position: candidate,
            guide: None,
        },
    }
}

/// Distinct values in first-seen order, compared exactly
pub fn distinct_values(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cz: f64, half: f64) -> Vec<DVec3> {
        vec![
            DVec3::new(cx, 0.0, cz),
            DVec3::new(cx - half, 0.0, cz - half),
            DVec3::new(cx + half, 0.0, cz - half),
            DVec3::new(cx + half, 0.0, cz + half),
            DVec3::new(cx - half, 0.0, cz + half),
        ]
    }

    #[test]
    fn test_vertex_snap_accepts_close_pair() {
        let start = square(0.0, 0.0, 0.5);
        let others = vec![square(1.05, 0.0, 0.5)];
        let candidate = DVec3::new(0.0, -0.3, 0.0);

        let snap = try_snap_vertex(candidate, DVec3::ZERO, &start, &others, 0.2);
        assert!(snap.accepted());
        assert!((snap.position.x - 0.05).abs() < 1e-12);
        assert_eq!(snap.position.y, -0.3);
        assert_eq!(snap.position.z, 0.0);
        let guide = snap.guide.unwrap();
        assert!((guide - DVec2::new(0.55, -0.5)).length() < 1e-12);
    }

    #[test]
    fn test_vertex_snap_rejects_far_pair() {
        let start = square(0.0, 0.0, 0.5);
        let others = vec![square(3.0, 0.0, 0.5)];
        let candidate = DVec3::new(0.4, -1.0, 0.1);
        let snap = try_snap_vertex(candidate, DVec3::new(0.4, 0.0, 0.1), &start, &others, 0.2);
        assert!(!snap.accepted());
        assert_eq!(snap.position, candidate);
    }

    #[test]
    fn test_vertex_snap_without_other_shapes() {
        let snap = try_snap_vertex(DVec3::ONE, DVec3::ZERO, &square(0.0, 0.0, 1.0), &[], 0.2);
        assert_eq!(snap.position, DVec3::ONE);
        assert!(snap.guide.is_none());
    }

    #[test]
    fn test_vertex_snap_threshold_is_strict() {
        let start = vec![DVec3::ZERO];
        let others = vec![vec![DVec3::new(0.25, 0.0, 0.0)]];
        assert!(!try_snap_vertex(DVec3::ZERO, DVec3::ZERO, &start, &others, 0.25).accepted());
    }

    #[test]
    fn test_line_snap_single_axis() {
        let start = vec![DVec3::new(0.0, 0.0, 0.0)];
        let others = vec![vec![DVec3::new(0.1, 0.0, 7.0)]];
        let candidate = DVec3::new(0.0, -0.5, 3.0);

        let snap = try_snap_line(candidate, DVec3::ZERO, &start, &others, Axis::X, 0.2);
        assert_eq!(snap.guide, Some(0.1));
        assert!((snap.position.x - 0.1).abs() < 1e-12);
        assert_eq!(snap.position.y, -0.5);
        assert_eq!(snap.position.z, 3.0);

        let along_z = try_snap_line(candidate, DVec3::ZERO, &start, &others, Axis::Z, 0.2);
        assert!(!along_z.accepted());
        assert_eq!(along_z.position, candidate);
    }

    #[test]
    fn test_line_snap_uses_displacement() {
        let start = vec![DVec3::new(0.0, 0.0, 0.0)];
        let others = vec![vec![DVec3::new(2.0, 0.0, 0.0)]];
        let displacement = DVec3::new(1.9, 0.0, 0.0);
        let snap = try_snap_line(displacement, displacement, &start, &others, Axis::X, 0.2);
        assert!(snap.accepted());
        assert!((snap.position.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_snap_picks_smallest_delta() {
        let start = vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)];
        let others = vec![vec![DVec3::new(1.15, 0.0, 0.0)], vec![DVec3::new(-0.1, 0.0, 0.0)]];
        let snap = try_snap_line(DVec3::ZERO, DVec3::ZERO, &start, &others, Axis::X, 0.2);
        assert_eq!(snap.guide, Some(-0.1));
        assert!((snap.position.x + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_distinct_values_exact() {
        assert_eq!(distinct_values([1.0, 1.0, 2.0, 1.0 + 1e-12]), vec![1.0, 2.0, 1.0 + 1e-12]);
    }
}
