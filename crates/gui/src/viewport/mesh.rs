use glam::{DVec2, Vec3};
use shared::Axis;

/// Floats per vertex in [`MeshData::vertices`].
pub const VERTEX_STRIDE: usize = 9;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Vec3 {
        let base = i * VERTEX_STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Normal of vertex `i`
    pub fn normal(&self, i: usize) -> Vec3 {
        let base = i * VERTEX_STRIDE + 3;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Iterate triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.position(tri[0] as usize),
                self.position(tri[1] as usize),
                self.position(tri[2] as usize),
            ]
        })
    }

    pub(crate) fn push_vertex(&mut self, p: Vec3, n: Vec3, c: [f32; 3]) {
        self.vertices
            .extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
    }
}

// ── Grid ─────────────────────────────────────────────────────

/// Upper bound on grid lines per axis; denser grids are not generated
pub const MAX_GRID_LINES: usize = 4000;

/// One ground grid line: `axis` equals `value` along the whole line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: Axis,
    pub value: f64,
    pub major: bool,
}

/// Grid lines every `spacing` units covering the ground rectangle
/// `min..max` (x, z). Every `major_every`-th line, counted from the origin,
/// is a major line.
pub fn grid_lines(min: DVec2, max: DVec2, spacing: f64, major_every: u32) -> Vec<GridLine> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Vec::new();
    }
    let major_every = i64::from(major_every.max(1));
    let mut lines = Vec::new();

    for (axis, lo, hi) in [(Axis::X, min.x, max.x), (Axis::Z, min.y, max.y)] {
        let first = (lo / spacing).ceil() as i64;
        let last = (hi / spacing).floor() as i64;
        if last < first || (last - first) as usize >= MAX_GRID_LINES {
            continue;
        }
        lines.extend((first..=last).map(|i| GridLine {
            axis,
            value: i as f64 * spacing,
            major: i.rem_euclid(major_every) == 0,
        }));
    }
    lines
}
