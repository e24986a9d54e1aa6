//! Mesh extraction from CSG parts

use vcad::Part;

use crate::viewport::mesh::MeshData;

/// Base color of the carved body
pub const BODY_COLOR: [f32; 3] = [0.76, 0.6, 0.42];

/// Extract flat-shaded MeshData from a vcad Part.
///
/// Every triangle gets its own three vertices so the face normal can be
/// stored per vertex. Returns `None` for an empty mesh.
pub fn extract_mesh_data(part: &Part, color: [f32; 3]) -> Option<MeshData> {
    let mesh = part.to_mesh();
    let positions = mesh.vertices();
    let indices = mesh.indices();

    tracing::debug!(
        "extract_mesh_data: {} vertices, {} indices ({} tris)",
        positions.len() / 3,
        indices.len(),
        indices.len() / 3
    );

    if positions.is_empty() || indices.is_empty() {
        tracing::warn!("extract_mesh_data: empty mesh!");
        return None;
    }

    let tri_count = indices.len() / 3;
    let mut data = MeshData {
        vertices: Vec::with_capacity(tri_count * 3 * 9),
        indices: Vec::with_capacity(tri_count * 3),
    };

    let point = |i: u32| {
        let i = i as usize * 3;
        glam::Vec3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    for tri in indices.chunks_exact(3) {
        let (p0, p1, p2) = (point(tri[0]), point(tri[1]), point(tri[2]));
        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

        let base = data.vertex_count() as u32;
        for p in [p0, p1, p2] {
            data.push_vertex(p, normal, color);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Some(data)
}
