//! Mesh checks for carved bodies: buffer integrity, extents and enclosed
//! volume.

use crate::viewport::mesh::{MeshData, VERTEX_STRIDE};
use crate::viewport::picking::Aabb;

/// Read-only checks over a `MeshData`
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Vertex buffer is whole vertices and index buffer whole triangles
    pub fn are_strides_valid(&self) -> bool {
        self.mesh.vertices.len() % VERTEX_STRIDE == 0 && self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let count = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < count)
    }

    /// Normals of non-degenerate triangles have unit length
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        (0..self.vertex_count()).all(|i| {
            let len = self.mesh.normal(i).length();
            len == 0.0 || (len - 1.0).abs() <= epsilon
        })
    }

    /// Triangles with (near) zero area
    pub fn degenerate_triangle_count(&self) -> usize {
        self.mesh
            .triangles()
            .filter(|[a, b, c]| (*b - *a).cross(*c - *a).length() < 1e-9)
            .count()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Bounding box size as [width, height, depth]
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    pub fn dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        self.dimensions()
            .iter()
            .zip(expected)
            .all(|(got, want)| (got - want).abs() < tolerance)
    }

    /// No vertex above `max_y`
    pub fn is_below(&self, max_y: f32) -> bool {
        (0..self.vertex_count()).all(|i| self.mesh.position(i).y <= max_y)
    }

    /// Enclosed volume from the divergence theorem (sum of signed tetrahedra).
    ///
    /// Only meaningful for closed, consistently wound meshes.
    pub fn volume(&self) -> f64 {
        let signed: f64 = self
            .mesh
            .triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (a.as_dvec3(), b.as_dvec3(), c.as_dvec3());
                a.dot(b.cross(c))
            })
            .sum();
        signed / 6.0
    }

    /// Every failed check, empty when the mesh is usable
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_strides_valid() {
            errors.push(format!(
                "Buffer lengths not whole: {} floats / {} indices",
                self.mesh.vertices.len(),
                self.mesh.indices.len()
            ));
        }
        if !self.are_indices_in_range() {
            errors.push(format!("Indices out of range (vertex_count={})", self.vertex_count()));
        }
        // Triangle walks below index into the vertex buffer
        if !errors.is_empty() {
            return errors;
        }
        if !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length".to_string());
        }
        if self.volume() < 0.0 {
            errors.push(format!("Negative enclosed volume {:.6}, faces inverted", self.volume()));
        }

        errors
    }
}
