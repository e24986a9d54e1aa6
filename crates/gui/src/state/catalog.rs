//! Shape catalog: the append-only registry of placed shapes

use glam::{DMat4, DVec3};
use shared::{ShapeId, ShapeParams};
use thiserror::Error;

use crate::build::primitives::local_vertex_buffer;
use crate::build::GlyphOutliner;
use crate::helpers::generate_shape_id;

/// Rejected shape parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("{kind}: {name} must be a positive finite number, got {value}")]
    InvalidDimension {
        kind: &'static str,
        name: &'static str,
        value: f64,
    },
    #[error("cylinder needs at least one non-zero diameter")]
    DegenerateCylinder,
    #[error("tessellation must be at least 3, got {0}")]
    InvalidTessellation(u32),
    #[error("text shape needs non-blank text")]
    EmptyText,
    #[error("shape kind has no solid and cannot be placed")]
    UnsupportedKind,
}

/// A placed solid
#[derive(Debug, Clone)]
pub struct Shape {
    pub id: ShapeId,
    pub params: ShapeParams,
    /// Pivot in world space; y never changes after creation
    pub position: DVec3,
    /// Fixed orientation, degrees about X
    pub rotation_x: f64,
    pub tessellation: u32,
    local_vertices: Vec<DVec3>,
}

impl Shape {
    pub fn new(
        id: ShapeId,
        params: ShapeParams,
        position: DVec3,
        rotation_x: f64,
        tessellation: u32,
        local_vertices: Vec<DVec3>,
    ) -> Self {
        Self {
            id,
            params,
            position,
            rotation_x,
            tessellation,
            local_vertices,
        }
    }

    /// Translation × rotation
    pub fn world_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.position)
            * DMat4::from_rotation_x(self.rotation_x.to_radians())
    }

    /// Raw vertex buffer of the shape's mesh in its local frame
    pub fn local_vertices(&self) -> &[DVec3] {
        &self.local_vertices
    }

    /// Move the pivot on the ground plane, keeping the resting height
    pub fn set_ground_position(&mut self, position: DVec3) {
        self.position = DVec3::new(position.x, self.position.y, position.z);
    }
}

/// Pivot height and orientation that make a shape rest under the ground plane.
pub fn resting_pose(params: &ShapeParams) -> (f64, f64) {
    match params {
        ShapeParams::Box(b) => (-b.height / 2.0, 0.0),
        ShapeParams::Cylinder(c) if c.is_horizontal => (0.0, 90.0),
        ShapeParams::Cylinder(c) => (-c.height / 2.0, 0.0),
        ShapeParams::Sphere(_) => (0.0, 0.0),
        ShapeParams::Text(_) => (0.0, 90.0),
        ShapeParams::Unknown => (0.0, 0.0),
    }
}

fn positive(kind: &'static str, name: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidDimension { kind, name, value })
    }
}

fn non_negative(kind: &'static str, name: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidDimension { kind, name, value })
    }
}

/// Check that a shape can be built
pub fn validate(params: &ShapeParams, tessellation: u32) -> Result<(), CatalogError> {
    match params {
        ShapeParams::Box(b) => {
            positive("box", "width", b.width)?;
            positive("box", "height", b.height)?;
            positive("box", "depth", b.depth)
        }
        ShapeParams::Cylinder(c) => {
            positive("cylinder", "height", c.height)?;
            non_negative("cylinder", "diameter_top", c.diameter_top)?;
            non_negative("cylinder", "diameter_bottom", c.diameter_bottom)?;
            if c.diameter_top == 0.0 && c.diameter_bottom == 0.0 {
                return Err(CatalogError::DegenerateCylinder);
            }
            if tessellation < 3 {
                return Err(CatalogError::InvalidTessellation(tessellation));
            }
            Ok(())
        }
        ShapeParams::Sphere(s) => {
            positive("sphere", "diameter_x", s.diameter_x)?;
            positive("sphere", "diameter_y", s.diameter_y)?;
            positive("sphere", "diameter_z", s.diameter_z)?;
            if tessellation < 3 {
                return Err(CatalogError::InvalidTessellation(tessellation));
            }
            Ok(())
        }
        ShapeParams::Text(t) => {
            if t.text.trim().is_empty() {
                return Err(CatalogError::EmptyText);
            }
            positive("text", "size", t.size)?;
            positive("text", "depth", t.depth)
        }
        ShapeParams::Unknown => Err(CatalogError::UnsupportedKind),
    }
}

/// Ordered list of placed shapes
#[derive(Default)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
    /// Bumped on every add and every position write
    version: u64,
}

impl ShapeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, build and append a shape. Returns its generated id.
    pub fn add_shape(
        &mut self,
        params: ShapeParams,
        tessellation: u32,
        glyphs: &dyn GlyphOutliner,
    ) -> Result<ShapeId, CatalogError> {
        validate(&params, tessellation)?;

        let id = generate_shape_id(params.kind_name());
        let (y, rotation_x) = resting_pose(&params);
        let local_vertices = local_vertex_buffer(&id, &params, tessellation, glyphs);

        tracing::info!("Added {} ({})", id, params.describe());

        self.shapes.push(Shape::new(
            id.clone(),
            params,
            DVec3::new(0.0, y, 0.0),
            rotation_x,
            tessellation,
            local_vertices,
        ));
        self.version += 1;
        Ok(id)
    }

    pub fn all_shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Mutable access bumps the version, the caller may move the shape
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Shape> {
        let shape = self.shapes.iter_mut().find(|s| s.id == id)?;
        self.version += 1;
        Some(shape)
    }

    /// Write a new ground position onto a shape
    pub fn set_position(&mut self, id: &str, position: DVec3) -> bool {
        match self.shapes.iter_mut().find(|s| s.id == id) {
            Some(shape) => {
                shape.set_ground_position(position);
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Rebuild the local vertex buffers of text shapes after the glyph
    /// source changed. Returns how many shapes were refreshed.
    pub fn refresh_text_outlines(&mut self, glyphs: &dyn GlyphOutliner) -> usize {
        let mut refreshed = 0;
        for shape in self.shapes.iter_mut() {
            if matches!(shape.params, ShapeParams::Text(_)) {
                shape.local_vertices =
                    local_vertex_buffer(&shape.id, &shape.params, shape.tessellation, glyphs);
                refreshed += 1;
            }
        }
        if refreshed > 0 {
            tracing::debug!("re-outlined {} text shapes", refreshed);
            self.version += 1;
        }
        refreshed
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
