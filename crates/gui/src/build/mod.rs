//! Carved body building.
//!
//! The body is the stock block with every placed shape subtracted. It is
//! always rebuilt from scratch; a failed subtraction aborts the rebuild and
//! the previously published body stays in place.

mod mesh_extraction;
pub mod primitives;
pub mod text;

pub use mesh_extraction::{extract_mesh_data, BODY_COLOR};
pub use text::{BlockGlyphs, FontGlyphs, GlyphOutliner};

use thiserror::Error;
use vcad::Part;

use crate::helpers::MIN_LAYER_OFFSET;
use crate::state::catalog::Shape;
use crate::viewport::mesh::MeshData;

/// Solids smaller than this are treated as empty
const MIN_SOLID_VOLUME: f64 = 1e-9;

/// Why a body rebuild was aborted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("invalid stock dimensions {width}×{height}×{depth}")]
    InvalidStock { width: f64, height: f64, depth: f64 },
    #[error("shape {id} produced no solid")]
    DegenerateSolid { id: String },
    #[error("subtracting shape {id} failed (volume {before} -> {after})")]
    SubtractionFailed { id: String, before: f64, after: f64 },
    #[error("carved body has no geometry")]
    EmptyResult,
}

/// The carved block
#[derive(Debug, Clone)]
pub struct Body {
    pub mesh: MeshData,
    /// Enclosed volume reported by the CSG kernel
    pub volume: f64,
    /// Stock dimensions [width, height, depth]
    pub stock: [f64; 3],
    /// Number of shapes subtracted
    pub shape_count: usize,
    /// Incremented on every successful rebuild
    pub generation: u64,
}

/// Subtract every shape, in catalog order, from a fresh stock block.
pub fn carve(
    width: f64,
    height: f64,
    depth: f64,
    shapes: &[Shape],
    glyphs: &dyn GlyphOutliner,
) -> Result<(MeshData, f64), ComposeError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(depth) || !valid(height) || height <= 2.0 * MIN_LAYER_OFFSET {
        return Err(ComposeError::InvalidStock { width, height, depth });
    }

    let mut body: Part = primitives::stock_part(width, height, depth);
    let mut volume = body.volume();

    for shape in shapes {
        let tool = primitives::shape_part(shape, glyphs)
            .filter(|tool| tool.volume() > MIN_SOLID_VOLUME)
            .ok_or_else(|| ComposeError::DegenerateSolid { id: shape.id.clone() })?;

        let carved = body.difference(&tool);
        let after = carved.volume();
        // A subtraction can only remove material
        if !after.is_finite() || after > volume + volume.abs() * 1e-6 + MIN_SOLID_VOLUME {
            return Err(ComposeError::SubtractionFailed {
                id: shape.id.clone(),
                before: volume,
                after,
            });
        }

        tracing::trace!("carved {}: volume {:.4} -> {:.4}", shape.id, volume, after);
        body = carved;
        volume = after;
    }

    let mesh = extract_mesh_data(&body, BODY_COLOR).ok_or(ComposeError::EmptyResult)?;
    Ok((mesh, volume))
}

/// Owns the single published body
#[derive(Default)]
pub struct BodyCompositor {
    body: Option<Body>,
    generation: u64,
    last_error: Option<ComposeError>,
}

impl BodyCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the body; on failure the previous body is kept and the error
    /// is recorded.
    pub fn rebuild(
        &mut self,
        width: f64,
        height: f64,
        depth: f64,
        shapes: &[Shape],
        glyphs: &dyn GlyphOutliner,
    ) -> Result<&Body, ComposeError> {
        match carve(width, height, depth, shapes, glyphs) {
            Ok((mesh, volume)) => {
                self.generation += 1;
                tracing::info!(
                    "body rebuilt: {}×{}×{} minus {} shapes, volume {:.4}, {} tris",
                    width,
                    height,
                    depth,
                    shapes.len(),
                    volume,
                    mesh.triangle_count()
                );
                self.last_error = None;
                // Replacing drops the previous body's mesh
                Ok(&*self.body.insert(Body {
                    mesh,
                    volume,
                    stock: [width, height, depth],
                    shape_count: shapes.len(),
                    generation: self.generation,
                }))
            }
            Err(e) => {
                tracing::error!("body rebuild aborted, keeping previous body: {e}");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn last_error(&self) -> Option<&ComposeError> {
        self.last_error.as_ref()
    }

    /// Number of successful rebuilds so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
