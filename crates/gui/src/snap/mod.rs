//! Landmark extraction and snapping for dragged shapes

pub mod engine;
pub mod guides;
pub mod landmarks;

pub use engine::{try_snap_line, try_snap_vertex, LineSnap, VertexSnap};
pub use guides::SnapGuides;
pub use landmarks::landmarks;
