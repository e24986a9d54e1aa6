//! Small shared helpers: ground-plane constants, id generation, vector utilities.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::{DVec2, DVec3};

/// Offset of the ground plane below y = 0.
///
/// Also the inset of the stock block's top face and the radius used to merge
/// near-duplicate landmark points.
pub const MIN_LAYER_OFFSET: f64 = 0.001;

/// Default distance below which a drag snaps to a vertex or a line.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.2;

/// Project a point onto the ground plane (y = 0).
pub fn flatten(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

/// Ground-plane (x, z) coordinates of a point.
pub fn ground_xz(v: DVec3) -> DVec2 {
    DVec2::new(v.x, v.z)
}

/// Generate a shape id of the form `{prefix}-{millis}-{random}`.
pub fn generate_shape_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{millis}-{}", &random[..10])
}

/// Convert a flat `[x, y, z, x, y, z, ...]` f32 buffer to points.
pub fn points_from_flat(buffer: &[f32]) -> Vec<DVec3> {
    buffer
        .chunks_exact(3)
        .map(|c| DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64))
        .collect()
}
