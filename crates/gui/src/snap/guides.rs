//! Transient snap guides shown while dragging

use glam::{DVec2, DVec3};
use shared::{Axis, SnapMode};

/// Half length of a drawn line guide
pub const LINE_GUIDE_EXTENT: f64 = 100.0;

/// At most one vertex guide and one line guide per axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapGuides {
    /// Snapped-to landmark (x, z)
    pub vertex: Option<DVec2>,
    /// Line x = value, running along Z
    pub line_x: Option<f64>,
    /// Line z = value, running along X
    pub line_z: Option<f64>,
}

impl SnapGuides {
    pub fn is_empty(&self) -> bool {
        self.vertex.is_none() && self.line_x.is_none() && self.line_z.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn line(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.line_x,
            Axis::Z => self.line_z,
        }
    }

    pub fn set_line(&mut self, axis: Axis, value: Option<f64>) {
        match axis {
            Axis::X => self.line_x = value,
            Axis::Z => self.line_z = value,
        }
    }

    /// Drop the guides that do not belong to `mode`
    pub fn retain_mode(&mut self, mode: SnapMode) {
        match mode {
            SnapMode::None => self.clear(),
            SnapMode::Vertex => {
                self.line_x = None;
                self.line_z = None;
            }
            SnapMode::Line => self.vertex = None,
        }
    }

    /// Ground-plane segments of the active line guides
    pub fn line_segments(&self) -> Vec<(DVec3, DVec3)> {
        Axis::both()
            .into_iter()
            .filter_map(|axis| self.line(axis).map(|v| line_endpoints(axis, v)))
            .collect()
    }
}

/// Endpoints of the guide line where `axis` equals `value`.
pub fn line_endpoints(axis: Axis, value: f64) -> (DVec3, DVec3) {
    match axis {
        Axis::X => (
            DVec3::new(value, 0.0, -LINE_GUIDE_EXTENT),
            DVec3::new(value, 0.0, LINE_GUIDE_EXTENT),
        ),
        Axis::Z => (
            DVec3::new(-LINE_GUIDE_EXTENT, 0.0, value),
            DVec3::new(LINE_GUIDE_EXTENT, 0.0, value),
        ),
    }
}
