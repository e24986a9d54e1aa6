//! Drag state machine for moving one shape on the ground plane.
//!
//! Idle → Dragging on pick-down, back to Idle on pick-up, lost pointer
//! capture or a stale session. Every end path commits the current position;
//! the caller rebuilds the body with the returned shape id.

use std::time::{Duration, Instant};

use glam::DVec3;
use shared::{Axis, ShapeId, SnapMode};
use thiserror::Error;

use super::deferred::{DeferredQueue, DeferredTask};
use super::CameraInput;
use crate::helpers::flatten;
use crate::snap::{landmarks, try_snap_line, try_snap_vertex, SnapGuides};
use crate::state::catalog::ShapeCatalog;

/// Refused pick-down
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragError {
    #[error("shape {0} is already being dragged")]
    SessionActive(ShapeId),
    #[error("unknown shape {0}")]
    UnknownShape(String),
    #[error("pointer ray does not hit the ground plane")]
    NoGroundHit,
}

/// How a drag session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    PickUp,
    CaptureLost,
    TimedOut,
}

/// State captured at pick-down
#[derive(Debug, Clone)]
pub struct DragSession {
    pub shape_id: ShapeId,
    pub start_position: DVec3,
    pub start_landmarks: Vec<DVec3>,
    /// Pointer on the ground at pick-down, y = 0
    pub start_pointer: DVec3,
    pub last_event: Instant,
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    guides: SnapGuides,
    highlighted: Option<ShapeId>,
    deferred: DeferredQueue,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `shape_id`.
    ///
    /// `pointer_ground` is the ground-plane pick under the pointer, `None`
    /// when the ray missed.
    pub fn pick_down(
        &mut self,
        shape_id: &str,
        pointer_ground: Option<DVec3>,
        catalog: &ShapeCatalog,
        now: Instant,
    ) -> Result<(), DragError> {
        if let Some(session) = &self.session {
            tracing::warn!("pick-down on {} refused, {} is being dragged", shape_id, session.shape_id);
            return Err(DragError::SessionActive(session.shape_id.clone()));
        }
        let shape = catalog.get(shape_id).ok_or_else(|| {
            tracing::warn!("pick-down on unknown shape {}", shape_id);
            DragError::UnknownShape(shape_id.to_string())
        })?;
        let pointer = pointer_ground.ok_or_else(|| {
            tracing::warn!("pick-down on {} missed the ground plane", shape_id);
            DragError::NoGroundHit
        })?;

        let start_landmarks = landmarks(shape);
        tracing::debug!(
            "drag start: {} at ({:.3}, {:.3}), {} landmarks",
            shape.id,
            shape.position.x,
            shape.position.z,
            start_landmarks.len()
        );

        self.session = Some(DragSession {
            shape_id: shape.id.clone(),
            start_position: shape.position,
            start_landmarks,
            start_pointer: flatten(pointer),
            last_event: now,
        });
        self.highlighted = Some(shape.id.clone());
        self.guides.clear();
        self.deferred.schedule(DeferredTask::DetachCamera);
        Ok(())
    }

    /// Move the dragged shape to follow the pointer, applying the snap mode.
    ///
    /// Returns the corrected position written to the catalog, or `None` when
    /// idle or when the frame was skipped.
    pub fn pointer_move(
        &mut self,
        pointer_ground: Option<DVec3>,
        catalog: &mut ShapeCatalog,
        mode: SnapMode,
        threshold: f64,
        now: Instant,
    ) -> Option<DVec3> {
        let session = self.session.as_mut()?;
        session.last_event = now;
        let pointer = pointer_ground?;

        let displacement = flatten(pointer) - session.start_pointer;
        let naive = session.start_position + displacement;

        let others: Vec<Vec<DVec3>> = catalog
            .all_shapes()
            .iter()
            .filter(|s| s.id != session.shape_id)
            .map(landmarks)
            .collect();

        let mut guides = SnapGuides::default();
        let corrected = match mode {
            SnapMode::None => naive,
            SnapMode::Vertex => {
                let snap = try_snap_vertex(naive, displacement, &session.start_landmarks, &others, threshold);
                guides.vertex = snap.guide;
                snap.position
            }
            SnapMode::Line => {
                let mut position = naive;
                for axis in Axis::both() {
                    let snap = try_snap_line(
                        position,
                        displacement,
                        &session.start_landmarks,
                        &others,
                        axis,
                        threshold,
                    );
                    guides.set_line(axis, snap.guide);
                    position = snap.position;
                }
                position
            }
        };

        catalog.set_position(&session.shape_id, corrected);
        self.guides = guides;
        Some(corrected)
    }

    /// Finish the drag normally
    pub fn pick_up(&mut self, camera: &mut CameraInput) -> Option<ShapeId> {
        self.end(DragEnd::PickUp, camera)
    }

    /// The view lost pointer capture mid-drag
    pub fn capture_lost(&mut self, camera: &mut CameraInput) -> Option<ShapeId> {
        self.end(DragEnd::CaptureLost, camera)
    }

    /// End a session that saw no pointer event for longer than `timeout`
    pub fn expire_stale(&mut self, now: Instant, timeout: Duration, camera: &mut CameraInput) -> Option<ShapeId> {
        let stale = self
            .session
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.last_event) > timeout);
        if stale {
            self.end(DragEnd::TimedOut, camera)
        } else {
            None
        }
    }

    fn end(&mut self, reason: DragEnd, camera: &mut CameraInput) -> Option<ShapeId> {
        let Some(session) = self.session.take() else {
            tracing::debug!("{:?} without an active drag ignored", reason);
            return None;
        };

        if self.deferred.cancel(DeferredTask::DetachCamera) {
            tracing::debug!("pending camera detach cancelled");
        }
        camera.attached = true;
        self.highlighted = None;
        self.guides.clear();

        tracing::debug!("drag end ({:?}): {}", reason, session.shape_id);
        Some(session.shape_id)
    }

    /// Run the deferred tasks against the camera. Returns how many ran.
    pub fn drain_deferred(&mut self, camera: &mut CameraInput) -> usize {
        let tasks = self.deferred.drain();
        for task in &tasks {
            camera.apply(*task);
        }
        tasks.len()
    }

    /// Drop guides that belong to another snap mode
    pub fn retain_guides(&mut self, mode: SnapMode) {
        self.guides.retain_mode(mode);
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn guides(&self) -> &SnapGuides {
        &self.guides
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BlockGlyphs;
    use shared::{BoxParams, ShapeParams};

    fn two_boxes() -> (ShapeCatalog, ShapeId, ShapeId) {
        let mut catalog = ShapeCatalog::new();
        let params = ShapeParams::Box(BoxParams { width: 1.0, height: 0.6, depth: 2.0 });
        let a = catalog.add_shape(params.clone(), 16, &BlockGlyphs).unwrap();
        let b = catalog.add_shape(params, 16, &BlockGlyphs).unwrap();
        catalog.set_position(&b, DVec3::new(1.05, 0.0, 0.0));
        (catalog, a, b)
    }

    #[test]
    fn test_drag_without_snap_follows_pointer() {
        let (mut catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let now = Instant::now();

        drag.pick_down(&a, Some(DVec3::new(0.2, 0.0, 0.2)), &catalog, now).unwrap();
        let pos = drag
            .pointer_move(Some(DVec3::new(0.7, 3.0, -0.3)), &mut catalog, SnapMode::None, 0.2, now)
            .unwrap();

        assert!((pos - DVec3::new(0.5, -0.3, -0.5)).length() < 1e-12);
        assert_eq!(catalog.get(&a).unwrap().position, pos);
        assert!(drag.guides().is_empty());
    }

    #[test]
    fn test_vertex_snap_during_drag() {
        let (mut catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let now = Instant::now();

        drag.pick_down(&a, Some(DVec3::ZERO), &catalog, now).unwrap();
        let pos = drag
            .pointer_move(Some(DVec3::new(0.01, 0.0, 0.0)), &mut catalog, SnapMode::Vertex, 0.2, now)
            .unwrap();

        assert!((pos.x - 0.05).abs() < 1e-9);
        assert_eq!(pos.y, -0.3);
        assert!(drag.guides().vertex.is_some());
        assert!(drag.guides().line_x.is_none());
    }

    #[test]
    fn test_concurrent_pick_down_refused() {
        let (catalog, a, b) = two_boxes();
        let mut drag = DragController::new();
        let now = Instant::now();

        drag.pick_down(&a, Some(DVec3::ZERO), &catalog, now).unwrap();
        let err = drag.pick_down(&b, Some(DVec3::ZERO), &catalog, now).unwrap_err();
        assert_eq!(err, DragError::SessionActive(a.clone()));
        assert_eq!(drag.session().unwrap().shape_id, a);
        assert_eq!(drag.highlighted(), Some(a.as_str()));
    }

    #[test]
    fn test_pick_down_errors() {
        let (catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let now = Instant::now();
        assert_eq!(
            drag.pick_down("nope", Some(DVec3::ZERO), &catalog, now),
            Err(DragError::UnknownShape("nope".into()))
        );
        assert_eq!(drag.pick_down(&a, None, &catalog, now), Err(DragError::NoGroundHit));
        assert!(!drag.is_dragging());
        assert!(drag.deferred().is_empty());
    }

    #[test]
    fn test_missed_ground_pick_skips_frame() {
        let (mut catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let now = Instant::now();
        drag.pick_down(&a, Some(DVec3::ZERO), &catalog, now).unwrap();
        let version = catalog.version();
        assert!(drag.pointer_move(None, &mut catalog, SnapMode::None, 0.2, now).is_none());
        assert_eq!(catalog.version(), version);
    }

    #[test]
    fn test_spurious_pick_up() {
        let mut drag = DragController::new();
        let mut camera = CameraInput::default();
        assert!(drag.pick_up(&mut camera).is_none());
        assert!(camera.attached);
    }

    #[test]
    fn test_detach_is_deferred_and_cancelled_by_pick_up() {
        let (catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let mut camera = CameraInput::default();
        let now = Instant::now();

        drag.pick_down(&a, Some(DVec3::ZERO), &catalog, now).unwrap();
        assert!(camera.attached);
        assert_eq!(drag.pick_up(&mut camera), Some(a));
        assert_eq!(drag.drain_deferred(&mut camera), 0);
        assert!(camera.attached);
    }

    #[test]
    fn test_detach_runs_on_drain() {
        let (catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let mut camera = CameraInput::default();

        drag.pick_down(&a, Some(DVec3::ZERO), &catalog, Instant::now()).unwrap();
        assert_eq!(drag.drain_deferred(&mut camera), 1);
        assert!(!camera.attached);

        drag.pick_up(&mut camera);
        assert!(camera.attached);
        assert!(drag.highlighted().is_none());
        assert!(drag.guides().is_empty());
    }

    #[test]
    fn test_stale_session_expires() {
        let (catalog, a, _) = two_boxes();
        let mut drag = DragController::new();
        let mut camera = CameraInput::default();
        let start = Instant::now();
        let timeout = Duration::from_secs(10);

        drag.pick_down(&a, Some(DVec3::ZERO), &catalog, start).unwrap();
        assert!(drag.expire_stale(start + Duration::from_secs(5), timeout, &mut camera).is_none());
        assert!(drag.is_dragging());
        assert_eq!(
            drag.expire_stale(start + Duration::from_secs(11), timeout, &mut camera),
            Some(a)
        );
        assert!(!drag.is_dragging());
    }
}
