//! Pointer interaction: the drag state machine and deferred tasks

pub mod deferred;
pub mod drag;

pub use deferred::{DeferredQueue, DeferredTask};
pub use drag::{DragController, DragEnd, DragError, DragSession};

/// Whether the view's camera reacts to pointer input.
///
/// Owned by the host view; changed only by drained deferred tasks and by the
/// attach at drag end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraInput {
    pub attached: bool,
}

impl Default for CameraInput {
    fn default() -> Self {
        Self { attached: true }
    }
}

impl CameraInput {
    /// Apply a drained task
    pub fn apply(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::DetachCamera => {
                tracing::debug!("camera input detached");
                self.attached = false;
            }
        }
    }
}
