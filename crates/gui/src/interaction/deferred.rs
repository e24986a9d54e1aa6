//! One-shot tasks run after the current event has been dispatched

/// Work scheduled from inside an event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Stop the camera from reacting to pointer input
    DetachCamera,
}

/// FIFO of pending one-shot tasks, drained by the host at the start of the
/// next frame.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<DeferredTask>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task; a task already pending is not queued twice
    pub fn schedule(&mut self, task: DeferredTask) {
        if !self.pending.contains(&task) {
            self.pending.push(task);
        }
    }

    /// Remove a task that has not run yet. Returns whether it was pending.
    pub fn cancel(&mut self, task: DeferredTask) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| *t != task);
        self.pending.len() != before
    }

    pub fn is_pending(&self, task: DeferredTask) -> bool {
        self.pending.contains(&task)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending task in scheduling order
    pub fn drain(&mut self) -> Vec<DeferredTask> {
        std::mem::take(&mut self.pending)
    }
}
