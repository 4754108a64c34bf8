//! Owned handle for a spawned periodic task

use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Handle to a spawned background loop.
///
/// `cancel` takes the handle by value, so a loop is cancelled at most once.
/// Dropping a handle that was never cancelled still aborts the loop, but logs a
/// warning because every owner is expected to cancel explicitly.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    task: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub(crate) fn new(name: &'static str, task: JoinHandle<()>) -> Self {
        Self {
            name,
            task: Some(task),
        }
    }

    /// Name given to the loop when it was spawned
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop the loop
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            trace!("Cancelling {} task", self.name);
            task.abort();
        }
    }

    /// Whether the underlying task has already exited
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            warn!("{} task handle dropped without cancel, aborting", self.name);
            task.abort();
        }
    }
}
