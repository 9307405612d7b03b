//! Status channel - single-slot, best-effort broadcast of lifecycle events.
//!
//! At most one observer is attached at a time. Attaching while an observer
//! exists replaces it (last writer wins); publishing with no observer is a
//! silent no-op. Events are never queued, never retried, and a slow or
//! absent observer never blocks a job.

use pixlift_core::models::StatusEvent;
use std::sync::{Arc, RwLock};

/// A live observer connection. `send` is fire-and-forget: implementations
/// log their own failures and never surface them to the publisher.
pub trait StatusSink: Send + Sync {
    fn send(&self, payload: &str);
}

#[derive(Default)]
pub struct StatusChannel {
    observer: RwLock<Option<Arc<dyn StatusSink>>>,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer, replacing any prior one. The replaced observer
    /// receives no further events.
    pub fn attach(&self, sink: Arc<dyn StatusSink>) {
        let mut slot = match self.observer.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(sink);
    }

    /// Drop the current observer, reverting sends to no-ops.
    pub fn detach(&self) {
        let mut slot = match self.observer.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = None;
    }

    pub fn is_attached(&self) -> bool {
        let slot = match self.observer.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.is_some()
    }

    /// Serialize and send an event to the current observer, if any.
    pub fn publish(&self, event: &StatusEvent) {
        let sink = {
            let slot = match self.observer.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            slot.clone()
        };
        let Some(sink) = sink else {
            return;
        };
        match serde_json::to_string(event) {
            Ok(payload) => sink.send(&payload),
            Err(e) => {
                tracing::warn!(error = %e, job_id = %event.job_id(), "failed to serialize status event");
            }
        }
    }
}
