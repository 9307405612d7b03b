//! Job correlation.
//!
//! A `Job` pairs a caller-supplied id with the status channel and enforces
//! the event lifecycle: any number of progress events followed by exactly
//! one terminal event (result or error). Whichever terminal arrives first
//! wins; everything after it is dropped.

use crate::channel::StatusChannel;
use pixlift_core::models::{ResultPayload, StatusEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Job {
    id: String,
    channel: Option<Arc<StatusChannel>>,
    finished: AtomicBool,
}

impl Job {
    pub fn new(id: impl Into<String>, channel: Option<Arc<StatusChannel>>) -> Self {
        Self {
            id: id.into(),
            channel,
            finished: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Publish a progress event. Ignored once the job has finished.
    pub fn progress(&self, amount: u64, total: u64) {
        if self.finished.load(Ordering::SeqCst) {
            return;
        }
        self.publish(StatusEvent::progress(&self.id, amount, total));
    }

    /// Publish the terminal success event. Only the first terminal call
    /// (success or failure) takes effect.
    pub fn succeed(&self, payload: ResultPayload) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        self.publish(StatusEvent::Result {
            id: self.id.clone(),
            payload,
        });
    }

    /// Publish the terminal error event. Only the first terminal call
    /// (success or failure) takes effect.
    pub fn fail(&self, message: &str) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        self.publish(StatusEvent::error(&self.id, message));
    }

    fn publish(&self, event: StatusEvent) {
        if let Some(ref channel) = self.channel {
            channel.publish(&event);
        }
    }
}
