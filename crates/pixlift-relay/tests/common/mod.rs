//! Shared test doubles for the relay integration suites.
#![allow(dead_code)]

use async_trait::async_trait;
use pixlift_core::config::{AwsConfig, UploaderConfig};
use pixlift_relay::StatusSink;
use pixlift_storage::{ProgressFn, TransferClient, TransferError, TransferResult, UploadRequest};
use std::sync::{Arc, Mutex};

/// Transfer backend that records every request and optionally fails.
#[derive(Default)]
pub struct MockTransferClient {
    pub requests: Mutex<Vec<UploadRequest>>,
    pub deleted: Mutex<Vec<(String, Vec<String>)>>,
    pub fail_with: Option<String>,
    /// Number of progress callbacks to emit per upload.
    pub progress_steps: u64,
    pub total_bytes: u64,
}

impl MockTransferClient {
    pub fn succeeding() -> Self {
        Self {
            progress_steps: 4,
            total_bytes: 4096,
            ..Default::default()
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            fail_with: Some(detail.to_string()),
            ..Default::default()
        }
    }

    pub fn recorded_requests(&self) -> Vec<UploadRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransferClient for MockTransferClient {
    async fn upload_file(
        &self,
        request: UploadRequest,
        progress: Option<Arc<ProgressFn>>,
    ) -> TransferResult<()> {
        self.requests.lock().unwrap().push(request);
        if let Some(ref detail) = self.fail_with {
            return Err(TransferError::UploadFailed(detail.clone()));
        }
        if let Some(callback) = progress {
            for step in 1..=self.progress_steps {
                callback(self.total_bytes * step / self.progress_steps, self.total_bytes);
            }
        }
        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> TransferResult<()> {
        self.deleted
            .lock()
            .unwrap()
            .push((bucket.to_string(), keys.to_vec()));
        Ok(())
    }
}

/// Observer that keeps every serialized event it receives.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn received(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn send(&self, payload: &str) {
        self.events.lock().unwrap().push(payload.to_string());
    }
}

pub fn test_config() -> UploaderConfig {
    UploaderConfig::new(AwsConfig::new("AKIATEST", "secret"))
}
