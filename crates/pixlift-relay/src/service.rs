//! Caller-facing service tying the pipeline together.
//!
//! `Uploader` owns the transfer client, the optional status channel and the
//! configured defaults. Each operation creates a `Job` keyed by the caller's
//! file id, runs the pipeline, and reports the outcome both on the channel
//! and through the returned `Result`.

use crate::channel::StatusChannel;
use crate::job::Job;
use pixlift_core::config::UploaderConfig;
use pixlift_core::error::AppError;
use pixlift_core::models::{ResizeSpec, ResultPayload, SizeLimit, StatusEvent, TransferSpec};
use pixlift_processing::{admit, geometry, validator, MediaProbe, TransformExecutor};
use pixlift_storage::{ProgressFn, S3TransferClient, TransferClient, UploadRequest};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_ACL: &str = "public-read";

pub struct Uploader {
    transfer: Arc<dyn TransferClient>,
    channel: Option<Arc<StatusChannel>>,
    config: UploaderConfig,
}

impl Uploader {
    /// Build the service with the default S3 transfer client. Fails fast on
    /// incomplete configuration.
    pub fn new(config: UploaderConfig) -> Result<Self, AppError> {
        config.validate()?;
        let transfer = S3TransferClient::new(&config.aws)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        Ok(Self::with_transfer_client(config, Arc::new(transfer)))
    }

    /// Build the service around an arbitrary transfer backend.
    pub fn with_transfer_client(config: UploaderConfig, transfer: Arc<dyn TransferClient>) -> Self {
        let channel = config
            .realtime_enabled
            .then(|| Arc::new(StatusChannel::new()));
        Self {
            transfer,
            channel,
            config,
        }
    }

    /// Channel observers attach here. `None` when realtime is disabled.
    pub fn status_channel(&self) -> Option<Arc<StatusChannel>> {
        self.channel.clone()
    }

    /// Run one resize job: admission gate, geometry planning, then the
    /// transform on a blocking worker. Returns the destination path.
    pub async fn resize(&self, spec: ResizeSpec) -> Result<PathBuf, AppError> {
        let job = Job::new(spec.file_id.clone(), self.channel.clone());
        match self.run_resize(&spec).await {
            Ok(output) => {
                // The reported size is the requested box; an aspect-derived
                // axis falls back to what the transform actually produced.
                let width = spec.target_width.unwrap_or(output.width);
                let height = spec.target_height.unwrap_or(output.height);
                job.succeed(ResultPayload::Resized { width, height });
                Ok(output.path)
            }
            Err(err) => {
                tracing::error!(
                    file_id = %spec.file_id,
                    error = %err,
                    error_type = err.error_type(),
                    "resize job failed"
                );
                job.fail(&err.user_message());
                Err(err)
            }
        }
    }

    async fn run_resize(
        &self,
        spec: &ResizeSpec,
    ) -> Result<pixlift_processing::TransformOutput, AppError> {
        spec.validate()?;

        // Size admission happens before any pixel work.
        if spec.max_size != SizeLimit::Unlimited {
            let measured = MediaProbe::file_size(&spec.source)?;
            admit(measured, spec.max_size)?;
        }

        let natural = match MediaProbe::dimensions(&spec.source) {
            Ok(dims) => Some(dims),
            Err(e) => {
                tracing::warn!(
                    file_id = %spec.file_id,
                    error = %e,
                    "dimension probe failed, planning without natural size"
                );
                None
            }
        };

        let plan = geometry::plan(natural, spec);
        tracing::debug!(file_id = %spec.file_id, ?plan, "geometry planned");

        let source = spec.source.clone();
        let destination = spec.destination.clone();
        let quality = spec.quality;
        let strip_metadata = spec.strip_metadata;
        tokio::task::spawn_blocking(move || {
            TransformExecutor::execute(&source, &destination, &plan, quality, strip_metadata)
        })
        .await
        .map_err(|e| AppError::Transform(format!("transform task failed: {e}")))?
    }

    /// Run one transfer job: push the local file to the object store with
    /// byte-level progress on the channel. Returns the logical remote path
    /// (`/{bucket}/{key}`).
    pub async fn upload(&self, spec: TransferSpec) -> Result<String, AppError> {
        let job = Arc::new(Job::new(spec.file_id.clone(), self.channel.clone()));
        if let Err(err) = spec.validate() {
            job.fail(&err.user_message());
            return Err(err);
        }

        // Configured defaults first, then per-job parameters on top.
        let mut extra_params: HashMap<String, String> = self.config.upload_params.clone();
        extra_params.extend(spec.extra_params.clone());

        let acl = spec
            .acl
            .clone()
            .or_else(|| self.config.aws.acl.clone())
            .unwrap_or_else(|| DEFAULT_ACL.to_string());

        let request = UploadRequest {
            local_path: spec.source.clone(),
            bucket: spec.bucket.clone(),
            key: spec.remote_key.clone(),
            acl,
            extra_params,
        };

        let progress_job = job.clone();
        let progress: Arc<ProgressFn> = Arc::new(move |amount, total| {
            progress_job.progress(amount, total);
        });

        match self.transfer.upload_file(request, Some(progress)).await {
            Ok(()) => {
                let path = format!("/{}/{}", spec.bucket, spec.remote_key);
                job.succeed(ResultPayload::Uploaded { path: path.clone() });
                Ok(path)
            }
            Err(e) => {
                tracing::error!(
                    file_id = %spec.file_id,
                    bucket = %spec.bucket,
                    key = %spec.remote_key,
                    error = %e,
                    "upload job failed"
                );
                let err = AppError::Transfer {
                    detail: e.to_string(),
                };
                // Only the sanitized message reaches the channel.
                job.fail(&err.user_message());
                Err(err)
            }
        }
    }

    /// Check an incoming file's content type against an allow-list. On
    /// rejection the error event is published and `false` is returned.
    pub fn validate_file_type(
        &self,
        metadata: &validator::FileMetadata,
        file_id: &str,
        allowed: &HashSet<String>,
    ) -> bool {
        match validator::validate_content_type(metadata, allowed) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(file_id, error = %e, "file type rejected");
                if let Some(ref channel) = self.channel {
                    channel.publish(&StatusEvent::error(file_id, e.user_message()));
                }
                false
            }
        }
    }

    /// Remove objects from a bucket.
    pub async fn delete(&self, bucket: &str, keys: &[String]) -> Result<(), AppError> {
        self.transfer
            .delete_objects(bucket, keys)
            .await
            .map_err(|e| {
                tracing::error!(bucket, error = %e, "delete failed");
                AppError::Transfer {
                    detail: e.to_string(),
                }
            })
    }
}
