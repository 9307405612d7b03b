//! Job specifications supplied by the caller.

use crate::error::AppError;
use crate::models::size::SizeLimit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Natural width/height of an image, as measured by the dimension probe.
/// Immutable once measured; callers carry `Option<ImageDimensions>` when the
/// measurement is skipped or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// One resize job. `None` target dimensions mean "derive from aspect ratio".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeSpec {
    pub file_id: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(default)]
    pub target_width: Option<u32>,
    #[serde(default)]
    pub target_height: Option<u32>,
    #[serde(default)]
    pub square: bool,
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default = "default_strip_metadata")]
    pub strip_metadata: bool,
    #[serde(default)]
    pub max_size: SizeLimit,
}

fn default_quality() -> u8 {
    90
}

fn default_strip_metadata() -> bool {
    true
}

impl ResizeSpec {
    pub fn new(
        file_id: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            source: source.into(),
            destination: destination.into(),
            target_width: None,
            target_height: None,
            square: false,
            quality: default_quality(),
            strip_metadata: default_strip_metadata(),
            max_size: SizeLimit::default(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.file_id.is_empty() {
            return Err(AppError::Validation("fileId is required".to_string()));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(AppError::Validation(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        if let Some(0) = self.target_width {
            return Err(AppError::Validation("targetWidth must be positive".to_string()));
        }
        if let Some(0) = self.target_height {
            return Err(AppError::Validation("targetHeight must be positive".to_string()));
        }
        if let SizeLimit::Megabytes(max) = self.max_size {
            if max <= 0.0 {
                return Err(AppError::Validation(format!(
                    "maxSizeMB must be positive, got {max}"
                )));
            }
        }
        Ok(())
    }
}

/// One transfer job: push a local file to a remote object-store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSpec {
    pub file_id: String,
    pub bucket: String,
    pub source: PathBuf,
    pub remote_key: String,
    /// Canned ACL override; falls back to the configured default, then
    /// public-read.
    #[serde(default)]
    pub acl: Option<String>,
    /// Store-specific parameters merged over configured defaults; caller
    /// keys win on conflict.
    #[serde(default)]
    pub extra_params: HashMap<String, String>,
}

impl TransferSpec {
    pub fn new(
        file_id: impl Into<String>,
        bucket: impl Into<String>,
        source: impl Into<PathBuf>,
        remote_key: impl Into<String>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            bucket: bucket.into(),
            source: source.into(),
            remote_key: remote_key.into(),
            acl: None,
            extra_params: HashMap::new(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.file_id.is_empty() {
            return Err(AppError::Validation("fileId is required".to_string()));
        }
        if self.bucket.is_empty() {
            return Err(AppError::Validation("bucketName is required".to_string()));
        }
        if self.remote_key.is_empty() {
            return Err(AppError::Validation("remoteKey is required".to_string()));
        }
        Ok(())
    }
}
