//! Transfer abstraction trait
//!
//! All transfer backends the relay service can push files through implement
//! `TransferClient`. The trait keeps the relay decoupled from any concrete
//! store and gives tests an injection seam.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Transfer operation errors
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Transfer backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;

/// Byte-level progress callback: `(bytes_so_far, bytes_total)`.
pub type ProgressFn = dyn Fn(u64, u64) + Send + Sync;

/// One upload: a local file bound for a bucket/key, with the canned ACL and
/// any store-specific parameters already resolved by the caller.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub local_path: PathBuf,
    pub bucket: String,
    pub key: String,
    pub acl: String,
    pub extra_params: HashMap<String, String>,
}

#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Stream a local file to the remote location, reporting cumulative
    /// progress through the callback when one is supplied.
    async fn upload_file(
        &self,
        request: UploadRequest,
        progress: Option<Arc<ProgressFn>>,
    ) -> TransferResult<()>;

    /// Delete the given keys from a bucket. Stops at the first failure.
    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> TransferResult<()>;
}
