//! Object-store transfer layer.
//!
//! Defines the `TransferClient` abstraction the relay service uploads
//! through, plus the S3 implementation backed by `object_store`. Transfer
//! mechanics (multipart, retries, bucket ACL semantics) belong to the
//! backing store; this layer surfaces byte-level progress and maps failures
//! into `TransferError`.

pub mod s3;
pub mod traits;

pub use s3::S3TransferClient;
pub use traits::{ProgressFn, TransferClient, TransferError, TransferResult, UploadRequest};
