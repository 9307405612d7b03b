//! S3 transfer client backed by `object_store`.

use crate::traits::{ProgressFn, TransferClient, TransferError, TransferResult, UploadRequest};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use pixlift_core::config::AwsConfig;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::io::AsyncReadExt;

const READ_CHUNK_BYTES: usize = 64 * 1024;

/// S3 (and S3-compatible) transfer client.
///
/// Jobs name their bucket per request, so stores are built lazily per bucket
/// and cached. Credentials are fixed at construction.
pub struct S3TransferClient {
    access_key_id: String,
    secret_access_key: String,
    region: String,
    endpoint: Option<String>,
    stores: RwLock<HashMap<String, Arc<AmazonS3>>>,
}

impl S3TransferClient {
    pub fn new(config: &AwsConfig) -> TransferResult<Self> {
        if config.access_key_id.is_empty() || config.secret_access_key.is_empty() {
            return Err(TransferError::ConfigError(
                "S3 credentials are required".to_string(),
            ));
        }
        Ok(Self {
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            region: config
                .region
                .clone()
                .unwrap_or_else(|| "us-east-1".to_string()),
            endpoint: config.endpoint.clone(),
            stores: RwLock::new(HashMap::new()),
        })
    }

    fn store_for(&self, bucket: &str) -> TransferResult<Arc<AmazonS3>> {
        {
            let stores = match self.stores.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(store) = stores.get(bucket) {
                return Ok(store.clone());
            }
        }

        let mut builder = AmazonS3Builder::new()
            .with_access_key_id(self.access_key_id.clone())
            .with_secret_access_key(self.secret_access_key.clone())
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = Arc::new(
            builder
                .build()
                .map_err(|e| TransferError::ConfigError(e.to_string()))?,
        );

        let mut stores = match self.stores.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(stores
            .entry(bucket.to_string())
            .or_insert(store)
            .clone())
    }
}

/// Map store parameters onto typed attributes where a typed one exists; the
/// remainder, including the canned ACL, travels as metadata.
fn build_attributes(request: &UploadRequest) -> Attributes {
    let mut attributes = Attributes::new();
    for (key, value) in &request.extra_params {
        let attribute = match key.to_lowercase().as_str() {
            "content-type" => Attribute::ContentType,
            "cache-control" => Attribute::CacheControl,
            "content-disposition" => Attribute::ContentDisposition,
            "content-encoding" => Attribute::ContentEncoding,
            "content-language" => Attribute::ContentLanguage,
            _ => Attribute::Metadata(Cow::Owned(key.clone())),
        };
        attributes.insert(attribute, value.clone().into());
    }
    attributes.insert(
        Attribute::Metadata(Cow::Borrowed("acl")),
        request.acl.clone().into(),
    );
    attributes
}

#[async_trait]
impl TransferClient for S3TransferClient {
    async fn upload_file(
        &self,
        request: UploadRequest,
        progress: Option<Arc<ProgressFn>>,
    ) -> TransferResult<()> {
        let store = self.store_for(&request.bucket)?;
        let start = std::time::Instant::now();

        let total = tokio::fs::metadata(&request.local_path).await?.len();
        let mut file = tokio::fs::File::open(&request.local_path).await?;

        // Read in chunks so progress is reported as the file is consumed.
        let mut buffer = Vec::with_capacity(total as usize);
        let mut chunk = vec![0u8; READ_CHUNK_BYTES];
        let mut read_so_far: u64 = 0;
        loop {
            let n = file.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
            read_so_far += n as u64;
            if let Some(ref callback) = progress {
                callback(read_so_far, total);
            }
        }

        let location = Path::from(request.key.clone());
        let options = PutOptions {
            attributes: build_attributes(&request),
            ..Default::default()
        };

        let result: ObjectResult<_> = store
            .put_opts(&location, PutPayload::from(Bytes::from(buffer)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %request.bucket,
                key = %request.key,
                size_bytes = total,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            TransferError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %request.bucket,
            key = %request.key,
            acl = %request.acl,
            size_bytes = total,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> TransferResult<()> {
        let store = self.store_for(bucket)?;
        let start = std::time::Instant::now();

        for key in keys {
            let location = Path::from(key.clone());
            let result: ObjectResult<_> = store.delete(&location).await;
            result.map_err(|e| match e {
                ObjectStoreError::NotFound { .. } => TransferError::NotFound(key.clone()),
                other => {
                    tracing::error!(
                        error = %other,
                        bucket = %bucket,
                        key = %key,
                        "S3 delete failed"
                    );
                    TransferError::DeleteFailed(other.to_string())
                }
            })?;
        }

        tracing::info!(
            bucket = %bucket,
            count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }
}
