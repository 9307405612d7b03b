//! Configuration module
//!
//! Service configuration is explicit at construction time: object-store
//! credentials are required, the realtime status channel is opt-in, and a
//! default ACL plus default upload parameters can be supplied for all jobs.
//! `from_env` offers the conventional environment-based loading path.

use crate::error::AppError;
use std::collections::HashMap;
use std::env;

/// Object-store credentials and connection settings.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// AWS region; the storage layer falls back to us-east-1 when absent.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, ...).
    pub endpoint: Option<String>,
    /// Default canned ACL applied when a job does not override it.
    pub acl: Option<String>,
}

impl AwsConfig {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: None,
            endpoint: None,
            acl: None,
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub aws: AwsConfig,
    /// When false the status channel is never created and all event sends
    /// are no-ops.
    pub realtime_enabled: bool,
    /// Store-specific parameters applied to every upload; per-job
    /// `extra_params` override these key by key.
    pub upload_params: HashMap<String, String>,
}

impl UploaderConfig {
    pub fn new(aws: AwsConfig) -> Self {
        Self {
            aws,
            realtime_enabled: true,
            upload_params: HashMap::new(),
        }
    }

    /// Load configuration from the environment (a `.env` file is honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let aws = AwsConfig {
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            region: env::var("AWS_REGION").ok().filter(|v| !v.is_empty()),
            endpoint: env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
            acl: env::var("S3_DEFAULT_ACL").ok().filter(|v| !v.is_empty()),
        };

        let realtime_enabled = env::var("REALTIME_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        let config = Self {
            aws,
            realtime_enabled,
            upload_params: HashMap::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Fatal construction-time check; no job is ever created from an invalid
    /// configuration.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.aws.access_key_id.is_empty() {
            return Err(AppError::Configuration(
                "\"aws.access_key_id\" is not defined".to_string(),
            ));
        }
        if self.aws.secret_access_key.is_empty() {
            return Err(AppError::Configuration(
                "\"aws.secret_access_key\" is not defined".to_string(),
            ));
        }
        Ok(())
    }
}
