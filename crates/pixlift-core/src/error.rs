//! Error types module
//!
//! All job-level failures are unified under the `AppError` enum. The four
//! variants mirror the lifecycle phases a job can fail in: construction-time
//! configuration, pre-flight validation, the transform step and the transfer
//! step. `user_message` is the client-facing rendering; transfer failures are
//! sanitized there while `Display` keeps the full detail for local logs.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Transfer error: {detail}")]
    Transfer { detail: String },
}

impl AppError {
    /// Error type name for structured logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "Configuration",
            AppError::Validation(_) => "Validation",
            AppError::Transform(_) => "Transform",
            AppError::Transfer { .. } => "Transfer",
        }
    }

    /// Client-facing message (may differ from the internal error message).
    ///
    /// Transfer failures carry network/credential/store detail that must stay
    /// in local diagnostics, so they render as a generic message here.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Configuration(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Transform(msg) => msg.clone(),
            AppError::Transfer { .. } => "There was a problem uploading this file".to_string(),
        }
    }

    /// Whether the error is local to one job (true) or fatal to construction.
    pub fn is_job_local(&self) -> bool {
        !matches!(self, AppError::Configuration(_))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Transform(format!("{err:#}"))
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Transform(format!("IO error: {err}"))
    }
}
