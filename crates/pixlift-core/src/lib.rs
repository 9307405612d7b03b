//! Core types for the pixlift pipeline.
//!
//! This crate holds the data model shared by the processing, storage and
//! relay crates: job specifications, status events, typed file sizes, the
//! error taxonomy and service configuration. It performs no I/O.

pub mod config;
pub mod error;
pub mod models;

pub use config::{AwsConfig, UploaderConfig};
pub use error::AppError;
pub use models::{
    FileSize, ImageDimensions, ParseSizeError, ResizeSpec, ResultPayload, SizeLimit, SizeUnit,
    StatusEvent, TransferSpec,
};
