//! Data model for pixlift jobs and their lifecycle events.

pub mod event;
pub mod size;
pub mod spec;

pub use event::{ResultPayload, StatusEvent};
pub use size::{FileSize, ParseSizeError, SizeLimit, SizeUnit};
pub use spec::{ImageDimensions, ResizeSpec, TransferSpec};
