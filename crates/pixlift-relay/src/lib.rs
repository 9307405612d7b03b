//! Relay layer: job correlation, the single-slot status channel, and the
//! caller-facing `Uploader` service tying the transform and transfer halves
//! of the pipeline together.

pub mod channel;
pub mod job;
pub mod service;

pub use channel::{StatusChannel, StatusSink};
pub use job::Job;
pub use service::Uploader;
