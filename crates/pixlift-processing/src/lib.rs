//! Image-side half of the pixlift pipeline.
//!
//! Pure decision logic (geometry planning, size admission) plus the
//! executors that delegate to the image engine: the dimension prober, the
//! transform executor and the content-type validator. Nothing in this crate
//! talks to the object store.

pub mod admission;
pub mod geometry;
pub mod orientation;
pub mod probe;
pub mod transform;
pub mod validator;

pub use admission::admit;
pub use geometry::{plan, AxisTarget, CropRect, TransformPlan};
pub use probe::MediaProbe;
pub use transform::{TransformExecutor, TransformOutput};
pub use validator::{validate_content_type, FileMetadata};
