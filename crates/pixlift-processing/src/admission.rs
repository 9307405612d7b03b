//! Admission gate - pre-flight file-size check.
//!
//! Evaluated once per job, strictly before geometry planning. A rejection
//! short-circuits the pipeline; the transform executor never runs for a
//! rejected job.

use pixlift_core::error::AppError;
use pixlift_core::models::{FileSize, SizeLimit};

/// Accept or reject a job based on its measured source size.
///
/// The measurement is normalized to megabytes whatever unit the probe
/// reported in; comparison is strict (`measured > max` rejects). The
/// rejection message names the configured ceiling.
pub fn admit(measured: FileSize, limit: SizeLimit) -> Result<(), AppError> {
    match limit {
        SizeLimit::Unlimited => Ok(()),
        SizeLimit::Megabytes(max) => {
            let measured_mb = measured.megabytes();
            if measured_mb > max {
                Err(AppError::Validation(format!(
                    "file size {measured_mb:.1} MB exceeds the configured maximum of {max} MB"
                )))
            } else {
                Ok(())
            }
        }
    }
}
