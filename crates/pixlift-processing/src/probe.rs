//! Dimension prober - measures natural size and file size of a source image.
//!
//! Pure reads, no mutation. A failed dimension probe is not fatal to the
//! pipeline: callers plan without natural dimensions.

use image::ImageReader;
use pixlift_core::error::AppError;
use pixlift_core::models::{FileSize, ImageDimensions};
use std::path::Path;

pub struct MediaProbe;

impl MediaProbe {
    /// Read the image header and return its natural dimensions. The pixel
    /// data is not decoded.
    pub fn dimensions(path: &Path) -> Result<ImageDimensions, AppError> {
        let reader = ImageReader::open(path)
            .map_err(|e| AppError::Transform(format!("cannot open {}: {e}", path.display())))?
            .with_guessed_format()
            .map_err(|e| AppError::Transform(format!("cannot probe {}: {e}", path.display())))?;
        let (width, height) = reader.into_dimensions().map_err(|e| {
            AppError::Transform(format!("cannot read dimensions of {}: {e}", path.display()))
        })?;
        Ok(ImageDimensions::new(width, height))
    }

    /// Measure the file size of the source. Used solely by the admission
    /// gate.
    pub fn file_size(path: &Path) -> Result<FileSize, AppError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            AppError::Validation(format!("cannot stat source file {}: {e}", path.display()))
        })?;
        Ok(FileSize::from_bytes(metadata.len()))
    }
}
