//! Transform executor - applies a geometry plan to an image file.
//!
//! Fixed operation order: resize, centered crop, EXIF auto-orient, metadata
//! strip, quality on encode, write to destination. Re-encoding drops
//! metadata by itself; when stripping is disabled the JPEG EXIF block is
//! carried over to the output.

use crate::geometry::{AxisTarget, CropRect, TransformPlan};
use crate::orientation;
use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;
use pixlift_core::error::AppError;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Written file plus its actual pixel dimensions.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

pub struct TransformExecutor;

impl TransformExecutor {
    /// Apply `plan` to `source` and write the result to `destination`.
    /// Decode and write failures surface as transform errors; nothing is
    /// retried.
    pub fn execute(
        source: &Path,
        destination: &Path,
        plan: &TransformPlan,
        quality: u8,
        strip_metadata: bool,
    ) -> Result<TransformOutput, AppError> {
        let data = std::fs::read(source)
            .map_err(|e| AppError::Transform(format!("cannot read {}: {e}", source.display())))?;

        let mut img = decode(&data)?;

        if let Some((width, height)) = resolve_resize(plan, img.width(), img.height()) {
            tracing::debug!(width, height, "resizing");
            img = img.resize_exact(width, height, FilterType::Lanczos3);
        }

        if let Some(rect) = plan.crop {
            img = center_crop(img, rect);
        }

        img = orientation::auto_orient(img, orientation::read_orientation(&data));

        let format = output_format(source, destination);
        let mut encoded = encode(&img, format, quality)?;
        if !strip_metadata && format == ImageFormat::Jpeg {
            encoded = carry_exif(&data, encoded);
        }

        std::fs::write(destination, &encoded).map_err(|e| {
            AppError::Transform(format!("cannot write {}: {e}", destination.display()))
        })?;

        tracing::debug!(
            destination = %destination.display(),
            width = img.width(),
            height = img.height(),
            size_bytes = encoded.len(),
            "transform complete"
        );

        Ok(TransformOutput {
            path: destination.to_path_buf(),
            width: img.width(),
            height: img.height(),
        })
    }
}

fn decode(data: &[u8]) -> Result<DynamicImage, AppError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .context("probing image format")?;
    let img = reader.decode().context("decoding source image")?;
    Ok(img)
}

/// Resolve `PreserveAspect` axes against the current image size. Returns
/// `None` when the plan requests no resize at all.
fn resolve_resize(plan: &TransformPlan, current_width: u32, current_height: u32) -> Option<(u32, u32)> {
    match (plan.resize_width, plan.resize_height) {
        (AxisTarget::PreserveAspect, AxisTarget::PreserveAspect) => None,
        (AxisTarget::Exact(width), AxisTarget::Exact(height)) => Some((width, height)),
        (AxisTarget::Exact(width), AxisTarget::PreserveAspect) => {
            let height = (current_height as f64 * width as f64 / current_width as f64).round();
            Some((width, (height as u32).max(1)))
        }
        (AxisTarget::PreserveAspect, AxisTarget::Exact(height)) => {
            let width = (current_width as f64 * height as f64 / current_height as f64).round();
            Some(((width as u32).max(1), height))
        }
    }
}

/// Crop the exact planned rectangle, anchored at centered gravity with the
/// plan's offsets added. Dimensions are clamped so the rectangle never
/// leaves the image.
fn center_crop(img: DynamicImage, rect: CropRect) -> DynamicImage {
    let (current_width, current_height) = (img.width(), img.height());
    let crop_width = rect.width.min(current_width);
    let crop_height = rect.height.min(current_height);
    let x = ((current_width - crop_width) / 2 + rect.x).min(current_width - crop_width);
    let y = ((current_height - crop_height) / 2 + rect.y).min(current_height - crop_height);
    img.crop_imm(x, y, crop_width, crop_height)
}

/// Output format follows the destination extension, then the source
/// extension, then JPEG.
fn output_format(source: &Path, destination: &Path) -> ImageFormat {
    ImageFormat::from_path(destination)
        .or_else(|_| ImageFormat::from_path(source))
        .unwrap_or(ImageFormat::Jpeg)
}

fn encode(img: &DynamicImage, format: ImageFormat, quality: u8) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
            rgb.write_with_encoder(encoder).context("encoding jpeg")?;
        }
        _ => {
            img.write_to(&mut Cursor::new(&mut buffer), format)
                .with_context(|| format!("encoding {format:?}"))?;
        }
    }
    Ok(buffer)
}

/// Copy the source's EXIF block onto the freshly encoded JPEG, best effort.
fn carry_exif(original: &[u8], encoded: Vec<u8>) -> Vec<u8> {
    let exif = match Jpeg::from_bytes(original.to_vec().into()) {
        Ok(jpeg) => jpeg.exif(),
        Err(_) => None,
    };
    let Some(exif) = exif else {
        return encoded;
    };
    match Jpeg::from_bytes(encoded.clone().into()) {
        Ok(mut jpeg) => {
            jpeg.set_exif(Some(exif));
            jpeg.encoder().bytes().to_vec()
        }
        Err(_) => encoded,
    }
}
