//! EXIF orientation normalization.

use image::DynamicImage;
use std::io::Cursor;

/// Read the EXIF orientation tag (1-8) from raw image bytes. Returns 1
/// (normal) when the image carries no EXIF block or no orientation field.
pub fn read_orientation(data: &[u8]) -> u8 {
    let mut cursor = Cursor::new(data);
    match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(parsed) => parsed
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(|value| value as u8)
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Apply the rotation/flip needed to normalize a given EXIF orientation.
/// Unknown values are treated as normal.
pub fn auto_orient(img: DynamicImage, orientation: u8) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate270().fliph(),
        6 => img.rotate90(),
        7 => img.rotate90().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
