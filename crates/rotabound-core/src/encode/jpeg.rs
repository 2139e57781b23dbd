//! JPEG encoding for export.
//!
//! JPEG has no alpha channel: gray+alpha rasters are written as gray and
//! RGBA rasters as RGB, with alpha discarded.

use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::types::validate;
use super::EncodeError;
use crate::raster::Raster;

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Raster to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let (pixels, color) = match image.channels {
        1 => (Cow::Borrowed(image.pixels.as_slice()), ExtendedColorType::L8),
        3 => (Cow::Borrowed(image.pixels.as_slice()), ExtendedColorType::Rgb8),
        2 => (Cow::Owned(strip_alpha(image)), ExtendedColorType::L8),
        _ => (Cow::Owned(strip_alpha(image)), ExtendedColorType::Rgb8),
    };

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&pixels, image.width, image.height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Copy of the pixel data without the trailing alpha sample.
fn strip_alpha(image: &Raster) -> Vec<u8> {
    let ch = image.channels as usize;
    image
        .pixels
        .chunks_exact(ch)
        .flat_map(|p| p[..ch - 1].iter().copied())
        .collect()
}
