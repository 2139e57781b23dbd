//! Lossless PNG encoding.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use super::types::{color_type, validate};
use super::EncodeError;
use crate::raster::Raster;

/// Encode a raster to PNG bytes.
///
/// All supported layouts (gray, gray+alpha, RGB, RGBA) are written as-is.
pub fn encode_png(image: &Raster) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            color_type(image.channels),
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
