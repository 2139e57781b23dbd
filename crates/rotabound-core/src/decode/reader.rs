//! Image loading with EXIF orientation handling.

use std::io::{Cursor, ErrorKind};
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use log::debug;

use super::{DecodeError, Orientation};
use crate::raster::Raster;

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content. The pixel layout of the file is
/// kept (gray, gray+alpha, RGB or RGBA), narrowed to 8 bits per sample.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    if orientation != Orientation::Normal {
        debug!("applying EXIF orientation {:?}", orientation);
    }
    Ok(Raster::from_dynamic(apply_orientation(img, orientation)))
}

/// Decode an image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Raster, DecodeError> {
    decode_dynamic(bytes).map(Raster::from_dynamic)
}

/// Read and decode an image file, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::FileNotFound` if the path does not exist,
/// `DecodeError::IoError` for other read failures, and the errors of
/// [`decode_image`] otherwise.
pub fn open_image(path: impl AsRef<Path>) -> Result<Raster, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DecodeError::FileNotFound(path.to_path_buf()),
        _ => DecodeError::IoError(e.to_string()),
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_image(&bytes)
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};

    fn two_pixel_image() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png_roundtrip() {
        let raster = Raster::new(3, 2, 4, (0..24).collect()).unwrap();
        let png = encode_png(&raster).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_decode_gray_png_keeps_layout() {
        let raster = Raster::filled(5, 4, &[77]).unwrap();
        let png = encode_png(&raster).unwrap();

        let decoded = decode_image_no_orientation(&png).unwrap();
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.pixels, raster.pixels);
    }

    #[test]
    fn test_decode_jpeg() {
        let raster = Raster::filled(16, 8, &[128, 128, 128]).unwrap();
        let jpeg = encode_jpeg(&raster, 90).unwrap();

        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 8));
        assert_eq!(decoded.channels, 3);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let raster = Raster::filled(8, 8, &[1, 2, 3]).unwrap();
        let png = encode_png(&raster).unwrap();

        let result = decode_image(&png[..png.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_image("/definitely/not/here/apple.jpg");
        assert!(matches!(result, Err(DecodeError::FileNotFound(_))));
    }

    #[test]
    fn test_open_image_from_disk() {
        let raster = Raster::filled(6, 3, &[10, 20, 30]).unwrap();
        let path = std::env::temp_dir().join(format!("rotabound-open-{}.png", std::process::id()));
        std::fs::write(&path, encode_png(&raster).unwrap()).unwrap();

        let result = open_image(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(result.unwrap(), raster);
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let raster = Raster::filled(2, 2, &[0, 0, 0]).unwrap();
        let png = encode_png(&raster).unwrap();
        assert_eq!(get_orientation(&png), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_normal() {
        let result = apply_orientation(two_pixel_image(), Orientation::Normal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_transpose_swaps() {
        for orientation in [Orientation::Transpose, Orientation::Transverse] {
            let result = apply_orientation(two_pixel_image(), orientation);
            assert_eq!((result.width(), result.height()), (1, 2));
        }
    }
}
