//! Resampling a raster to an exact size.
//!
//! [`FilterType::Area`] is implemented here and is the default: it averages
//! the source pixels under each output pixel, which avoids aliasing and
//! moiré when shrinking (the usual case after a bounding-box rotation).
//! The other filters are delegated to `image::imageops`.
//!
//! Sizes are passed as `(height, width)`, the order of a raster's
//! [`shape`](crate::raster::Raster::shape).

mod area;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult};
use crate::raster::Raster;

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Area averaging when shrinking, linear when enlarging.
    #[default]
    Area,
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    ///
    /// `Area` has no counterpart and returns `None`.
    pub fn to_image_filter(self) -> Option<image::imageops::FilterType> {
        match self {
            FilterType::Area => None,
            FilterType::Nearest => Some(image::imageops::FilterType::Nearest),
            FilterType::Bilinear => Some(image::imageops::FilterType::Triangle),
            FilterType::Lanczos3 => Some(image::imageops::FilterType::Lanczos3),
        }
    }
}

/// Resize an image to exact dimensions using area interpolation.
///
/// # Arguments
///
/// * `source` - The source image to resize
/// * `target_height` - Target height in pixels
/// * `target_width` - Target width in pixels
///
/// # Errors
///
/// * [`TransformError::InvalidTargetSize`] if either target dimension is 0
/// * [`TransformError::EmptyRaster`] if the source has no pixels
pub fn resize(source: &Raster, target_height: u32, target_width: u32) -> TransformResult<Raster> {
    resize_with(source, target_height, target_width, FilterType::Area)
}

/// Resize an image to exact dimensions with the given filter.
///
/// Returns a new raster; the source is not modified.
pub fn resize_with(
    source: &Raster,
    target_height: u32,
    target_width: u32,
    filter: FilterType,
) -> TransformResult<Raster> {
    if target_width == 0 || target_height == 0 {
        return Err(TransformError::InvalidTargetSize {
            width: target_width,
            height: target_height,
        });
    }
    source.ensure_valid()?;

    // Fast path: if dimensions match, just clone
    if source.width == target_width && source.height == target_height {
        return Ok(source.clone());
    }

    debug!(
        "resizing {}x{} to {}x{} with {:?}",
        source.width, source.height, target_width, target_height, filter
    );

    match filter.to_image_filter() {
        None => Ok(area::resize_area(source, target_width, target_height)),
        Some(image_filter) => {
            let dynamic = source.to_dynamic().ok_or(TransformError::InvalidPixelData {
                expected: source.pixel_count() * source.channels as usize,
                actual: source.pixels.len(),
            })?;
            let resized = dynamic.resize_exact(target_width, target_height, image_filter);
            Ok(Raster::from_dynamic(resized))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> Raster {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        Raster::new(width, height, 3, pixels).unwrap()
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 25, 50).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 100).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_upscale() {
        let img = create_test_image(50, 25);
        let resized = resize(&img, 50, 100).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_mixed_axes() {
        // Wider but shorter
        let img = create_test_image(40, 40);
        let resized = resize(&img, 10, 90).unwrap();
        assert_eq!((resized.width, resized.height), (90, 10));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert_eq!(
            resize(&img, 0, 50),
            Err(TransformError::InvalidTargetSize {
                width: 50,
                height: 0
            })
        );
        assert_eq!(
            resize(&img, 50, 0),
            Err(TransformError::InvalidTargetSize {
                width: 0,
                height: 50
            })
        );
    }

    #[test]
    fn test_resize_empty_source_error() {
        let img = Raster::new(0, 0, 3, vec![]).unwrap();
        assert!(matches!(
            resize(&img, 10, 10),
            Err(TransformError::EmptyRaster { .. })
        ));
    }

    #[test]
    fn test_area_downscale_averages() {
        // Left half black, right half white; 2x downscale keeps the edge sharp
        let mut pixels = Vec::new();
        for _ in 0..4 {
            pixels.extend_from_slice(&[0, 0, 255, 255]);
        }
        let img = Raster::new(4, 4, 1, pixels).unwrap();
        let resized = resize(&img, 2, 2).unwrap();
        assert_eq!(resized.pixels, vec![0, 255, 0, 255]);
    }

    #[test]
    fn test_area_downscale_checkerboard_is_gray() {
        let pixels = (0..8 * 8)
            .map(|i| if (i % 8 + i / 8) % 2 == 0 { 0 } else { 255 })
            .collect();
        let img = Raster::new(8, 8, 1, pixels).unwrap();
        let resized = resize(&img, 4, 4).unwrap();
        // 127.5 rounds up
        assert!(resized.pixels.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Area,
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize_with(&img, 25, 50, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
            assert_eq!(resized.channels, 3);
        }
    }

    #[test]
    fn test_image_filters_keep_layout() {
        let img = Raster::filled(30, 20, &[10, 200]).unwrap();
        let resized = resize_with(&img, 7, 11, FilterType::Bilinear).unwrap();
        assert_eq!(resized.channels, 2);
        assert_eq!(resized.pixels.len(), 7 * 11 * 2);
    }

    #[test]
    fn test_filter_type_conversion() {
        assert!(FilterType::Area.to_image_filter().is_none());
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            Some(image::imageops::FilterType::Nearest)
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            Some(image::imageops::FilterType::Triangle)
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            Some(image::imageops::FilterType::Lanczos3)
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output always has exactly the requested size.
        #[test]
        fn prop_exact_output_size(
            (src_w, src_h) in (1u32..=40, 1u32..=40),
            (dst_w, dst_h) in (1u32..=40, 1u32..=40),
            channels in 1u8..=4,
        ) {
            let img = Raster::filled(src_w, src_h, &vec![9u8; channels as usize]).unwrap();
            let resized = resize(&img, dst_h, dst_w).unwrap();
            prop_assert_eq!((resized.width, resized.height), (dst_w, dst_h));
            prop_assert_eq!(resized.pixels.len(), (dst_w * dst_h) as usize * channels as usize);
        }

        /// Property: area output stays within the source value range.
        #[test]
        fn prop_area_within_source_range(
            (src_w, src_h) in (1u32..=20, 1u32..=20),
            (dst_w, dst_h) in (1u32..=20, 1u32..=20),
            seed in any::<u8>(),
        ) {
            let pixels: Vec<u8> = (0..src_w * src_h)
                .map(|i| ((i as u64 * 37 + seed as u64) % 200 + 20) as u8)
                .collect();
            let min = *pixels.iter().min().unwrap();
            let max = *pixels.iter().max().unwrap();
            let img = Raster::new(src_w, src_h, 1, pixels).unwrap();

            let resized = resize(&img, dst_h, dst_w).unwrap();
            prop_assert!(resized.pixels.iter().all(|&v| v >= min && v <= max));
        }

        /// Property: zero targets are always rejected.
        #[test]
        fn prop_zero_target_rejected(
            (src_w, src_h) in (1u32..=20, 1u32..=20),
            other in 1u32..=50,
        ) {
            let img = Raster::filled(src_w, src_h, &[0, 0, 0]).unwrap();
            let zero_h = resize(&img, 0, other);
            let zero_w = resize(&img, other, 0);
            prop_assert!(
                matches!(zero_h, Err(TransformError::InvalidTargetSize { .. })),
                "zero height should fail"
            );
            prop_assert!(
                matches!(zero_w, Err(TransformError::InvalidTargetSize { .. })),
                "zero width should fail"
            );
        }
    }
}
