//! Rotate-then-restore pipeline.
//!
//! Rotates an image onto a bounding canvas and resamples the result back to
//! the source's pixel dimensions, so the whole rotated picture is visible in
//! a frame of the original size.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::TransformResult;
use crate::raster::Raster;
use crate::resize::{resize_with, FilterType};
use crate::transform::{rotate_bound_with, RotateOptions};

/// Angle used when none is given.
pub const DEFAULT_ANGLE: f64 = 45.0;

/// Options for [`rotate_and_restore`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Rotation stage settings.
    pub rotate: RotateOptions,
    /// Filter used to shrink the rotated canvas back.
    pub resize_filter: FilterType,
}

/// Rotate `source` by `angle_degrees` and resize back to its (height, width).
///
/// The output always has exactly the source's dimensions and channel count.
pub fn rotate_and_restore(
    source: &Raster,
    angle_degrees: f64,
    options: &PipelineOptions,
) -> TransformResult<Raster> {
    let (height, width) = source.shape();

    let rotated = rotate_bound_with(source, angle_degrees, &options.rotate)?;
    let restored = resize_with(&rotated, height, width, options.resize_filter)?;

    info!(
        "rotated {}x{} by {} degrees via {}x{} canvas",
        width, height, angle_degrees, rotated.width, rotated.height
    );
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::transform::{rotate_bound, BoundsRounding};

    fn test_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }
        Raster::new(width, height, 3, pixels).unwrap()
    }

    #[test]
    fn test_rotate_45_and_restore() {
        // 100 tall, 200 wide
        let img = test_image(200, 100);

        let rotated = rotate_bound(&img, DEFAULT_ANGLE).unwrap();
        assert_eq!(rotated.shape(), (213, 213));

        let restored = rotate_and_restore(&img, DEFAULT_ANGLE, &PipelineOptions::default()).unwrap();
        assert_eq!(restored.shape(), (100, 200));
        assert_eq!(restored.channels, 3);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let img = test_image(31, 17);
        let restored = rotate_and_restore(&img, 0.0, &PipelineOptions::default()).unwrap();
        assert_eq!(restored, img);
    }

    #[test]
    fn test_quarter_turn_restores_shape() {
        let img = test_image(40, 10);
        let restored = rotate_and_restore(&img, 90.0, &PipelineOptions::default()).unwrap();
        assert_eq!(restored.shape(), (10, 40));
    }

    #[test]
    fn test_every_option_combination_restores_shape() {
        let img = test_image(23, 11);
        for resize_filter in [
            FilterType::Area,
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            for rounding in [
                BoundsRounding::Ceil,
                BoundsRounding::Round,
                BoundsRounding::Truncate,
            ] {
                let options = PipelineOptions {
                    rotate: RotateOptions {
                        rounding,
                        ..Default::default()
                    },
                    resize_filter,
                };
                let restored = rotate_and_restore(&img, 33.0, &options).unwrap();
                assert_eq!(restored.shape(), (11, 23));
            }
        }
    }

    #[test]
    fn test_empty_source_fails() {
        let img = Raster::new(0, 5, 3, vec![]).unwrap();
        assert!(matches!(
            rotate_and_restore(&img, 45.0, &PipelineOptions::default()),
            Err(TransformError::EmptyRaster { .. })
        ));
    }
}
