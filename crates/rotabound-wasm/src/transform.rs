//! WASM bindings for rotation and resampling.
//!
//! Options are plain JavaScript objects with camelCase keys. Missing keys
//! take their defaults; `undefined` or `null` means all defaults.
//!
//! ```typescript
//! const rotated = rotate_bound(image, 30, {
//!   interpolation: 'lanczos3',
//!   fill: [255, 255, 255, 255],
//!   rounding: 'ceil',
//! });
//! const restored = rotate_and_restore(image, 45, { resizeFilter: 'area' });
//! ```

use crate::types::{filter_from_u8, rounding_from_u8, JsRaster};
use rotabound_core::{
    compute_rotated_bounds as core_bounds, resize_with, rotate_and_restore as core_pipeline,
    rotate_bound_with, PipelineOptions, RotateOptions,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Deserialize an options object, treating `undefined`/`null` as defaults.
fn parse_options<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

/// Rotate an image onto a canvas that bounds the whole rotated content.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle_degrees` - Rotation angle in degrees (positive turns clockwise on screen)
/// * `options` - `{ interpolation, fill, rounding }`, all optional
///
/// # Errors
///
/// Returns an error for a malformed image, a non-finite angle or bad options.
#[wasm_bindgen]
pub fn rotate_bound(
    image: &JsRaster,
    angle_degrees: f64,
    options: JsValue,
) -> Result<JsRaster, JsValue> {
    let options: RotateOptions = parse_options(options)?;
    let src = image.to_raster().map_err(to_js_error)?;
    rotate_bound_with(&src, angle_degrees, &options)
        .map(JsRaster::from_raster)
        .map_err(to_js_error)
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - Source image
/// * `height` - Target height in pixels
/// * `width` - Target width in pixels
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3, 3 = Area (default)
#[wasm_bindgen]
pub fn resize(image: &JsRaster, height: u32, width: u32, filter: u8) -> Result<JsRaster, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    resize_with(&src, height, width, filter_from_u8(filter))
        .map(JsRaster::from_raster)
        .map_err(to_js_error)
}

/// Rotate an image and resample it back to its original dimensions.
///
/// `options` is `{ rotate: { interpolation, fill, rounding }, resizeFilter }`.
#[wasm_bindgen]
pub fn rotate_and_restore(
    image: &JsRaster,
    angle_degrees: f64,
    options: JsValue,
) -> Result<JsRaster, JsValue> {
    let options: PipelineOptions = parse_options(options)?;
    let src = image.to_raster().map_err(to_js_error)?;
    core_pipeline(&src, angle_degrees, &options)
        .map(JsRaster::from_raster)
        .map_err(to_js_error)
}

/// Compute the bounding canvas of a rotation without rotating.
///
/// Returns `[width, height]`. `rounding` is 0 = Ceil, 1 = Round, 2 = Truncate.
#[wasm_bindgen]
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64, rounding: u8) -> Vec<u32> {
    let (w, h) = core_bounds(width, height, angle_degrees, rounding_from_u8(rounding));
    vec![w, h]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_45_degrees() {
        assert_eq!(compute_rotated_bounds(200, 100, 45.0, 0), vec![213, 213]);
        assert_eq!(compute_rotated_bounds(200, 100, 45.0, 2), vec![212, 212]);
    }

    #[test]
    fn test_bounds_quarter_turn_swaps() {
        assert_eq!(compute_rotated_bounds(200, 100, 90.0, 0), vec![100, 200]);
        assert_eq!(compute_rotated_bounds(200, 100, -270.0, 1), vec![100, 200]);
    }

    #[test]
    fn test_bounds_zero_angle() {
        assert_eq!(compute_rotated_bounds(31, 7, 0.0, 0), vec![31, 7]);
    }
}
