//! WASM-compatible wrapper types for raster data.
//!
//! Converts between the core [`Raster`] and a JavaScript-friendly handle, and
//! maps the small integer codes used by the bindings onto core enums.

use rotabound_core::{BoundsRounding, FilterType, Raster, TransformResult};
use wasm_bindgen::prelude::*;

/// An interleaved 8-bit raster for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`; keep images in WASM memory between operations where possible.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions and interleaved pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Samples per pixel (1 gray, 2 gray+alpha, 3 RGB, 4 RGBA)
    /// * `pixels` - Row-major pixel data, `width * height * channels` bytes
    ///
    /// The layout is checked when the raster is first used.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of samples per pixel
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the pixel data as a Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases the memory otherwise.
    pub fn free(self) {}
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            channels: raster.channels,
            pixels: raster.pixels,
        }
    }

    /// Convert to a core raster, validating the layout. Clones the pixels.
    pub(crate) fn to_raster(&self) -> TransformResult<Raster> {
        Raster::new(self.width, self.height, self.channels, self.pixels.clone())
    }
}

/// Convert a u8 filter code to the core resize filter.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
/// - 3 = Area
///
/// Any other value defaults to Area.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        2 => FilterType::Lanczos3,
        _ => FilterType::Area,
    }
}

/// Convert a u8 rounding code: 1 = Round, 2 = Truncate, anything else Ceil.
pub(crate) fn rounding_from_u8(value: u8) -> BoundsRounding {
    match value {
        1 => BoundsRounding::Round,
        2 => BoundsRounding::Truncate,
        _ => BoundsRounding::Ceil,
    }
}
