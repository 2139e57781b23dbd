//! Image encoding WASM bindings.
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@rotabound/wasm';
//!
//! const png = encode_png(image);
//! const jpeg = encode_jpeg(image, 90);
//! ```

use crate::types::JsRaster;
use rotabound_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image as PNG bytes. Every channel layout is supported.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    let raster = image
        .to_raster()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode::encode_png(&raster).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode; alpha is dropped
/// * `quality` - JPEG quality (1-100, recommended: 90)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival
/// * 80-90: Good quality, recommended for most uses
/// * Below 60: Visible artifacts
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    let raster = image
        .to_raster()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode::encode_jpeg(&raster, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Most encode tests need `Result<T, JsValue>`, which only works on wasm32
/// targets. The underlying encoders are tested in `rotabound_core::encode`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_encodes_as_jpeg() {
        let img = JsRaster::new(10, 10, 3, vec![128u8; 10 * 10 * 3]);

        let raster = img.to_raster().unwrap();
        let jpeg = encode::encode_jpeg(&raster, 90).unwrap();
        // JPEG magic bytes
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
