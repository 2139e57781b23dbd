//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@rotabound/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}, ${image.channels} channels`);
//! ```

use crate::types::JsRaster;
use rotabound_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG image from bytes.
///
/// EXIF orientation is applied so the raster is upright. The file's pixel
/// layout (gray, gray+alpha, RGB, RGBA) is kept.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
