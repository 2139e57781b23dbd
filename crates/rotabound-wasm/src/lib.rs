//! Rotabound WASM - WebAssembly bindings for Rotabound
//!
//! This crate exposes the rotabound-core rotation and resampling functions
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for rasters
//! - `decode` - Image decoding bindings (PNG, JPEG)
//! - `transform` - Bounding-box rotation, resize and the combined pipeline
//! - `encode` - Image encoding bindings (PNG, JPEG)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rotate_and_restore, encode_png } from '@rotabound/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const rotated = rotate_and_restore(image, 45, { rotate: { fill: [255, 255, 255, 255] } });
//! const png = encode_png(rotated);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod transform;
mod types;

pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use transform::{compute_rotated_bounds, resize, rotate_and_restore, rotate_bound};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
