//! Decoding and encoding bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const png = encode_png(image);
//! const jpeg = encode_jpeg(image, 90);
//! ```

use crate::types::JsImage;
use imageica_core::{decode, encode};
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_bytes(bytes)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as PNG, keeping alpha.
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.as_decoded()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as JPEG. Alpha is dropped; `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.as_decoded(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests that return `JsValue` errors only run on wasm32; the codecs
/// themselves are covered in `imageica_core`.
#[cfg(test)]
mod tests {
    use super::*;
    use imageica_core::decode::DecodedImage;

    #[test]
    fn test_png_round_trip() {
        let img = JsImage::from_decoded(DecodedImage::filled(3, 2, &[9, 8, 7, 6]));
        let png = encode_png(&img).unwrap();
        let back = decode_image(&png).unwrap();
        assert_eq!(back.pixels(), img.pixels());
        assert!(back.has_alpha());
    }

    #[test]
    fn test_encode_jpeg_magic() {
        let img = JsImage::from_decoded(DecodedImage::filled(8, 8, &[128, 64, 32]));
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
        assert!(decode_image(&[]).is_err());
    }
}
