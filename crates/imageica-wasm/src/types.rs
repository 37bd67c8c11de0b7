//! WASM-compatible wrapper for image data.
//!
//! [`JsImage`] owns a core `DecodedImage` and exposes its dimensions and
//! interleaved pixels to JavaScript. Images with 3 bytes per pixel are RGB,
//! 4 bytes per pixel RGBA.

use imageica_core::decode::{DecodedImage, PixelLayout};
use wasm_bindgen::prelude::*;

/// An image held in WASM memory.
///
/// Calling `pixels()` copies the buffer into a JavaScript `Uint8Array`;
/// keep images on the WASM side between pipeline calls where possible.
#[wasm_bindgen]
pub struct JsImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from interleaved RGB or RGBA bytes.
    ///
    /// The layout is inferred from `pixels.length / (width * height)`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        let layout = layout_for(width, height, pixels.len()).ok_or_else(|| {
            JsValue::from_str(&format!(
                "pixel buffer of {} bytes does not fit a {width}x{height} RGB or RGBA image",
                pixels.len()
            ))
        })?;
        Ok(Self::from_decoded(DecodedImage::with_layout(
            width, height, layout, pixels,
        )))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bytes per pixel: 3 for RGB, 4 for RGBA.
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.inner.channels()
    }

    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.layout == PixelLayout::Rgba
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns a copy of the pixel data as a `Uint8Array`.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// Pick the pixel layout whose stride matches the buffer length.
pub(crate) fn layout_for(width: u32, height: u32, len: usize) -> Option<PixelLayout> {
    let count = width as usize * height as usize;
    if count == 0 {
        return (len == 0).then_some(PixelLayout::Rgb);
    }
    if len % count != 0 {
        return None;
    }
    PixelLayout::from_channels(len / count)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_rejects_bad_buffer() {
        assert!(JsImage::new(2, 2, vec![0; 7]).is_err());
    }
}
