//! Colour filter bindings.

use crate::types::JsImage;
use imageica_core::filter::{self, ColorFilter};
use wasm_bindgen::prelude::*;

/// Apply a colour filter by name and return a new image.
///
/// Throws for an unknown name; the input image is never modified.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const sepia = apply_color_filter(base, "sepia");
/// ```
#[wasm_bindgen]
pub fn apply_color_filter(image: &JsImage, name: &str) -> Result<JsImage, JsValue> {
    filter::color_filter(image.as_decoded(), name)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Machine names of every filter, in display order.
#[wasm_bindgen]
pub fn filter_names() -> Vec<String> {
    ColorFilter::ALL.iter().map(|f| f.name().to_string()).collect()
}

/// Display label for a filter name, e.g. `"Black & White"`.
#[wasm_bindgen]
pub fn filter_label(name: &str) -> Result<String, JsValue> {
    name.parse::<ColorFilter>()
        .map(|f| f.label().to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imageica_core::decode::DecodedImage;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unknown_filter_throws() {
        let img = JsImage::from_decoded(DecodedImage::new(1, 1, vec![1, 2, 3]));
        assert!(apply_color_filter(&img, "vintage").is_err());
        assert!(filter_label("none").is_err());
    }
}
