//! Preview rendering bindings.
//!
//! Stateless rendering: the base image passed in should already carry the
//! selected colour filter (see `apply_color_filter`), and no earlier preview
//! is reused, so every channel is scaled by its full ratio. The state's ratio
//! memory is updated in place. `JsEditSession` keeps the filter and the last
//! preview itself.

use crate::operations::JsOperationsState;
use crate::types::JsImage;
use imageica_core::config::EditorConfig;
use imageica_core::pipeline::Pipeline;
use wasm_bindgen::prelude::*;

/// Render a preview with the default configuration.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const state = new JsOperationsState();
/// state.rotate_left();
/// state.set_brightness_slider(40);
/// const preview = render_preview(filteredBase, state);
/// ```
#[wasm_bindgen]
pub fn render_preview(base: &JsImage, state: &mut JsOperationsState) -> Result<JsImage, JsValue> {
    render(base, state, &EditorConfig::default())
}

/// Render a preview with a configuration object, e.g.
/// `{ render: { channel_scaling: "recompute", resize_filter: "lanczos3" } }`.
#[wasm_bindgen]
pub fn render_preview_with_config(
    base: &JsImage,
    state: &mut JsOperationsState,
    config: JsValue,
) -> Result<JsImage, JsValue> {
    let config: EditorConfig =
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    render(base, state, &config)
}

fn render(
    base: &JsImage,
    state: &mut JsOperationsState,
    config: &EditorConfig,
) -> Result<JsImage, JsValue> {
    Pipeline::new(config.render)
        .render_preview(base.as_decoded(), state.inner_mut())
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageica_core::decode::DecodedImage;

    #[test]
    fn test_render_rotated_preview() {
        let base = JsImage::from_decoded(DecodedImage::filled(4, 2, &[10, 20, 30]));
        let mut state = JsOperationsState::new();
        state.rotate_left();

        let preview = render_preview(&base, &mut state).unwrap();
        assert_eq!((preview.width(), preview.height()), (2, 4));
    }

    #[test]
    fn test_render_updates_ratio_memory() {
        let base = JsImage::from_decoded(DecodedImage::filled(1, 1, &[100, 100, 100]));
        let mut state = JsOperationsState::new();
        state.set_red(1.5).unwrap();

        let preview = render_preview(&base, &mut state).unwrap();
        assert_eq!(preview.pixels(), vec![150, 100, 100]);
        assert_eq!(state.inner().red_prev, 1.5);
    }
}
