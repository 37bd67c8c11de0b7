//! Editing session bindings.
//!
//! [`JsEditSession`] keeps the base image, the filtered working image, the
//! pending edits and the last preview together on the WASM side, so the
//! filter selection and channel ratios carry over between renders.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession(decode_image(bytes));
//! session.select_filter("sepia");
//!
//! const state = session.state();
//! state.set_red_slider(40);
//! session.set_state(state);
//!
//! const preview = session.render_preview();
//! const png = session.export_png();
//! ```

use crate::operations::JsOperationsState;
use crate::types::JsImage;
use imageica_core::config::EditorConfig;
use imageica_core::encode;
use imageica_core::session::EditSession;
use wasm_bindgen::prelude::*;

/// One image being edited.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start a session on `base` with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(base: &JsImage) -> Self {
        Self {
            inner: EditSession::from_image(base.as_decoded().clone(), &EditorConfig::default()),
        }
    }

    /// Start a session with a configuration object, e.g.
    /// `{ render: { channel_scaling: "recompute" }, export: { jpeg_quality: 80 } }`.
    pub fn with_config(base: &JsImage, config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: EditSession::from_image(base.as_decoded().clone(), &config),
        })
    }

    /// Selected filter name, or `"none"`.
    #[wasm_bindgen(getter)]
    pub fn color_filter(&self) -> String {
        self.inner
            .state()
            .color_filter
            .map_or_else(|| "none".to_string(), |f| f.name().to_string())
    }

    /// Select a filter by name; `"none"` clears it.
    pub fn select_filter(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner
            .select_filter_by_name(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Copy of the pending edits.
    pub fn state(&self) -> JsOperationsState {
        JsOperationsState::from_inner(self.inner.state().clone())
    }

    /// Replace the pending edits. A different filter in `state` is applied
    /// on the next render.
    pub fn set_state(&mut self, state: &JsOperationsState) {
        *self.inner.state_mut() = state.inner().clone();
    }

    /// Render the preview for the current edits.
    pub fn render_preview(&mut self) -> Result<JsImage, JsValue> {
        self.inner
            .render_preview()
            .map(JsImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Drop every edit, filter included.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn has_pending_changes(&self) -> bool {
        self.inner.has_pending_changes()
    }

    /// Render and encode as PNG.
    pub fn export_png(&mut self) -> Result<Vec<u8>, JsValue> {
        let image = self.render_preview()?;
        encode::encode_png(image.as_decoded()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render and encode as JPEG; `quality` is clamped to 1-100.
    pub fn export_jpeg(&mut self, quality: u8) -> Result<Vec<u8>, JsValue> {
        let image = self.render_preview()?;
        encode::encode_jpeg(image.as_decoded(), quality)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imageica_core::decode::DecodedImage;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unknown_filter_throws() {
        let image = JsImage::from_decoded(DecodedImage::filled(1, 1, &[1, 2, 3]));
        let mut session = JsEditSession::new(&image);
        session.select_filter("sepia").unwrap();
        assert!(session.select_filter("vintage").is_err());
        assert_eq!(session.color_filter(), "sepia");
    }

    #[wasm_bindgen_test]
    fn test_with_config_recompute() {
        let image = JsImage::from_decoded(DecodedImage::filled(1, 1, &[100, 100, 100]));
        let mut config = EditorConfig::default();
        config.render.channel_scaling = imageica_core::config::ChannelScaling::Recompute;
        let config = serde_wasm_bindgen::to_value(&config).unwrap();

        let mut session = JsEditSession::with_config(&image, config).unwrap();
        let mut state = session.state();
        state.set_green(0.5).unwrap();
        session.set_state(&state);
        assert_eq!(session.render_preview().unwrap().pixels(), vec![100, 50, 100]);
    }
}
