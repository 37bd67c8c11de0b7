//! Pending-edit state bindings.
//!
//! [`JsOperationsState`] wraps the core `OperationsState`. Plain flags use
//! property getters and setters; values that can be rejected are set through
//! methods that throw on invalid input.
//!
//! The colour filter is read-only here: it is selected on a `JsEditSession`,
//! which keeps the filtered image in step with it.

use imageica_core::channel::Channel;
use imageica_core::operations::{ratio_to_slider, OperationsState};
use imageica_core::tone::ToneOperation;
use wasm_bindgen::prelude::*;

/// Pending edits for one image.
#[wasm_bindgen]
pub struct JsOperationsState {
    inner: OperationsState,
}

#[wasm_bindgen]
impl JsOperationsState {
    /// Create a state with no pending edits.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: OperationsState::new(),
        }
    }

    /// Selected filter name, or `"none"`.
    #[wasm_bindgen(getter)]
    pub fn color_filter(&self) -> String {
        self.inner
            .color_filter
            .map_or_else(|| "none".to_string(), |f| f.name().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn flip_left(&self) -> bool {
        self.inner.flip_left
    }

    #[wasm_bindgen(setter)]
    pub fn set_flip_left(&mut self, value: bool) {
        self.inner.flip_left = value;
    }

    #[wasm_bindgen(getter)]
    pub fn flip_top(&self) -> bool {
        self.inner.flip_top
    }

    #[wasm_bindgen(setter)]
    pub fn set_flip_top(&mut self, value: bool) {
        self.inner.flip_top = value;
    }

    pub fn toggle_flip_left(&mut self) {
        self.inner.toggle_flip_left();
    }

    pub fn toggle_flip_top(&mut self) {
        self.inner.toggle_flip_top();
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_angle(&self) -> i32 {
        self.inner.rotation_angle
    }

    pub fn set_rotation_angle(&mut self, angle: i32) -> Result<(), JsValue> {
        self.inner
            .set_rotation_angle(angle)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn rotate_left(&mut self) {
        self.inner.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate_right();
    }

    /// Target width, or `undefined` when no resize is pending.
    #[wasm_bindgen(getter)]
    pub fn target_width(&self) -> Option<u32> {
        self.inner.size.map(|(w, _)| w)
    }

    /// Target height, or `undefined` when no resize is pending.
    #[wasm_bindgen(getter)]
    pub fn target_height(&self) -> Option<u32> {
        self.inner.size.map(|(_, h)| h)
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner
            .set_size(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn clear_size(&mut self) {
        self.inner.clear_size();
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.brightness
    }

    pub fn set_brightness(&mut self, factor: f64) -> Result<(), JsValue> {
        self.set_tone(ToneOperation::Brightness, factor)
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.contrast
    }

    pub fn set_contrast(&mut self, factor: f64) -> Result<(), JsValue> {
        self.set_tone(ToneOperation::Contrast, factor)
    }

    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> f64 {
        self.inner.sharpness
    }

    pub fn set_sharpness(&mut self, factor: f64) -> Result<(), JsValue> {
        self.set_tone(ToneOperation::Sharpness, factor)
    }

    /// Set brightness from a slider position in `[-99, 100]`.
    pub fn set_brightness_slider(&mut self, value: i32) -> Result<(), JsValue> {
        self.set_tone_slider(ToneOperation::Brightness, value)
    }

    pub fn set_contrast_slider(&mut self, value: i32) -> Result<(), JsValue> {
        self.set_tone_slider(ToneOperation::Contrast, value)
    }

    pub fn set_sharpness_slider(&mut self, value: i32) -> Result<(), JsValue> {
        self.set_tone_slider(ToneOperation::Sharpness, value)
    }

    #[wasm_bindgen(getter)]
    pub fn red(&self) -> f64 {
        self.inner.red
    }

    #[wasm_bindgen(getter)]
    pub fn green(&self) -> f64 {
        self.inner.green
    }

    #[wasm_bindgen(getter)]
    pub fn blue(&self) -> f64 {
        self.inner.blue
    }

    pub fn set_red(&mut self, ratio: f64) -> Result<(), JsValue> {
        self.set_ratio(Channel::Red, ratio)
    }

    pub fn set_green(&mut self, ratio: f64) -> Result<(), JsValue> {
        self.set_ratio(Channel::Green, ratio)
    }

    pub fn set_blue(&mut self, ratio: f64) -> Result<(), JsValue> {
        self.set_ratio(Channel::Blue, ratio)
    }

    /// Slider position of the red ratio, for restoring the control.
    #[wasm_bindgen(getter)]
    pub fn red_slider(&self) -> i32 {
        ratio_to_slider(self.inner.red)
    }

    #[wasm_bindgen(getter)]
    pub fn green_slider(&self) -> i32 {
        ratio_to_slider(self.inner.green)
    }

    #[wasm_bindgen(getter)]
    pub fn blue_slider(&self) -> i32 {
        ratio_to_slider(self.inner.blue)
    }

    /// Set the red ratio from a slider position in `[-99, 100]`.
    pub fn set_red_slider(&mut self, value: i32) -> Result<(), JsValue> {
        self.set_ratio_slider(Channel::Red, value)
    }

    pub fn set_green_slider(&mut self, value: i32) -> Result<(), JsValue> {
        self.set_ratio_slider(Channel::Green, value)
    }

    pub fn set_blue_slider(&mut self, value: i32) -> Result<(), JsValue> {
        self.set_ratio_slider(Channel::Blue, value)
    }

    /// Reset every field to its identity value.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Whether any edit would change the saved image.
    pub fn has_pending_changes(&self) -> bool {
        self.inner.has_pending_changes()
    }

    /// Serialize to a plain JS object for storage.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; missing fields take defaults.
    pub fn from_json(value: JsValue) -> Result<JsOperationsState, JsValue> {
        let inner: OperationsState =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsOperationsState {
    fn default() -> Self {
        Self::new()
    }
}

impl JsOperationsState {
    pub(crate) fn from_inner(inner: OperationsState) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &OperationsState {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut OperationsState {
        &mut self.inner
    }

    fn set_tone(&mut self, operation: ToneOperation, factor: f64) -> Result<(), JsValue> {
        self.inner
            .set_tone(operation, factor)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn set_tone_slider(&mut self, operation: ToneOperation, value: i32) -> Result<(), JsValue> {
        self.inner
            .set_tone_slider(operation, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn set_ratio(&mut self, channel: Channel, ratio: f64) -> Result<(), JsValue> {
        self.inner
            .set_channel_ratio(channel, ratio)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn set_ratio_slider(&mut self, channel: Channel, value: i32) -> Result<(), JsValue> {
        self.inner
            .set_channel_slider(channel, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
