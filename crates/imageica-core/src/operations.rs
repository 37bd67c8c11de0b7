//! Pending edit parameters for one loaded image.
//!
//! [`OperationsState`] accumulates every edit a user has requested but that
//! has not been saved yet. A UI mutates it field by field and then asks the
//! pipeline for a new preview. Each field has an identity value meaning
//! "stage skipped":
//!
//! | Field                              | Identity |
//! |------------------------------------|----------|
//! | `color_filter`                     | `None`   |
//! | `flip_left`, `flip_top`            | `false`  |
//! | `rotation_angle`                   | `0`      |
//! | `size`                             | `None`   |
//! | `brightness`, `contrast`, `sharpness` | `0.0` |
//! | `red`, `green`, `blue`             | `1.0`    |
//!
//! The `*_prev` fields remember the ratio at which each channel was last
//! applied. They differ from the current ratio only while a rescale is
//! pending.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::channel::{is_valid_ratio, Channel};
use crate::filter::ColorFilter;
use crate::slider::{slider_to_ratio, SLIDER_MAX};
use crate::tone::{ToneError, ToneOperation};

/// Rotation angles an [`OperationsState`] can hold.
pub const ROTATION_ANGLES: [i32; 7] = [-270, -180, -90, 0, 90, 180, 270];

/// Rotation step used by [`OperationsState::rotate_left`] and
/// [`OperationsState::rotate_right`].
pub const ROTATION_STEP: i32 = 90;

/// Errors raised by the validating setters of [`OperationsState`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("rotation angle {0} must be one of -270, -180, -90, 0, 90, 180, 270")]
    InvalidAngle(i32),

    #[error("invalid target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error(transparent)]
    Tone(#[from] ToneError),

    #[error("invalid {channel} ratio {ratio}")]
    InvalidRatio { channel: Channel, ratio: f64 },
}

/// Every pending edit against one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationsState {
    /// Selected colour filter; `None` means unfiltered.
    pub color_filter: Option<ColorFilter>,
    /// Mirror left to right.
    pub flip_left: bool,
    /// Mirror top to bottom.
    pub flip_top: bool,
    /// Counter-clockwise rotation in degrees, one of [`ROTATION_ANGLES`].
    pub rotation_angle: i32,
    /// Target `(width, height)`; `None` keeps the size.
    pub size: Option<(u32, u32)>,
    /// Brightness factor, 0 when not applied.
    pub brightness: f64,
    /// Contrast factor, 0 when not applied.
    pub contrast: f64,
    /// Sharpness factor, 0 when not applied.
    pub sharpness: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub red_prev: f64,
    pub green_prev: f64,
    pub blue_prev: f64,
}

impl Default for OperationsState {
    fn default() -> Self {
        Self {
            color_filter: None,
            flip_left: false,
            flip_top: false,
            rotation_angle: 0,
            size: None,
            brightness: 0.0,
            contrast: 0.0,
            sharpness: 0.0,
            red: 1.0,
            green: 1.0,
            blue: 1.0,
            red_prev: 1.0,
            green_prev: 1.0,
            blue_prev: 1.0,
        }
    }
}

impl OperationsState {
    /// Create a state with every field at its identity value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its identity value.
    pub fn reset(&mut self) {
        *self = Self::default();
        tracing::debug!("operations reset");
    }

    /// Check whether any edit would change the saved image.
    ///
    /// Channel ratios are not considered.
    pub fn has_pending_changes(&self) -> bool {
        self.color_filter.is_some()
            || self.flip_left
            || self.flip_top
            || self.rotation_angle != 0
            || self.size.is_some()
            || self.brightness != 0.0
            || self.contrast != 0.0
            || self.sharpness != 0.0
    }

    /// Check whether `channel` has a ratio change not yet applied.
    pub fn has_pending_rescale(&self, channel: Channel) -> bool {
        let (ratio, prev) = self.channel_ratio(channel);
        ratio != prev
    }

    /// Current and previously applied ratio of `channel`.
    pub fn channel_ratio(&self, channel: Channel) -> (f64, f64) {
        match channel {
            Channel::Red => (self.red, self.red_prev),
            Channel::Green => (self.green, self.green_prev),
            Channel::Blue => (self.blue, self.blue_prev),
        }
    }

    /// Record that `channel` has been applied at its current ratio.
    pub fn mark_applied(&mut self, channel: Channel) {
        let ratio = self.channel_ratio(channel).0;
        match channel {
            Channel::Red => self.red_prev = ratio,
            Channel::Green => self.green_prev = ratio,
            Channel::Blue => self.blue_prev = ratio,
        }
        tracing::debug!(%channel, ratio, "channel ratio applied");
    }

    /// Set the current ratio of `channel`, leaving its memory untouched.
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidRatio`] unless the ratio is finite and positive.
    pub fn set_channel_ratio(&mut self, channel: Channel, ratio: f64) -> Result<(), StateError> {
        if !is_valid_ratio(ratio) {
            return Err(StateError::InvalidRatio { channel, ratio });
        }
        match channel {
            Channel::Red => self.red = ratio,
            Channel::Green => self.green = ratio,
            Channel::Blue => self.blue = ratio,
        }
        Ok(())
    }

    /// Set a channel ratio from a slider position.
    pub fn set_channel_slider(&mut self, channel: Channel, value: i32) -> Result<(), StateError> {
        self.set_channel_ratio(channel, slider_to_ratio(value))
    }

    /// Current factor of a tone operation (0 when not applied).
    pub fn tone_factor(&self, operation: ToneOperation) -> f64 {
        match operation {
            ToneOperation::Brightness => self.brightness,
            ToneOperation::Contrast => self.contrast,
            ToneOperation::Sharpness => self.sharpness,
        }
    }

    /// Set a tone factor. Zero clears the adjustment.
    ///
    /// # Errors
    ///
    /// [`StateError::Tone`] for a nonzero factor outside the operation's range.
    pub fn set_tone(&mut self, operation: ToneOperation, factor: f64) -> Result<(), StateError> {
        if factor != 0.0 {
            operation.validate(factor)?;
        }
        match operation {
            ToneOperation::Brightness => self.brightness = factor,
            ToneOperation::Contrast => self.contrast = factor,
            ToneOperation::Sharpness => self.sharpness = factor,
        }
        Ok(())
    }

    /// Set a tone factor from a slider position.
    pub fn set_tone_slider(&mut self, operation: ToneOperation, value: i32) -> Result<(), StateError> {
        self.set_tone(operation, operation.factor_from_slider(value))
    }

    /// Set the rotation angle.
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidAngle`] unless the angle is in [`ROTATION_ANGLES`].
    pub fn set_rotation_angle(&mut self, angle: i32) -> Result<(), StateError> {
        if !ROTATION_ANGLES.contains(&angle) {
            return Err(StateError::InvalidAngle(angle));
        }
        self.rotation_angle = angle;
        Ok(())
    }

    /// Turn counter-clockwise by 90 degrees; 270 wraps to 0.
    pub fn rotate_left(&mut self) {
        self.rotation_angle = if self.rotation_angle == 270 {
            0
        } else {
            self.rotation_angle + ROTATION_STEP
        };
        tracing::debug!(angle = self.rotation_angle, "rotate left");
    }

    /// Turn clockwise by 90 degrees; -270 wraps to 0.
    pub fn rotate_right(&mut self) {
        self.rotation_angle = if self.rotation_angle == -270 {
            0
        } else {
            self.rotation_angle - ROTATION_STEP
        };
        tracing::debug!(angle = self.rotation_angle, "rotate right");
    }

    pub fn toggle_flip_left(&mut self) {
        self.flip_left = !self.flip_left;
    }

    pub fn toggle_flip_top(&mut self) {
        self.flip_top = !self.flip_top;
    }

    /// Set the target size.
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidSize`] if either dimension is zero.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), StateError> {
        if width == 0 || height == 0 {
            return Err(StateError::InvalidSize { width, height });
        }
        self.size = Some((width, height));
        Ok(())
    }

    pub fn clear_size(&mut self) {
        self.size = None;
    }
}

/// Slider position that produces `ratio`, for restoring UI controls.
pub fn ratio_to_slider(ratio: f64) -> i32 {
    (ratio * SLIDER_MAX as f64).round() as i32 - SLIDER_MAX
}
