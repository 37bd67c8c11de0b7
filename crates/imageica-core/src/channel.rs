//! Per-channel intensity scaling with ratio memory.
//!
//! A channel is rescaled *relative to the last ratio applied to it*: every
//! value becomes `trunc(value * ratio / prev_ratio)`. Scaling a channel to
//! 1.1 and later to 1.2 therefore multiplies the already-scaled values by
//! `1.2 / 1.1`, so successive applications compose multiplicatively.
//!
//! Results are truncated toward zero and saturated into `0..=255`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors raised by channel scaling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// Ratios must be finite and strictly positive.
    #[error("invalid channel ratio {ratio} (previous {prev_ratio})")]
    InvalidRatio { ratio: f64, prev_ratio: f64 },
}

/// A colour channel that can be scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in pipeline application order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside an interleaved pixel.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        })
    }
}

/// Check that a ratio can be used as a scale factor.
#[inline]
pub fn is_valid_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

/// Rescale one channel in place by `ratio / prev_ratio`.
///
/// Returns the same image for chaining. Other channels, including alpha,
/// are left untouched.
///
/// # Errors
///
/// [`ScaleError::InvalidRatio`] if either ratio is non-finite or not
/// positive; the image is not modified in that case.
pub fn scale_channel(
    image: &mut DecodedImage,
    channel: Channel,
    ratio: f64,
    prev_ratio: f64,
) -> Result<&mut DecodedImage, ScaleError> {
    if !is_valid_ratio(ratio) || !is_valid_ratio(prev_ratio) {
        return Err(ScaleError::InvalidRatio { ratio, prev_ratio });
    }

    let factor = ratio / prev_ratio;
    let offset = channel.offset();
    let channels = image.channels();

    for px in image.pixels.chunks_exact_mut(channels) {
        // f64 -> u8 casts truncate and saturate
        px[offset] = (px[offset] as f64 * factor) as u8;
    }

    Ok(image)
}
