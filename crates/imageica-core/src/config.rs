//! Editor configuration.
//!
//! Configuration is plain serde data. Every field has a default, so a JSON
//! document only needs the keys it wants to change:
//!
//! ```json
//! {
//!   "render": { "resize_filter": "lanczos3", "channel_scaling": "recompute" },
//!   "export": { "jpeg_quality": 85 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

/// Default JPEG quality used when saving.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How channel ratios are applied when rendering a preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelScaling {
    /// Apply only the pending change `ratio / prev_ratio` to the previous
    /// preview, so truncation compounds across edits. When there is no
    /// matching previous preview every channel is scaled by its full ratio.
    #[default]
    Incremental,
    /// Scale every channel by its full ratio on every render, so the preview
    /// depends only on the base image and the state.
    Recompute,
}

/// Options for rendering previews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Resampling filter for the resize stage.
    pub resize_filter: FilterType,
    pub channel_scaling: ChannelScaling,
}

/// Options for writing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// JPEG quality, clamped to 1..=100 when used.
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Complete editor configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub render: RenderConfig,
    pub export: ExportConfig,
}

impl EditorConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
