//! Imageica Core - Image editing pipeline
//!
//! This crate turns an immutable base image plus a set of pending edits into
//! a rendered preview. It provides colour filters, tone adjustments,
//! geometric transforms and per-channel scaling, composed in a fixed order by
//! the [`pipeline`], plus the codec, session and gallery plumbing an editor
//! front end needs around them.
//!
//! Library code logs through `tracing` and never installs a subscriber.

pub mod channel;
pub mod config;
pub mod decode;
pub mod encode;
pub mod enhance;
pub mod filter;
pub mod gallery;
pub mod luminance;
pub mod operations;
pub mod pipeline;
pub mod session;
pub mod slider;
pub mod tone;
pub mod transform;

pub use channel::{scale_channel, Channel, ScaleError};
pub use config::{ChannelScaling, EditorConfig, ExportConfig, RenderConfig};
pub use decode::{decode_bytes, decode_path, DecodedImage, LoadError, PixelLayout};
pub use encode::{encode_jpeg, encode_path, encode_png, EncodeError};
pub use enhance::{BlendEnhancer, Enhancer};
pub use filter::{apply_color_filter, color_filter, ColorFilter, FilterError};
pub use gallery::Gallery;
pub use operations::{OperationsState, StateError};
pub use pipeline::{render_preview, Pipeline, PipelineError, Preview};
pub use session::{EditSession, SessionError};
pub use tone::{ToneError, ToneOperation};
pub use transform::{flip_horizontal, flip_vertical, resize, rotate, TransformError};
