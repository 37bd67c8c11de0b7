//! Image encoding for saving edited results.
//!
//! This module provides functionality for:
//! - Encoding images to PNG (lossless, keeps alpha)
//! - Encoding images to JPEG with configurable quality
//! - Writing an image to a path, with the format inferred from the extension
//!
//! # Examples
//!
//! ```ignore
//! use imageica_core::encode::encode_path;
//!
//! encode_path(&preview, "edited.png", 90)?;
//! ```

mod file;

pub use file::{encode_jpeg, encode_path, encode_png, EncodeError};
