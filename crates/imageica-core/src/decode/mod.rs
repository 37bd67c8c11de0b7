//! Image loading for Imageica.
//!
//! This module provides:
//! - The [`DecodedImage`] pixel buffer shared by every pipeline stage
//! - Decoding PNG and JPEG files (from a path or from bytes)
//! - EXIF orientation correction for photos
//! - Format inference from file extensions, including recognition of the
//!   encrypted `.ima` container (which is rejected, never decoded)
//!
//! All operations are synchronous and return a fully decoded image or a
//! [`LoadError`]; nothing is retried.
//!
//! # Examples
//!
//! ```ignore
//! use imageica_core::decode::decode_path;
//!
//! let image = decode_path("photo.jpg")?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod file;
mod types;

pub use file::{decode_bytes, decode_path};
pub use types::{DecodedImage, FilterType, ImageFormat, LoadError, Orientation, PixelLayout};
