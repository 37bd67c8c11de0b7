//! Geometric transforms: resize, rotate and flip.
//!
//! All transforms return a new image and keep the channel layout of the
//! input, alpha included.
//!
//! # Pipeline order
//!
//! When rendering a preview, geometry is applied after tone adjustments:
//! 1. Rotation (cardinal angles only, canvas grows to fit)
//! 2. Horizontal flip
//! 3. Vertical flip
//! 4. Resize to an exact target size
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is the top-left corner

mod flip;
mod resize;
mod rotation;

use thiserror::Error;

pub use flip::{flip_horizontal, flip_vertical};
pub use resize::{ratio_height, ratio_width, resize};
pub use rotation::{compute_rotated_bounds, normalize_angle, rotate};

/// Errors raised by geometric transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A target or source dimension is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Rotation angle is not a multiple of 90 degrees.
    #[error("rotation angle {0} is not a multiple of 90 degrees")]
    InvalidAngle(i32),

    /// Pixel buffer length does not match the image dimensions.
    #[error("pixel buffer does not match image dimensions")]
    InvalidBuffer,
}
