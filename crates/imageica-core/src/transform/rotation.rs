//! Rotation by multiples of 90 degrees.
//!
//! Cardinal rotations are exact pixel permutations, so no interpolation is
//! needed and the canvas always bounds the rotated content: a quarter turn
//! swaps width and height, a half turn keeps them.
//!
//! For a source of size `w x h`, positive (counter-clockwise) angles map
//! destination pixels back to the source as:
//!
//! ```text
//!  90: dst(x, y) = src(w - 1 - y, x)
//! 180: dst(x, y) = src(w - 1 - x, h - 1 - y)
//! 270: dst(x, y) = src(y, h - 1 - x)
//! ```

use super::TransformError;
use crate::decode::DecodedImage;

/// Normalize a cardinal angle into `{0, 90, 180, 270}`.
///
/// # Errors
///
/// [`TransformError::InvalidAngle`] if `angle` is not a multiple of 90.
pub fn normalize_angle(angle: i32) -> Result<i32, TransformError> {
    if angle % 90 != 0 {
        return Err(TransformError::InvalidAngle(angle));
    }
    Ok(angle.rem_euclid(360))
}

/// Dimensions of the canvas after rotating by `angle` degrees.
///
/// # Example
///
/// ```
/// use imageica_core::transform::compute_rotated_bounds;
///
/// assert_eq!(compute_rotated_bounds(100, 50, 90).unwrap(), (50, 100));
/// assert_eq!(compute_rotated_bounds(100, 50, -180).unwrap(), (100, 50));
/// ```
pub fn compute_rotated_bounds(
    width: u32,
    height: u32,
    angle: i32,
) -> Result<(u32, u32), TransformError> {
    match normalize_angle(angle)? {
        90 | 270 => Ok((height, width)),
        _ => Ok((width, height)),
    }
}

/// Rotate an image counter-clockwise by `angle` degrees.
///
/// The angle must be a multiple of 90; `-90` is the same as `270`.
///
/// # Errors
///
/// - [`TransformError::InvalidAngle`] for non-cardinal angles
/// - [`TransformError::InvalidBuffer`] if the pixel buffer is inconsistent
pub fn rotate(image: &DecodedImage, angle: i32) -> Result<DecodedImage, TransformError> {
    let angle = normalize_angle(angle)?;
    if angle == 0 {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    if image.pixels.len() != src_w * src_h * channels {
        return Err(TransformError::InvalidBuffer);
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle)?;
    let (dst_w, dst_h) = (dst_w as usize, dst_h as usize);
    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match angle {
                90 => (src_w - 1 - dst_y, dst_x),
                180 => (src_w - 1 - dst_x, src_h - 1 - dst_y),
                _ => (dst_y, src_h - 1 - dst_x),
            };

            let src = (src_y * src_w + src_x) * channels;
            let dst = (dst_y * dst_w + dst_x) * channels;
            output[dst..dst + channels].copy_from_slice(&image.pixels[src..src + channels]);
        }
    }

    Ok(DecodedImage {
        width: dst_w as u32,
        height: dst_h as u32,
        layout: image.layout,
        pixels: output,
    })
}
