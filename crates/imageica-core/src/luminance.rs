//! Luma calculation shared by the colour filters and the contrast enhancer.
//!
//! Two weightings are used:
//! - The filter weighting `0.3 R + 0.59 G + 0.11 B`, evaluated in `f64` and
//!   truncated, which drives the gray and black & white filters.
//! - ITU-R BT.601 integer luma (`299/587/114` in 16.16 fixed point, rounded),
//!   which is how an RGB image is converted to a single grey channel when
//!   measuring its mean brightness.

/// Red weight of the filter luma.
pub const FILTER_LUMA_R: f64 = 0.3;

/// Green weight of the filter luma.
pub const FILTER_LUMA_G: f64 = 0.59;

/// Blue weight of the filter luma.
pub const FILTER_LUMA_B: f64 = 0.11;

/// Unrounded filter luma of an 8-bit RGB triple (0.0 to 255.0).
///
/// Callers compare this against thresholds before truncating, so that a luma
/// of exactly 127.0 and one of 127.3 can be told apart.
#[inline]
pub fn filter_luma(r: u8, g: u8, b: u8) -> f64 {
    FILTER_LUMA_R * r as f64 + FILTER_LUMA_G * g as f64 + FILTER_LUMA_B * b as f64
}

/// Filter luma truncated toward zero to an 8-bit value.
#[inline]
pub fn filter_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    filter_luma(r, g, b) as u8
}

/// ITU-R BT.601 luma in 16.16 fixed point, rounded to the nearest integer.
#[inline]
pub fn bt601_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
    (sum >> 16) as u8
}
