//! Brightness, contrast and sharpness enhancement.
//!
//! The tone stage of the pipeline does not implement enhancement itself; it
//! validates factors and calls an [`Enhancer`]. [`BlendEnhancer`] is the
//! default implementation. Each operation interpolates (or extrapolates)
//! between a *degenerate* image and the input:
//!
//! ```text
//! out = trunc(clamp(degenerate + factor * (input - degenerate), 0, 255))
//! ```
//!
//! | Operation  | Degenerate image                                   |
//! |------------|----------------------------------------------------|
//! | brightness | black                                              |
//! | contrast   | uniform grey at the mean BT.601 luma of the input  |
//! | sharpness  | 3x3 smoothed input (`1 1 1 / 1 5 1 / 1 1 1`, /13)  |
//!
//! A factor of 1.0 returns the input unchanged, 0.0 returns the degenerate
//! image. Extra channels (alpha) are copied from the input.

use crate::decode::DecodedImage;
use crate::luminance::bt601_luma_u8;

/// Enhancement operations used by the tone stage.
///
/// Implementations return a new image and must not modify the input.
pub trait Enhancer {
    /// Scale brightness; 1.0 is identity.
    fn enhance_brightness(&self, image: &DecodedImage, factor: f64) -> DecodedImage;

    /// Scale contrast around the mean grey level; 1.0 is identity.
    fn enhance_contrast(&self, image: &DecodedImage, factor: f64) -> DecodedImage;

    /// Scale sharpness; 1.0 is identity, below 1.0 blurs.
    fn enhance_sharpness(&self, image: &DecodedImage, factor: f64) -> DecodedImage;
}

/// Default [`Enhancer`] that blends against a degenerate image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendEnhancer;

impl Enhancer for BlendEnhancer {
    fn enhance_brightness(&self, image: &DecodedImage, factor: f64) -> DecodedImage {
        blend_pixels(image, factor, |_, _| [0.0; 3])
    }

    fn enhance_contrast(&self, image: &DecodedImage, factor: f64) -> DecodedImage {
        let mean = mean_luma(image) as f64;
        blend_pixels(image, factor, |_, _| [mean; 3])
    }

    fn enhance_sharpness(&self, image: &DecodedImage, factor: f64) -> DecodedImage {
        let smoothed = smooth(image);
        let channels = image.channels();
        blend_pixels(image, factor, |idx, _| {
            let base = idx * channels;
            [
                smoothed[base] as f64,
                smoothed[base + 1] as f64,
                smoothed[base + 2] as f64,
            ]
        })
    }
}

/// Blend each pixel's RGB against `degenerate(pixel_index, pixel)`.
fn blend_pixels<F>(image: &DecodedImage, factor: f64, degenerate: F) -> DecodedImage
where
    F: Fn(usize, &[u8]) -> [f64; 3],
{
    let channels = image.channels();
    let mut output = image.pixels.clone();

    for (idx, px) in output.chunks_exact_mut(channels).enumerate() {
        let deg = degenerate(idx, px);
        for c in 0..3 {
            let v = deg[c] + factor * (px[c] as f64 - deg[c]);
            px[c] = v.clamp(0.0, 255.0) as u8;
        }
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        layout: image.layout,
        pixels: output,
    }
}

/// Mean BT.601 luma of the image, rounded to the nearest integer.
fn mean_luma(image: &DecodedImage) -> u8 {
    let channels = image.channels();
    let count = image.pixels.len() / channels;
    if count == 0 {
        return 0;
    }

    let sum: u64 = image
        .pixels
        .chunks_exact(channels)
        .map(|px| bt601_luma_u8(px[0], px[1], px[2]) as u64)
        .sum();

    ((sum as f64 / count as f64) + 0.5) as u8
}

/// 3x3 smoothing filter over the RGB channels.
///
/// Border pixels are copied unchanged. The result has the same layout as the
/// input; only RGB bytes are meaningful.
fn smooth(image: &DecodedImage) -> Vec<u8> {
    const KERNEL: [[f64; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 5.0, 1.0], [1.0, 1.0, 1.0]];
    const SCALE: f64 = 13.0;

    let (w, h) = (image.width as usize, image.height as usize);
    let channels = image.channels();
    let mut output = image.pixels.clone();

    if w < 3 || h < 3 {
        return output;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let dst = (y * w + x) * channels;
            for c in 0..3 {
                let mut sum = 0.0;
                for (ky, row) in KERNEL.iter().enumerate() {
                    for (kx, weight) in row.iter().enumerate() {
                        let src = ((y + ky - 1) * w + (x + kx - 1)) * channels + c;
                        sum += image.pixels[src] as f64 * weight;
                    }
                }
                output[dst + c] = (sum / SCALE).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    output
}
