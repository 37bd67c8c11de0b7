//! Colour filters: sepia, negative, gray and black & white.
//!
//! Every filter is a pure per-pixel remap of the red, green and blue
//! channels. Extra channels (alpha) are copied through bit-for-bit, and the
//! input image is never modified.
//!
//! Filter names from the outside world are parsed into [`ColorFilter`] at
//! the boundary; an unknown name is an [`FilterError::InvalidFilter`] and no
//! image is produced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::luminance::{filter_luma, filter_luma_u8};

/// Luma at or below which black & white maps a pixel to black.
pub const BLACK_WHITE_THRESHOLD: f64 = 127.0;

/// Errors raised while selecting a colour filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The name does not match any known filter.
    #[error("can't find filter {0}")]
    InvalidFilter(String),
}

/// The closed set of colour filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilter {
    Sepia,
    Negative,
    BlackWhite,
    Gray,
}

impl ColorFilter {
    /// All filters, in the order a UI lists them.
    pub const ALL: [ColorFilter; 4] = [
        ColorFilter::Sepia,
        ColorFilter::Negative,
        ColorFilter::BlackWhite,
        ColorFilter::Gray,
    ];

    /// Machine name, as accepted by [`ColorFilter::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            ColorFilter::Sepia => "sepia",
            ColorFilter::Negative => "negative",
            ColorFilter::BlackWhite => "black_white",
            ColorFilter::Gray => "gray",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ColorFilter::Sepia => "Sepia",
            ColorFilter::Negative => "Negative",
            ColorFilter::BlackWhite => "Black & White",
            ColorFilter::Gray => "Gray",
        }
    }

    /// Map one RGB triple through the filter.
    #[inline]
    pub fn map_rgb(self, r: u8, g: u8, b: u8) -> [u8; 3] {
        match self {
            ColorFilter::Sepia => sepia(r, g, b),
            ColorFilter::Negative => [255 - r, 255 - g, 255 - b],
            ColorFilter::Gray => {
                let luma = filter_luma_u8(r, g, b);
                [luma, luma, luma]
            }
            ColorFilter::BlackWhite => {
                let v = if filter_luma(r, g, b) <= BLACK_WHITE_THRESHOLD {
                    0
                } else {
                    255
                };
                [v, v, v]
            }
        }
    }
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorFilter::ALL
            .into_iter()
            .find(|filter| filter.name() == s)
            .ok_or_else(|| {
                tracing::warn!("can't find filter {s}");
                FilterError::InvalidFilter(s.to_string())
            })
    }
}

/// Parse a filter selection where `"none"` (or an empty name) means no filter.
pub fn parse_filter_selection(name: &str) -> Result<Option<ColorFilter>, FilterError> {
    match name {
        "" | "none" => Ok(None),
        other => other.parse().map(Some),
    }
}

/// Apply a colour filter, returning a new image.
///
/// `None` ("no filter") is the caller's concern: pass a clone of the base
/// instead of calling this.
pub fn apply_color_filter(image: &DecodedImage, filter: ColorFilter) -> DecodedImage {
    let channels = image.channels();
    let mut output = image.pixels.clone();

    for px in output.chunks_exact_mut(channels) {
        let [r, g, b] = filter.map_rgb(px[0], px[1], px[2]);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        layout: image.layout,
        pixels: output,
    }
}

/// Apply a colour filter selected by name.
///
/// # Errors
///
/// Returns [`FilterError::InvalidFilter`] for an unknown name; nothing is
/// computed in that case.
pub fn color_filter(image: &DecodedImage, name: &str) -> Result<DecodedImage, FilterError> {
    let filter: ColorFilter = name.parse()?;
    Ok(apply_color_filter(image, filter))
}

/// Sepia tone matrix, clamped at 255 and truncated.
#[inline]
fn sepia(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let nr = 0.393 * r + 0.769 * g + 0.189 * b;
    let ng = 0.349 * r + 0.686 * g + 0.168 * b;
    let nb = 0.272 * r + 0.534 * g + 0.131 * b;
    // Inputs are non-negative, so only the upper bound needs clamping
    [nr.min(255.0) as u8, ng.min(255.0) as u8, nb.min(255.0) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    fn single(r: u8, g: u8, b: u8) -> DecodedImage {
        DecodedImage::new(1, 1, vec![r, g, b])
    }

    fn rgba_image() -> DecodedImage {
        DecodedImage::with_layout(
            2,
            1,
            PixelLayout::Rgba,
            vec![200, 100, 50, 17, 10, 240, 90, 203],
        )
    }

    #[test]
    fn test_sepia_reference_pixel() {
        // 0.393*200 + 0.769*100 + 0.189*50 = 164.95
        // 0.349*200 + 0.686*100 + 0.168*50 = 146.8
        // 0.272*200 + 0.534*100 + 0.131*50 = 114.35
        let out = apply_color_filter(&single(200, 100, 50), ColorFilter::Sepia);
        assert_eq!(out.pixels, vec![164, 146, 114]);
    }

    #[test]
    fn test_sepia_clamps_at_white() {
        let out = apply_color_filter(&single(255, 255, 255), ColorFilter::Sepia);
        // Blue: (0.272 + 0.534 + 0.131) * 255 = 238.935
        assert_eq!(out.pixels, vec![255, 255, 238]);
    }

    #[test]
    fn test_negative_inverts() {
        let out = apply_color_filter(&single(0, 128, 255), ColorFilter::Negative);
        assert_eq!(out.pixels, vec![255, 127, 0]);
    }

    #[test]
    fn test_gray_equal_channels() {
        let out = apply_color_filter(&single(200, 100, 50), ColorFilter::Gray);
        assert_eq!(out.pixels, vec![124, 124, 124]);
    }

    #[test]
    fn test_black_white_threshold_is_inclusive() {
        // Luma of (127, 127, 127) is exactly 127.0 -> black
        let out = apply_color_filter(&single(127, 127, 127), ColorFilter::BlackWhite);
        assert_eq!(out.pixels, vec![0, 0, 0]);

        // Luma of (128, 127, 127) is 127.3 -> white
        let out = apply_color_filter(&single(128, 127, 127), ColorFilter::BlackWhite);
        assert_eq!(out.pixels, vec![255, 255, 255]);
    }

    #[test]
    fn test_filters_preserve_alpha() {
        let img = rgba_image();
        for filter in ColorFilter::ALL {
            let out = apply_color_filter(&img, filter);
            assert_eq!(out.layout, PixelLayout::Rgba);
            assert_eq!(out.pixels[3], 17, "{filter} changed alpha");
            assert_eq!(out.pixels[7], 203, "{filter} changed alpha");
        }
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let img = rgba_image();
        let before = img.clone();
        let _ = apply_color_filter(&img, ColorFilter::Negative);
        assert_eq!(img, before);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sepia".parse::<ColorFilter>(), Ok(ColorFilter::Sepia));
        assert_eq!(
            "black_white".parse::<ColorFilter>(),
            Ok(ColorFilter::BlackWhite)
        );
        assert_eq!(
            "vintage".parse::<ColorFilter>(),
            Err(FilterError::InvalidFilter("vintage".to_string()))
        );
    }

    #[test]
    fn test_parse_selection_none() {
        assert_eq!(parse_filter_selection("none"), Ok(None));
        assert_eq!(parse_filter_selection(""), Ok(None));
        assert_eq!(parse_filter_selection("gray"), Ok(Some(ColorFilter::Gray)));
        assert!(parse_filter_selection("Gray").is_err());
    }

    #[test]
    fn test_color_filter_by_name() {
        let img = single(10, 20, 30);
        let out = color_filter(&img, "negative").unwrap();
        assert_eq!(out.pixels, vec![245, 235, 225]);

        let err = color_filter(&img, "unknown").unwrap_err();
        assert_eq!(err.to_string(), "can't find filter unknown");
    }

    #[test]
    fn test_labels_and_display() {
        assert_eq!(ColorFilter::BlackWhite.label(), "Black & White");
        assert_eq!(ColorFilter::BlackWhite.to_string(), "black_white");
    }

    #[test]
    fn test_serde_names_match_parse_names() {
        for filter in ColorFilter::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.name()));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::PixelLayout;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = DecodedImage> {
        (1u32..=8, 1u32..=8, any::<bool>()).prop_flat_map(|(w, h, alpha)| {
            let layout = if alpha { PixelLayout::Rgba } else { PixelLayout::Rgb };
            let len = (w * h) as usize * layout.channels();
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| DecodedImage::with_layout(w, h, layout, pixels))
        })
    }

    proptest! {
        /// Negative is exactly 255 - value, and applying it twice is the identity.
        #[test]
        fn prop_negative_involution(img in image_strategy()) {
            let once = apply_color_filter(&img, ColorFilter::Negative);
            let channels = img.channels();
            for (src, dst) in img.pixels.chunks_exact(channels).zip(once.pixels.chunks_exact(channels)) {
                prop_assert_eq!(dst[0], 255 - src[0]);
                prop_assert_eq!(dst[1], 255 - src[1]);
                prop_assert_eq!(dst[2], 255 - src[2]);
            }
            prop_assert_eq!(apply_color_filter(&once, ColorFilter::Negative), img);
        }

        /// Gray output has equal channels and untouched extra channels.
        #[test]
        fn prop_gray_equal_channels(img in image_strategy()) {
            let out = apply_color_filter(&img, ColorFilter::Gray);
            let channels = img.channels();
            for (src, dst) in img.pixels.chunks_exact(channels).zip(out.pixels.chunks_exact(channels)) {
                prop_assert_eq!(dst[0], dst[1]);
                prop_assert_eq!(dst[1], dst[2]);
                prop_assert_eq!(&dst[3..], &src[3..]);
            }
        }

        /// Black & white only produces pure black or pure white.
        #[test]
        fn prop_black_white_is_binary(img in image_strategy()) {
            let out = apply_color_filter(&img, ColorFilter::BlackWhite);
            for px in out.pixels.chunks_exact(img.channels()) {
                prop_assert!(px[0] == 0 || px[0] == 255);
                prop_assert!(px[0] == px[1] && px[1] == px[2]);
            }
        }

        /// Filters never change dimensions or layout.
        #[test]
        fn prop_filters_keep_shape(img in image_strategy()) {
            for filter in ColorFilter::ALL {
                let out = apply_color_filter(&img, filter);
                prop_assert_eq!((out.width, out.height, out.layout), (img.width, img.height, img.layout));
                prop_assert_eq!(out.pixels.len(), img.pixels.len());
            }
        }
    }
}
