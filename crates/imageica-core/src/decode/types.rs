//! Core types for image loading.

use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image loading operations.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No path was supplied.
    #[error("path is empty or has bad format")]
    EmptyPath,

    /// The file could not be read from disk.
    #[error("can't open the file {path}: {reason}")]
    Io { path: String, reason: String },

    /// The bytes are not a decodable image.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// The file extension is not one of the supported formats.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The file is an encrypted `.ima` container, which this crate cannot open.
    #[error("{0} is an encrypted container and must be decrypted first")]
    EncryptedContainer(String),
}

/// File formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Png,
    Jpeg,
    /// Opaque encrypted container produced by the encryption feature.
    Container,
}

impl ImageFormat {
    /// Extensions accepted when listing images in a directory.
    pub const LISTED_EXTENSIONS: [&'static str; 3] = ["jpg", "png", "ima"];

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "ima" => Some(ImageFormat::Container),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation.
    #[default]
    Bicubic,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Bicubic => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Channel arrangement of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelLayout {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Red, green, blue plus an alpha channel.
    Rgba,
}

impl PixelLayout {
    /// Number of interleaved bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(PixelLayout::Rgb),
            4 => Some(PixelLayout::Rgba),
            _ => None,
        }
    }
}

/// A decoded image with interleaved 8-bit pixel data.
///
/// The first three channels of every pixel are red, green and blue. Any
/// further channel (alpha for [`PixelLayout::Rgba`]) is an "extra" channel
/// that colour transforms copy through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel arrangement; fixed for the lifetime of the image.
    pub layout: PixelLayout,
    /// Pixel data in row-major order.
    /// Length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new RGB image with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, PixelLayout::Rgb, pixels)
    }

    /// Create a new image with an explicit channel layout.
    pub fn with_layout(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create an image filled with a single pixel value.
    ///
    /// Four bytes give an RGBA image, anything else RGB. Bytes past the
    /// layout's channel count are ignored and missing ones are zero.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Self {
        let layout = PixelLayout::from_channels(pixel.len()).unwrap_or_default();
        let mut value = [0u8; 4];
        for (slot, byte) in value.iter_mut().zip(pixel) {
            *slot = *byte;
        }
        let value = &value[..layout.channels()];

        let count = width as usize * height as usize;
        let pixels = value.repeat(count);
        Self::with_layout(width, height, layout, pixels)
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Rgb,
            pixels: img.into_raw(),
        }
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Rgba,
            pixels: img.into_raw(),
        }
    }

    /// Convert any decoded image, keeping alpha when the source has it.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::from_rgba_image(img.into_rgba8())
        } else {
            Self::from_rgb_image(img.into_rgb8())
        }
    }

    /// Convert to a DynamicImage for the image crate's codecs and filters.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        match self.layout {
            PixelLayout::Rgb => {
                RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(DynamicImage::ImageRgb8)
            }
            PixelLayout::Rgba => {
                RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(DynamicImage::ImageRgba8)
            }
        }
    }

    /// Number of interleaved bytes per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Get the channel values of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        &self.pixels[idx..idx + channels]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Bicubic.to_image_filter(),
            image::imageops::FilterType::CatmullRom
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::from_extension("ima"),
            Some(ImageFormat::Container)
        );
        assert_eq!(ImageFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(Path::new("/tmp/photo.Png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_path(Path::new("/tmp/noext")), None);
    }

    #[test]
    fn test_layout_channels() {
        assert_eq!(PixelLayout::Rgb.channels(), 3);
        assert_eq!(PixelLayout::Rgba.channels(), 4);
        assert_eq!(PixelLayout::from_channels(4), Some(PixelLayout::Rgba));
        assert_eq!(PixelLayout::from_channels(2), None);
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.layout, PixelLayout::Rgb);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 15000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_filled_rgba() {
        let img = DecodedImage::filled(2, 3, &[1, 2, 3, 4]);
        assert_eq!(img.layout, PixelLayout::Rgba);
        assert_eq!(img.byte_size(), 2 * 3 * 4);
        assert_eq!(img.pixel(1, 2), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_filled_short_pixel_pads_with_zero() {
        let img = DecodedImage::filled(2, 1, &[7]);
        assert_eq!(img.layout, PixelLayout::Rgb);
        assert_eq!(img.pixels, vec![7, 0, 0, 7, 0, 0]);

        let empty = DecodedImage::filled(1, 1, &[]);
        assert_eq!(empty.pixels, vec![0, 0, 0]);
    }

    #[test]
    fn test_filled_long_pixel_truncates_to_rgb() {
        let img = DecodedImage::filled(1, 1, &[1, 2, 3, 4, 5]);
        assert_eq!(img.pixels, vec![1, 2, 3]);
    }

    #[test]
    fn test_dynamic_round_trip_keeps_alpha() {
        let img = DecodedImage::filled(3, 2, &[10, 20, 30, 40]);
        let dynamic = img.to_dynamic().unwrap();
        assert!(dynamic.color().has_alpha());
        assert_eq!(DecodedImage::from_dynamic(dynamic), img);
    }

    #[test]
    fn test_to_dynamic_rejects_bad_buffer() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            layout: PixelLayout::Rgb,
            pixels: vec![0; 5],
        };
        assert!(img.to_dynamic().is_none());
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::EmptyPath;
        assert_eq!(err.to_string(), "path is empty or has bad format");

        let err = LoadError::UnsupportedFormat("gif".to_string());
        assert_eq!(err.to_string(), "Unsupported image format: gif");
    }
}
