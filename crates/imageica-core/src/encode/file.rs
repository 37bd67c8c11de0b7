//! PNG and JPEG encoding for saving edited images.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{DecodedImage, ImageFormat, PixelLayout};

/// Errors that can occur while encoding or saving an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The destination extension is not a writable format
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// `.ima` containers are produced by the encryption feature, not by the encoder
    #[error("{0} is an encrypted container format and cannot be written by the encoder")]
    EncryptedContainer(String),

    /// The codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded bytes failed
    #[error("can't write the file {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Encode an image to PNG bytes, keeping the alpha channel if present.
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let color = match image.layout {
        PixelLayout::Rgb => ExtendedColorType::Rgb8,
        PixelLayout::Rgba => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image to JPEG bytes.
///
/// JPEG has no alpha channel, so extra channels are dropped. `quality` is
/// clamped to 1-100.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-90: Good quality for sharing
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let rgb: Vec<u8> = match image.layout {
        PixelLayout::Rgb => image.pixels.clone(),
        PixelLayout::Rgba => image
            .pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
    };

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image in the format implied by `path`'s extension and write it.
///
/// # Errors
///
/// `EncodeError::UnsupportedFormat` for unknown extensions,
/// `EncodeError::EncryptedContainer` for `.ima`, and `EncodeError::Io` if
/// the file cannot be written.
pub fn encode_path(
    image: &DecodedImage,
    path: impl AsRef<Path>,
    jpeg_quality: u8,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = match ImageFormat::from_path(path) {
        Some(ImageFormat::Png) => encode_png(image)?,
        Some(ImageFormat::Jpeg) => encode_jpeg(image, jpeg_quality)?,
        Some(ImageFormat::Container) => {
            return Err(EncodeError::EncryptedContainer(path.display().to_string()))
        }
        None => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            return Err(EncodeError::UnsupportedFormat(ext));
        }
    };

    std::fs::write(path, &bytes).map_err(|e| EncodeError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        "saved {}x{} image to {} ({} bytes)",
        image.width,
        image.height,
        path.display(),
        bytes.len()
    );
    Ok(())
}

fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * image.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}
