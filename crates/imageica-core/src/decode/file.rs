//! Image decoding from files and byte buffers, with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodedImage, ImageFormat, LoadError, Orientation};
use crate::transform::{self, TransformError};

/// Decode an image file from disk.
///
/// The format is inferred from the extension; `.png`, `.jpg` and `.jpeg`
/// are decoded, `.ima` containers are rejected with
/// [`LoadError::EncryptedContainer`].
///
/// # Errors
///
/// Returns `LoadError::EmptyPath` for an empty path, `LoadError::Io` if the
/// file cannot be read, and `LoadError::Corrupted` if it cannot be decoded.
pub fn decode_path(path: impl AsRef<Path>) -> Result<DecodedImage, LoadError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        tracing::error!("path is empty or has bad format");
        return Err(LoadError::EmptyPath);
    }

    match ImageFormat::from_path(path) {
        Some(ImageFormat::Container) => {
            tracing::error!("refusing to decode encrypted container {}", path.display());
            return Err(LoadError::EncryptedContainer(path.display().to_string()));
        }
        Some(_) => {}
        None => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            tracing::error!("unsupported image format {ext:?} for {}", path.display());
            return Err(LoadError::UnsupportedFormat(ext));
        }
    }

    let bytes = std::fs::read(path).map_err(|e| {
        tracing::error!("can't open the file {}", path.display());
        LoadError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    let image = decode_bytes(&bytes)?;
    tracing::info!(
        "loaded {} ({}x{}, {} channels)",
        path.display(),
        image.width,
        image.height,
        image.channels()
    );
    Ok(image)
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The container format is sniffed from the bytes themselves.
///
/// # Errors
///
/// Returns `LoadError::Corrupted` if the bytes are not a decodable image.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Corrupted("empty buffer".to_string()));
    }

    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::Corrupted(e.to_string()))?;

    let img = reader.decode().map_err(|e| {
        tracing::error!("failed to decode image: {e}");
        LoadError::Corrupted(e.to_string())
    })?;

    apply_orientation(DecodedImage::from_dynamic(img), orientation)
        .map_err(|e| LoadError::Corrupted(e.to_string()))
}

/// EXIF orientation of image bytes, `Orientation::Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Undo the EXIF orientation so the image displays upright.
///
/// Uses the same transforms as the preview pipeline; `rotate` turns
/// counter-clockwise, so a clockwise quarter turn is `rotate(_, 270)`.
fn apply_orientation(
    img: DecodedImage,
    orientation: Orientation,
) -> Result<DecodedImage, TransformError> {
    Ok(match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => transform::flip_horizontal(&img),
        Orientation::Rotate180 => transform::rotate(&img, 180)?,
        Orientation::FlipVertical => transform::flip_vertical(&img),
        Orientation::Transpose => transform::flip_horizontal(&transform::rotate(&img, 270)?),
        Orientation::Rotate90CW => transform::rotate(&img, 270)?,
        Orientation::Transverse => transform::flip_horizontal(&transform::rotate(&img, 90)?),
        Orientation::Rotate270CW => transform::rotate(&img, 90)?,
    })
}
