//! Resizing to exact dimensions and aspect-ratio helpers.
//!
//! Resizing goes through the `image` crate's resamplers. Aspect ratio is
//! never enforced here; callers that want it compute the other edge with
//! [`ratio_height`] or [`ratio_width`] first.

use super::TransformError;
use crate::decode::{DecodedImage, FilterType};

/// Resize an image to exactly `width` x `height`.
///
/// # Errors
///
/// - [`TransformError::InvalidDimensions`] if the target or the source has a
///   zero dimension
/// - [`TransformError::InvalidBuffer`] if the pixel buffer is inconsistent
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if image.width == 0 || image.height == 0 {
        return Err(TransformError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let dynamic = image.to_dynamic().ok_or(TransformError::InvalidBuffer)?;
    let resized = dynamic.resize_exact(width, height, filter.to_image_filter());

    Ok(DecodedImage::from_dynamic(resized))
}

/// Height that keeps the aspect ratio when the width becomes `target_width`.
///
/// Truncates toward zero; a zero source width yields 0.
pub fn ratio_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    (target_width as f64 / width as f64 * height as f64) as u32
}

/// Width that keeps the aspect ratio when the height becomes `target_height`.
///
/// Truncates toward zero; a zero source height yields 0.
pub fn ratio_width(width: u32, height: u32, target_height: u32) -> u32 {
    if height == 0 {
        return 0;
    }
    (target_height as f64 / height as f64 * width as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 10, 90, FilterType::default()).unwrap();
        assert_eq!((resized.width, resized.height), (10, 90));
    }

    #[test]
    fn test_resize_same_dimensions_is_copy() {
        let img = create_test_image(20, 10);
        let resized = resize(&img, 20, 10, FilterType::Bicubic).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_keeps_alpha() {
        let img = DecodedImage::filled(8, 8, &[10, 20, 30, 77]);
        let resized = resize(&img, 3, 5, FilterType::Nearest).unwrap();
        assert_eq!(resized.layout, PixelLayout::Rgba);
        assert_eq!(resized.pixel(1, 1), &[10, 20, 30, 77]);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert_eq!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(TransformError::InvalidDimensions {
                width: 0,
                height: 50
            })
        );
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_empty_source_error() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(resize(&img, 4, 4, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Bicubic,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }

    #[test]
    fn test_ratio_helpers() {
        // 800x600 fit to 400 wide -> 300 high
        assert_eq!(ratio_height(800, 600, 400), 300);
        // 800x600 fit to 300 high -> 400 wide
        assert_eq!(ratio_width(800, 600, 300), 400);
        // 3x2 to width 4 -> 2.666.. truncated
        assert_eq!(ratio_height(3, 2, 4), 2);
        assert_eq!(ratio_height(0, 10, 5), 0);
        assert_eq!(ratio_width(10, 0, 5), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Output dimensions are always exactly the requested ones.
        #[test]
        fn prop_resize_exact_dimensions(
            src_w in 1u32..=24,
            src_h in 1u32..=24,
            w in 1u32..=48,
            h in 1u32..=48,
            alpha in any::<bool>(),
        ) {
            let pixel: &[u8] = if alpha { &[1, 2, 3, 4] } else { &[1, 2, 3] };
            let img = DecodedImage::filled(src_w, src_h, pixel);
            let out = resize(&img, w, h, FilterType::Bicubic).unwrap();
            prop_assert_eq!((out.width, out.height), (w, h));
            prop_assert_eq!(out.layout, img.layout);
            prop_assert_eq!(out.pixels.len(), (w * h) as usize * img.channels());
        }
    }
}
