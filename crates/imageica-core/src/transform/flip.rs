//! Mirroring without resizing.

use crate::decode::DecodedImage;

/// Mirror the image left to right.
pub fn flip_horizontal(image: &DecodedImage) -> DecodedImage {
    let channels = image.channels();
    let row_len = image.width as usize * channels;
    let mut output = image.pixels.clone();

    if row_len > 0 {
        for row in output.chunks_exact_mut(row_len) {
            let (mut left, mut right) = (0, row_len - channels);
            while left < right {
                for c in 0..channels {
                    row.swap(left + c, right + c);
                }
                left += channels;
                right -= channels;
            }
        }
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        layout: image.layout,
        pixels: output,
    }
}

/// Mirror the image top to bottom.
pub fn flip_vertical(image: &DecodedImage) -> DecodedImage {
    let row_len = image.width as usize * image.channels();
    let mut pixels = Vec::with_capacity(image.pixels.len());

    if row_len > 0 {
        for row in image.pixels.chunks_exact(row_len).rev() {
            pixels.extend_from_slice(row);
        }
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        layout: image.layout,
        pixels,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = DecodedImage> {
        (1u32..=9, 1u32..=9).prop_flat_map(|(w, h)| {
            let len = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| DecodedImage::new(w, h, pixels))
        })
    }

    proptest! {
        #[test]
        fn prop_flips_are_involutions(img in image_strategy()) {
            prop_assert_eq!(&flip_horizontal(&flip_horizontal(&img)), &img);
            prop_assert_eq!(&flip_vertical(&flip_vertical(&img)), &img);
        }

        /// Both flips together equal a half turn.
        #[test]
        fn prop_double_flip_is_half_turn(img in image_strategy()) {
            let flipped = flip_vertical(&flip_horizontal(&img));
            let rotated = crate::transform::rotate(&img, 180).unwrap();
            prop_assert_eq!(flipped, rotated);
        }
    }
}
