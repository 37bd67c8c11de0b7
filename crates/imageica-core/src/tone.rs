//! Brightness, contrast and sharpness with enforced factor ranges.
//!
//! Each operation checks its factor against a closed interval and only then
//! hands the image to an [`Enhancer`]. Out-of-range factors fail before the
//! enhancer is called.
//!
//! | Operation  | Range         |
//! |------------|---------------|
//! | brightness | `[0.5, 1.5]`  |
//! | contrast   | `[0.5, 1.5]`  |
//! | sharpness  | `[-1.0, 3.0]` |
//!
//! Negative sharpness blurs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::enhance::Enhancer;
use crate::slider::slider_to_factor;

/// Errors raised by tone adjustments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToneError {
    /// The factor lies outside the operation's closed interval.
    #[error("{operation} factor {factor} is out of range [{min}, {max}]")]
    OutOfRange {
        operation: ToneOperation,
        factor: f64,
        min: f64,
        max: f64,
    },
}

/// A tone adjustment delegated to the enhancement capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneOperation {
    Brightness,
    Contrast,
    Sharpness,
}

impl ToneOperation {
    /// Operations in pipeline application order.
    pub const ALL: [ToneOperation; 3] = [
        ToneOperation::Brightness,
        ToneOperation::Contrast,
        ToneOperation::Sharpness,
    ];

    /// Inclusive `(min, max)` factor range.
    pub fn range(self) -> (f64, f64) {
        match self {
            ToneOperation::Brightness => (0.5, 1.5),
            ToneOperation::Contrast => (0.5, 1.5),
            ToneOperation::Sharpness => (-1.0, 3.0),
        }
    }

    /// Validate a factor against [`ToneOperation::range`].
    ///
    /// NaN is never in range.
    pub fn validate(self, factor: f64) -> Result<f64, ToneError> {
        let (min, max) = self.range();
        if (min..=max).contains(&factor) {
            Ok(factor)
        } else {
            Err(ToneError::OutOfRange {
                operation: self,
                factor,
                min,
                max,
            })
        }
    }

    /// Map a UI slider position onto this operation's factor range.
    pub fn factor_from_slider(self, value: i32) -> f64 {
        let (min, max) = self.range();
        slider_to_factor(value, min, max)
    }

    fn enhance<E: Enhancer + ?Sized>(
        self,
        enhancer: &E,
        image: &DecodedImage,
        factor: f64,
    ) -> DecodedImage {
        match self {
            ToneOperation::Brightness => enhancer.enhance_brightness(image, factor),
            ToneOperation::Contrast => enhancer.enhance_contrast(image, factor),
            ToneOperation::Sharpness => enhancer.enhance_sharpness(image, factor),
        }
    }
}

impl fmt::Display for ToneOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToneOperation::Brightness => "brightness",
            ToneOperation::Contrast => "contrast",
            ToneOperation::Sharpness => "sharpness",
        })
    }
}

/// Validate `factor` and apply `operation` through `enhancer`.
pub fn adjust<E: Enhancer + ?Sized>(
    enhancer: &E,
    image: &DecodedImage,
    operation: ToneOperation,
    factor: f64,
) -> Result<DecodedImage, ToneError> {
    let factor = operation.validate(factor)?;
    Ok(operation.enhance(enhancer, image, factor))
}

/// Adjust brightness; `factor` must lie in `[0.5, 1.5]`.
pub fn brightness<E: Enhancer + ?Sized>(
    enhancer: &E,
    image: &DecodedImage,
    factor: f64,
) -> Result<DecodedImage, ToneError> {
    adjust(enhancer, image, ToneOperation::Brightness, factor)
}

/// Adjust contrast; `factor` must lie in `[0.5, 1.5]`.
pub fn contrast<E: Enhancer + ?Sized>(
    enhancer: &E,
    image: &DecodedImage,
    factor: f64,
) -> Result<DecodedImage, ToneError> {
    adjust(enhancer, image, ToneOperation::Contrast, factor)
}

/// Adjust sharpness; `factor` must lie in `[-1.0, 3.0]`.
pub fn sharpness<E: Enhancer + ?Sized>(
    enhancer: &E,
    image: &DecodedImage,
    factor: f64,
) -> Result<DecodedImage, ToneError> {
    adjust(enhancer, image, ToneOperation::Sharpness, factor)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every slider position maps to a factor the operation accepts.
        #[test]
        fn prop_slider_factors_are_valid(
            value in -99i32..=100,
            op in prop::sample::select(ToneOperation::ALL.to_vec()),
        ) {
            let factor = op.factor_from_slider(value);
            prop_assert!(op.validate(factor).is_ok(), "{op} {value} -> {factor}");
        }
    }
}
