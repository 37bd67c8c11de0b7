//! Mapping from UI slider positions to pipeline parameters.
//!
//! Sliders are integers in `[SLIDER_MIN, SLIDER_MAX]` resting at
//! [`SLIDER_DEFAULT`]. Tone sliders map linearly onto an operation's factor
//! range; channel sliders map onto a ratio around 1.0.

/// Lowest slider position.
pub const SLIDER_MIN: i32 = -99;

/// Highest slider position.
pub const SLIDER_MAX: i32 = 100;

/// Resting slider position.
pub const SLIDER_DEFAULT: i32 = 0;

/// Map a slider position linearly onto `[min, max]`.
///
/// Positions outside the slider range are clamped first.
pub fn slider_to_factor(value: i32, min: f64, max: f64) -> f64 {
    let value = value.clamp(SLIDER_MIN, SLIDER_MAX);
    let t = (value - SLIDER_MIN) as f64 / (SLIDER_MAX - SLIDER_MIN) as f64;
    min + t * (max - min)
}

/// Map a channel slider position onto a scaling ratio.
///
/// `0` is the identity ratio 1.0, `SLIDER_MIN` gives 0.01 and `SLIDER_MAX`
/// gives 2.0.
pub fn slider_to_ratio(value: i32) -> f64 {
    let value = value.clamp(SLIDER_MIN, SLIDER_MAX);
    (value + SLIDER_MAX) as f64 / SLIDER_MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_endpoints() {
        assert_eq!(slider_to_factor(SLIDER_MIN, 0.5, 1.5), 0.5);
        assert_eq!(slider_to_factor(SLIDER_MAX, 0.5, 1.5), 1.5);
    }

    #[test]
    fn test_factor_default_position() {
        // 99 / 199 of the way along
        let f = slider_to_factor(SLIDER_DEFAULT, 0.5, 1.5);
        assert!((f - (0.5 + 99.0 / 199.0)).abs() < 1e-12);
    }

    #[test]
    fn test_factor_clamps_out_of_range_positions() {
        assert_eq!(slider_to_factor(-500, -1.0, 3.0), -1.0);
        assert_eq!(slider_to_factor(500, -1.0, 3.0), 3.0);
    }

    #[test]
    fn test_ratio_mapping() {
        assert_eq!(slider_to_ratio(0), 1.0);
        assert_eq!(slider_to_ratio(SLIDER_MIN), 0.01);
        assert_eq!(slider_to_ratio(SLIDER_MAX), 2.0);
        assert_eq!(slider_to_ratio(50), 1.5);
    }

    #[test]
    fn test_ratio_is_always_positive() {
        for value in SLIDER_MIN..=SLIDER_MAX {
            assert!(slider_to_ratio(value) > 0.0);
        }
    }
}
