//! Scalar helpers for ranges, mappings and rounding.
//!
//! Everything here is generic over `num_traits` bounds so the same function
//! serves integer counters and float signals. All functions are
//! allocation-free and suitable for `no_std`.
//!
//! # Ranges
//!
//! | Function | Range | Behaviour past the bounds |
//! |----------|-------|---------------------------|
//! | [`clamp`] | `[min, max]` | pinned |
//! | [`modulo`] | `[min, max)` | wraps around |
//! | [`reflect`] | `[min, max]` | folds back (triangle wave) |
//!
//! # Mappings
//!
//! [`line`], [`ramp`] and [`lerp`] share the same linear formula and differ
//! only in clamping: none, below only, and both sides. [`sigmoid`] is a
//! smooth stand-in for [`lerp`]; [`step`] is its hard limit.

use num_traits::float::FloatCore;
use num_traits::{Float, Num, NumCast, Signed};

/// The smaller of two values; `v2` when they compare equal or unordered.
#[inline]
pub fn min<T: PartialOrd>(v1: T, v2: T) -> T {
    if v1 < v2 { v1 } else { v2 }
}

/// The larger of two values; `v2` when they compare equal or unordered.
#[inline]
pub fn max<T: PartialOrd>(v1: T, v2: T) -> T {
    if v1 > v2 { v1 } else { v2 }
}

/// Clamp `value` to `[min_value, max_value]`, both ends inclusive.
///
/// # Example
/// ```rust
/// use ticknum_core::math::clamp;
///
/// assert_eq!(clamp(-3, -2, 2), -2);
/// assert_eq!(clamp(2.0, -2.0, 2.0), 2.0);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min_value: T, max_value: T) -> T {
    min(max_value, max(min_value, value))
}

/// `min_value + (value - min_value) mod (max_value - min_value)`, in
/// `[min_value, max_value)`.
///
/// The remainder is taken with truncating division and shifted up by one
/// range when negative, so the result never drops below `min_value`.
///
/// # Example
/// ```rust
/// use ticknum_core::math::modulo;
///
/// let wrapped: Vec<i32> = (0..6).map(|i| modulo(i, 2, 5)).collect();
/// assert_eq!(wrapped, [3, 4, 2, 3, 4, 2]);
/// ```
#[inline]
pub fn modulo<T: Num + PartialOrd + Copy>(value: T, min_value: T, max_value: T) -> T {
    let range = max_value - min_value;
    let mut remainder = (value - min_value) % range;
    if remainder < T::zero() {
        remainder = remainder + range;
    }
    min_value + remainder
}

/// Fold `value` back and forth between the bounds, both inclusive.
///
/// # Example
/// ```rust
/// use ticknum_core::math::reflect;
///
/// let folded: Vec<i32> = (0..10).map(|i| reflect(i, 0, 3)).collect();
/// assert_eq!(folded, [0, 1, 2, 3, 2, 1, 0, 1, 2, 3]);
/// ```
#[inline]
pub fn reflect<T: Num + PartialOrd + Copy>(value: T, min_value: T, max_value: T) -> T {
    let two = T::one() + T::one();
    let cycle_max = two * max_value - min_value;
    let c = modulo(value, min_value, cycle_max);
    if c <= max_value { c } else { two * max_value - c }
}

/// Unclamped linear map of `[input_min, input_max]` onto
/// `[output_min, output_max]`.
#[inline]
pub fn line<T: Num + Copy>(
    value: T,
    input_min: T,
    input_max: T,
    output_min: T,
    output_max: T,
) -> T {
    output_min + (value - input_min) * (output_max - output_min) / (input_max - input_min)
}

/// Linear map that returns `output_min` at or below `input_min` and
/// extrapolates above `input_max`.
#[inline]
pub fn ramp<T: Num + PartialOrd + Copy>(
    value: T,
    input_min: T,
    input_max: T,
    output_min: T,
    output_max: T,
) -> T {
    if value <= input_min {
        return output_min;
    }
    line(value, input_min, input_max, output_min, output_max)
}

/// Linear map clamped to `[output_min, output_max]` outside the input range.
///
/// # Example
/// ```rust
/// use ticknum_core::math::lerp;
///
/// assert_eq!(lerp(4, 3, 5, 10, 20), 15);
/// assert_eq!(lerp(6, 3, 5, 10, 20), 20);
/// ```
#[inline]
pub fn lerp<T: Num + PartialOrd + Copy>(
    value: T,
    input_min: T,
    input_max: T,
    output_min: T,
    output_max: T,
) -> T {
    if value >= input_max {
        return output_max;
    }
    ramp(value, input_min, input_max, output_min, output_max)
}

/// Logistic curve through the midpoint of both ranges, approaching
/// `output_min` and `output_max` asymptotically.
#[inline]
pub fn sigmoid<T: Float>(value: T, input_min: T, input_max: T, output_min: T, output_max: T) -> T {
    let two = T::one() + T::one();
    let w = ((input_max + input_min - two * value) / (input_max - input_min)).exp();
    (output_max - output_min) / (T::one() + w) + output_min
}

/// `output_min` below `threshold`, `output_max` from `threshold` up.
#[inline]
pub fn step<T: PartialOrd>(input: T, threshold: T, output_min: T, output_max: T) -> T {
    if input < threshold { output_min } else { output_max }
}

/// Fractional part in `[0, 1)`, also for negative inputs.
///
/// `x == frac(x) + floor(x)` holds within rounding.
#[inline]
pub fn frac<T: FloatCore>(x: T) -> T {
    x - x.floor()
}

/// The largest integral value not greater than `x`.
#[inline]
pub fn floor<T: FloatCore>(x: T) -> T {
    x.floor()
}

/// Whichever of `v1` and `v2` lies farther from `center`; `v2` on a tie.
///
/// # Example
/// ```rust
/// use ticknum_core::math::extreme;
///
/// assert_eq!(extreme(-1, 5, 0), 5);
/// assert_eq!(extreme(1, -5, 0), -5);
/// ```
#[inline]
pub fn extreme<T: Signed + PartialOrd + Copy>(v1: T, v2: T, center: T) -> T {
    if (v1 - center).abs() > (v2 - center).abs() { v1 } else { v2 }
}

/// Convert a count to `T`, yielding NaN if it does not fit.
#[inline]
pub(crate) fn from_count<T: FloatCore>(n: usize) -> T {
    <T as NumCast>::from(n).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn min_max_pick_sides() {
        assert_eq!(min(3, 4), 3);
        assert_eq!(min(4, 3), 3);
        assert_eq!(max(3, 4), 4);
        assert_eq!(max(4, 3), 4);
    }

    #[test]
    fn clamp_int_and_float() {
        for (input, expected) in [(-3, -2), (-2, -2), (-1, -1), (2, 2), (3, 2)] {
            assert_eq!(clamp(input, -2, 2), expected);
            assert!(close(clamp(input as f32, -2.0, 2.0), expected as f32));
        }
    }

    #[test]
    fn modulo_int() {
        let cases = [(-5, 1), (-2, 1), (0, 3), (1, 1), (3, 3), (4, 1), (14, 2)];
        for (input, expected) in cases {
            assert_eq!(modulo(input, 1, 4), expected, "modulo({input}, 1, 4)");
        }
    }

    #[test]
    fn modulo_float() {
        let cases = [
            (-2.9, 3.1),
            (0.9, 3.9),
            (1.9, 1.9),
            (3.9, 3.9),
            (4.9, 1.9),
            (14.9, 2.9),
            (4.0, 1.0),
        ];
        for (input, expected) in cases {
            assert!(close(modulo(input, 1.0, 4.0), expected), "modulo({input}, 1, 4)");
        }
    }

    #[test]
    fn reflect_int() {
        let cases = [
            ((-1, 1, 4), 3),
            ((-4, 1, 4), 2),
            ((1, 1, 4), 1),
            ((3, 1, 4), 3),
            ((4, 1, 4), 4),
            ((5, 1, 4), 3),
            ((11, 1, 4), 3),
            ((-1, 2, 5), 5),
            ((-4, 2, 5), 2),
            ((1, 2, 5), 3),
            ((5, 2, 5), 5),
            ((11, 2, 5), 5),
            ((-1, 2, 6), 5),
            ((-4, 2, 6), 4),
            ((1, 2, 6), 3),
            ((11, 2, 6), 3),
        ];
        for ((value, lo, hi), expected) in cases {
            assert_eq!(reflect(value, lo, hi), expected, "reflect({value}, {lo}, {hi})");
        }
    }

    #[test]
    fn reflect_float() {
        let cases = [
            (-1.1, 3.1),
            (-4.1, 2.9),
            (1.1, 1.1),
            (4.1, 4.1),
            (11.1, 4.1),
            (4.6, 4.4),
            (0.9, 1.1),
        ];
        for (input, expected) in cases {
            assert!(close(reflect(input, 1.0, 4.5), expected), "reflect({input})");
        }
    }

    #[test]
    fn mappings_differ_only_in_clamping() {
        assert_eq!(line(2, 3, 5, 10, 20), 5);
        assert_eq!(ramp(2, 3, 5, 10, 20), 10);
        assert_eq!(lerp(2, 3, 5, 10, 20), 10);

        assert_eq!(line(6, 3, 5, 10, 20), 25);
        assert_eq!(ramp(6, 3, 5, 10, 20), 25);
        assert_eq!(lerp(6, 3, 5, 10, 20), 20);

        assert_eq!(lerp(4, 3, 5, 10, 20), 15);
        assert!(close(lerp(0.5, 0.0, 1.0, 10.0, 21.0), 15.5));
        assert!(close(ramp(0.5, 0.0, 1.0, 10.0, 21.0), 15.5));
        assert!(close(line(0.5, 0.0, 1.0, 10.0, 21.0), 15.5));
    }

    #[test]
    fn sigmoid_saturates_and_centres() {
        assert!(close(sigmoid(100.0, -5.0, 5.0, -4.0, 4.0), 4.0));
        assert!(close(sigmoid(-100.0, -5.0, 5.0, -4.0, 4.0), -4.0));
        assert!(close(sigmoid(0.0, -5.0, 5.0, -4.0, 4.0), 0.0));
    }

    #[test]
    fn step_threshold_maps_to_max() {
        assert_eq!(step(-5, 1, -3, 4), -3);
        assert_eq!(step(5, 1, -3, 4), 4);
        assert_eq!(step(1, 1, -3, 4), 4);
    }

    #[test]
    fn frac_and_floor() {
        assert!((frac(4.25_f64) - 0.25).abs() < 1e-12);
        assert!((frac(-4.25_f64) - 0.75).abs() < 1e-12);
        assert_eq!(floor(4.25_f64), 4.0);
        assert_eq!(floor(-4.25_f64), -5.0);
        assert_eq!(frac(-3.0_f64), 0.0);
    }

    #[test]
    fn extreme_prefers_farther_value() {
        assert_eq!(extreme(1, 2, 3), 1);
        assert_eq!(extreme(4, 5, 3), 5);
        assert_eq!(extreme(2, 5, 3), 5);
        assert_eq!(extreme(5, 2, 3), 5);
        assert_eq!(extreme(-5, 3, 0), -5);
        assert_eq!(extreme(2, 4, 3), 4);
    }
}
