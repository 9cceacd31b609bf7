//! Sampled response curves.
//!
//! A response curve maps an input onto an output by linear interpolation
//! between stored samples, which makes arbitrary hand-tuned shapes as cheap
//! to evaluate as a formula.
//!
//! | Type | Input spacing | Outside the range |
//! |------|---------------|-------------------|
//! | [`ResponseCurve`] | even | clamped to the end samples |
//! | [`XyResponseCurve`] | arbitrary, increasing | clamped to the end samples |
//! | [`PeriodicResponseCurve`] | even | wrapped into range |
//!
//! ```rust
//! use ticknum_core::{ResponseCurve, ResponseFunction};
//!
//! let curve = ResponseCurve::new(1.0_f32, 3.0, [3.0, 4.0, 6.0]);
//! assert_eq!(curve.evaluate(0.0), 3.0);
//! assert!((curve.evaluate(2.5) - 5.0).abs() < 1e-6);
//! ```

use num_traits::float::FloatCore;

use crate::math::{lerp, modulo};

/// A function of one variable.
pub trait ResponseFunction<T> {
    /// Output for `input`.
    fn evaluate(&self, input: T) -> T;
}

/// `N` output samples evenly spaced over `[input_min, input_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseCurve<T, const N: usize> {
    input_min: T,
    input_max: T,
    outputs: [T; N],
    period: T,
}

impl<T: FloatCore, const N: usize> ResponseCurve<T, N> {
    /// Create a curve; `outputs[0]` sits at `input_min`, `outputs[N - 1]` at
    /// `input_max`.
    pub fn new(input_min: T, input_max: T, outputs: [T; N]) -> Self {
        const { assert!(N > 1, "a response curve needs at least two samples") };
        Self {
            input_min,
            input_max,
            outputs,
            period: (input_max - input_min) / crate::math::from_count(N - 1),
        }
    }

    /// Lower end of the input range.
    pub fn input_min(&self) -> T {
        self.input_min
    }

    /// Upper end of the input range.
    pub fn input_max(&self) -> T {
        self.input_max
    }

    /// Stored output samples.
    pub fn outputs(&self) -> &[T; N] {
        &self.outputs
    }
}

impl<T: FloatCore, const N: usize> ResponseFunction<T> for ResponseCurve<T, N> {
    fn evaluate(&self, input: T) -> T {
        if input <= self.input_min {
            return self.outputs[0];
        }
        if input >= self.input_max {
            return self.outputs[N - 1];
        }

        let index = ((input - self.input_min) / self.period)
            .floor()
            .to_usize()
            .map_or(0, |i| i.min(N - 2));
        let sample_min = self.input_min + self.period * crate::math::from_count(index);
        lerp(
            input,
            sample_min,
            sample_min + self.period,
            self.outputs[index],
            self.outputs[index + 1],
        )
    }
}

/// Output samples at arbitrary, strictly increasing input positions.
///
/// Slower than [`ResponseCurve`] (a binary search per evaluation) but able to
/// represent the inverse of any monotonic curve through
/// [`make_inverse`](Self::make_inverse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyResponseCurve<T, const N: usize> {
    inputs: [T; N],
    outputs: [T; N],
}

impl<T: FloatCore, const N: usize> XyResponseCurve<T, N> {
    /// Create a curve from paired samples. `inputs` must be strictly
    /// increasing.
    pub fn new(inputs: [T; N], outputs: [T; N]) -> Self {
        const { assert!(N > 1, "a response curve needs at least two samples") };
        Self { inputs, outputs }
    }

    /// Index of the input sample at or to the left of `input`.
    pub fn find_input_index(&self, input: T) -> usize {
        let (mut lo, mut hi) = (0, N);
        while hi > lo + 1 {
            let mid = (lo + hi) / 2;
            if input < self.inputs[mid] {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    }

    /// Swap inputs and outputs.
    ///
    /// The result is only a valid curve when the outputs were strictly
    /// increasing.
    pub fn make_inverse(&mut self) {
        core::mem::swap(&mut self.inputs, &mut self.outputs);
    }
}

impl<T: FloatCore, const N: usize> ResponseFunction<T> for XyResponseCurve<T, N> {
    fn evaluate(&self, input: T) -> T {
        if input <= self.inputs[0] {
            return self.outputs[0];
        }
        if input >= self.inputs[N - 1] {
            return self.outputs[N - 1];
        }

        // NaN fails both guards above and would search past the last pair
        let index = self.find_input_index(input).min(N - 2);
        let (x0, x1) = (self.inputs[index], self.inputs[index + 1]);
        let (y0, y1) = (self.outputs[index], self.outputs[index + 1]);
        let tau = (input - x0) / (x1 - x0);
        (y1 - y0) * tau + y0
    }
}

/// A [`ResponseCurve`] repeated with period `input_max - input_min`.
///
/// The output at `input_max` equals the output at `input_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicResponseCurve<T, const N: usize> {
    curve: ResponseCurve<T, N>,
}

impl<T: FloatCore, const N: usize> PeriodicResponseCurve<T, N> {
    /// Create a periodic curve over one period of samples.
    pub fn new(input_min: T, input_max: T, outputs: [T; N]) -> Self {
        Self {
            curve: ResponseCurve::new(input_min, input_max, outputs),
        }
    }

    /// Start of the period.
    pub fn input_min(&self) -> T {
        self.curve.input_min()
    }

    /// End of the period.
    pub fn input_max(&self) -> T {
        self.curve.input_max()
    }
}

impl<T: FloatCore, const N: usize> ResponseFunction<T> for PeriodicResponseCurve<T, N> {
    fn evaluate(&self, input: T) -> T {
        let wrapped = modulo(input, self.curve.input_min(), self.curve.input_max());
        self.curve.evaluate(wrapped)
    }
}
