//! PID-style weighted combination of a value, its derivatives and its
//! integrals.
//!
//! With `D_k` the k-th derivative and `I_k` the k-th windowed integral:
//!
//! ```text
//! y = a * x + b[0] * D_1(x) + b[1] * D_2(x) + ... + c[0] * I_1(x) + c[1] * I_2(x) + ...
//! ```
//!
//! The aggregate is not part of an order chain itself: it owns one
//! [`DifferentiableNumber`] and one [`IntegrableNumber`], feeds both the same
//! samples, and recomputes the weighted sum on every read.
//!
//! # Forcing
//!
//! Forcing resets the derivative chain to "no change" and the integral chain
//! to "steady state at x", so right after `force(x)` the value is
//! `a * x + Σ c[k] * x`, which equals `x` only when the integral gains sum to
//! `1 - a`.

use num_traits::float::FloatCore;

use crate::differentiable::DifferentiableNumber;
use crate::integrable::IntegrableNumber;
use crate::ordered::OrderedNumber;
use crate::time::TimeBase;

/// A value presented as a weighted sum of itself, its derivatives and its
/// integrals.
///
/// # Type parameters
///
/// - `DN`: number of derivative orders (and derivative gains)
/// - `IN`: number of integral orders (and integral gains)
/// - `IM`: number of samples each integral window spans
///
/// # Example
///
/// ```rust
/// use ticknum_core::PidBufferedNumber;
///
/// // Proportional plus first-order integral, averaged over 4 ticks
/// let mut pid = PidBufferedNumber::<f32, 0, 1, 4>::new(0.0, 0.5, [], [0.5]);
/// pid.force(2.0);
/// assert!((pid.value() - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct PidBufferedNumber<T, const DN: usize, const IN: usize, const IM: usize> {
    current: T,
    value_factor: T,
    d_factors: [T; DN],
    i_factors: [T; IN],
    differentiable: DifferentiableNumber<T, DN>,
    integrable: IntegrableNumber<T, IM, IN>,
    time: TimeBase<T>,
}

impl<T: FloatCore, const DN: usize, const IN: usize, const IM: usize>
    PidBufferedNumber<T, DN, IN, IM>
{
    /// Create a PID aggregate.
    ///
    /// # Arguments
    /// * `initial` - A zero of `T`; seeds the value, every derivative and every integral
    /// * `value_factor` - Gain on the raw value
    /// * `d_factors` - Gain on derivative `k + 1` at index `k`
    /// * `i_factors` - Gain on integral `k + 1` at index `k`
    pub fn new(initial: T, value_factor: T, d_factors: [T; DN], i_factors: [T; IN]) -> Self {
        Self::with_time_base(initial, value_factor, d_factors, i_factors, TimeBase::default())
    }

    /// Create a PID aggregate with an explicit time base shared by both chains.
    pub fn with_time_base(
        initial: T,
        value_factor: T,
        d_factors: [T; DN],
        i_factors: [T; IN],
        time: TimeBase<T>,
    ) -> Self {
        Self {
            current: initial,
            value_factor,
            d_factors,
            i_factors,
            differentiable: DifferentiableNumber::with_time_base(initial, time),
            integrable: IntegrableNumber::with_time_base(initial, time),
            time,
        }
    }

    /// Feed a new sample to both chains, `elapsed` time after the previous one.
    pub fn set_value(&mut self, value: T, elapsed: T) {
        self.current = value;
        self.differentiable.set_value(value, elapsed);
        self.integrable.set_value(value, elapsed);
    }

    /// [`set_value`](Self::set_value) with the default time unit.
    pub fn update(&mut self, value: T) {
        self.set_value(value, self.time.time_unit());
    }

    /// Force both chains to `value`.
    ///
    /// The derivative chain resets to "no change" using the default time
    /// unit; the integral windows are refilled at spacing `elapsed`.
    pub fn force_value(&mut self, value: T, elapsed: T) {
        self.current = value;
        self.differentiable.force(value);
        self.integrable.force_value(value, elapsed);
    }

    /// [`force_value`](Self::force_value) with the default time unit.
    pub fn force(&mut self, value: T) {
        self.force_value(value, self.time.time_unit());
    }

    /// The weighted sum of the raw value, the derivatives and the integrals.
    pub fn value(&self) -> T {
        let proportional = self.current * self.value_factor;

        let derivative = self
            .d_factors
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (k, &gain)| {
                acc + gain * self.differentiable.get_value(k + 1)
            });

        let integral = self
            .i_factors
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (k, &gain)| {
                acc + gain * self.integrable.get_value(k + 1)
            });

        proportional + derivative + integral
    }

    /// The last raw sample.
    pub fn raw(&self) -> T {
        self.current
    }

    /// The internal derivative chain.
    pub fn differentiable(&self) -> &DifferentiableNumber<T, DN> {
        &self.differentiable
    }

    /// The internal integral chain.
    pub fn integrable(&self) -> &IntegrableNumber<T, IM, IN> {
        &self.integrable
    }

    /// Raw window slot `i` of the first integral. Diagnostic only.
    pub fn sample(&self, i: usize) -> Option<T> {
        self.integrable.sample(i)
    }

    /// Time base shared by both chains.
    pub fn time_base(&self) -> TimeBase<T> {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn starts_at_zero() {
        let pid = PidBufferedNumber::<f32, 1, 1, 10>::new(0.0, 1.0, [1.0], [1.0]);
        assert_eq!(pid.value(), 0.0);
    }

    #[test]
    fn proportional_only() {
        let mut pid = PidBufferedNumber::<f32, 0, 0, 4>::new(0.0, 2.5, [], []);
        pid.update(4.0);
        assert_eq!(pid.value(), 10.0);
        assert_eq!(pid.sample(0), None);
    }

    #[test]
    fn matches_independent_chains() {
        let d_factors = [0.5, -0.25];
        let i_factors = [2.0, 1.0, 0.125];
        let mut pid = PidBufferedNumber::<f32, 2, 3, 5>::new(0.0, 0.75, d_factors, i_factors);
        let mut d = DifferentiableNumber::<f32, 2>::new(0.0);
        let mut i = IntegrableNumber::<f32, 5, 3>::new(0.0);

        for (x, dt) in [(1.0, 1.0), (3.0, 0.5), (-2.0, 2.0), (0.5, 1.0), (4.0, 0.25), (4.0, 1.0)] {
            pid.set_value(x, dt);
            d.set_value(x, dt);
            i.set_value(x, dt);

            let mut expected = 0.75 * x;
            for (k, gain) in d_factors.iter().enumerate() {
                expected += gain * d.get_value(k + 1);
            }
            for (k, gain) in i_factors.iter().enumerate() {
                expected += gain * i.get_value(k + 1);
            }
            assert!(close(pid.value(), expected), "after {x}: {} vs {expected}", pid.value());
        }
    }

    #[test]
    fn force_saturates_integrals_and_clears_derivatives() {
        let mut pid = PidBufferedNumber::<f32, 2, 2, 10>::new(0.0, 1.0, [3.0, 7.0], [0.5, 0.25]);
        for x in [5.0, -3.0, 12.0] {
            pid.update(x);
        }
        pid.force(4.0);
        // 1 * 4 + (0.5 + 0.25) * 4, derivative terms vanish
        assert!(close(pid.value(), 7.0));
        assert_eq!(pid.raw(), 4.0);
        assert_eq!(pid.differentiable().get_value(1), 0.0);
        assert!(close(pid.integrable().get_value(2), 4.0));
    }

    #[test]
    fn force_reads_back_x_when_gains_balance() {
        let mut pid = PidBufferedNumber::<f32, 1, 2, 8>::new(0.0, 0.25, [10.0], [0.5, 0.25]);
        pid.force_value(-6.0, 0.5);
        assert!(close(pid.value(), -6.0));
        assert_eq!(pid.sample(3), Some(-3.0));
    }
}
