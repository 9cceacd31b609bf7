//! Windowed running integral with recursively integrated higher orders.
//!
//! Each order keeps a ring of the last `N` inputs multiplied by their
//! elapsed time, plus the total elapsed time of the window. On every update
//! the evicted slot is swapped for the new one and the running value moves
//! by the difference, divided by the updated total time:
//!
//! ```text
//! T[n] = T[n-1] + t[n] - t[n-N]
//! I[n] = I[n-1] + (x[n] * t[n] - x[n-N] * t[n-N]) / T[n]
//! ```
//!
//! With a constant elapsed time this is the rectangular-rule integral of the
//! window normalised by its length, so a constant input saturates to itself
//! after `N` updates. With varying elapsed times it is an incremental
//! time-weighted mean rather than an exact integral.
//!
//! Order `k` integrates the order `k - 1` running value.
//!
//! ```rust
//! use ticknum_core::{IntegrableNumber, OrderedNumber};
//!
//! let mut n = IntegrableNumber::<f32, 3, 1>::new(0.0);
//! n.update(1.0);
//! n.update(1.0);
//! n.update(1.0);
//! assert!((n.get_value(1) - 1.0).abs() < 1e-6);
//! ```

use num_traits::float::FloatCore;

use crate::ordered::{OrderedNumber, TerminalNumber};
use crate::ring::SampleRing;
use crate::time::TimeBase;

/// One integral order: its window, the window's total time and the
/// running value.
#[derive(Debug, Clone, Copy)]
struct IntegralStage<T, const N: usize> {
    ring: SampleRing<T, N>,
    total_time: T,
    sum: T,
}

impl<T: FloatCore, const N: usize> IntegralStage<T, N> {
    fn new(initial: T, unit_step: T) -> Self {
        let ring = SampleRing::new(initial * unit_step, unit_step);
        Self {
            total_time: ring.time_sum(),
            ring,
            sum: initial,
        }
    }

    fn advance(&mut self, input: T, step: T) {
        let (evicted_sample, evicted_time) = self.ring.oldest();
        let sample = input * step;

        self.total_time = self.total_time + step - evicted_time;
        self.sum = self.sum + (sample - evicted_sample) / self.total_time;
        self.ring.push(sample, step);
    }

    fn saturate(&mut self, input: T, step: T) {
        self.ring.fill(input * step, step);
        self.total_time = self.ring.time_sum();
        self.sum = self.ring.sample_sum() / self.total_time;
    }
}

/// A number that keeps track of its own windowed integrals up to `ORDER`.
///
/// # Type parameters
///
/// - `N`: number of samples in each order's window
/// - `ORDER`: highest integral order
///
/// # Precondition
///
/// Elapsed times must keep every window's total time nonzero.
#[derive(Debug, Clone)]
pub struct IntegrableNumber<T, const N: usize, const ORDER: usize> {
    head: TerminalNumber<T>,
    stages: [IntegralStage<T, N>; ORDER],
    time: TimeBase<T>,
}

impl<T: FloatCore, const N: usize, const ORDER: usize> IntegrableNumber<T, N, ORDER> {
    /// Create an integrable number.
    ///
    /// `initial` is a zero of `T`: it seeds every window and is returned for
    /// every order this number does not compute.
    pub fn new(initial: T) -> Self {
        Self::with_time_base(initial, TimeBase::default())
    }

    /// Create an integrable number with an explicit time base.
    pub fn with_time_base(initial: T, time: TimeBase<T>) -> Self {
        let unit_step = time.unit_step();
        Self {
            head: TerminalNumber::with_time_base(initial, time),
            stages: core::array::from_fn(|_| IntegralStage::new(initial, unit_step)),
            time,
        }
    }

    /// Raw window slot `i` of the first order (input times elapsed time).
    ///
    /// Diagnostic accessor; indices wrap modulo `N`. `None` for
    /// `ORDER == 0`, which keeps no window.
    pub fn sample(&self, i: usize) -> Option<T> {
        self.stages.first().map(|stage| stage.ring.sample(i))
    }

    /// Total elapsed time covered by the first order's window.
    pub fn window_time(&self) -> Option<T> {
        self.stages.first().map(|stage| stage.total_time)
    }
}

impl<T: FloatCore, const N: usize, const ORDER: usize> OrderedNumber<T>
    for IntegrableNumber<T, N, ORDER>
{
    fn max_order(&self) -> usize {
        ORDER
    }

    fn get_value(&self, order: usize) -> T {
        match order {
            0 => self.head.lookup(0),
            k if k <= ORDER => self.stages[k - 1].sum,
            _ => self.head.initial(),
        }
    }

    fn set_value(&mut self, value: T, elapsed: T) {
        self.head.store(value);

        let mut input = value;
        let mut step = self.time.scale(elapsed);
        for stage in &mut self.stages {
            stage.advance(input, step);
            input = stage.sum;
            step = self.time.unit_step();
        }
    }

    /// Reset every window as if the last `N` samples all equalled `value`,
    /// `elapsed` apart. Every order then reads `value`.
    fn force_value(&mut self, value: T, elapsed: T) {
        self.head.store(value);

        let mut input = value;
        let step = self.time.scale(elapsed);
        for stage in &mut self.stages {
            stage.saturate(input, step);
            input = stage.sum;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(order = ORDER, window = N, "integrable number forced");
    }

    fn time_base(&self) -> TimeBase<T> {
        self.time
    }
}
