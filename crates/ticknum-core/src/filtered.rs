//! Weighted moving average with recursively filtered higher orders.
//!
//! Order 1 is the time-weighted average of the last `N` inputs:
//!
//! ```text
//! y[n] = (z + Σ_{i=0}^{N-1} w[i] * x[n-i] * t[n-i]) / Σ_{i=0}^{N-1} w[i] * t[n-i]
//! ```
//!
//! where `w[0]` weights the most recent sample, `t` are elapsed times and
//! `z` is the initial value. Order `k` applies the same filter to the order
//! `k - 1` series, with its own ring.
//!
//! Setting every weight to one gives a plain moving average; geometric
//! weights give a recency-biased (or, increasing, a lagging) average.
//!
//! # Precondition
//!
//! Weights and elapsed times must keep `Σ w[i] * t[i]` nonzero. A zero
//! denominator is not checked and yields NaN or infinity.
//!
//! ```rust
//! use ticknum_core::{FilteredNumber, OrderedNumber};
//!
//! let mut n = FilteredNumber::<f32, 4, 1>::new(0.0, [1.0, 2.0, 4.0, 8.0]);
//! n.update(1.0);
//! assert!((n.get_value(1) - 1.0 / 15.0).abs() < 1e-6);
//! ```

use num_traits::float::FloatCore;

use crate::ordered::{OrderedNumber, TerminalNumber};
use crate::ring::SampleRing;
use crate::time::TimeBase;

/// One filter order: a ring of its input series and its current average.
#[derive(Debug, Clone, Copy)]
struct FilterStage<T, const N: usize> {
    ring: SampleRing<T, N>,
    output: T,
}

impl<T: FloatCore, const N: usize> FilterStage<T, N> {
    fn new(initial: T, unit_step: T) -> Self {
        Self {
            ring: SampleRing::new(initial, unit_step),
            output: initial,
        }
    }

    fn average(&self, initial: T, weights: &[T; N]) -> T {
        let (sum, total_time) = self.ring.weighted_sums(weights);
        (initial + sum) / total_time
    }
}

/// A value presented as a weighted sum of its recent history.
///
/// # Type parameters
///
/// - `N`: number of samples in each order's window
/// - `ORDER`: highest filtered order (order `ORDER` filters order `ORDER - 1`)
#[derive(Debug, Clone)]
pub struct FilteredNumber<T, const N: usize, const ORDER: usize> {
    head: TerminalNumber<T>,
    weights: [T; N],
    stages: [FilterStage<T, N>; ORDER],
    time: TimeBase<T>,
}

impl<T: FloatCore, const N: usize, const ORDER: usize> FilteredNumber<T, N, ORDER> {
    /// Create a filtered number.
    ///
    /// # Arguments
    /// * `initial` - A zero of `T`; also the value of every order until set
    /// * `weights` - Coefficients, index 0 applied to the most recent sample
    pub fn new(initial: T, weights: [T; N]) -> Self {
        Self::with_time_base(initial, weights, TimeBase::default())
    }

    /// Create a filtered number with an explicit time base.
    pub fn with_time_base(initial: T, weights: [T; N], time: TimeBase<T>) -> Self {
        let unit_step = time.unit_step();
        Self {
            head: TerminalNumber::with_time_base(initial, time),
            weights,
            stages: core::array::from_fn(|_| FilterStage::new(initial, unit_step)),
            time,
        }
    }

    /// Weight applied to the `i`-th most recent sample.
    ///
    /// Diagnostic accessor; `None` when `i >= N`.
    pub fn weight(&self, i: usize) -> Option<T> {
        self.weights.get(i).copied()
    }

    /// Raw ring slot `i` of the first order (sample times elapsed time).
    ///
    /// Diagnostic accessor; `None` for `ORDER == 0`, which keeps no ring.
    pub fn sample(&self, i: usize) -> Option<T> {
        self.stages.first().map(|stage| stage.ring.sample(i))
    }
}

impl<T: FloatCore, const N: usize, const ORDER: usize> OrderedNumber<T>
    for FilteredNumber<T, N, ORDER>
{
    fn max_order(&self) -> usize {
        ORDER
    }

    fn get_value(&self, order: usize) -> T {
        match order {
            0 => self.head.lookup(0),
            k if k <= ORDER => self.stages[k - 1].output,
            _ => self.head.initial(),
        }
    }

    fn set_value(&mut self, value: T, elapsed: T) {
        let initial = self.head.initial();
        let step = self.time.scale(elapsed);
        self.head.store(value);

        let mut input = value;
        for stage in &mut self.stages {
            stage.ring.push(input * step, step);
            stage.output = stage.average(initial, &self.weights);
            input = stage.output;
        }
    }

    fn force_value(&mut self, value: T, elapsed: T) {
        let initial = self.head.initial();
        let step = self.time.scale(elapsed);
        self.head.store(value);

        let mut input = value;
        for stage in &mut self.stages {
            stage.ring.fill(input * step, step);
            stage.output = stage.average(initial, &self.weights);
            input = stage.output;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(order = ORDER, "filtered number forced");
    }

    fn time_base(&self) -> TimeBase<T> {
        self.time
    }
}
