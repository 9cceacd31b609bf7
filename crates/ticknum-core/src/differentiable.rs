//! Finite-difference derivative chain.
//!
//! ```text
//! y[n] = (x[n] - x[n-1]) / t[n]
//! ```
//!
//! Order `k` is the finite difference of order `k - 1`. The first order is
//! divided by the elapsed time the caller passes (scaled by the frame-rate
//! factor); higher orders are differenced per tick using the default time
//! unit, the way a nested derivative is updated once per parent update.
//!
//! A typical use is tracking motion from a position updated every frame:
//!
//! ```rust
//! use ticknum_core::{DifferentiableNumber, OrderedNumber};
//!
//! let mut position = DifferentiableNumber::<f64, 2>::new(0.0);
//! position.set_value(3.0, 2.0);
//! position.set_value(2.0, 2.0);
//!
//! assert_eq!(position.get_value(0), 2.0); // position
//! assert_eq!(position.get_value(1), -0.5); // velocity
//! assert_eq!(position.get_value(2), -2.0); // acceleration
//! ```

use num_traits::float::FloatCore;

use crate::ordered::{OrderedNumber, TerminalNumber};
use crate::time::TimeBase;

/// One derivative order: the previous input and the latest difference.
#[derive(Debug, Clone, Copy)]
struct DifferenceStage<T> {
    previous: T,
    output: T,
}

/// A number that keeps track of its own derivatives up to `ORDER`.
///
/// The initial value should be a zero of `T`: it seeds the history and is
/// what every derivative reads after [`force_value`](OrderedNumber::force_value).
#[derive(Debug, Clone)]
pub struct DifferentiableNumber<T, const ORDER: usize> {
    head: TerminalNumber<T>,
    stages: [DifferenceStage<T>; ORDER],
    time: TimeBase<T>,
}

impl<T: FloatCore, const ORDER: usize> DifferentiableNumber<T, ORDER> {
    /// Create a differentiable number whose value and derivatives start at
    /// `initial`.
    pub fn new(initial: T) -> Self {
        Self::with_time_base(initial, TimeBase::default())
    }

    /// Create a differentiable number with an explicit time base.
    pub fn with_time_base(initial: T, time: TimeBase<T>) -> Self {
        Self {
            head: TerminalNumber::with_time_base(initial, time),
            stages: [DifferenceStage {
                previous: initial,
                output: initial,
            }; ORDER],
            time,
        }
    }
}

impl<T: FloatCore, const ORDER: usize> OrderedNumber<T> for DifferentiableNumber<T, ORDER> {
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
        self.head.store(value);

        let mut input = value;
        let mut step = self.time.scale(elapsed);
        for stage in &mut self.stages {
            stage.output = (input - stage.previous) / step;
            stage.previous = input;
            input = stage.output;
            step = self.time.unit_step();
        }
    }

    /// Jump to `value` with every derivative reading "no change".
    ///
    /// The elapsed time is ignored.
    fn force_value(&mut self, value: T, _elapsed: T) {
        let initial = self.head.initial();
        self.head.store(value);

        let mut input = value;
        for stage in &mut self.stages {
            stage.previous = input;
            stage.output = initial;
            input = initial;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(order = ORDER, "differentiable number forced");
    }

    fn time_base(&self) -> TimeBase<T> {
        self.time
    }
}
