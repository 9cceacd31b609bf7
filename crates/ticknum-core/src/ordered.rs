//! The order-indexed number contract and its order-0 base case.
//!
//! Every number in the filter family exposes a chain of derived quantities
//! indexed by *order*:
//!
//! | Order | [`FilteredNumber`](crate::FilteredNumber) | [`DifferentiableNumber`](crate::DifferentiableNumber) | [`IntegrableNumber`](crate::IntegrableNumber) |
//! |-------|------------------|-----------------------|-------------------|
//! | 0 | raw value | raw value | raw value |
//! | 1 | weighted average | first derivative | windowed integral |
//! | k | average of order k-1 | derivative of order k-1 | integral of order k-1 |
//!
//! Querying an order beyond the configured maximum is never an error: the
//! number answers with the initial ("zero") value it was constructed with.
//!
//! ## Usage
//!
//! ```rust
//! use ticknum_core::{DifferentiableNumber, OrderedNumber};
//!
//! let mut position = DifferentiableNumber::<f32, 2>::new(0.0);
//!
//! // Once per tick
//! position.update(3.0);
//!
//! let velocity = position.get_value(1);
//! let acceleration = position.get_value(2);
//! assert_eq!(velocity, 3.0);
//! assert_eq!(acceleration, 3.0);
//! assert_eq!(position.get_value(3), 0.0); // beyond max order
//! ```

use num_traits::float::FloatCore;

use crate::time::TimeBase;

/// Capability contract shared by every order-indexed number.
///
/// `set_value` should be called at most once per logical tick; `get_value`
/// is side-effect free and may be called any number of times in between.
pub trait OrderedNumber<T: FloatCore> {
    /// Highest order this number computes.
    fn max_order(&self) -> usize;

    /// Value of the given order.
    ///
    /// Order 0 is the most recently set raw value. Orders above
    /// [`max_order`](Self::max_order) return the initial value.
    fn get_value(&self, order: usize) -> T;

    /// Feed a new sample, `elapsed` time after the previous one.
    fn set_value(&mut self, value: T, elapsed: T);

    /// Replace the accumulated history so the number reads as settled on
    /// `value`. What "settled" means depends on the variant.
    fn force_value(&mut self, value: T, elapsed: T);

    /// Time base used for the convenience methods.
    fn time_base(&self) -> TimeBase<T>;

    /// The raw (order 0) value.
    #[inline]
    fn value(&self) -> T {
        self.get_value(0)
    }

    /// [`set_value`](Self::set_value) with the default time unit.
    #[inline]
    fn update(&mut self, value: T) {
        let elapsed = self.time_base().time_unit();
        self.set_value(value, elapsed);
    }

    /// [`force_value`](Self::force_value) with the default time unit.
    #[inline]
    fn force(&mut self, value: T) {
        let elapsed = self.time_base().time_unit();
        self.force_value(value, elapsed);
    }
}

/// A plain value wrapper with no history.
///
/// This is the order-0 case of every chain: order 0 yields the last value
/// set, any other order yields the initial value. Elapsed times are ignored.
/// The chain types keep one of these as their head so that raw readback and
/// the out-of-range sentinel behave identically across variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalNumber<T> {
    initial: T,
    current: T,
    time: TimeBase<T>,
}

impl<T: FloatCore> TerminalNumber<T> {
    /// Create a terminal number holding `initial`.
    pub fn new(initial: T) -> Self {
        Self::with_time_base(initial, TimeBase::default())
    }

    /// Create a terminal number with an explicit time base.
    pub fn with_time_base(initial: T, time: TimeBase<T>) -> Self {
        Self {
            initial,
            current: initial,
            time,
        }
    }

    /// The construction value, returned for every unknown order.
    #[inline]
    pub fn initial(&self) -> T {
        self.initial
    }

    /// Overwrite the current value.
    #[inline]
    pub(crate) fn store(&mut self, value: T) {
        self.current = value;
    }

    /// Current value, or the initial value for any order other than 0.
    #[inline]
    pub(crate) fn lookup(&self, order: usize) -> T {
        if order == 0 {
            self.current
        } else {
            self.initial
        }
    }
}

impl<T: FloatCore> OrderedNumber<T> for TerminalNumber<T> {
    fn max_order(&self) -> usize {
        0
    }

    fn get_value(&self, order: usize) -> T {
        self.lookup(order)
    }

    fn set_value(&mut self, value: T, _elapsed: T) {
        self.store(value);
    }

    fn force_value(&mut self, value: T, _elapsed: T) {
        self.store(value);
    }

    fn time_base(&self) -> TimeBase<T> {
        self.time
    }
}
