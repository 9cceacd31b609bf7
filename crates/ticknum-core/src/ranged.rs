//! Numbers that always stay inside a range.
//!
//! The variants differ in what happens at the bounds:
//!
//! | Type | Range | Past the bounds |
//! |------|-------|-----------------|
//! | [`ClampedNumber`] | `[min, max - increment]` | pinned |
//! | [`CyclicNumber`] | `[min, max)` | wraps around |
//! | [`PingPongNumber`] | `[min, max - increment]` | bounces back |
//!
//! [`BufferedNumber`] wraps any of them and moves at most one increment per
//! update towards the last value it was given.
//!
//! The element type only needs `num_traits::Num`, so integer counters work
//! as well as float parameters.
//!
//! ```rust
//! use ticknum_core::{CyclicNumber, RangedNumber};
//!
//! let mut hour = CyclicNumber::new(22, 0, 24, 1);
//! hour.inc();
//! hour.inc();
//! assert_eq!(hour.value(), 0);
//! ```

use core::ops::{AddAssign, SubAssign};

use num_traits::Num;

use crate::math::{clamp, modulo, reflect};

/// Shared behaviour of numbers bounded to a range.
///
/// Implementations guarantee that [`value`](Self::value) always lies in the
/// half-open range `[min, max)`. The increment is the step used by
/// [`inc`](Self::inc) and [`dec`](Self::dec); the elapsed-time variants
/// scale it.
pub trait RangedNumber<T: Num + PartialOrd + Copy> {
    /// Current value.
    fn value(&self) -> T;

    /// Lower bound (inclusive).
    fn min(&self) -> T;

    /// Upper bound.
    fn max(&self) -> T;

    /// Step size.
    fn increment(&self) -> T;

    /// Map an arbitrary value into this number's range.
    fn valid_value(&self, value: T) -> T;

    /// Set the value, mapped into range.
    fn set_value(&mut self, value: T);

    /// Replace the range and increment, then bring the value back in range.
    fn modify(&mut self, min: T, max: T, increment: T);

    /// Move up by `increment * elapsed`.
    fn advance(&mut self, elapsed: T);

    /// Move down by `increment * elapsed`.
    fn retreat(&mut self, elapsed: T);

    /// Replace the increment, keeping the range.
    fn set_increment(&mut self, increment: T) {
        let (min, max) = (self.min(), self.max());
        self.modify(min, max, increment);
    }

    /// Move up by one increment.
    fn inc(&mut self) {
        self.advance(T::one());
    }

    /// Move down by one increment.
    fn dec(&mut self) {
        self.retreat(T::one());
    }
}

/// Bounds and increment shared by every ranged variant.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Range<T> {
    min: T,
    max: T,
    increment: T,
}

/// A number clamped to `[min, max - increment]`.
///
/// Using an unsigned type whose zero coincides with `min` is unsafe:
/// `min - increment` would underflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedNumber<T> {
    value: T,
    range: Range<T>,
}

impl<T: Num + PartialOrd + Copy> ClampedNumber<T> {
    /// Create a clamped number; `value` is clamped as well.
    pub fn new(value: T, min: T, max: T, increment: T) -> Self {
        Self {
            value: clamp(value, min, max - increment),
            range: Range {
                min,
                max,
                increment,
            },
        }
    }

    /// `true` when the value sits on the lower bound.
    pub fn at_min(&self) -> bool {
        self.value <= self.range.min
    }

    /// `true` when the value sits on the upper bound.
    pub fn at_max(&self) -> bool {
        self.value >= self.range.max - self.range.increment
    }
}

impl<T: Num + PartialOrd + Copy> RangedNumber<T> for ClampedNumber<T> {
    fn value(&self) -> T {
        self.value
    }

    fn min(&self) -> T {
        self.range.min
    }

    fn max(&self) -> T {
        self.range.max
    }

    fn increment(&self) -> T {
        self.range.increment
    }

    fn valid_value(&self, value: T) -> T {
        clamp(value, self.range.min, self.range.max - self.range.increment)
    }

    fn set_value(&mut self, value: T) {
        self.value = self.valid_value(value);
    }

    fn modify(&mut self, min: T, max: T, increment: T) {
        self.range = Range {
            min,
            max,
            increment,
        };
        self.value = self.valid_value(self.value);
    }

    fn advance(&mut self, elapsed: T) {
        self.set_value(self.value + self.range.increment * elapsed);
    }

    fn retreat(&mut self, elapsed: T) {
        self.set_value(self.value - self.range.increment * elapsed);
    }
}

/// A number that wraps around inside `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclicNumber<T> {
    value: T,
    range: Range<T>,
}

impl<T: Num + PartialOrd + Copy> CyclicNumber<T> {
    /// Create a cyclic number; `value` is wrapped into range.
    pub fn new(value: T, min: T, max: T, increment: T) -> Self {
        Self {
            value: modulo(value, min, max),
            range: Range {
                min,
                max,
                increment,
            },
        }
    }
}

impl<T: Num + PartialOrd + Copy> RangedNumber<T> for CyclicNumber<T> {
    fn value(&self) -> T {
        self.value
    }

    fn min(&self) -> T {
        self.range.min
    }

    fn max(&self) -> T {
        self.range.max
    }

    fn increment(&self) -> T {
        self.range.increment
    }

    fn valid_value(&self, value: T) -> T {
        modulo(value, self.range.min, self.range.max)
    }

    fn set_value(&mut self, value: T) {
        self.value = self.valid_value(value);
    }

    fn modify(&mut self, min: T, max: T, increment: T) {
        self.range = Range {
            min,
            max,
            increment,
        };
        self.value = self.valid_value(self.value);
    }

    fn advance(&mut self, elapsed: T) {
        self.set_value(self.value + self.range.increment * elapsed);
    }

    fn retreat(&mut self, elapsed: T) {
        self.set_value(self.value - self.range.increment * elapsed);
    }
}

impl<T: Num + PartialOrd + Copy> AddAssign<T> for CyclicNumber<T> {
    fn add_assign(&mut self, rhs: T) {
        self.set_value(self.value + rhs);
    }
}

impl<T: Num + PartialOrd + Copy> SubAssign<T> for CyclicNumber<T> {
    fn sub_assign(&mut self, rhs: T) {
        self.set_value(self.value - rhs);
    }
}

/// A number that bounces between `min` and `max - increment`.
///
/// Driven by an inner [`CyclicNumber`] over
/// `[min, 2 * max - min - 2 * increment)`: the first half of that cycle maps
/// to itself, the second half is mirrored back down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingPongNumber<T> {
    value: T,
    range: Range<T>,
    cyclic: CyclicNumber<T>,
}

impl<T: Num + PartialOrd + Copy> PingPongNumber<T> {
    /// Create a ping-pong number starting at `value`.
    pub fn new(value: T, min: T, max: T, increment: T) -> Self {
        Self {
            value: reflect(value, min, max - increment),
            range: Range {
                min,
                max,
                increment,
            },
            cyclic: CyclicNumber::new(value, min, Self::cycle_max(min, max, increment), increment),
        }
    }

    /// The inner cyclic counter. Diagnostic only.
    pub fn cyclic_value(&self) -> T {
        self.cyclic.value()
    }

    fn cycle_max(min: T, max: T, increment: T) -> T {
        max + max - min - increment - increment
    }

    fn fold(&self, cyclic: T) -> T {
        let top = self.range.max - self.range.increment;
        if cyclic >= self.range.max {
            top + top - cyclic
        } else {
            cyclic
        }
    }

    fn sync(&mut self) {
        self.value = self.fold(self.cyclic.value());
    }
}

impl<T: Num + PartialOrd + Copy> RangedNumber<T> for PingPongNumber<T> {
    fn value(&self) -> T {
        self.value
    }

    fn min(&self) -> T {
        self.range.min
    }

    fn max(&self) -> T {
        self.range.max
    }

    fn increment(&self) -> T {
        self.range.increment
    }

    fn valid_value(&self, value: T) -> T {
        self.fold(self.cyclic.valid_value(value))
    }

    fn set_value(&mut self, value: T) {
        self.cyclic.set_value(value);
        self.sync();
    }

    fn modify(&mut self, min: T, max: T, increment: T) {
        self.range = Range {
            min,
            max,
            increment,
        };
        self.cyclic
            .modify(min, Self::cycle_max(min, max, increment), increment);
        self.sync();
    }

    fn advance(&mut self, elapsed: T) {
        self.cyclic.advance(elapsed);
        self.sync();
    }

    fn retreat(&mut self, elapsed: T) {
        self.cyclic.retreat(elapsed);
        self.sync();
    }
}

/// A ranged number that glides towards a target instead of jumping.
///
/// Every [`set_value`](Self::set_value) records the target and moves the
/// presented value one increment (scaled by the elapsed time) towards it.
/// The step is never shortened, so a target between two steps makes the
/// value alternate around it.
///
/// ```rust
/// use ticknum_core::BufferedNumber;
///
/// let mut level = BufferedNumber::new(0.0_f32, -3.0, 3.0, 0.5);
/// level.update(2.0);
/// level.update(2.0);
/// assert_eq!(level.value(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BufferedNumber<T, R = ClampedNumber<T>> {
    ideal: R,
    current: R,
    _value: core::marker::PhantomData<T>,
}

impl<T: Num + PartialOrd + Copy> BufferedNumber<T, ClampedNumber<T>> {
    /// Create a clamped buffered number; the initial value is clamped.
    pub fn new(initial: T, min: T, max: T, increment: T) -> Self {
        Self::from_ranged(ClampedNumber::new(initial, min, max, increment))
    }
}

impl<T: Num + PartialOrd + Copy, R: RangedNumber<T> + Clone> BufferedNumber<T, R> {
    /// Buffer an existing ranged number; it is both the start value and the
    /// first target.
    pub fn from_ranged(number: R) -> Self {
        Self {
            ideal: number.clone(),
            current: number,
            _value: core::marker::PhantomData,
        }
    }

    /// The presented value.
    pub fn value(&self) -> T {
        self.current.value()
    }

    /// The last target, mapped into range.
    pub fn target(&self) -> T {
        self.ideal.value()
    }

    /// Record a new target and take one step towards it.
    pub fn set_value(&mut self, value: T, elapsed: T) {
        self.ideal.set_value(value);
        let (current, ideal) = (self.current.value(), self.ideal.value());
        if current < ideal {
            self.current.advance(elapsed);
        } else if current > ideal {
            self.current.retreat(elapsed);
        }
    }

    /// [`set_value`](Self::set_value) with an elapsed time of one.
    pub fn update(&mut self, value: T) {
        self.set_value(value, T::one());
    }

    /// Jump straight to `value`, mapped into range.
    pub fn force_value(&mut self, value: T) {
        self.ideal.set_value(value);
        self.current.set_value(value);
    }
}
