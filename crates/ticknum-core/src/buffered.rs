//! Threshold buffering for flags and discrete states.
//!
//! A raw condition that flickers from tick to tick is fed into a clamped
//! level that rises while the condition holds and falls while it does not.
//! The presented value only switches once the level crosses a threshold, so
//! single-tick noise never reaches the caller.
//!
//! - [`BufferedBool`]: one flag with separate on and off thresholds
//! - [`BufferedState`]: one level per state, the most persistent one wins
//! - [`BufferedStep`]: an ordered progression of states over one level

use num_traits::float::FloatCore;

use crate::ranged::{ClampedNumber, RangedNumber};

/// A flag that switches only after the input has persisted.
///
/// The internal level lives in `[0, 1 - increment]`. Each `true` input raises
/// it by one increment and switches the flag on once the level exceeds
/// `top`; each `false` input lowers it and switches the flag off once the
/// level drops under `bottom`.
///
/// ```rust
/// use ticknum_core::BufferedBool;
///
/// let mut grounded = BufferedBool::new(0.25_f32, 0.55, 0.1);
/// for _ in 0..5 {
///     grounded.update(true);
/// }
/// assert!(!grounded.value());
/// grounded.update(true);
/// assert!(grounded.value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferedBool<T> {
    bottom: T,
    top: T,
    level: ClampedNumber<T>,
    value: bool,
}

impl<T: FloatCore> BufferedBool<T> {
    /// Create a buffered flag, initially off with the level at zero.
    ///
    /// # Arguments
    /// * `bottom` - The flag switches off when the level drops below this
    /// * `top` - The flag switches on when the level rises above this
    /// * `increment` - Level change per unit of elapsed time
    pub fn new(bottom: T, top: T, increment: T) -> Self {
        Self {
            bottom,
            top,
            level: ClampedNumber::new(T::zero(), T::zero(), T::one(), increment),
            value: false,
        }
    }

    /// Feed the raw condition, `elapsed` time after the previous one.
    pub fn set_value(&mut self, value: bool, elapsed: T) {
        if value {
            self.level.advance(elapsed);
            if self.level.value() > self.top {
                self.value = true;
            }
        } else {
            self.level.retreat(elapsed);
            if self.level.value() < self.bottom {
                self.value = false;
            }
        }
    }

    /// [`set_value`](Self::set_value) with an elapsed time of one.
    pub fn update(&mut self, value: bool) {
        self.set_value(value, T::one());
    }

    /// Switch immediately and saturate the level on the matching side.
    pub fn force_value(&mut self, value: bool) {
        self.value = value;
        let bound = if value { self.level.max() } else { self.level.min() };
        self.level.set_value(bound);
    }

    /// Replace the level increment.
    pub fn set_increment(&mut self, increment: T) {
        self.level.set_increment(increment);
    }

    /// The buffered flag.
    pub fn value(&self) -> bool {
        self.value
    }

    /// The internal level.
    pub fn level(&self) -> T {
        self.level.value()
    }
}

/// Buffered transitions between `N` discrete states.
///
/// Every state owns a level in `[0, 1 - increment]`. Reporting state `i`
/// raises level `i` and lowers all the others; the current state becomes
/// `i` once its level exceeds threshold `i`. Thresholds above one half
/// keep two states from taking turns.
///
/// This is not a state machine: it tells a state machine when a transition
/// has been requested consistently enough to act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferedState<T, const N: usize> {
    levels: [ClampedNumber<T>; N],
    thresholds: [T; N],
    state: usize,
}

impl<T: FloatCore, const N: usize> BufferedState<T, N> {
    /// Create a buffered state.
    ///
    /// # Arguments
    /// * `initial_state` - Starting state, clamped to `N - 1`
    /// * `levels` - Starting level per state; usually one for the initial state, zero elsewhere
    /// * `thresholds` - Level each state must exceed to become current
    /// * `increment` - Level change per unit of elapsed time
    pub fn new(initial_state: usize, levels: [T; N], thresholds: [T; N], increment: T) -> Self {
        const { assert!(N > 0, "a buffered state needs at least one state") };
        Self {
            levels: levels.map(|level| ClampedNumber::new(level, T::zero(), T::one(), increment)),
            thresholds,
            state: initial_state.min(N - 1),
        }
    }

    /// Report that the check for state `state` succeeded this tick.
    ///
    /// An index outside `0..N` is ignored.
    pub fn set_value(&mut self, state: usize, elapsed: T) {
        if state >= N {
            #[cfg(feature = "tracing")]
            tracing::warn!(state, states = N, "ignoring out-of-range buffered state");
            return;
        }

        for (i, level) in self.levels.iter_mut().enumerate() {
            if i == state {
                level.advance(elapsed);
            } else {
                level.retreat(elapsed);
            }
        }

        if self.levels[state].value() > self.thresholds[state] {
            self.state = state;
        }
    }

    /// [`set_value`](Self::set_value) with an elapsed time of one.
    pub fn update(&mut self, state: usize) {
        self.set_value(state, T::one());
    }

    /// Jump to `state`: its level saturates, every other level empties.
    ///
    /// An index outside `0..N` is ignored.
    pub fn force_value(&mut self, state: usize) {
        if state >= N {
            #[cfg(feature = "tracing")]
            tracing::warn!(state, states = N, "ignoring out-of-range buffered state");
            return;
        }

        self.state = state;
        for (i, level) in self.levels.iter_mut().enumerate() {
            level.set_value(if i == state { T::one() } else { T::zero() });
        }
    }

    /// The last triggered state.
    pub fn value(&self) -> usize {
        self.state
    }

    /// Level of state `i`, `None` when out of range.
    pub fn level(&self, i: usize) -> Option<T> {
        self.levels.get(i).map(|level| level.value())
    }
}

/// An ordered progression of `TRANSITIONS + 1` buffered states over one
/// level.
///
/// Stepping up raises the level and moves to the next state once the level
/// exceeds that state's upward threshold; stepping down lowers it and moves
/// back once it drops under the downward threshold of the transition just
/// taken. With thresholds laid out as
///
/// ```text
/// min < down[0] < up[0] < down[1] < up[1] < ... < max
/// ```
///
/// this behaves like a chain of [`BufferedBool`]s, each picking up where the
/// previous one switched on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferedStep<T, const TRANSITIONS: usize> {
    up: [T; TRANSITIONS],
    down: [T; TRANSITIONS],
    level: ClampedNumber<T>,
    state: usize,
}

impl<T: FloatCore, const TRANSITIONS: usize> BufferedStep<T, TRANSITIONS> {
    /// Create a buffered step at state 0 with the level at `min`.
    ///
    /// # Arguments
    /// * `min`, `max` - Level range; the level stays in `[min, max - increment]`
    /// * `up` - Level to exceed to move from state `i` to `i + 1`
    /// * `down` - Level to drop under to move from state `i + 1` back to `i`
    /// * `increment` - Level change per step
    pub fn new(min: T, max: T, up: [T; TRANSITIONS], down: [T; TRANSITIONS], increment: T) -> Self {
        Self {
            up,
            down,
            level: ClampedNumber::new(min, min, max, increment),
            state: 0,
        }
    }

    /// Raise (`true`) or lower (`false`) the level by one increment.
    pub fn step_up(&mut self, up: bool) {
        if up {
            self.level.inc();
            if self.state < TRANSITIONS && self.level.value() > self.up[self.state] {
                self.state += 1;
            }
        } else {
            self.level.dec();
            let transition = self.state.saturating_sub(1);
            if transition < TRANSITIONS && self.level.value() < self.down[transition] {
                self.state = self.state.saturating_sub(1);
            }
        }
    }

    /// Jump to state 0 with the level at its minimum.
    pub fn force_min(&mut self) {
        self.level.set_value(self.level.min());
        self.state = 0;
    }

    /// Jump to the last state with the level at its maximum.
    pub fn force_max(&mut self) {
        self.level.set_value(self.level.max());
        self.state = TRANSITIONS;
    }

    /// Current state, in `0..=TRANSITIONS`.
    pub fn state(&self) -> usize {
        self.state
    }

    /// The internal level.
    pub fn level(&self) -> T {
        self.level.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_starts_off() {
        let b = BufferedBool::new(0.3_f32, 0.7, 0.1);
        assert!(!b.value());
        assert_eq!(b.level(), 0.0);
    }

    #[test]
    fn bool_switches_with_hysteresis() {
        let mut b = BufferedBool::new(0.25_f32, 0.55, 0.1);
        for _ in 0..5 {
            b.update(true);
            assert!(!b.value());
        }
        b.update(true);
        assert!(b.value());

        // level 0.6, falls under 0.25 after four steps down
        for _ in 0..3 {
            b.update(false);
            assert!(b.value());
        }
        b.update(false);
        assert!(!b.value());
    }

    #[test]
    fn bool_force_saturates_level() {
        let mut b = BufferedBool::new(0.35_f32, 0.65, 0.1);
        b.force_value(true);
        assert!(b.value());
        assert!((b.level() - 0.9).abs() < 1e-6);

        for _ in 0..10 {
            b.update(true);
        }
        b.force_value(false);
        assert!(!b.value());
        b.update(true);
        assert!(!b.value());
    }

    #[test]
    fn bool_set_increment() {
        let mut b = BufferedBool::new(0.3_f32, 0.7, 0.1);
        b.set_increment(0.25);
        b.update(true);
        b.update(true);
        assert!(!b.value());
        b.update(true);
        assert!(b.value());
    }

    #[test]
    fn state_keeps_initial() {
        let b = BufferedState::<f32, 3>::new(1, [0.0, 1.0, 0.0], [0.65; 3], 0.1);
        assert_eq!(b.value(), 1);
    }

    #[test]
    fn state_transitions_after_threshold() {
        let mut b = BufferedState::<f32, 3>::new(0, [1.0, 0.0, 0.0], [0.55; 3], 0.1);
        for _ in 0..5 {
            b.update(2);
            assert_eq!(b.value(), 0);
        }
        b.update(2);
        assert_eq!(b.value(), 2);
    }

    #[test]
    fn state_increment_and_levels_from_constructor() {
        let mut b = BufferedState::<f32, 3>::new(0, [1.0, 0.0, 0.0], [0.55; 3], 0.2);
        for _ in 0..2 {
            b.update(2);
            assert_eq!(b.value(), 0);
        }
        b.update(2);
        assert_eq!(b.value(), 2);

        let mut primed = BufferedState::<f32, 3>::new(0, [1.0, 0.0, 0.5], [0.55; 3], 0.2);
        primed.update(2);
        assert_eq!(primed.value(), 2);
    }

    #[test]
    fn state_copies_behave_identically() {
        let mut b1 = BufferedState::<f32, 3>::new(1, [0.0, 1.0, 0.5], [0.55; 3], 0.1);
        let mut b2 = b1;
        for _ in 0..10 {
            b1.update(2);
            b2.update(2);
            assert_eq!(b1.value(), b2.value());
        }
        assert_eq!(b1, b2);
    }

    #[test]
    fn state_force_resets_levels() {
        let mut b = BufferedState::<f32, 3>::new(0, [1.0, 0.0, 0.0], [0.55; 3], 0.2);
        b.force_value(2);
        assert_eq!(b.value(), 2);
        b.update(0);
        assert_eq!(b.value(), 2);
        assert_eq!(b.level(0), Some(0.2));
        assert_eq!(b.level(3), None);
    }

    #[test]
    fn state_ignores_out_of_range_index() {
        let mut b = BufferedState::<f32, 2>::new(0, [1.0, 0.0], [0.55; 2], 0.1);
        let before = b;
        b.update(5);
        b.force_value(2);
        assert_eq!(b, before);
    }

    #[test]
    fn step_starts_at_zero() {
        let b = BufferedStep::<f32, 2>::new(0.0, 2.0, [0.65, 1.65], [0.35, 1.35], 0.1);
        assert_eq!(b.state(), 0);
    }

    #[test]
    fn single_step_matches_buffered_bool() {
        let mut step = BufferedStep::<f32, 1>::new(0.0, 1.0, [0.65], [0.35], 0.1);
        let mut flag = BufferedBool::new(0.35_f32, 0.65, 0.1);
        for _ in 0..9 {
            step.step_up(true);
            flag.update(true);
            assert_eq!(flag.value(), step.state() == 1);
        }
        for _ in 0..9 {
            step.step_up(false);
            flag.update(false);
            assert_eq!(flag.value(), step.state() == 1);
        }
    }

    #[test]
    fn chained_steps_match_chained_bools() {
        let mut step = BufferedStep::<f32, 2>::new(0.0, 2.0, [0.65, 1.65], [0.35, 1.35], 0.1);
        let mut first = BufferedBool::new(0.35_f32, 0.65, 0.1);
        let mut second = BufferedBool::new(0.35_f32, 0.65, 0.1);
        for i in 0..20 {
            step.step_up(true);
            if i < 10 {
                first.update(true);
                assert_eq!(first.value(), step.state() >= 1, "tick {i}");
            } else {
                second.update(true);
                assert_eq!(second.value(), step.state() == 2, "tick {i}");
            }
        }
        assert_eq!(step.state(), 2);
    }

    #[test]
    fn step_down_uses_previous_transition() {
        let mut step = BufferedStep::<f32, 2>::new(0.0, 2.0, [0.65, 1.65], [0.35, 1.35], 0.1);
        step.force_max();
        assert_eq!(step.state(), 2);
        assert!((step.level() - 1.9).abs() < 1e-6);

        // 1.9 down to 1.4 keeps state 2
        for _ in 0..5 {
            step.step_up(false);
            assert_eq!(step.state(), 2);
        }
        step.step_up(false);
        assert_eq!(step.state(), 1);

        for _ in 0..20 {
            step.step_up(false);
        }
        assert_eq!(step.state(), 0);
        assert_eq!(step.level(), 0.0);

        step.force_max();
        step.force_min();
        assert_eq!(step.state(), 0);
    }
}
