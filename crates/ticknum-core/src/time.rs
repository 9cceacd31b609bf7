//! Time base shared by every tick-driven number.
//!
//! Callers that run at a fixed update rate never need to pass an elapsed
//! time: the `update`/`force` convenience methods substitute the configured
//! time unit. Callers with variable tick timing pass the measured elapsed
//! time instead, and the frame-rate factor rescales it so that increments
//! and thresholds tuned for fixed-rate use keep roughly the same meaning.
//!
//! ```rust
//! use ticknum_core::TimeBase;
//!
//! // Tuned at ~30 updates per second, now driven by elapsed seconds
//! let time = TimeBase::new(1.0_f32, 30.0);
//! assert!((time.scale(1.0 / 30.0) - 1.0).abs() < 1e-6);
//! ```

use num_traits::float::FloatCore;

/// Scale constants applied to elapsed times.
///
/// - `time_unit`: the elapsed time assumed when a caller omits it
/// - `frame_rate`: factor every elapsed time is multiplied by before use
///
/// Both default to one, which reproduces plain fixed-rate behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBase<T> {
    time_unit: T,
    frame_rate: T,
}

impl<T: FloatCore> TimeBase<T> {
    /// Create a time base from an explicit time unit and frame-rate factor.
    pub fn new(time_unit: T, frame_rate: T) -> Self {
        Self {
            time_unit,
            frame_rate,
        }
    }

    /// Elapsed time assumed when none is supplied.
    #[inline]
    pub fn time_unit(&self) -> T {
        self.time_unit
    }

    /// Factor applied to every elapsed time.
    #[inline]
    pub fn frame_rate(&self) -> T {
        self.frame_rate
    }

    /// Rescale a caller-supplied elapsed time.
    #[inline]
    pub fn scale(&self, elapsed: T) -> T {
        elapsed * self.frame_rate
    }

    /// The rescaled default time unit.
    #[inline]
    pub fn unit_step(&self) -> T {
        self.scale(self.time_unit)
    }
}

impl<T: FloatCore> Default for TimeBase<T> {
    fn default() -> Self {
        Self::new(T::one(), T::one())
    }
}
