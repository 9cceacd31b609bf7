//! Fixed-capacity sample ring with a parallel elapsed-time ring.
//!
//! Stack-allocated, compile-time sized circular buffer used by the filter
//! and integral chains. Each slot holds a sample (already multiplied by its
//! elapsed time) and the elapsed time itself.
//!
//! The cursor points at the most recently written slot. Writing first
//! advances the cursor, so the slot overwritten is always the one written
//! exactly `N` writes earlier (oldest-first eviction).

use num_traits::float::FloatCore;

/// Circular buffer of `N` (sample, elapsed time) pairs.
///
/// # Invariants
///
/// - `N > 0` (checked at compile time)
/// - `cursor` is always in `[0, N)`
#[derive(Debug, Clone, Copy)]
pub struct SampleRing<T, const N: usize> {
    samples: [T; N],
    times: [T; N],
    cursor: usize,
}

impl<T: FloatCore, const N: usize> SampleRing<T, N> {
    /// Create a ring with every slot holding `sample` and `time`.
    pub fn new(sample: T, time: T) -> Self {
        const { assert!(N > 0, "a sample ring needs at least one slot") };
        Self {
            samples: [sample; N],
            times: [time; N],
            cursor: 0,
        }
    }

    /// Number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the most recently written slot.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the slot the next write will evict.
    #[inline]
    pub fn next_index(&self) -> usize {
        (self.cursor + 1) % N
    }

    /// Slot that the next write will overwrite, as `(sample, time)`.
    #[inline]
    pub fn oldest(&self) -> (T, T) {
        let index = self.next_index();
        (self.samples[index], self.times[index])
    }

    /// Advance the cursor and overwrite the evicted slot.
    #[inline]
    pub fn push(&mut self, sample: T, time: T) {
        self.cursor = self.next_index();
        self.samples[self.cursor] = sample;
        self.times[self.cursor] = time;
    }

    /// The `age`-th most recent slot (`age == 0` is the newest).
    #[inline]
    pub fn recent(&self, age: usize) -> (T, T) {
        let index = (N + self.cursor - age % N) % N;
        (self.samples[index], self.times[index])
    }

    /// Iterate from newest to oldest.
    pub fn iter_recent(&self) -> impl Iterator<Item = (T, T)> + '_ {
        (0..N).map(move |age| self.recent(age))
    }

    /// Raw sample slot by absolute index, wrapping out-of-range indices.
    #[inline]
    pub fn sample(&self, index: usize) -> T {
        self.samples[index % N]
    }

    /// Raw time slot by absolute index, wrapping out-of-range indices.
    #[inline]
    pub fn time(&self, index: usize) -> T {
        self.times[index % N]
    }

    /// Overwrite every slot. The cursor is left where it is.
    pub fn fill(&mut self, sample: T, time: T) {
        self.samples = [sample; N];
        self.times = [time; N];
    }

    /// Sum of all sample slots.
    pub fn sample_sum(&self) -> T {
        self.samples.iter().fold(T::zero(), |acc, &s| acc + s)
    }

    /// Sum of all time slots.
    pub fn time_sum(&self) -> T {
        self.times.iter().fold(T::zero(), |acc, &t| acc + t)
    }

    /// Weighted sums over the ring, newest slot first.
    ///
    /// Returns `(Σ sample[age] * weights[age], Σ time[age] * weights[age])`.
    pub fn weighted_sums(&self, weights: &[T; N]) -> (T, T) {
        self.iter_recent()
            .zip(weights.iter())
            .fold((T::zero(), T::zero()), |(s, t), ((sample, time), &w)| {
                (s + sample * w, t + time * w)
            })
    }
}
