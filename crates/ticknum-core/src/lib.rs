//! Ticknum Core - tick-driven numeric smoothing
//!
//! This crate provides "special numbers": scalar wrappers that are updated
//! once per simulation tick and apply temporal logic to what they present,
//! with zero allocation after construction.
//!
//! # Core Abstractions
//!
//! ## Order-Indexed Numbers
//!
//! Every number in this family exposes a chain of derived quantities indexed
//! by *order* (0 is the raw value) through the [`OrderedNumber`] trait:
//!
//! - [`FilteredNumber`] - Weighted moving average, recursively filtered
//! - [`DifferentiableNumber`] - Finite-difference derivatives
//! - [`IntegrableNumber`] - Windowed running integrals
//! - [`TerminalNumber`] - The order-0 base case
//!
//! Querying an order beyond the configured maximum returns the initial
//! ("zero") value instead of failing.
//!
//! ## Control
//!
//! - [`PidBufferedNumber`] - Weighted sum of a value, its derivatives and its integrals
//!
//! ## Ranged Numbers
//!
//! - [`ClampedNumber`], [`CyclicNumber`], [`PingPongNumber`] - Bounded counters
//! - [`BufferedNumber`] - Glides towards a target one increment per tick
//!
//! ## Threshold Buffering
//!
//! - [`BufferedBool`] - A flag with hysteresis
//! - [`BufferedState`] - Debounced transitions between discrete states
//! - [`BufferedStep`] - Debounced progression through ordered states
//!
//! ## Response Curves
//!
//! - [`ResponseCurve`], [`XyResponseCurve`], [`PeriodicResponseCurve`] - Sampled functions
//!
//! ## Utilities
//!
//! - Range and mapping helpers in [`math`]: [`math::modulo`], [`math::reflect`], [`math::lerp`], etc.
//! - [`TimeBase`] - Default elapsed time and frame-rate scaling
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ticknum-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use ticknum_core::{FilteredNumber, OrderedNumber, PidBufferedNumber};
//!
//! // Smooth a noisy reading with a recency-biased average
//! let mut reading = FilteredNumber::<f32, 4, 1>::new(0.0, [8.0, 4.0, 2.0, 1.0]);
//! for sample in [1.0, 1.2, 0.9, 1.1] {
//!     reading.update(sample);
//! }
//! let smoothed = reading.get_value(1);
//! assert!(smoothed > 0.5 && smoothed < 1.1);
//!
//! // Steer towards it with a proportional-derivative controller
//! let mut control = PidBufferedNumber::<f32, 1, 0, 1>::new(0.0, 1.0, [0.5], []);
//! control.update(smoothed);
//! assert!(control.value() > smoothed);
//! ```
//!
//! # Design Principles
//!
//! - **Fixed size**: Sample counts and orders are const generics; no heap
//! - **Sentinels, not errors**: Out-of-range queries answer with the initial value
//! - **Caller-owned preconditions**: Degenerate weights or zero elapsed
//!   times are documented, not checked on the hot path

#![cfg_attr(not(feature = "std"), no_std)]

pub mod buffered;
pub mod curve;
pub mod differentiable;
pub mod filtered;
pub mod integrable;
pub mod math;
pub mod ordered;
pub mod pid;
pub mod ranged;
pub mod ring;
pub mod time;

// Re-export main types at crate root
pub use buffered::{BufferedBool, BufferedState, BufferedStep};
pub use curve::{PeriodicResponseCurve, ResponseCurve, ResponseFunction, XyResponseCurve};
pub use differentiable::DifferentiableNumber;
pub use filtered::FilteredNumber;
pub use integrable::IntegrableNumber;
pub use ordered::{OrderedNumber, TerminalNumber};
pub use pid::PidBufferedNumber;
pub use ranged::{BufferedNumber, ClampedNumber, CyclicNumber, PingPongNumber, RangedNumber};
pub use ring::SampleRing;
pub use time::TimeBase;
