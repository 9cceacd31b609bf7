//! Configuration profiles for ticknum numbers.
//!
//! The core crate fixes window sizes and orders at compile time. This crate
//! lets those numbers be tuned from data: a TOML [`Profile`] names a set of
//! numbers, each described by a [`NumberConfig`], and the typed accessors
//! build the core types after checking that the runtime description matches
//! the const parameters the caller asked for.
//!
//! # Features
//!
//! - **Profiles**: Load and save named number sets from TOML files
//! - **Validation**: Non-finite values, degenerate time bases, zero weight
//!   sums and inverted thresholds are reported before anything is built
//! - **Typed construction**: Length and order mismatches are errors, not panics
//!
//! # Example
//!
//! ```rust
//! use ticknum_config::Profile;
//! use ticknum_core::OrderedNumber;
//!
//! let profile = Profile::from_toml(r#"
//!     name = "Camera"
//!
//!     [numbers.follow]
//!     kind = "filtered"
//!     weights = [4.0, 3.0, 2.0, 1.0]
//!     order = 1
//! "#).unwrap();
//!
//! let mut follow = profile.filtered::<f32, 4, 1>("follow").unwrap();
//! follow.update(10.0);
//! assert_eq!(follow.get_value(1), 4.0);
//!
//! // Wrong window size for this profile
//! assert!(profile.filtered::<f32, 8, 1>("follow").is_err());
//! ```

mod error;
mod number_config;
mod profile;

/// Number and profile validation.
pub mod validation;

pub use error::ConfigError;
pub use number_config::{
    BufferedBoolConfig, DifferentiableConfig, FilteredConfig, IntegrableConfig, NumberConfig,
    PidConfig, TimeBaseConfig,
};
pub use profile::Profile;
pub use validation::{Validate, ValidationError, ValidationResult};
