//! Number and profile validation.
//!
//! Configurations are checked before anything is built, so a malformed file
//! is reported as a whole instead of surfacing as NaN in a running
//! simulation. Every check that fails is collected; a single failure is
//! returned as is, several are wrapped in [`ValidationError::Multiple`].
//!
//! # Example
//!
//! ```rust
//! use ticknum_config::{FilteredConfig, Validate, ValidationError};
//!
//! let config = FilteredConfig::new(vec![1.0, -1.0], 1);
//! assert_eq!(config.validate(), Err(ValidationError::ZeroWeightSum));
//! ```

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A value is NaN or infinite.
    #[error("'{field}' must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: String,
        /// The offending value.
        value: f64,
    },

    /// A time unit or frame rate is zero or negative.
    #[error("time base '{field}' must be positive, got {value}")]
    NonPositiveTimeBase {
        /// `time_unit` or `frame_rate`.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Filter weights sum to zero, so the average would divide by zero.
    #[error("filter weights sum to zero")]
    ZeroWeightSum,

    /// The switch-off threshold is above the switch-on threshold.
    #[error("bottom threshold {bottom} is above top threshold {top}")]
    InvertedThresholds {
        /// Switch-off threshold.
        bottom: f64,
        /// Switch-on threshold.
        top: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Types whose configured values can be checked before use.
pub trait Validate {
    /// Check every field, reporting all failures at once.
    fn validate(&self) -> ValidationResult<()>;
}

/// Accumulates failed checks.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<ValidationError>,
}

impl Checks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn finite(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() {
            self.errors.push(ValidationError::NonFinite {
                field: field.to_string(),
                value,
            });
        }
        self
    }

    pub(crate) fn all_finite(&mut self, field: &str, values: &[f64]) -> &mut Self {
        for (i, &value) in values.iter().enumerate() {
            self.finite(&format!("{field}[{i}]"), value);
        }
        self
    }

    pub(crate) fn time_base(&mut self, field: &'static str, value: f64) -> &mut Self {
        // NaN fails the comparison as well
        if !(value > 0.0 && value.is_finite()) {
            self.errors
                .push(ValidationError::NonPositiveTimeBase { field, value });
        }
        self
    }

    pub(crate) fn fail(&mut self, error: ValidationError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Merge the result of a nested validation.
    pub(crate) fn nested(&mut self, result: ValidationResult<()>) -> &mut Self {
        match result {
            Ok(()) => {}
            Err(ValidationError::Multiple(errors)) => self.errors.extend(errors),
            Err(error) => self.errors.push(error),
        }
        self
    }

    pub(crate) fn finish(&mut self) -> ValidationResult<()> {
        let mut errors = std::mem::take(&mut self.errors);
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_failures_is_ok() {
        let result = Checks::new()
            .finite("initial", 0.0)
            .all_finite("weights", &[1.0, 2.0])
            .time_base("time_unit", 0.5)
            .finish();
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn single_failure_is_unwrapped() {
        let result = Checks::new().finite("initial", f64::NAN).finish();
        assert!(matches!(
            result,
            Err(ValidationError::NonFinite { ref field, .. }) if field == "initial"
        ));
    }

    #[test]
    fn indexed_field_names() {
        let result = Checks::new()
            .all_finite("weights", &[1.0, f64::INFINITY])
            .finish();
        assert!(matches!(
            result,
            Err(ValidationError::NonFinite { ref field, .. }) if field == "weights[1]"
        ));
    }

    #[test]
    fn several_failures_are_collected() {
        let result = Checks::new()
            .time_base("time_unit", 0.0)
            .time_base("frame_rate", f64::NAN)
            .fail(ValidationError::ZeroWeightSum)
            .finish();
        match result {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn nested_multiple_is_flattened() {
        let inner = Err(ValidationError::Multiple(vec![
            ValidationError::ZeroWeightSum,
            ValidationError::ZeroWeightSum,
        ]));
        let result = Checks::new()
            .nested(inner)
            .fail(ValidationError::ZeroWeightSum)
            .finish();
        match result {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::ZeroWeightSum,
            ValidationError::InvertedThresholds {
                bottom: 0.7,
                top: 0.3,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: filter weights sum to zero; \
             bottom threshold 0.7 is above top threshold 0.3"
        );
    }
}
