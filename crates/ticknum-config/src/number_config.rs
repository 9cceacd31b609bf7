//! Serializable descriptions of ticknum numbers.
//!
//! Each config mirrors the constructor arguments of one core type, with
//! runtime `Vec`s where the core type takes fixed-size arrays. `build`
//! checks the runtime lengths and orders against the const parameters
//! requested by the caller, validates the values, and converts them to the
//! target float type.
//!
//! # TOML Format
//!
//! Inside a [`Profile`](crate::Profile) every number is a table tagged by
//! `kind`:
//!
//! ```toml
//! [numbers.camera_lag]
//! kind = "filtered"
//! weights = [4.0, 3.0, 2.0, 1.0]
//! order = 1
//!
//! [numbers.steering]
//! kind = "pid"
//! value_gain = 0.8
//! d_gains = [0.2]
//! i_gains = [0.05]
//! samples = 16
//! ```

use num_traits::{NumCast, float::FloatCore};
use serde::{Deserialize, Serialize};
use ticknum_core::{
    BufferedBool, DifferentiableNumber, FilteredNumber, IntegrableNumber, PidBufferedNumber,
    TimeBase,
};

use crate::error::ConfigError;
use crate::validation::{Checks, Validate, ValidationError, ValidationResult};

fn one() -> f64 {
    1.0
}

fn default_order() -> usize {
    1
}

/// Scale constants for elapsed times, see [`TimeBase`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeBaseConfig {
    /// Elapsed time assumed when none is supplied (defaults to 1).
    #[serde(default = "one")]
    pub time_unit: f64,

    /// Factor applied to every elapsed time (defaults to 1).
    #[serde(default = "one")]
    pub frame_rate: f64,
}

impl Default for TimeBaseConfig {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl TimeBaseConfig {
    /// Create a time base config.
    pub fn new(time_unit: f64, frame_rate: f64) -> Self {
        Self {
            time_unit,
            frame_rate,
        }
    }

    /// Convert to the core type.
    pub fn build<T: FloatCore>(&self) -> Result<TimeBase<T>, ConfigError> {
        self.validate()?;
        Ok(TimeBase::new(
            convert("time_unit", self.time_unit)?,
            convert("frame_rate", self.frame_rate)?,
        ))
    }
}

impl Validate for TimeBaseConfig {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .time_base("time_unit", self.time_unit)
            .time_base("frame_rate", self.frame_rate)
            .finish()
    }
}

fn convert<T: FloatCore>(field: &'static str, value: f64) -> Result<T, ConfigError> {
    // Narrowing float casts saturate to infinity instead of failing
    <T as NumCast>::from(value)
        .filter(|converted: &T| converted.is_finite())
        .ok_or(ConfigError::Conversion { field, value })
}

fn convert_array<T: FloatCore, const N: usize>(
    field: &'static str,
    values: &[f64],
) -> Result<[T; N], ConfigError> {
    if values.len() != N {
        return Err(ConfigError::length_mismatch(field, N, values.len()));
    }
    let mut out = [T::zero(); N];
    for (slot, &value) in out.iter_mut().zip(values) {
        *slot = convert(field, value)?;
    }
    Ok(out)
}

fn check_order(expected: usize, found: usize) -> Result<(), ConfigError> {
    if expected == found {
        Ok(())
    } else {
        Err(ConfigError::OrderMismatch { expected, found })
    }
}

/// The number's own time base, else the fallback, else the identity.
fn resolve_time<T: FloatCore>(
    own: Option<TimeBaseConfig>,
    fallback: Option<TimeBaseConfig>,
) -> Result<TimeBase<T>, ConfigError> {
    own.or(fallback).unwrap_or_default().build()
}

/// Configuration for a [`FilteredNumber`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilteredConfig {
    /// Initial ("zero") value.
    #[serde(default)]
    pub initial: f64,

    /// Weights, most recent sample first. The length is the window size.
    pub weights: Vec<f64>,

    /// Highest filtered order (defaults to 1).
    #[serde(default = "default_order")]
    pub order: usize,

    /// Overrides the profile time base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_base: Option<TimeBaseConfig>,
}

impl FilteredConfig {
    /// Create a filter config starting at zero.
    pub fn new(weights: Vec<f64>, order: usize) -> Self {
        Self {
            initial: 0.0,
            weights,
            order,
            time_base: None,
        }
    }

    /// Set the time base.
    pub fn with_time_base(mut self, time_base: TimeBaseConfig) -> Self {
        self.time_base = Some(time_base);
        self
    }

    /// Build the number with `N` weights and order `ORDER`.
    pub fn build<T: FloatCore, const N: usize, const ORDER: usize>(
        &self,
    ) -> Result<FilteredNumber<T, N, ORDER>, ConfigError> {
        self.build_with(None)
    }

    pub(crate) fn build_with<T: FloatCore, const N: usize, const ORDER: usize>(
        &self,
        fallback: Option<TimeBaseConfig>,
    ) -> Result<FilteredNumber<T, N, ORDER>, ConfigError> {
        let weights = convert_array::<T, N>("weights", &self.weights)?;
        check_order(ORDER, self.order)?;
        self.validate()?;
        let time = resolve_time(self.time_base, fallback)?;

        tracing::debug!(kind = "filtered", samples = N, order = ORDER, "building number");
        Ok(FilteredNumber::with_time_base(
            convert("initial", self.initial)?,
            weights,
            time,
        ))
    }
}

impl Validate for FilteredConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        checks
            .finite("initial", self.initial)
            .all_finite("weights", &self.weights);
        if self.weights.iter().sum::<f64>() == 0.0 {
            checks.fail(ValidationError::ZeroWeightSum);
        }
        if let Some(time_base) = &self.time_base {
            checks.nested(time_base.validate());
        }
        checks.finish()
    }
}

/// Configuration for a [`DifferentiableNumber`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DifferentiableConfig {
    /// Initial ("zero") value.
    #[serde(default)]
    pub initial: f64,

    /// Highest derivative order (defaults to 1).
    #[serde(default = "default_order")]
    pub order: usize,

    /// Overrides the profile time base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_base: Option<TimeBaseConfig>,
}

impl DifferentiableConfig {
    /// Create a derivative config starting at zero.
    pub fn new(order: usize) -> Self {
        Self {
            initial: 0.0,
            order,
            time_base: None,
        }
    }

    /// Build the number with order `ORDER`.
    pub fn build<T: FloatCore, const ORDER: usize>(
        &self,
    ) -> Result<DifferentiableNumber<T, ORDER>, ConfigError> {
        self.build_with(None)
    }

    pub(crate) fn build_with<T: FloatCore, const ORDER: usize>(
        &self,
        fallback: Option<TimeBaseConfig>,
    ) -> Result<DifferentiableNumber<T, ORDER>, ConfigError> {
        check_order(ORDER, self.order)?;
        self.validate()?;
        let time = resolve_time(self.time_base, fallback)?;

        tracing::debug!(kind = "differentiable", order = ORDER, "building number");
        Ok(DifferentiableNumber::with_time_base(
            convert("initial", self.initial)?,
            time,
        ))
    }
}

impl Validate for DifferentiableConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        checks.finite("initial", self.initial);
        if let Some(time_base) = &self.time_base {
            checks.nested(time_base.validate());
        }
        checks.finish()
    }
}

/// Configuration for an [`IntegrableNumber`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrableConfig {
    /// Initial ("zero") value.
    #[serde(default)]
    pub initial: f64,

    /// Window size of every order.
    pub samples: usize,

    /// Highest integral order (defaults to 1).
    #[serde(default = "default_order")]
    pub order: usize,

    /// Overrides the profile time base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_base: Option<TimeBaseConfig>,
}

impl IntegrableConfig {
    /// Create an integral config starting at zero.
    pub fn new(samples: usize, order: usize) -> Self {
        Self {
            initial: 0.0,
            samples,
            order,
            time_base: None,
        }
    }

    /// Build the number with window `N` and order `ORDER`.
    pub fn build<T: FloatCore, const N: usize, const ORDER: usize>(
        &self,
    ) -> Result<IntegrableNumber<T, N, ORDER>, ConfigError> {
        self.build_with(None)
    }

    pub(crate) fn build_with<T: FloatCore, const N: usize, const ORDER: usize>(
        &self,
        fallback: Option<TimeBaseConfig>,
    ) -> Result<IntegrableNumber<T, N, ORDER>, ConfigError> {
        if self.samples != N {
            return Err(ConfigError::length_mismatch("samples", N, self.samples));
        }
        check_order(ORDER, self.order)?;
        self.validate()?;
        let time = resolve_time(self.time_base, fallback)?;

        tracing::debug!(kind = "integrable", samples = N, order = ORDER, "building number");
        Ok(IntegrableNumber::with_time_base(
            convert("initial", self.initial)?,
            time,
        ))
    }
}

impl Validate for IntegrableConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        checks.finite("initial", self.initial);
        if let Some(time_base) = &self.time_base {
            checks.nested(time_base.validate());
        }
        checks.finish()
    }
}

/// Configuration for a [`PidBufferedNumber`].
///
/// The derivative and integral orders are the lengths of the gain lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PidConfig {
    /// Initial ("zero") value.
    #[serde(default)]
    pub initial: f64,

    /// Gain on the raw value.
    pub value_gain: f64,

    /// Gain on derivative `k + 1` at index `k`.
    #[serde(default)]
    pub d_gains: Vec<f64>,

    /// Gain on integral `k + 1` at index `k`.
    #[serde(default)]
    pub i_gains: Vec<f64>,

    /// Integral window size.
    pub samples: usize,

    /// Overrides the profile time base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_base: Option<TimeBaseConfig>,
}

impl PidConfig {
    /// Create a PID config starting at zero.
    pub fn new(value_gain: f64, d_gains: Vec<f64>, i_gains: Vec<f64>, samples: usize) -> Self {
        Self {
            initial: 0.0,
            value_gain,
            d_gains,
            i_gains,
            samples,
            time_base: None,
        }
    }

    /// Build the aggregate with `DN` derivative gains, `IN` integral gains
    /// and an integral window of `IM` samples.
    pub fn build<T: FloatCore, const DN: usize, const IN: usize, const IM: usize>(
        &self,
    ) -> Result<PidBufferedNumber<T, DN, IN, IM>, ConfigError> {
        self.build_with(None)
    }

    pub(crate) fn build_with<T: FloatCore, const DN: usize, const IN: usize, const IM: usize>(
        &self,
        fallback: Option<TimeBaseConfig>,
    ) -> Result<PidBufferedNumber<T, DN, IN, IM>, ConfigError> {
        let d_gains = convert_array::<T, DN>("d_gains", &self.d_gains)?;
        let i_gains = convert_array::<T, IN>("i_gains", &self.i_gains)?;
        if self.samples != IM {
            return Err(ConfigError::length_mismatch("samples", IM, self.samples));
        }
        self.validate()?;
        let time = resolve_time(self.time_base, fallback)?;

        tracing::debug!(
            kind = "pid",
            derivatives = DN,
            integrals = IN,
            samples = IM,
            "building number"
        );
        Ok(PidBufferedNumber::with_time_base(
            convert("initial", self.initial)?,
            convert("value_gain", self.value_gain)?,
            d_gains,
            i_gains,
            time,
        ))
    }
}

impl Validate for PidConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        checks
            .finite("initial", self.initial)
            .finite("value_gain", self.value_gain)
            .all_finite("d_gains", &self.d_gains)
            .all_finite("i_gains", &self.i_gains);
        if let Some(time_base) = &self.time_base {
            checks.nested(time_base.validate());
        }
        checks.finish()
    }
}

/// Configuration for a [`BufferedBool`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BufferedBoolConfig {
    /// The flag switches off below this level.
    pub bottom: f64,

    /// The flag switches on above this level.
    pub top: f64,

    /// Level change per tick.
    pub increment: f64,
}

impl BufferedBoolConfig {
    /// Create a buffered flag config.
    pub fn new(bottom: f64, top: f64, increment: f64) -> Self {
        Self {
            bottom,
            top,
            increment,
        }
    }

    /// Build the flag.
    pub fn build<T: FloatCore>(&self) -> Result<BufferedBool<T>, ConfigError> {
        self.validate()?;

        tracing::debug!(kind = "buffered_bool", "building number");
        Ok(BufferedBool::new(
            convert("bottom", self.bottom)?,
            convert("top", self.top)?,
            convert("increment", self.increment)?,
        ))
    }
}

impl Validate for BufferedBoolConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        checks
            .finite("bottom", self.bottom)
            .finite("top", self.top)
            .finite("increment", self.increment);
        if self.bottom > self.top {
            checks.fail(ValidationError::InvertedThresholds {
                bottom: self.bottom,
                top: self.top,
            });
        }
        checks.finish()
    }
}

/// Any configurable number, tagged by `kind` in TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumberConfig {
    /// `kind = "filtered"`
    Filtered(FilteredConfig),
    /// `kind = "differentiable"`
    Differentiable(DifferentiableConfig),
    /// `kind = "integrable"`
    Integrable(IntegrableConfig),
    /// `kind = "pid"`
    Pid(PidConfig),
    /// `kind = "buffered_bool"`
    BufferedBool(BufferedBoolConfig),
}

impl NumberConfig {
    /// The `kind` tag of this config.
    pub fn kind(&self) -> &'static str {
        match self {
            NumberConfig::Filtered(_) => "filtered",
            NumberConfig::Differentiable(_) => "differentiable",
            NumberConfig::Integrable(_) => "integrable",
            NumberConfig::Pid(_) => "pid",
            NumberConfig::BufferedBool(_) => "buffered_bool",
        }
    }
}

impl Validate for NumberConfig {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            NumberConfig::Filtered(config) => config.validate(),
            NumberConfig::Differentiable(config) => config.validate(),
            NumberConfig::Integrable(config) => config.validate(),
            NumberConfig::Pid(config) => config.validate(),
            NumberConfig::BufferedBool(config) => config.validate(),
        }
    }
}

impl From<FilteredConfig> for NumberConfig {
    fn from(config: FilteredConfig) -> Self {
        NumberConfig::Filtered(config)
    }
}

impl From<DifferentiableConfig> for NumberConfig {
    fn from(config: DifferentiableConfig) -> Self {
        NumberConfig::Differentiable(config)
    }
}

impl From<IntegrableConfig> for NumberConfig {
    fn from(config: IntegrableConfig) -> Self {
        NumberConfig::Integrable(config)
    }
}

impl From<PidConfig> for NumberConfig {
    fn from(config: PidConfig) -> Self {
        NumberConfig::Pid(config)
    }
}

impl From<BufferedBoolConfig> for NumberConfig {
    fn from(config: BufferedBoolConfig) -> Self {
        NumberConfig::BufferedBool(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticknum_core::OrderedNumber;

    #[test]
    fn filtered_builds_with_matching_lengths() {
        let config = FilteredConfig::new(vec![1.0, 2.0, 4.0, 8.0], 1);
        let mut n = config.build::<f32, 4, 1>().unwrap();
        n.update(1.0);
        assert!((n.get_value(1) - 1.0 / 15.0).abs() < 1e-6);
        assert_eq!(n.weight(3), Some(8.0));
    }

    #[test]
    fn filtered_rejects_wrong_weight_count() {
        let config = FilteredConfig::new(vec![1.0, 1.0, 1.0], 1);
        let err = config.build::<f32, 4, 1>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::LengthMismatch {
                field: "weights",
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn filtered_rejects_wrong_order() {
        let config = FilteredConfig::new(vec![1.0; 4], 2);
        let err = config.build::<f64, 4, 1>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OrderMismatch {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn filtered_validation_collects_failures() {
        let config = FilteredConfig {
            initial: f64::NAN,
            weights: vec![0.0, 0.0],
            order: 1,
            time_base: Some(TimeBaseConfig::new(-1.0, 1.0)),
        };
        match config.validate() {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains(&ValidationError::ZeroWeightSum));
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
        assert!(matches!(
            config.build::<f64, 2, 1>(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn time_base_is_applied() {
        let config = DifferentiableConfig {
            initial: 0.0,
            order: 1,
            time_base: Some(TimeBaseConfig::new(0.5, 4.0)),
        };
        let mut n = config.build::<f64, 1>().unwrap();
        // elapsed 0.5 scaled by 4
        n.update(6.0);
        assert_eq!(n.get_value(1), 3.0);
    }

    #[test]
    fn own_time_base_beats_fallback() {
        let config = DifferentiableConfig {
            initial: 0.0,
            order: 1,
            time_base: Some(TimeBaseConfig::new(1.0, 2.0)),
        };
        let n = config
            .build_with::<f64, 1>(Some(TimeBaseConfig::new(1.0, 10.0)))
            .unwrap();
        assert_eq!(n.time_base().frame_rate(), 2.0);

        let bare = DifferentiableConfig::new(1);
        let n = bare
            .build_with::<f64, 1>(Some(TimeBaseConfig::new(1.0, 10.0)))
            .unwrap();
        assert_eq!(n.time_base().frame_rate(), 10.0);
    }

    #[test]
    fn integrable_checks_window() {
        let config = IntegrableConfig::new(5, 2);
        assert!(config.build::<f64, 5, 2>().is_ok());
        assert!(matches!(
            config.build::<f64, 4, 2>(),
            Err(ConfigError::LengthMismatch {
                field: "samples",
                ..
            })
        ));
    }

    #[test]
    fn pid_checks_gain_lengths() {
        let config = PidConfig::new(1.0, vec![0.5], vec![0.1, 0.01], 8);
        assert!(config.build::<f32, 1, 2, 8>().is_ok());
        assert!(matches!(
            config.build::<f32, 2, 2, 8>(),
            Err(ConfigError::LengthMismatch {
                field: "d_gains",
                ..
            })
        ));
        assert!(matches!(
            config.build::<f32, 1, 1, 8>(),
            Err(ConfigError::LengthMismatch {
                field: "i_gains",
                ..
            })
        ));
    }

    #[test]
    fn pid_builds_working_controller() {
        let config = PidConfig::new(1.0, vec![0.5], vec![], 1);
        let mut pid = config.build::<f64, 1, 0, 1>().unwrap();
        pid.update(2.0);
        // 2 + 0.5 * 2
        assert_eq!(pid.value(), 3.0);
    }

    #[test]
    fn buffered_bool_rejects_inverted_thresholds() {
        let config = BufferedBoolConfig::new(0.7, 0.3, 0.1);
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvertedThresholds {
                bottom: 0.7,
                top: 0.3
            })
        );
        assert!(BufferedBoolConfig::new(0.3, 0.7, 0.1).build::<f32>().is_ok());
    }

    #[test]
    fn kind_tags_match_serde_names() {
        let configs: Vec<NumberConfig> = vec![
            FilteredConfig::new(vec![1.0], 1).into(),
            DifferentiableConfig::new(1).into(),
            IntegrableConfig::new(2, 1).into(),
            PidConfig::new(1.0, vec![], vec![], 1).into(),
            BufferedBoolConfig::new(0.3, 0.7, 0.1).into(),
        ];
        for config in configs {
            let text = toml::to_string(&config).unwrap();
            assert!(
                text.contains(&format!("kind = \"{}\"", config.kind())),
                "got: {text}"
            );
        }
    }

    #[test]
    fn parses_tagged_table() {
        let config: NumberConfig = toml::from_str(
            r#"
            kind = "integrable"
            samples = 3
            order = 2
            "#,
        )
        .unwrap();
        assert_eq!(config, NumberConfig::Integrable(IntegrableConfig::new(3, 2)));
    }

    #[test]
    fn values_too_large_for_target_are_rejected() {
        let config = FilteredConfig::new(vec![1.0e300, 1.0], 1);
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.build::<f32, 2, 1>(),
            Err(ConfigError::Conversion {
                field: "weights",
                ..
            })
        ));
        assert!(config.build::<f64, 2, 1>().is_ok());

        let time_base = TimeBaseConfig::new(1.0e300, 1.0);
        assert!(matches!(
            time_base.build::<f32>(),
            Err(ConfigError::Conversion {
                field: "time_unit",
                ..
            })
        ));
    }
}
