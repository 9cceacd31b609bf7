//! Profile file format and operations.

use num_traits::float::FloatCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use ticknum_core::{
    BufferedBool, DifferentiableNumber, FilteredNumber, IntegrableNumber, PidBufferedNumber,
};

use crate::error::ConfigError;
use crate::number_config::{NumberConfig, TimeBaseConfig};
use crate::validation::{Checks, Validate, ValidationResult};

/// A named set of number configurations.
///
/// Profiles are stored as TOML files. The optional top-level time base
/// applies to every number that does not set its own.
///
/// # TOML Format
///
/// ```toml
/// name = "Vehicle"
/// description = "Smoothing for the player car"
///
/// [time_base]
/// time_unit = 0.016
/// frame_rate = 60.0
///
/// [numbers.speed]
/// kind = "filtered"
/// weights = [4.0, 3.0, 2.0, 1.0]
///
/// [numbers.drifting]
/// kind = "buffered_bool"
/// bottom = 0.25
/// top = 0.55
/// increment = 0.1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Name of the profile.
    pub name: String,

    /// Optional description of the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Time base for numbers without their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_base: Option<TimeBaseConfig>,

    /// Numbers by name.
    #[serde(default)]
    pub numbers: BTreeMap<String, NumberConfig>,
}

impl Profile {
    /// Create a new empty profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            time_base: None,
            numbers: BTreeMap::new(),
        }
    }

    /// Create a profile with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the shared time base.
    pub fn with_time_base(mut self, time_base: TimeBaseConfig) -> Self {
        self.time_base = Some(time_base);
        self
    }

    /// Add or replace a number.
    pub fn with_number(mut self, name: impl Into<String>, config: impl Into<NumberConfig>) -> Self {
        self.numbers.insert(name.into(), config.into());
        self
    }

    /// Load a profile from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let profile: Profile = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            name = %profile.name,
            numbers = profile.numbers.len(),
            "loaded profile"
        );
        Ok(profile)
    }

    /// Load a profile from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the profile to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the profile to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the number of configured numbers.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Check if the profile is empty.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Get a number config by name.
    pub fn get(&self, name: &str) -> Option<&NumberConfig> {
        self.numbers.get(name)
    }

    /// Names of all numbers, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.numbers.keys().map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Result<&NumberConfig, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownNumber(name.to_string()))
    }

    /// Build the filtered number `name`.
    pub fn filtered<T: FloatCore, const N: usize, const ORDER: usize>(
        &self,
        name: &str,
    ) -> Result<FilteredNumber<T, N, ORDER>, ConfigError> {
        match self.lookup(name)? {
            NumberConfig::Filtered(config) => config.build_with(self.time_base),
            other => Err(kind_mismatch(name, "filtered", other)),
        }
    }

    /// Build the differentiable number `name`.
    pub fn differentiable<T: FloatCore, const ORDER: usize>(
        &self,
        name: &str,
    ) -> Result<DifferentiableNumber<T, ORDER>, ConfigError> {
        match self.lookup(name)? {
            NumberConfig::Differentiable(config) => config.build_with(self.time_base),
            other => Err(kind_mismatch(name, "differentiable", other)),
        }
    }

    /// Build the integrable number `name`.
    pub fn integrable<T: FloatCore, const N: usize, const ORDER: usize>(
        &self,
        name: &str,
    ) -> Result<IntegrableNumber<T, N, ORDER>, ConfigError> {
        match self.lookup(name)? {
            NumberConfig::Integrable(config) => config.build_with(self.time_base),
            other => Err(kind_mismatch(name, "integrable", other)),
        }
    }

    /// Build the PID aggregate `name`.
    pub fn pid<T: FloatCore, const DN: usize, const IN: usize, const IM: usize>(
        &self,
        name: &str,
    ) -> Result<PidBufferedNumber<T, DN, IN, IM>, ConfigError> {
        match self.lookup(name)? {
            NumberConfig::Pid(config) => config.build_with(self.time_base),
            other => Err(kind_mismatch(name, "pid", other)),
        }
    }

    /// Build the buffered flag `name`.
    pub fn buffered_bool<T: FloatCore>(&self, name: &str) -> Result<BufferedBool<T>, ConfigError> {
        match self.lookup(name)? {
            NumberConfig::BufferedBool(config) => config.build(),
            other => Err(kind_mismatch(name, "buffered_bool", other)),
        }
    }
}

impl Validate for Profile {
    fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        if let Some(time_base) = &self.time_base {
            checks.nested(time_base.validate());
        }
        for config in self.numbers.values() {
            checks.nested(config.validate());
        }
        checks.finish()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

fn kind_mismatch(name: &str, expected: &'static str, found: &NumberConfig) -> ConfigError {
    ConfigError::KindMismatch {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}
