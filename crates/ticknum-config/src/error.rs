//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or building numbers.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A coefficient list does not match the requested compile-time length
    #[error("'{field}' has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the offending list.
        field: &'static str,
        /// Length required by the requested type.
        expected: usize,
        /// Length found in the configuration.
        found: usize,
    },

    /// The configured order does not match the requested compile-time order
    #[error("order {found} configured, expected {expected}")]
    OrderMismatch {
        /// Order required by the requested type.
        expected: usize,
        /// Order found in the configuration.
        found: usize,
    },

    /// No number with this name in the profile
    #[error("unknown number: {0}")]
    UnknownNumber(String),

    /// The named number exists but is of another kind
    #[error("number '{name}' is {found}, expected {expected}")]
    KindMismatch {
        /// Name of the number.
        name: String,
        /// Kind that was requested.
        expected: &'static str,
        /// Kind found in the profile.
        found: &'static str,
    },

    /// A configured value does not fit the requested numeric type
    #[error("value {value} of '{field}' cannot be represented in the target type")]
    Conversion {
        /// Name of the offending field.
        field: &'static str,
        /// The configured value.
        value: f64,
    },

    /// Validation errors
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(field: &'static str, expected: usize, found: usize) -> Self {
        ConfigError::LengthMismatch {
            field,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    // --- factory methods ---

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
    }

    #[test]
    fn write_file_factory_produces_correct_variant() {
        let err = ConfigError::write_file("/out/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out/path"))
        );
    }

    #[test]
    fn length_mismatch_factory_produces_correct_variant() {
        let err = ConfigError::length_mismatch("weights", 4, 3);
        assert!(matches!(
            err,
            ConfigError::LengthMismatch {
                field: "weights",
                expected: 4,
                found: 3
            }
        ));
    }

    // --- Display formatting ---

    #[test]
    fn read_file_display() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
    }

    #[test]
    fn create_dir_display() {
        let err = ConfigError::create_dir("/a/b", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to create directory"), "got: {msg}");
        assert!(msg.contains("/a/b"), "got: {msg}");
    }

    #[test]
    fn length_mismatch_display() {
        let err = ConfigError::length_mismatch("d_gains", 2, 5);
        assert_eq!(err.to_string(), "'d_gains' has 5 entries, expected 2");
    }

    #[test]
    fn order_mismatch_display() {
        let err = ConfigError::OrderMismatch {
            expected: 3,
            found: 1,
        };
        assert_eq!(err.to_string(), "order 1 configured, expected 3");
    }

    #[test]
    fn unknown_number_display() {
        let err = ConfigError::UnknownNumber("camera_lag".to_string());
        assert_eq!(err.to_string(), "unknown number: camera_lag");
    }

    #[test]
    fn kind_mismatch_display() {
        let err = ConfigError::KindMismatch {
            name: "speed".to_string(),
            expected: "pid",
            found: "filtered",
        };
        assert_eq!(err.to_string(), "number 'speed' is filtered, expected pid");
    }

    #[test]
    fn validation_wraps_source() {
        let err: ConfigError = ValidationError::ZeroWeightSum.into();
        assert!(err.to_string().starts_with("validation failed"));
        assert!(err.source().is_some());
    }

    // --- Error::source() chain for I/O-wrapping variants ---

    #[test]
    fn read_file_source_is_some() {
        let err = ConfigError::read_file("/x", mock_io_err());
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn unknown_number_source_is_none() {
        let err = ConfigError::UnknownNumber("n".to_string());
        assert!(err.source().is_none());
    }
}
