//! Error types for statdemo.
//!
//! Every fallible operation returns `Result<T, DemoError>`. Parameters are
//! checked before any sampling starts, so a failed run never produces a
//! partial report.

use thiserror::Error;

/// Result type alias for statdemo operations.
pub type DemoResult<T> = Result<T, DemoError>;

/// Unified error type for all statdemo operations.
#[derive(Debug, Error)]
pub enum DemoError {
    // ===== Input Errors =====
    /// A parameter is outside its accepted domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed to the user.
        name: String,
        /// Offending value, formatted for display.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Derive-based range validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Raw sample length cannot be split into the requested blocks.
    #[error(
        "Shape mismatch: {len} samples cannot form {num_samples} blocks of {sample_size}"
    )]
    ShapeMismatch {
        /// Length of the raw sequence.
        len: usize,
        /// Requested number of blocks.
        num_samples: usize,
        /// Requested block length.
        sample_size: usize,
    },

    /// Aggregation requested over an empty sequence.
    #[error("Empty sample: {0} needs at least one value")]
    EmptySample(String),

    // ===== Configuration Errors =====
    /// Invalid scenario configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DemoError {
    /// Create an invalid-parameter error.
    #[must_use]
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an empty-sample error naming the computation that needed data.
    #[must_use]
    pub fn empty(context: impl Into<String>) -> Self {
        Self::EmptySample(context.into())
    }

    /// Whether this error means the caller supplied a bad parameter.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. } | Self::Validation(_))
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_detection() {
        let err = DemoError::invalid_parameter("scale", -1.0, "must be positive");
        assert!(err.is_invalid_parameter());

        let shape = DemoError::ShapeMismatch {
            len: 10,
            num_samples: 3,
            sample_size: 3,
        };
        assert!(!shape.is_invalid_parameter());

        assert!(!DemoError::config("bad").is_invalid_parameter());
        assert!(!DemoError::empty("mean").is_invalid_parameter());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = DemoError::invalid_parameter("sample_size", 0, "must be at least 1");
        let msg = err.to_string();
        assert!(msg.contains("sample_size"));
        assert!(msg.contains("= 0"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = DemoError::ShapeMismatch {
            len: 59_999,
            num_samples: 2000,
            sample_size: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("59999"));
        assert!(msg.contains("2000 blocks of 30"));
    }

    #[test]
    fn test_empty_sample_display() {
        let msg = DemoError::empty("frequency table").to_string();
        assert!(msg.contains("frequency table"));
        assert!(msg.contains("at least one value"));
    }

    #[test]
    fn test_error_config() {
        let err = DemoError::config("verify needs a seed");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("verify needs a seed"));
    }

    #[test]
    fn test_error_serialization() {
        let err = DemoError::serialization("failed to serialize");
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: DemoError = json_err.into();
        assert!(matches!(err, DemoError::Serialization(_)));
    }

    #[test]
    fn test_error_from_io() {
        let err: DemoError = std::io::Error::other("disk gone").into();
        assert!(err.to_string().contains("I/O error"));
    }
}
