//! Error types for sentir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for sentir operations.
///
/// Covers configuration problems, dimension mismatches between paired
/// label sequences, labels outside the active scheme's universe, and
/// undefined classification of NaN scores.
///
/// # Examples
///
/// ```
/// use sentir::error::SentirError;
///
/// let err = SentirError::DimensionMismatch {
///     expected: "5 actual labels".to_string(),
///     actual: "4 predicted labels".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum SentirError {
    /// Paired sequences have incompatible lengths or shapes.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid configuration value provided.
    InvalidConfig {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A score could not be assigned a class (NaN input).
    UndefinedClassification {
        /// The offending score, formatted
        score: String,
    },

    /// A label fell outside the scheme's label universe.
    LabelOutOfUniverse {
        /// The offending label
        label: i8,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SentirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentirError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            SentirError::InvalidConfig {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid configuration: {param} = {value}, expected {constraint}"
                )
            }
            SentirError::UndefinedClassification { score } => {
                write!(f, "classification undefined for score {score}")
            }
            SentirError::LabelOutOfUniverse { label } => {
                write!(f, "label {label} is outside the label universe")
            }
            SentirError::Io(e) => write!(f, "I/O error: {e}"),
            SentirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SentirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SentirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SentirError {
    fn from(err: std::io::Error) -> Self {
        SentirError::Io(err)
    }
}

impl From<&str> for SentirError {
    fn from(msg: &str) -> Self {
        SentirError::Other(msg.to_string())
    }
}

impl From<String> for SentirError {
    fn from(msg: String) -> Self {
        SentirError::Other(msg)
    }
}

impl SentirError {
    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidConfig {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SentirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = SentirError::DimensionMismatch {
            expected: "10 rows".to_string(),
            actual: "7".to_string(),
        };
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("10 rows"));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = SentirError::invalid_config("n_folds", 1, ">= 2");
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("n_folds"));
        assert!(err.to_string().contains(">= 2"));
    }

    #[test]
    fn test_undefined_classification_display() {
        let err = SentirError::UndefinedClassification {
            score: "NaN".to_string(),
        };
        assert!(err.to_string().contains("classification undefined"));
    }

    #[test]
    fn test_label_out_of_universe_display() {
        let err = SentirError::LabelOutOfUniverse { label: 3 };
        assert!(err.to_string().contains("label 3"));
        assert!(err.to_string().contains("universe"));
    }

    #[test]
    fn test_from_str() {
        let err: SentirError = "test error".into();
        assert!(matches!(err, SentirError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SentirError = io_err.into();
        assert!(matches!(err, SentirError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = SentirError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = SentirError::Other("test".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = SentirError::dimension_mismatch("rows", 100, 50);
        let msg = err.to_string();
        assert!(msg.contains("rows=100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_empty_input_helper() {
        let err = SentirError::empty_input("corpus");
        assert!(err.to_string().contains("empty input"));
        assert!(err.to_string().contains("corpus"));
    }
}
