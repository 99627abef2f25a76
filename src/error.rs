//! Error types for the simulator.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by engine construction, batch loading and configuration.
///
/// `Engine::step` never fails; every error originates from a
/// constructor or a loader and is returned to that caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Unknown algorithm name or a quantum below 1 for Round-Robin.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The process batch failed validation and was not loaded.
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A scenario or environment setting could not be read.
    #[error("Config error: {0}")]
    Config(String),
}

impl SimError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Validation errors carried by an [`SimError::InvalidInput`], if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_display_joins_messages() {
        let err = SimError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::NonPositiveBurst, "a"),
            ValidationError::new(ValidationErrorKind::NegativeArrival, "b"),
        ]);
        assert_eq!(err.to_string(), "Invalid input: a; b");
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_config_has_no_validation_errors() {
        let err = SimError::config("bad file");
        assert!(err.validation_errors().is_empty());
        assert_eq!(err.to_string(), "Config error: bad file");
    }
}
