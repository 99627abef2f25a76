//! Input validation for process batches.
//!
//! Checks a batch before it is loaded into an engine. Detects:
//! - Non-positive bursts
//! - Negative arrivals
//! - Caller-supplied ids that are zero, `u64::MAX` or repeated
//!
//! All problems are collected so the authoring surface can report them
//! together; a batch with any error is rejected as a whole.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{ProcessId, ProcessInput};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Position of the offending draft in the submitted batch.
    pub index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Burst is zero or negative.
    NonPositiveBurst,
    /// Arrival is before t=0.
    NegativeArrival,
    /// A caller-supplied id is zero or `u64::MAX`, or no id is left to assign.
    InvalidId,
    /// Two drafts share the same id.
    DuplicateId,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            index: None,
            message: message.into(),
        }
    }

    pub(crate) fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Validates a process batch.
///
/// Checks:
/// 1. Every burst is > 0
/// 2. Every arrival is >= 0
/// 3. Caller-supplied ids are in `1..u64::MAX` (the top value is never assigned)
/// 4. Caller-supplied ids are unique within the batch
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_batch(inputs: &[ProcessInput]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, input) in inputs.iter().enumerate() {
        let label = describe(input, index);

        if input.burst <= 0 {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::NonPositiveBurst,
                    format!("{label}: burst must be > 0 (got {})", input.burst),
                )
                .at(index),
            );
        }

        if input.arrival < 0 {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::NegativeArrival,
                    format!("{label}: arrival must be >= 0 (got {})", input.arrival),
                )
                .at(index),
            );
        }

        if let Some(id) = input.id {
            if id == 0 || id == ProcessId::MAX {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::InvalidId,
                        format!("{label}: process id must be in 1..{}", ProcessId::MAX),
                    )
                    .at(index),
                );
            } else if !seen_ids.insert(id) {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!("Duplicate process id: {id}"),
                    )
                    .at(index),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn describe(input: &ProcessInput, index: usize) -> String {
    match (&input.name, input.id) {
        (Some(name), _) => format!("Process '{name}'"),
        (None, Some(id)) => format!("Process {id}"),
        (None, None) => format!("Process #{index}"),
    }
}
