//! Input validation for simulation rounds and engine configuration.
//!
//! Checks structural integrity before any tick executes. Detects:
//! - Duplicate or empty process ids
//! - Non-positive service times
//! - Malformed generator bounds
//! - Empty MLFQ level lists and zero quanta
//!
//! None of these are recovered internally; they propagate to the caller,
//! which owns user-facing messaging.

use crate::models::ProcessDefinition;
use std::collections::HashSet;
use std::fmt;

/// Validation result for a whole round.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Generator bounds are inverted or a distribution mean is unusable.
    InvalidBounds,
    /// MLFQ configured without any level.
    EmptyLevels,
    /// A quantum of zero ticks.
    NonPositiveQuantum,
    /// Two processes in one round share the same id.
    DuplicateId,
    /// A process has an empty id.
    EmptyId,
    /// A process requires zero ticks of service.
    NonPositiveService,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a round of process definitions.
///
/// Checks:
/// 1. No empty ids
/// 2. No duplicate ids
/// 3. Every service time is positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_round(round: &[ProcessDefinition]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for def in round {
        if def.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Process arriving at {} has an empty id", def.arrival),
            ));
        } else if !ids.insert(def.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", def.id),
            ));
        }

        if def.service == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveService,
                format!("Process '{}' must require at least one tick", def.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
