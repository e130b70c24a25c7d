//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while validating caller-supplied input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Fails with `EmptyField` when the value is missing or only whitespace.
    pub fn require(field: &str, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(()),
            _ => Err(Self::empty_field(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_correctly() {
        let err = ValidationError::empty_field("decision_text");
        assert_eq!(format!("{}", err), "decision_text is required");
    }

    #[test]
    fn out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("score", 0, 100, 150);
        assert_eq!(
            format!("{}", err),
            "Field 'score' must be between 0 and 100, got 150"
        );
    }

    #[test]
    fn invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("language", "expected en or hi");
        assert_eq!(
            format!("{}", err),
            "Field 'language' has invalid format: expected en or hi"
        );
    }

    #[test]
    fn require_rejects_missing_and_blank_values() {
        assert!(ValidationError::require("answer", None).is_err());
        assert!(ValidationError::require("answer", Some("   ")).is_err());
        assert!(ValidationError::require("answer", Some("yes")).is_ok());
    }
}
