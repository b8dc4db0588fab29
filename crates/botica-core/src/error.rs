//! # Error Types
//!
//! Domain-specific error types for botica-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  botica-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  botica-store errors (separate crate)                                  │
//! │  └── StoreError       - Document store operation failures              │
//! │                                                                         │
//! │  botica-services errors (separate crate)                               │
//! │  └── ServiceError     - Wraps both of the above                        │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        StoreError ──────┴──► ServiceError ──► caller                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, limits)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store operation runs, and by the
/// service layer for read-then-check rules (e.g. duplicate category name).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set (e.g., prescription file extension).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate category name).
    ///
    /// Produced by the service layer's read-then-check pattern, never by
    /// the store itself.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        };
        assert_eq!(err.to_string(), "name must be at most 120 characters");
    }

    #[test]
    fn test_duplicate_message_includes_value() {
        let err = ValidationError::Duplicate {
            field: "name".to_string(),
            value: "Analgésicos".to_string(),
        };
        assert_eq!(err.to_string(), "name 'Analgésicos' already exists");
    }
}
