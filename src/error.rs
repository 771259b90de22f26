//! Error types for the docvet CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::validate::PolicyError;
use thiserror::Error;

/// Main error type for docvet operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum DocvetError {
    /// User provided invalid arguments or an unreadable/undecodable configuration.
    #[error("{0}")]
    UserError(String),

    /// The configuration violates the active policy.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The policy tree itself is malformed.
    #[error("Invalid policy: {0}")]
    PolicyError(#[from] PolicyError),
}

impl DocvetError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DocvetError::UserError(_) => exit_codes::USER_ERROR,
            DocvetError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            DocvetError::PolicyError(_) => exit_codes::POLICY_FAILURE,
        }
    }
}

/// Result type alias for docvet operations.
pub type Result<T> = std::result::Result<T, DocvetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = DocvetError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = DocvetError::ValidationError("missing field".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn policy_error_has_correct_exit_code() {
        let err = DocvetError::PolicyError(PolicyError::Unresolved {
            segment: "*".to_string(),
            path: "docs".to_string(),
        });
        assert_eq!(err.exit_code(), exit_codes::POLICY_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = DocvetError::ValidationError("missing field 'repo' in branch website".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: missing field 'repo' in branch website"
        );
    }
}
