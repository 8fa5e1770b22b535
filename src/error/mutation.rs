//! Errors raised by create/update/delete calls.

use thiserror::Error;

use super::category::ErrorCategory;

/// A create, update or delete was rejected.
///
/// Unlike fetch failures these are surfaced to the owning screen, and the
/// list is left untouched (no reload).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutationError {
    /// The row has neither `_id` nor `id`.
    #[error("Row has no identity (_id or id)")]
    MissingIdentity,

    /// No CRUD accessor was supplied to the controller.
    #[error("No CRUD accessor configured for '{0}'")]
    NotSupported(String),

    /// The record does not exist on the backend.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backend rejected the payload.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backend answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Connection to the backend failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Anything else.
    #[error("Mutation failed: {0}")]
    Other(String),
}

impl MutationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MutationError::MissingIdentity | MutationError::NotSupported(_) => {
                ErrorCategory::Client
            }
            MutationError::NotFound(_) | MutationError::Validation(_) => ErrorCategory::User,
            MutationError::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
            MutationError::Status { .. } => ErrorCategory::User,
            MutationError::ConnectionFailed(_) => ErrorCategory::Network,
            MutationError::Other(_) => ErrorCategory::Server,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            MutationError::MissingIdentity => "E_MUT_NO_ID",
            MutationError::NotSupported(_) => "E_MUT_UNSUPPORTED",
            MutationError::NotFound(_) => "E_MUT_NOT_FOUND",
            MutationError::Validation(_) => "E_MUT_INVALID",
            MutationError::Status { .. } => "E_MUT_STATUS",
            MutationError::ConnectionFailed(_) => "E_MUT_CONN",
            MutationError::Other(_) => "E_MUT_OTHER",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            MutationError::NotFound(id) => format!("The record {} no longer exists.", id),
            MutationError::Validation(message) => format!("The record is invalid: {}", message),
            MutationError::ConnectionFailed(_) => {
                "Unable to reach the server. Your change was not saved.".to_string()
            }
            other => format!("Your change could not be saved ({}).", other.error_code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_error_category() {
        assert_eq!(MutationError::MissingIdentity.category(), ErrorCategory::Client);
        assert_eq!(
            MutationError::NotFound("42".into()).category(),
            ErrorCategory::User
        );
        assert_eq!(
            MutationError::Status {
                status: 500,
                message: String::new()
            }
            .category(),
            ErrorCategory::Server
        );
        assert!(MutationError::ConnectionFailed("reset".into()).is_retryable());
    }

    #[test]
    fn test_mutation_error_user_message() {
        assert!(MutationError::NotFound("abc".into())
            .user_message()
            .contains("abc"));
        assert!(MutationError::MissingIdentity
            .user_message()
            .contains("E_MUT_NO_ID"));
    }
}
