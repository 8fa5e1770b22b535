//! Unified error type for the list core.

use thiserror::Error;

use super::category::ErrorCategory;
use super::fetch::FetchError;
use super::mutation::MutationError;
use super::store::StoreError;

/// Unified error type.
///
/// Only `Configuration` is fatal: it is returned when a concrete screen fails
/// to supply its column definitions or title, so construction fails fast.
#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A concrete screen is missing a required extension point.
    #[error("Invalid list screen '{screen}': {message}")]
    Configuration { screen: String, message: String },

    /// The controller was used after `dispose()`.
    #[error("List controller has been disposed")]
    Disposed,
}

impl ListError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ListError::Fetch(err) => err.category(),
            ListError::Mutation(err) => err.category(),
            ListError::Store(_) => ErrorCategory::System,
            ListError::Configuration { .. } => ErrorCategory::Configuration,
            ListError::Disposed => ErrorCategory::Client,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ListError::Fetch(err) => err.error_code(),
            ListError::Mutation(err) => err.error_code(),
            ListError::Store(err) => err.error_code(),
            ListError::Configuration { .. } => "E_LIST_CONFIG",
            ListError::Disposed => "E_LIST_DISPOSED",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}
