//! Errors raised while reading a page from a remote collection.

use std::time::Duration;

use thiserror::Error;

use super::category::ErrorCategory;

/// A remote read was rejected or never completed.
///
/// Fetch failures never reach the presentation layer as errors: the
/// controller clears its loading flag, keeps the previous rows and reports
/// the failure through the notifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection to the backend failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The fetch did not complete within the configured timeout.
    #[error("Fetch timed out after {after:?}")]
    Timeout { after: Duration },

    /// The backend answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response could not be decoded into a page.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The fetch was superseded or the view was torn down.
    #[error("Fetch cancelled")]
    Cancelled,

    /// Anything else.
    #[error("Fetch failed: {0}")]
    Other(String),
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::ConnectionFailed(_) | FetchError::Timeout { .. } => ErrorCategory::Network,
            FetchError::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
            FetchError::Status { status: 408, .. } | FetchError::Status { status: 429, .. } => {
                ErrorCategory::Network
            }
            FetchError::Status { .. } => ErrorCategory::User,
            FetchError::InvalidResponse(_) => ErrorCategory::Server,
            FetchError::Cancelled | FetchError::Other(_) => ErrorCategory::Client,
        }
    }

    /// Check if this error is likely transient and the fetch can be retried.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::ConnectionFailed(_) => "E_FETCH_CONN",
            FetchError::Timeout { .. } => "E_FETCH_TIMEOUT",
            FetchError::Status { .. } => "E_FETCH_STATUS",
            FetchError::InvalidResponse(_) => "E_FETCH_INVALID",
            FetchError::Cancelled => "E_FETCH_CANCEL",
            FetchError::Other(_) => "E_FETCH_OTHER",
        }
    }

    /// Get a user-friendly message, suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::ConnectionFailed(_) => {
                "Unable to reach the server. Showing the last loaded results.".to_string()
            }
            FetchError::Timeout { after } => format!(
                "Loading took longer than {} seconds. Please try again.",
                after.as_secs().max(1)
            ),
            FetchError::Status { status, .. } => match *status {
                401 => "Your session has expired. Please sign in again.".to_string(),
                403 => "You don't have permission to view this list.".to_string(),
                404 => "The requested list was not found.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                other => format!("The server returned an error (HTTP {}).", other),
            },
            FetchError::InvalidResponse(_) => {
                "Received an invalid response from the server.".to_string()
            }
            FetchError::Cancelled => "Loading was cancelled.".to_string(),
            FetchError::Other(message) => format!("Could not load the list: {}", message),
        }
    }
}
