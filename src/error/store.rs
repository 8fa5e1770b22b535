//! Errors raised by the key-value store behind quick-filter persistence.

use thiserror::Error;

/// Storage unavailable, unreadable, or full.
///
/// `StatePersistence` swallows these: the quick filter silently stops being
/// remembered for the session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "E_STORE_UNAVAILABLE",
            StoreError::QuotaExceeded => "E_STORE_QUOTA",
            StoreError::Io(_) => "E_STORE_IO",
            StoreError::Serialization(_) => "E_STORE_SERDE",
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
