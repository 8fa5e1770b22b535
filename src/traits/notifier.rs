//! Non-blocking side channel for reporting recovered failures.

use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// A message for the user, typically shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    /// List title the notice belongs to.
    pub source: String,
    pub message: String,
    pub error_code: Option<&'static str>,
    pub retryable: bool,
}

impl Notice {
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            source: source.into(),
            message: message.into(),
            error_code: None,
            retryable: false,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.error_code = Some(code);
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

/// Receives notices. Must not block the event loop.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
