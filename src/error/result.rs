//! Result type alias for list operations.

use super::list_error::ListError;

/// Type alias for Results using [`ListError`].
pub type ListResult<T> = Result<T, ListError>;
