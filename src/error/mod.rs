//! Error handling for the list core.
//!
//! The taxonomy follows where each failure is recovered:
//!
//! | Error | Recovered at | Visible to screen |
//! |-------|--------------|-------------------|
//! | [`FetchError`] | controller (notice, rows kept) | no |
//! | [`MutationError`] | returned to the caller | yes |
//! | [`StoreError`] | `StatePersistence` (logged, swallowed) | no |
//! | [`ListError::Configuration`] | construction | yes, fatal |

mod category;
mod fetch;
mod list_error;
mod mutation;
mod result;
mod store;

pub use category::ErrorCategory;
pub use fetch::FetchError;
pub use list_error::ListError;
pub use mutation::MutationError;
pub use result::ListResult;
pub use store::StoreError;
