//! Trait abstractions for the capabilities a list is built from.
//!
//! Everything the list core talks to is injected through these traits, so
//! tests can substitute in-memory or scripted implementations.
//!
//! # Traits
//!
//! - [`CollectionSource`] - paginated remote fetch
//! - [`CrudAccessor`] - create/update/delete
//! - [`KeyValueStore`] - durable string storage for view state
//! - [`Notifier`] - toast-style side channel for recovered failures
//! - [`ListScreen`] - columns, title and intent hooks of a concrete screen

pub mod collection;
pub mod crud;
pub mod notifier;
pub mod screen;
pub mod store;

pub use collection::CollectionSource;
pub use crud::CrudAccessor;
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use screen::{HookOutcome, ListScreen};
pub use store::KeyValueStore;
