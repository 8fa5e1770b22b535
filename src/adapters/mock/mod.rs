//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`ScriptedCollection`] - queued pages/errors with per-call delays
//! - [`RecordingCrud`] - records mutations, switchable failure
//! - [`InMemoryStore`] - key-value store with read/write failure switches
//! - [`RecordingNotifier`] - captures notices

pub mod collection;
pub mod crud;
pub mod notifier;
pub mod store;

pub use collection::{ScriptedCollection, ScriptedResponse};
pub use crud::{CrudCall, RecordingCrud};
pub use notifier::RecordingNotifier;
pub use store::InMemoryStore;
