//! Concrete implementations of the capability traits.
//!
//! # Adapters
//!
//! - [`MemoryCollection`] - in-process collection with full query semantics
//! - [`RestCollection`] - JSON REST endpoint via reqwest
//! - [`JsonFileStore`] - durable key-value store in a JSON file
//! - [`TracingNotifier`] - notices as tracing events
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::ScriptedCollection`] - scripted, delayed fetch responses
//! - [`mock::RecordingCrud`] - recorded mutations with switchable failure
//! - [`mock::InMemoryStore`] - in-memory key-value store
//! - [`mock::RecordingNotifier`] - captured notices

pub mod file_store;
pub mod memory_collection;
pub mod mock;
pub mod rest_collection;
pub mod tracing_notifier;

pub use file_store::JsonFileStore;
pub use memory_collection::MemoryCollection;
pub use rest_collection::RestCollection;
pub use tracing_notifier::TracingNotifier;
