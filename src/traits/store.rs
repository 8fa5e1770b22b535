//! Key-value storage capability used for view state persistence.

use crate::error::StoreError;

/// A small synchronous string store, shared by every list view.
///
/// Writes are last-write-wins; no locking contract beyond what the
/// implementation needs for its own interior mutability.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
