//! Quick-filter persistence across view instantiations.
//!
//! Only the quick-filter text is persisted, keyed by a caller-supplied
//! storage key. A view without a key gets a no-op binding; no fallback key is
//! ever derived. Storage failures are logged once and then the feature
//! degrades to non-persistent for the rest of the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::StoreError;
use crate::traits::KeyValueStore;

const QUICK_FILTER_PREFIX: &str = "listgrid.quickFilter.";

/// Keyed save/restore of quick-filter text, shared by all views.
pub struct StatePersistence {
    store: Arc<dyn KeyValueStore>,
    degraded: AtomicBool,
}

impl StatePersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            degraded: AtomicBool::new(false),
        }
    }

    /// Whether a storage failure has switched persistence off.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    pub fn save(&self, key: &str, value: &str) {
        if self.is_degraded() {
            return;
        }
        let storage_key = storage_key(key);
        if let Err(e) = self.store.set(&storage_key, value) {
            self.degrade("save", key, &e);
        } else {
            tracing::trace!(key, "Saved quick filter");
        }
    }

    /// Stored quick filter, or an empty string if absent or unreadable.
    pub fn get(&self, key: &str) -> String {
        if self.is_degraded() {
            return String::new();
        }
        match self.store.get(&storage_key(key)) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                self.degrade("get", key, &e);
                String::new()
            }
        }
    }

    /// Bind to one view's storage key. `None` yields a no-op binding.
    pub fn bind(self: &Arc<Self>, key: Option<String>) -> ViewPersistence {
        ViewPersistence {
            inner: key.filter(|k| !k.is_empty()).map(|k| (Arc::clone(self), k)),
        }
    }

    fn degrade(&self, operation: &str, key: &str, error: &StoreError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                key,
                operation,
                error_code = error.error_code(),
                "Quick filter persistence unavailable, continuing without it: {}",
                error
            );
        }
    }
}

fn storage_key(key: &str) -> String {
    format!("{}{}", QUICK_FILTER_PREFIX, key)
}

/// Persistence bound to a single view's storage key.
#[derive(Clone, Default)]
pub struct ViewPersistence {
    inner: Option<(Arc<StatePersistence>, String)>,
}

impl ViewPersistence {
    /// A binding that never reads or writes.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&str> {
        self.inner.as_ref().map(|(_, k)| k.as_str())
    }

    pub fn save_quick_filter(&self, value: &str) {
        if let Some((persistence, key)) = &self.inner {
            persistence.save(key, value);
        }
    }

    pub fn quick_filter(&self) -> String {
        match &self.inner {
            Some((persistence, key)) => persistence.get(key),
            None => String::new(),
        }
    }
}

impl std::fmt::Debug for ViewPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPersistence")
            .field("key", &self.key())
            .finish()
    }
}
