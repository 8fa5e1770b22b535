//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let harness = TestListBuilder::new().with_persisted_search("abc").mount();
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use listgrid::config::ListConfig;
use listgrid::controller::ListController;
use listgrid::models::Page;
use listgrid::persistence::StatePersistence;
use listgrid::view::ListView;
use serde_json::{json, Value};

/// Storage key the test view persists under.
pub const VIEW_KEY: &str = "vehicles";

/// `n` vehicle rows with ids `"1"..="n"`.
pub fn vehicles(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "_id": i.to_string(),
                "plate": format!("{:04}-ABC", i),
                "brand": if i % 2 == 0 { "Seat" } else { "Renault" },
                "year": 2000 + (i % 20) as u64,
                "owner": { "name": format!("Owner {}", i) },
            })
        })
        .collect()
}

/// A page cut from `vehicles(total)`.
#[allow(dead_code)]
pub fn vehicle_page(total: usize, page: u32, limit: u32) -> Page<Value> {
    let start = (page as usize - 1) * limit as usize;
    let data = vehicles(total)
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();
    Page::new(data, total as u64, page, limit)
}

/// Everything a list integration test touches.
pub struct TestList {
    pub view: ListView<Value>,
    pub source: Arc<ScriptedCollection<Value>>,
    pub crud: Arc<RecordingCrud<Value>>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: InMemoryStore,
    pub screen: VehicleScreen,
}

/// Builder for mounted test lists.
pub struct TestListBuilder {
    source: Arc<ScriptedCollection<Value>>,
    store: InMemoryStore,
    screen: VehicleScreen,
    config: ListConfig,
    persisted: bool,
}

impl TestListBuilder {
    pub fn new() -> Self {
        let source = Arc::new(ScriptedCollection::<Value>::new());
        source.set_default_page(vehicle_page(23, 1, 10));
        Self {
            source,
            store: InMemoryStore::new(),
            screen: VehicleScreen::new(),
            config: ListConfig::default(),
            persisted: true,
        }
    }

    /// Seed the store as if a previous session typed `search`.
    #[allow(dead_code)]
    pub fn with_persisted_search(self, search: &str) -> Self {
        let persistence = Arc::new(StatePersistence::new(Arc::new(self.store.clone())));
        persistence
            .bind(Some(VIEW_KEY.to_string()))
            .save_quick_filter(search);
        self
    }

    #[allow(dead_code)]
    pub fn with_source(mut self, source: Arc<ScriptedCollection<Value>>) -> Self {
        self.source = source;
        self
    }

    #[allow(dead_code)]
    pub fn with_screen(mut self, screen: VehicleScreen) -> Self {
        self.screen = screen;
        self
    }

    #[allow(dead_code)]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_fetch_timeout(Some(timeout));
        self
    }

    #[allow(dead_code)]
    pub fn without_persistence(mut self) -> Self {
        self.persisted = false;
        self
    }

    /// Mount the view. The initial load is issued but not yet settled.
    pub fn mount(self) -> TestList {
        let crud = Arc::new(RecordingCrud::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut builder = ListController::<Value, Value, Value>::builder(
            Arc::new(self.screen.clone()),
            self.source.clone(),
        )
        .crud(crud.clone())
        .notifier(notifier.clone())
        .config(self.config);
        if self.persisted {
            let persistence = Arc::new(StatePersistence::new(Arc::new(self.store.clone())));
            builder = builder.persistence(persistence.bind(Some(VIEW_KEY.to_string())));
        }

        TestList {
            view: ListView::mount(builder).expect("test screen is valid"),
            source: self.source,
            crud,
            notifier,
            store: self.store,
            screen: self.screen,
        }
    }
}

impl Default for TestListBuilder {
    fn default() -> Self {
        Self::new()
    }
}
