//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `listgrid::adapters::mock` and adds a recording list screen.

pub use listgrid::adapters::mock::{
    CrudCall, InMemoryStore, RecordingCrud, RecordingNotifier, ScriptedCollection,
};

use std::sync::{Arc, Mutex};

use listgrid::models::{ColumnDef, ColumnType};
use listgrid::traits::{HookOutcome, ListScreen};
use serde_json::Value;

/// Hook invocation seen by [`VehicleScreen`].
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    Create,
    Edit(Value),
    Delete(Value),
}

/// Vehicle list screen that records hook calls.
#[derive(Clone)]
pub struct VehicleScreen {
    calls: Arc<Mutex<Vec<HookCall>>>,
    delete_outcome: Arc<Mutex<HookOutcome>>,
}

impl VehicleScreen {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            delete_outcome: Arc::new(Mutex::new(HookOutcome::Continue)),
        }
    }

    /// Make the delete hook claim the delete.
    #[allow(dead_code)]
    pub fn handle_deletes(&self) {
        *self.delete_outcome.lock().unwrap() = HookOutcome::Handled;
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for VehicleScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ListScreen<Value> for VehicleScreen {
    fn column_definitions(&self) -> Vec<ColumnDef<Value>> {
        vec![
            ColumnDef::new("plate", "Plate"),
            ColumnDef::new("brand", "Brand"),
            ColumnDef::new("year", "Year").with_type(ColumnType::Number),
            ColumnDef::new("owner.name", "Owner").with_sortable(false),
        ]
    }

    fn title(&self) -> String {
        "Vehicles".to_string()
    }

    fn on_create(&self) {
        self.calls.lock().unwrap().push(HookCall::Create);
    }

    fn on_edit(&self, row: &Value) {
        self.calls.lock().unwrap().push(HookCall::Edit(row.clone()));
    }

    fn on_delete(&self, row: &Value) -> HookOutcome {
        self.calls.lock().unwrap().push(HookCall::Delete(row.clone()));
        *self.delete_outcome.lock().unwrap()
    }
}
