//! Messages flowing into and out of a [`ListController`](super::ListController).

use crate::error::FetchError;
use crate::models::{Page, RecordId};

/// Internal completions posted back to the controller from spawned tasks.
#[derive(Debug)]
pub enum ControllerMessage<R> {
    /// A fetch finished. Only the latest `token` is allowed to commit.
    FetchCompleted {
        token: u64,
        result: Result<Page<R>, FetchError>,
    },
    /// The debounce window for `generation` elapsed.
    DebounceElapsed { generation: u64 },
}

/// Notifications for the owning screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent<R> {
    /// The create action was requested.
    Create,
    /// The edit action was requested for a row.
    Edit(R),
    /// Selection replaced.
    SelectionChanged(Vec<R>),
    /// Records removed through the CRUD accessor.
    Deleted(Vec<RecordId>),
}
