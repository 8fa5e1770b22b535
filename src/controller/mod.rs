//! List controller.
//!
//! [`ListController`] owns the query state and the grid configuration for one
//! list screen. It turns presenter state changes into fetches, commits only
//! the latest response, and routes CRUD actions.
//!
//! Fetches and debounce timers run as spawned tasks that post
//! [`ControllerMessage`]s back on an internal channel; the controller applies
//! them in [`handle_message`](ListController::handle_message). Drive it with
//! [`next_message`](ListController::next_message) or
//! [`settle`](ListController::settle).

mod debounce;
mod handlers;
mod messages;
mod mutations;

pub use debounce::Debouncer;
pub use messages::{ControllerEvent, ControllerMessage};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::adapters::TracingNotifier;
use crate::config::ListConfig;
use crate::error::{ListError, ListResult};
use crate::models::{ColumnDef, GridConfig, GridState, Record};
use crate::persistence::ViewPersistence;
use crate::query::QueryState;
use crate::traits::{CollectionSource, CrudAccessor, ListScreen, Notifier};

/// Controller for one list screen.
///
/// `C` and `U` are the create and update payload types accepted by the CRUD
/// accessor.
pub struct ListController<R, C = R, U = C>
where
    R: Record,
{
    screen: Arc<dyn ListScreen<R>>,
    source: Arc<dyn CollectionSource<R>>,
    search_source: Option<Arc<dyn CollectionSource<R>>>,
    crud: Option<Arc<dyn CrudAccessor<R, C, U>>>,
    notifier: Arc<dyn Notifier>,
    persistence: ViewPersistence,
    config: ListConfig,

    query: QueryState,
    grid: GridConfig<R>,
    selection: Vec<R>,

    debouncer: Debouncer,
    /// Latest debounced state, applied when the window elapses.
    pending_state: Option<GridState>,
    /// Last quick-filter value written to persistence.
    saved_quick_filter: Option<String>,

    next_token: u64,
    /// Token of the only fetch allowed to commit. 0 when none was issued.
    latest_token: u64,
    in_flight: Option<JoinHandle<()>>,

    message_tx: mpsc::UnboundedSender<ControllerMessage<R>>,
    message_rx: mpsc::UnboundedReceiver<ControllerMessage<R>>,
    events: Option<mpsc::UnboundedSender<ControllerEvent<R>>>,

    disposed: bool,
}

/// Builder for [`ListController`].
pub struct ListControllerBuilder<R, C = R, U = C>
where
    R: Record,
{
    screen: Arc<dyn ListScreen<R>>,
    source: Arc<dyn CollectionSource<R>>,
    search_source: Option<Arc<dyn CollectionSource<R>>>,
    crud: Option<Arc<dyn CrudAccessor<R, C, U>>>,
    notifier: Option<Arc<dyn Notifier>>,
    persistence: ViewPersistence,
    config: ListConfig,
}

impl<R, C, U> ListControllerBuilder<R, C, U>
where
    R: Record,
    C: Send + 'static,
    U: Send + 'static,
{
    /// Alternative source used while the quick filter is non-empty.
    pub fn search_source(mut self, source: Arc<dyn CollectionSource<R>>) -> Self {
        self.search_source = Some(source);
        self
    }

    pub fn crud(mut self, crud: Arc<dyn CrudAccessor<R, C, U>>) -> Self {
        self.crud = Some(crud);
        self
    }

    /// Where fetch failures are reported. Defaults to [`TracingNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn persistence(mut self, persistence: ViewPersistence) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the screen and create the controller.
    ///
    /// Fails with [`ListError::Configuration`] if the screen has no title or
    /// no columns, or declares a column twice.
    pub fn build(self) -> ListResult<ListController<R, C, U>> {
        let title = self.screen.title();
        let columns = self.screen.column_definitions();
        validate_screen(&title, &columns)?;

        let page_size = self.config.default_page_size.max(1);
        let grid = GridConfig::new(
            title,
            columns,
            page_size,
            self.config.page_size_options.clone(),
        );
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        tracing::debug!(
            title = %grid.title,
            columns = grid.columns.len(),
            page_size,
            persisted = self.persistence.key().is_some(),
            "List controller created"
        );

        Ok(ListController {
            screen: self.screen,
            source: self.source,
            search_source: self.search_source,
            crud: self.crud,
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(TracingNotifier)),
            persistence: self.persistence,
            debouncer: Debouncer::new(self.config.debounce),
            config: self.config,
            query: QueryState::new(page_size),
            grid,
            selection: Vec::new(),
            pending_state: None,
            saved_quick_filter: None,
            next_token: 0,
            latest_token: 0,
            in_flight: None,
            message_tx,
            message_rx,
            events: None,
            disposed: false,
        })
    }
}

fn validate_screen<R>(title: &str, columns: &[ColumnDef<R>]) -> ListResult<()> {
    let configuration = |message: &str| ListError::Configuration {
        screen: title.to_string(),
        message: message.to_string(),
    };

    if title.trim().is_empty() {
        return Err(configuration("screen title is empty"));
    }
    if columns.is_empty() {
        return Err(configuration("no column definitions"));
    }
    for (i, column) in columns.iter().enumerate() {
        if column.field.trim().is_empty() {
            return Err(configuration("column with an empty field"));
        }
        if columns[..i].iter().any(|c| c.field == column.field) {
            return Err(ListError::Configuration {
                screen: title.to_string(),
                message: format!("duplicate column '{}'", column.field),
            });
        }
    }
    Ok(())
}

impl<R, C, U> ListController<R, C, U>
where
    R: Record,
    C: Send + 'static,
    U: Send + 'static,
{
    pub fn builder(
        screen: Arc<dyn ListScreen<R>>,
        source: Arc<dyn CollectionSource<R>>,
    ) -> ListControllerBuilder<R, C, U> {
        ListControllerBuilder {
            screen,
            source,
            search_source: None,
            crud: None,
            notifier: None,
            persistence: ViewPersistence::disabled(),
            config: ListConfig::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.grid.title
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Current presentation configuration.
    pub fn grid(&self) -> &GridConfig<R> {
        &self.grid
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn selection(&self) -> &[R] {
        &self.selection
    }

    /// Whether a debounced change is waiting for its window to elapse.
    pub fn has_pending_change(&self) -> bool {
        self.pending_state.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.grid.loading
    }

    /// Nothing pending and nothing in flight.
    pub fn is_idle(&self) -> bool {
        !self.debouncer.is_pending() && self.in_flight.is_none()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Subscribe to screen-level events. Replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ControllerEvent<R>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Wait for the next internal message and apply it.
    ///
    /// Returns `false` once the controller is disposed.
    pub async fn next_message(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        match self.message_rx.recv().await {
            Some(msg) => {
                self.handle_message(msg);
                true
            }
            None => false,
        }
    }

    /// Apply messages until no debounce is armed and no fetch is in flight.
    pub async fn settle(&mut self) {
        while !self.disposed && !self.is_idle() {
            if !self.next_message().await {
                break;
            }
        }
    }

    /// Cancel timers and in-flight fetches. Later completions are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.debouncer.cancel();
        self.pending_state = None;
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.grid.loading = false;
        self.events = None;
        tracing::debug!(title = %self.grid.title, "List controller disposed");
    }

    fn emit(&self, event: ControllerEvent<R>) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}

impl<R, C, U> Drop for ListController<R, C, U>
where
    R: Record,
{
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
