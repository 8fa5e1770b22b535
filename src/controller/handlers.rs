//! State changes, loading and commit.

use std::sync::Arc;

use super::{ControllerMessage, ListController};
use crate::error::{FetchError, ListResult};
use crate::models::{total_pages, GridState, Page, Record};
use crate::presenter::{Dispatch, GridEvent};
use crate::traits::{CollectionSource, Notice};

impl<R, C, U> ListController<R, C, U>
where
    R: Record,
    C: Send + 'static,
    U: Send + 'static,
{
    /// Route a presenter event.
    pub async fn dispatch(&mut self, event: GridEvent<R>) -> ListResult<()> {
        match event {
            GridEvent::StateChanged {
                state,
                dispatch: Dispatch::Debounced,
            } => self.schedule_state_change(state),
            GridEvent::StateChanged {
                state,
                dispatch: Dispatch::Immediate,
            } => self.handle_state_change(state),
            GridEvent::SelectionChanged(rows) => self.handle_selection_changed(rows),
            GridEvent::Create => self.handle_create(),
            GridEvent::Edit(row) => self.handle_edit(&row),
            GridEvent::Delete(row) => return self.handle_delete(&row).await,
        }
        Ok(())
    }

    /// Restore the persisted quick filter into the query and issue the
    /// initial load. Returns the restored text so the presenter can show it.
    pub fn mount(&mut self) -> String {
        let restored = self.restore_quick_filter();
        self.load_items();
        restored
    }

    /// Read the persisted quick filter into the query without loading.
    pub fn restore_quick_filter(&mut self) -> String {
        let restored = self.persistence.quick_filter();
        if !restored.is_empty() {
            tracing::debug!(title = %self.grid.title, search = %restored, "Restored quick filter");
        }
        self.query.set_search(restored.clone());
        self.saved_quick_filter = Some(restored.clone());
        restored
    }

    /// Apply a presenter state immediately and reload.
    ///
    /// Any debounced change still waiting is dropped: `state` already carries
    /// the presenter's latest quick filter and column filters.
    pub fn handle_state_change(&mut self, state: GridState) {
        if self.disposed {
            return;
        }
        if self.pending_state.take().is_some() {
            tracing::trace!("Immediate change folds pending debounced edit");
        }
        self.debouncer.cancel();
        self.apply_state(&state);
        self.load_items();
    }

    /// Hold `state` until the debounce window elapses. Restarts the window.
    pub fn schedule_state_change(&mut self, state: GridState) {
        if self.disposed {
            return;
        }
        self.pending_state = Some(state);
        self.debouncer
            .schedule(&self.message_tx, |generation| ControllerMessage::DebounceElapsed {
                generation,
            });
    }

    fn apply_state(&mut self, state: &GridState) {
        // Limit first: changing it resets the page.
        self.query.set_limit(state.page_size);
        let page = u32::try_from(state.current_page)
            .unwrap_or(u32::MAX - 1)
            .saturating_add(1);
        self.query.set_page(page);

        self.query.clear_filters();
        for (field, filter) in &state.filters {
            if filter.is_active() {
                self.query.add_filter(field.clone(), filter.clone());
            }
        }

        self.query
            .update_sort(state.sort_field.clone(), state.sort_direction);
        self.query.set_search(state.quick_filter.clone());

        if self.saved_quick_filter.as_deref() != Some(state.quick_filter.as_str()) {
            self.persistence.save_quick_filter(&state.quick_filter);
            self.saved_quick_filter = Some(state.quick_filter.clone());
        }

        self.grid.page_size = self.query.limit();
        self.grid.current_page = state.current_page;
    }

    /// Issue a fetch for the current query.
    ///
    /// Supersedes whatever was in flight: the previous task is aborted and its
    /// token can no longer commit.
    pub fn load_items(&mut self) {
        if self.disposed {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(title = %self.grid.title, "No tokio runtime, load skipped");
            return;
        };

        self.next_token += 1;
        let token = self.next_token;
        self.latest_token = token;
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
            tracing::trace!(token, "Superseded in-flight fetch");
        }

        let params = self.query.snapshot();
        let source = self.source_for(&params.search);
        let timeout = self.config.fetch_timeout;
        let tx = self.message_tx.clone();

        tracing::debug!(
            token,
            page = params.page,
            limit = params.limit,
            search = %params.search,
            filters = params.filters.len(),
            "Loading items"
        );

        self.grid.loading = true;
        self.in_flight = Some(runtime.spawn(async move {
            let result = match timeout {
                Some(after) => {
                    match tokio::time::timeout(after, source.fetch(&params)).await {
                        Ok(result) => result,
                        Err(_) => Err(FetchError::Timeout { after }),
                    }
                }
                None => source.fetch(&params).await,
            };
            let _ = tx.send(ControllerMessage::FetchCompleted { token, result });
        }));
    }

    fn source_for(&self, search: &str) -> Arc<dyn CollectionSource<R>> {
        match &self.search_source {
            Some(search_source) if !search.trim().is_empty() => Arc::clone(search_source),
            _ => Arc::clone(&self.source),
        }
    }

    /// Apply a message posted by a spawned task.
    pub fn handle_message(&mut self, msg: ControllerMessage<R>) {
        if self.disposed {
            return;
        }
        match msg {
            ControllerMessage::FetchCompleted { token, result } => {
                self.handle_fetch_completed(token, result)
            }
            ControllerMessage::DebounceElapsed { generation } => {
                if self.debouncer.fire(generation) {
                    if let Some(state) = self.pending_state.take() {
                        self.handle_state_change(state);
                    }
                }
            }
        }
    }

    fn handle_fetch_completed(&mut self, token: u64, result: Result<Page<R>, FetchError>) {
        if token != self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "Discarding stale response");
            return;
        }
        self.in_flight = None;
        self.grid.loading = false;

        match result {
            Ok(page) => self.commit(page),
            Err(err) => {
                tracing::warn!(
                    title = %self.grid.title,
                    token,
                    error_code = err.error_code(),
                    "Fetch failed: {}",
                    err
                );
                self.notifier.notify(
                    Notice::error(self.grid.title.clone(), err.user_message())
                        .with_code(err.error_code())
                        .with_retryable(err.is_retryable()),
                );
            }
        }
    }

    fn commit(&mut self, page: Page<R>) {
        let pages = total_pages(page.total, self.query.limit()) as usize;

        tracing::debug!(
            page = page.page,
            rows = page.data.len(),
            total = page.total,
            "Committed page"
        );

        self.grid.rows = page.data;
        self.grid.total_items = page.total;
        self.grid.total_pages = pages;
        self.grid.current_page = page.page.saturating_sub(1) as usize;

        // An empty collection has no pages; the only valid index is 0.
        if pages == 0 && self.grid.current_page > 0 {
            tracing::debug!(
                requested = self.grid.current_page + 1,
                "Collection empty, resetting to first page"
            );
            self.grid.current_page = 0;
            self.query.set_page(1);
            return;
        }

        // Deletes can shrink the collection under the current page.
        if pages > 0 && self.grid.current_page >= pages {
            tracing::info!(
                requested = self.grid.current_page + 1,
                last = pages,
                "Page out of range, loading last page"
            );
            self.grid.current_page = pages - 1;
            self.query.set_page(pages as u32);
            self.load_items();
        }
    }
}
