//! Grid presenter.
//!
//! [`GridPresenter`] holds the grid's local interaction state (quick filter,
//! column filters, sort, page, selection) and turns user input into
//! [`GridEvent`]s for the controller. It never fetches anything itself.
//!
//! Every mutating method returns `Option<GridEvent<R>>`; `None` means the
//! input was a no-op (out-of-range page, non-sortable column, unchanged
//! value...).

mod filters;
mod pagination;
mod selection;
mod sort;

pub use sort::next_sort;

use crate::models::{ColumnDef, GridConfig, GridState, Record};

/// How quickly the controller should act on a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Typing in the quick filter or a column filter. Coalesced.
    Debounced,
    /// Page, page size, sort, explicit clears.
    Immediate,
}

/// Output of the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<R> {
    StateChanged { state: GridState, dispatch: Dispatch },
    SelectionChanged(Vec<R>),
    Create,
    Edit(R),
    Delete(R),
}

/// Local state of one grid.
#[derive(Debug, Clone)]
pub struct GridPresenter<R> {
    columns: Vec<ColumnDef<R>>,
    /// Field list the filters were last seeded for.
    seeded_for: Vec<String>,
    state: GridState,
    rows: Vec<R>,
    selection: Vec<R>,
    loading: bool,
    page_size_options: Vec<u32>,
    filter_sidebar_open: bool,
}

impl<R: Record> GridPresenter<R> {
    pub fn new(columns: Vec<ColumnDef<R>>, page_size: u32) -> Self {
        let mut presenter = Self {
            columns: Vec::new(),
            seeded_for: Vec::new(),
            state: GridState::new(page_size),
            rows: Vec::new(),
            selection: Vec::new(),
            loading: false,
            page_size_options: Vec::new(),
            filter_sidebar_open: false,
        };
        presenter.set_columns(columns);
        presenter
    }

    pub fn with_page_size_options(mut self, options: Vec<u32>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Build a presenter mirroring a controller's configuration.
    pub fn from_config(config: &GridConfig<R>) -> Self {
        let mut presenter = Self::new(config.columns.clone(), config.page_size)
            .with_page_size_options(config.page_size_options.clone());
        presenter.apply_config(config, true);
        presenter
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDef<R>> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Current state, as it would be emitted.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page_size_options(&self) -> &[u32] {
        &self.page_size_options
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn is_filter_sidebar_open(&self) -> bool {
        self.filter_sidebar_open
    }

    /// Purely local; never emits.
    pub fn toggle_filter_sidebar(&mut self) {
        self.filter_sidebar_open = !self.filter_sidebar_open;
    }

    /// Sync rows, totals and loading from the controller's configuration.
    ///
    /// With `include_paging` the page index and size are taken over too. Pass
    /// `false` while a debounced change is still pending so the reset page is
    /// not overwritten by the previous commit.
    pub fn apply_config(&mut self, config: &GridConfig<R>, include_paging: bool) {
        self.rows = config.rows.clone();
        self.state.total_items = config.total_items;
        self.loading = config.loading;
        if include_paging {
            self.state.current_page = config.current_page;
            self.state.page_size = config.page_size.max(1);
        }
        if config.page_size_options != self.page_size_options {
            self.page_size_options = config.page_size_options.clone();
        }
        let fields: Vec<&str> = config.columns.iter().map(|c| c.field.as_str()).collect();
        if fields != self.seeded_for.iter().map(String::as_str).collect::<Vec<_>>() {
            self.set_columns(config.columns.clone());
        }
    }

    /// Show a restored quick filter without emitting.
    pub fn restore_quick_filter(&mut self, text: impl Into<String>) {
        self.state.quick_filter = text.into();
    }

    pub fn request_create(&self) -> GridEvent<R> {
        GridEvent::Create
    }

    pub fn request_edit(&self, row: &R) -> GridEvent<R> {
        GridEvent::Edit(row.clone())
    }

    pub fn request_delete(&self, row: &R) -> GridEvent<R> {
        GridEvent::Delete(row.clone())
    }

    fn emit(&self, dispatch: Dispatch) -> Option<GridEvent<R>> {
        Some(GridEvent::StateChanged {
            state: self.state.clone(),
            dispatch,
        })
    }
}
