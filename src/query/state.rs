//! Canonical request parameters for a remote paginated collection.

use serde::{Deserialize, Serialize};

use super::filter::{active_filters, ColumnFilter, FilterMap};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Immutable snapshot sent to a [`CollectionSource`](crate::traits::CollectionSource).
///
/// `page` is 1-based. Only active filters are included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filters: FilterMap,
}

impl Default for QueryParams {
    fn default() -> Self {
        QueryState::default().snapshot()
    }
}

/// Mutable holder of the current request parameters.
///
/// No I/O happens here. Page and limit are floored to 1 on every write, so a
/// snapshot never carries a zero page or limit.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    page: u32,
    limit: u32,
    sort_by: Option<String>,
    sort_order: Option<SortOrder>,
    search: String,
    filters: FilterMap,
}

/// Page size used when nothing else is configured.
pub const DEFAULT_LIMIT: u32 = 10;

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl QueryState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            sort_by: None,
            sort_order: None,
            search: String::new(),
            filters: FilterMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    /// Set or replace the filter on `field`. Inactive filters are dropped
    /// instead of stored.
    pub fn add_filter(&mut self, field: impl Into<String>, filter: ColumnFilter) {
        let field = field.into();
        if filter.is_active() {
            self.filters.insert(field, filter);
        } else {
            self.filters.remove(&field);
        }
    }

    pub fn remove_filter(&mut self, field: &str) {
        self.filters.remove(field);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Set the sort column and direction. `None` for either clears the sort.
    pub fn update_sort(&mut self, field: Option<String>, direction: Option<SortOrder>) {
        match (field, direction) {
            (Some(field), Some(direction)) if !field.is_empty() => {
                self.sort_by = Some(field);
                self.sort_order = Some(direction);
            }
            _ => {
                self.sort_by = None;
                self.sort_order = None;
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Set the 1-based page, clamped to at least 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Set the page size, clamped to at least 1. Resets to the first page.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Pure snapshot of the current parameters.
    pub fn snapshot(&self) -> QueryParams {
        QueryParams {
            page: self.page.max(1),
            limit: self.limit.max(1),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
            search: self.search.clone(),
            filters: active_filters(&self.filters),
        }
    }
}
