//! Presentation-facing state and configuration.

use serde::{Deserialize, Serialize};

use super::column::ColumnDef;
use super::page::total_pages;
use crate::query::{FilterMap, SortOrder};

/// What the presenter emits on every user-driven change. `current_page` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    pub current_page: usize,
    pub page_size: u32,
    pub total_items: u64,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortOrder>,
    pub filters: FilterMap,
    pub quick_filter: String,
}

impl GridState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 0,
            page_size: page_size.max(1),
            total_items: 0,
            sort_field: None,
            sort_direction: None,
            filters: FilterMap::new(),
            quick_filter: String::new(),
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size) as usize
    }
}

/// Everything a grid needs to render. The controller owns the single copy.
#[derive(Debug, Clone)]
pub struct GridConfig<R> {
    pub title: String,
    pub columns: Vec<ColumnDef<R>>,
    pub rows: Vec<R>,
    pub loading: bool,
    pub total_items: u64,
    pub total_pages: usize,
    /// 0-based.
    pub current_page: usize,
    pub page_size: u32,
    pub page_size_options: Vec<u32>,
}

impl<R> GridConfig<R> {
    pub fn new(
        title: String,
        columns: Vec<ColumnDef<R>>,
        page_size: u32,
        page_size_options: Vec<u32>,
    ) -> Self {
        Self {
            title,
            columns,
            rows: Vec::new(),
            loading: false,
            total_items: 0,
            total_pages: 0,
            current_page: 0,
            page_size: page_size.max(1),
            page_size_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_state_total_pages() {
        let mut state = GridState::new(10);
        state.total_items = 23;
        assert_eq!(state.total_pages(), 3);
        state.total_items = 0;
        assert_eq!(state.total_pages(), 0);
    }

    #[test]
    fn test_grid_state_serializes_camel_case() {
        let value = serde_json::to_value(GridState::new(25)).unwrap();
        assert_eq!(value["pageSize"], 25);
        assert_eq!(value["currentPage"], 0);
        assert_eq!(value["quickFilter"], "");
    }
}
