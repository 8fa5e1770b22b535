//! Page navigation and page size.

use super::{Dispatch, GridEvent, GridPresenter};
use crate::models::Record;

impl<R: Record> GridPresenter<R> {
    /// 0-based.
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.state.page_size
    }

    /// Go to `page`. Pages outside `0..total_pages` are ignored.
    pub fn on_page_change(&mut self, page: usize) -> Option<GridEvent<R>> {
        if page >= self.total_pages() {
            return None;
        }
        self.state.current_page = page;
        self.emit(Dispatch::Immediate)
    }

    pub fn next_page(&mut self) -> Option<GridEvent<R>> {
        self.on_page_change(self.state.current_page + 1)
    }

    pub fn previous_page(&mut self) -> Option<GridEvent<R>> {
        let page = self.state.current_page.checked_sub(1)?;
        self.on_page_change(page)
    }

    /// Change the page size and go back to the first page.
    pub fn on_page_size_change(&mut self, page_size: u32) -> Option<GridEvent<R>> {
        self.state.page_size = page_size.max(1);
        self.state.current_page = 0;
        self.emit(Dispatch::Immediate)
    }

    /// 1-based range of rows shown, for "11-20 of 23" style labels.
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.state.total_items == 0 {
            return None;
        }
        let size = u64::from(self.state.page_size);
        let start = self.state.current_page as u64 * size + 1;
        let end = (start + size - 1).min(self.state.total_items);
        Some((start, end))
    }
}
