//! Header-click sort cycling.

use super::{Dispatch, GridEvent, GridPresenter};
use crate::models::Record;
use crate::query::SortOrder;

/// Sort after clicking `field`: a new column starts ascending, then the same
/// column goes descending, then unsorted.
pub fn next_sort(
    current_field: Option<&str>,
    current_direction: Option<SortOrder>,
    field: &str,
) -> Option<(String, SortOrder)> {
    if current_field != Some(field) {
        return Some((field.to_string(), SortOrder::Asc));
    }
    match current_direction {
        None => Some((field.to_string(), SortOrder::Asc)),
        Some(SortOrder::Asc) => Some((field.to_string(), SortOrder::Desc)),
        Some(SortOrder::Desc) => None,
    }
}

impl<R: Record> GridPresenter<R> {
    /// Cycle the sort on a header click. Non-sortable or unknown columns are
    /// ignored. The page is kept.
    pub fn on_sort_clicked(&mut self, field: &str) -> Option<GridEvent<R>> {
        let column = self.column(field)?;
        if !column.sortable {
            return None;
        }

        match next_sort(
            self.state.sort_field.as_deref(),
            self.state.sort_direction,
            field,
        ) {
            Some((field, direction)) => {
                self.state.sort_field = Some(field);
                self.state.sort_direction = Some(direction);
            }
            None => {
                self.state.sort_field = None;
                self.state.sort_direction = None;
            }
        }
        self.emit(Dispatch::Immediate)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::presenter;
    use super::*;

    #[test]
    fn test_next_sort_cycle() {
        assert_eq!(next_sort(None, None, "year"), Some(("year".into(), SortOrder::Asc)));
        assert_eq!(
            next_sort(Some("year"), Some(SortOrder::Asc), "year"),
            Some(("year".into(), SortOrder::Desc))
        );
        assert_eq!(next_sort(Some("year"), Some(SortOrder::Desc), "year"), None);
        assert_eq!(
            next_sort(Some("year"), Some(SortOrder::Desc), "plate"),
            Some(("plate".into(), SortOrder::Asc))
        );
    }

    #[test]
    fn test_three_clicks_return_to_unsorted() {
        let mut p = presenter(100);
        p.on_sort_clicked("year");
        assert_eq!(p.state().sort_direction, Some(SortOrder::Asc));
        p.on_sort_clicked("year");
        assert_eq!(p.state().sort_direction, Some(SortOrder::Desc));
        p.on_sort_clicked("year");
        assert_eq!(p.state().sort_field, None);
        assert_eq!(p.state().sort_direction, None);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut p = presenter(100);
        p.state.current_page = 3;
        match p.on_sort_clicked("plate") {
            Some(GridEvent::StateChanged { state, dispatch }) => {
                assert_eq!(dispatch, Dispatch::Immediate);
                assert_eq!(state.current_page, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_non_sortable_column_ignored() {
        let mut p = presenter(100);
        assert!(p.on_sort_clicked("actions").is_none());
        assert!(p.on_sort_clicked("missing").is_none());
        assert_eq!(p.state().sort_field, None);
    }
}
