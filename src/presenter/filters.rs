//! Quick filter and column filters.

use serde_json::Value;

use super::{Dispatch, GridEvent, GridPresenter};
use crate::models::{ColumnDef, Record};
use crate::query::{ColumnFilter, FilterOperator};

impl<R: Record> GridPresenter<R> {
    /// Replace the columns, seeding filters the first time a column set is seen.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<R>>) {
        let fields: Vec<String> = columns.iter().map(|c| c.field.clone()).collect();
        self.columns = columns;
        if fields != self.seeded_for {
            self.initialize_filters();
            self.seeded_for = fields;
        }
    }

    /// Seed one empty filter per filterable column with the type's default
    /// operator. Existing entries for still-present columns are kept.
    pub fn initialize_filters(&mut self) {
        let filterable: Vec<&ColumnDef<R>> =
            self.columns.iter().filter(|c| c.filterable).collect();
        self.state
            .filters
            .retain(|field, _| filterable.iter().any(|c| &c.field == field));
        for column in filterable {
            self.state
                .filters
                .entry(column.field.clone())
                .or_insert_with(|| ColumnFilter::empty(column.column_type.default_operator()));
        }
    }

    pub fn quick_filter(&self) -> &str {
        &self.state.quick_filter
    }

    /// Typing in the quick filter. Resets to the first page.
    pub fn set_quick_filter(&mut self, text: &str) -> Option<GridEvent<R>> {
        if self.state.quick_filter == text {
            return None;
        }
        self.state.quick_filter = text.to_string();
        self.state.current_page = 0;
        self.emit(Dispatch::Debounced)
    }

    /// Explicit clear. Always emits, even if already empty.
    pub fn clear_quick_filter(&mut self) -> Option<GridEvent<R>> {
        self.state.quick_filter.clear();
        self.state.current_page = 0;
        self.emit(Dispatch::Immediate)
    }

    pub fn filter(&self, field: &str) -> Option<&ColumnFilter> {
        self.state.filters.get(field)
    }

    /// Edit a column filter's value. `None` for unknown or unchanged.
    pub fn set_filter_value(&mut self, field: &str, value: Option<Value>) -> Option<GridEvent<R>> {
        let filter = self.state.filters.get_mut(field)?;
        if filter.value == value {
            return None;
        }
        filter.value = value;
        self.state.current_page = 0;
        self.emit(Dispatch::Debounced)
    }

    /// Change a column filter's operator. Only emits when the filter has a
    /// value, since otherwise the query does not change.
    pub fn set_filter_operator(
        &mut self,
        field: &str,
        operator: FilterOperator,
    ) -> Option<GridEvent<R>> {
        let filter = self.state.filters.get_mut(field)?;
        if filter.operator == operator {
            return None;
        }
        filter.operator = operator;
        if !filter.is_active() {
            return None;
        }
        self.state.current_page = 0;
        self.emit(Dispatch::Debounced)
    }

    /// Reset every column filter to its seeded default.
    pub fn clear_filters(&mut self) -> Option<GridEvent<R>> {
        let had_active = self.active_filter_count() > 0;
        self.state.filters.clear();
        self.initialize_filters();
        if !had_active {
            return None;
        }
        self.state.current_page = 0;
        self.emit(Dispatch::Immediate)
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.filters.values().filter(|f| f.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::{columns, presenter};
    use super::*;
    use crate::models::ColumnType;

    #[test]
    fn test_filters_seeded_with_type_defaults() {
        let p = presenter(0);
        assert_eq!(p.filter("plate").unwrap().operator, FilterOperator::Contains);
        assert_eq!(p.filter("year").unwrap().operator, FilterOperator::Equals);
        assert_eq!(p.filter("active").unwrap().operator, FilterOperator::Equals);
        assert!(p.filter("actions").is_none());
        assert!(p.filter("plate").unwrap().value.is_none());
    }

    #[test]
    fn test_same_columns_do_not_reseed() {
        let mut p = presenter(0);
        p.set_filter_value("plate", Some(json!("AB")));
        p.set_columns(columns());
        assert_eq!(p.filter("plate").unwrap().value, Some(json!("AB")));
    }

    #[test]
    fn test_new_column_set_seeds_new_columns() {
        let mut p = presenter(0);
        p.set_filter_value("plate", Some(json!("AB")));
        let mut cols = columns();
        cols.push(ColumnDef::new("sold", "Sold").with_type(ColumnType::Date));
        p.set_columns(cols);
        assert_eq!(p.filter("plate").unwrap().value, Some(json!("AB")));
        assert_eq!(p.filter("sold").unwrap().operator, FilterOperator::Equals);
    }

    #[test]
    fn test_quick_filter_resets_page_and_debounces() {
        let mut p = presenter(100);
        p.state.current_page = 4;
        match p.set_quick_filter("ibiza") {
            Some(GridEvent::StateChanged { state, dispatch }) => {
                assert_eq!(dispatch, Dispatch::Debounced);
                assert_eq!(state.current_page, 0);
                assert_eq!(state.quick_filter, "ibiza");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(p.set_quick_filter("ibiza").is_none());
    }

    #[test]
    fn test_clear_quick_filter_is_immediate() {
        let mut p = presenter(100);
        p.set_quick_filter("x");
        assert!(matches!(
            p.clear_quick_filter(),
            Some(GridEvent::StateChanged { dispatch: Dispatch::Immediate, .. })
        ));
        assert_eq!(p.quick_filter(), "");
    }

    #[test]
    fn test_column_filter_edit() {
        let mut p = presenter(100);
        p.state.current_page = 2;
        assert!(p.set_filter_value("unknown", Some(json!(1))).is_none());
        assert!(matches!(
            p.set_filter_value("year", Some(json!(2020))),
            Some(GridEvent::StateChanged { dispatch: Dispatch::Debounced, .. })
        ));
        assert_eq!(p.state().current_page, 0);
        assert_eq!(p.active_filter_count(), 1);
    }

    #[test]
    fn test_operator_change_without_value_is_local() {
        let mut p = presenter(100);
        assert!(p
            .set_filter_operator("plate", FilterOperator::StartsWith)
            .is_none());
        assert_eq!(
            p.filter("plate").unwrap().operator,
            FilterOperator::StartsWith
        );

        p.set_filter_value("plate", Some(json!("AB")));
        assert!(p
            .set_filter_operator("plate", FilterOperator::EndsWith)
            .is_some());
    }

    #[test]
    fn test_clear_filters() {
        let mut p = presenter(100);
        assert!(p.clear_filters().is_none());

        p.set_filter_value("plate", Some(json!("AB")));
        p.set_filter_operator("plate", FilterOperator::Equals);
        assert!(matches!(
            p.clear_filters(),
            Some(GridEvent::StateChanged { dispatch: Dispatch::Immediate, .. })
        ));
        assert_eq!(p.active_filter_count(), 0);
        assert_eq!(p.filter("plate").unwrap().operator, FilterOperator::Contains);
    }
}
