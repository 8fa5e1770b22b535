//! Column definitions supplied by concrete screens.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::record::{display_value, Record};
use crate::query::FilterOperator;

/// How a column's values are interpreted for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Custom,
}

impl ColumnType {
    /// Operator a fresh column filter starts with.
    pub fn default_operator(&self) -> FilterOperator {
        match self {
            ColumnType::String | ColumnType::Custom => FilterOperator::Contains,
            ColumnType::Number | ColumnType::Boolean | ColumnType::Date => FilterOperator::Equals,
        }
    }
}

/// Custom cell formatter.
pub type CellRenderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Metadata describing how a field is displayed, sorted and filtered.
pub struct ColumnDef<R> {
    /// Dot path into the row (`owner.name`).
    pub field: String,
    pub header_name: String,
    pub column_type: ColumnType,
    pub sortable: bool,
    pub filterable: bool,
    pub cell_renderer: Option<CellRenderer<R>>,
}

impl<R> ColumnDef<R> {
    /// A sortable, filterable string column.
    pub fn new(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            column_type: ColumnType::String,
            sortable: true,
            filterable: true,
            cell_renderer: None,
        }
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.cell_renderer = Some(Arc::new(renderer));
        self
    }
}

impl<R: Record> ColumnDef<R> {
    /// Text shown in this column's cell for `row`.
    pub fn display(&self, row: &R) -> String {
        match &self.cell_renderer {
            Some(render) => render(row),
            None => row
                .field(&self.field)
                .map(|v| display_value(&v))
                .unwrap_or_default(),
        }
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            header_name: self.header_name.clone(),
            column_type: self.column_type,
            sortable: self.sortable,
            filterable: self.filterable,
            cell_renderer: self.cell_renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("column_type", &self.column_type)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("cell_renderer", &self.cell_renderer.is_some())
            .finish()
    }
}
