//! Column filter values and operators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied by a column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    #[default]
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    In,
}

impl FilterOperator {
    /// Wire name, as sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "equals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::In => "in",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `{value, operator}` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ColumnFilter {
    pub value: Option<Value>,
    pub operator: FilterOperator,
}

impl ColumnFilter {
    pub fn new(value: impl Into<Value>, operator: FilterOperator) -> Self {
        Self {
            value: Some(value.into()),
            operator,
        }
    }

    /// An operator with no value yet, as seeded for a fresh column.
    pub fn empty(operator: FilterOperator) -> Self {
        Self {
            value: None,
            operator,
        }
    }

    /// Whether this filter constrains anything.
    ///
    /// Null, blank strings and empty arrays are treated as "no filter".
    pub fn is_active(&self) -> bool {
        match &self.value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }
}

/// Field name to filter. Ordered so snapshots serialize deterministically.
pub type FilterMap = BTreeMap<String, ColumnFilter>;

/// Keep only the entries that actually constrain the query.
pub fn active_filters(filters: &FilterMap) -> FilterMap {
    filters
        .iter()
        .filter(|(_, f)| f.is_active())
        .map(|(k, f)| (k.clone(), f.clone()))
        .collect()
}
