//! Request parameters for remote paginated collections.
//!
//! [`QueryState`] is the mutable value holder owned by a list controller;
//! [`QueryParams`] is the serializable snapshot handed to a collection source.

mod filter;
mod state;

pub use filter::{active_filters, ColumnFilter, FilterMap, FilterOperator};
pub use state::{QueryParams, QueryState, SortOrder, DEFAULT_LIMIT};
