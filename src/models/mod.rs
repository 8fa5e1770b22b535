//! Data model shared by the controller, presenter and adapters.

mod column;
mod grid;
mod page;
mod record;

pub use column::{CellRenderer, ColumnDef, ColumnType};
pub use grid::{GridConfig, GridState};
pub use page::{total_pages, Page};
pub use record::{display_value, identity_of, lookup_path, Record, RecordId};
