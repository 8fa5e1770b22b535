//! Extension points a concrete list screen supplies.

use crate::models::ColumnDef;

/// Whether a hook fully handled an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookOutcome {
    /// Run the controller's default behavior afterwards.
    #[default]
    Continue,
    /// The screen took care of it; skip the default.
    Handled,
}

/// A concrete list screen (vehicles, clients, estimates...).
///
/// `column_definitions` and `title` are required and checked when the
/// controller is built. The `on_*` hooks are optional; create and edit have
/// no default behavior beyond the hook, delete falls through to the CRUD
/// accessor unless the hook returns [`HookOutcome::Handled`].
pub trait ListScreen<R>: Send + Sync {
    fn column_definitions(&self) -> Vec<ColumnDef<R>>;

    fn title(&self) -> String;

    fn on_create(&self) {}

    fn on_edit(&self, _row: &R) {}

    fn on_delete(&self, _row: &R) -> HookOutcome {
        HookOutcome::Continue
    }
}
