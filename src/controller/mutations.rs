//! Create, edit, delete and selection.

use std::sync::Arc;

use super::{ControllerEvent, ListController};
use crate::error::{ListError, ListResult, MutationError};
use crate::models::{Record, RecordId};
use crate::traits::{CrudAccessor, HookOutcome};

impl<R, C, U> ListController<R, C, U>
where
    R: Record,
    C: Send + 'static,
    U: Send + 'static,
{
    /// Forward the create intent to the screen.
    pub fn handle_create(&mut self) {
        if self.disposed {
            return;
        }
        self.screen.on_create();
        self.emit(ControllerEvent::Create);
    }

    /// Forward the edit intent to the screen.
    pub fn handle_edit(&mut self, row: &R) {
        if self.disposed {
            return;
        }
        self.screen.on_edit(row);
        self.emit(ControllerEvent::Edit(row.clone()));
    }

    /// Delete a row unless the screen's hook handled it, then reload.
    ///
    /// On failure nothing is reloaded and the error is returned.
    pub async fn handle_delete(&mut self, row: &R) -> ListResult<()> {
        self.ensure_live()?;
        if self.screen.on_delete(row) == HookOutcome::Handled {
            tracing::debug!(title = %self.grid.title, "Delete handled by screen");
            return Ok(());
        }

        let id = row.record_id().ok_or(MutationError::MissingIdentity)?;
        let crud = self.crud_accessor()?;

        if let Err(e) = crud.delete_one(&id).await {
            tracing::warn!(id = %id, error_code = e.error_code(), "Delete failed: {}", e);
            return Err(e.into());
        }

        tracing::info!(id = %id, "Record deleted");
        self.selection.retain(|r| r.record_id().as_ref() != Some(&id));
        self.emit(ControllerEvent::Deleted(vec![id]));
        self.load_items();
        Ok(())
    }

    /// Replace the current selection.
    pub fn handle_selection_changed(&mut self, rows: Vec<R>) {
        if self.disposed {
            return;
        }
        self.selection = rows;
        self.emit(ControllerEvent::SelectionChanged(self.selection.clone()));
    }

    /// Create a record and reload on success.
    pub async fn create(&mut self, dto: C) -> ListResult<R> {
        self.ensure_live()?;
        let crud = self.crud_accessor()?;
        let created = crud.create(dto).await.map_err(|e| {
            tracing::warn!(error_code = e.error_code(), "Create failed: {}", e);
            e
        })?;
        self.load_items();
        Ok(created)
    }

    /// Update a record and reload on success.
    pub async fn update(&mut self, id: &RecordId, dto: U) -> ListResult<R> {
        self.ensure_live()?;
        let crud = self.crud_accessor()?;
        let updated = crud.update(id, dto).await.map_err(|e| {
            tracing::warn!(id = %id, error_code = e.error_code(), "Update failed: {}", e);
            e
        })?;
        self.load_items();
        Ok(updated)
    }

    /// Delete every selected row in one call, clear the selection and reload.
    ///
    /// Returns the number of records deleted. An empty selection is a no-op.
    pub async fn delete_selected(&mut self) -> ListResult<usize> {
        self.ensure_live()?;
        if self.selection.is_empty() {
            return Ok(0);
        }

        let ids = self
            .selection
            .iter()
            .map(|r| r.record_id().ok_or(MutationError::MissingIdentity))
            .collect::<Result<Vec<RecordId>, _>>()?;
        let crud = self.crud_accessor()?;

        if let Err(e) = crud.delete_many(&ids).await {
            tracing::warn!(count = ids.len(), error_code = e.error_code(), "Bulk delete failed: {}", e);
            return Err(e.into());
        }

        let count = ids.len();
        tracing::info!(count, "Records deleted");
        self.selection.clear();
        self.emit(ControllerEvent::SelectionChanged(Vec::new()));
        self.emit(ControllerEvent::Deleted(ids));
        self.load_items();
        Ok(count)
    }

    fn crud_accessor(&self) -> Result<Arc<dyn CrudAccessor<R, C, U>>, MutationError> {
        self.crud
            .clone()
            .ok_or_else(|| MutationError::NotSupported(self.grid.title.clone()))
    }

    fn ensure_live(&self) -> ListResult<()> {
        if self.disposed {
            Err(ListError::Disposed)
        } else {
            Ok(())
        }
    }
}
