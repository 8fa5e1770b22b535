//! Row selection.

use super::{GridEvent, GridPresenter};
use crate::models::{Record, RecordId};

impl<R: Record> GridPresenter<R> {
    pub fn selection(&self) -> &[R] {
        &self.selection
    }

    /// Replace the selection without emitting.
    pub fn set_selection(&mut self, rows: Vec<R>) {
        self.selection = rows;
    }

    pub fn is_selected(&self, row: &R) -> bool {
        match row.record_id() {
            Some(id) => self.contains(&id),
            None => false,
        }
    }

    /// True when the page shows selectable rows and all of them are selected.
    /// Rows without an identity are ignored.
    pub fn is_all_selected(&self) -> bool {
        let mut selectable = self.selectable_rows().peekable();
        selectable.peek().is_some() && selectable.all(|r| self.is_selected(r))
    }

    /// Select every displayed row, or deselect them if all already are.
    pub fn toggle_select_all(&mut self) -> Option<GridEvent<R>> {
        let shown: Vec<(RecordId, R)> = self
            .selectable_rows()
            .filter_map(|r| r.record_id().map(|id| (id, r.clone())))
            .collect();
        if shown.is_empty() {
            return None;
        }
        if self.is_all_selected() {
            self.selection.retain(|r| {
                r.record_id()
                    .map_or(true, |id| !shown.iter().any(|(s, _)| *s == id))
            });
        } else {
            let missing: Vec<R> = shown
                .into_iter()
                .filter(|(id, _)| !self.contains(id))
                .map(|(_, row)| row)
                .collect();
            self.selection.extend(missing);
        }
        Some(GridEvent::SelectionChanged(self.selection.clone()))
    }

    /// Toggle one row. Rows without an identity cannot be selected.
    pub fn toggle_row(&mut self, row: &R) -> Option<GridEvent<R>> {
        let id = row.record_id()?;
        if self.contains(&id) {
            self.selection.retain(|r| r.record_id().as_ref() != Some(&id));
        } else {
            self.selection.push(row.clone());
        }
        Some(GridEvent::SelectionChanged(self.selection.clone()))
    }

    fn selectable_rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.iter().filter(|r| r.record_id().is_some())
    }

    fn contains(&self, id: &RecordId) -> bool {
        self.selection
            .iter()
            .any(|r| r.record_id().as_ref() == Some(id))
    }
}
