//! A mounted list: presenter and controller wired together.
//!
//! [`ListView`] is what a screen renders. User input goes through the
//! presenter; resulting events are dispatched to the controller, and the
//! controller's committed configuration is synced back after every step.

use crate::controller::{ListController, ListControllerBuilder};
use crate::error::ListResult;
use crate::models::{GridConfig, Record, RecordId};
use crate::presenter::{GridEvent, GridPresenter};
use crate::query::FilterOperator;

pub struct ListView<R, C = R, U = C>
where
    R: Record,
{
    presenter: GridPresenter<R>,
    controller: ListController<R, C, U>,
}

impl<R, C, U> ListView<R, C, U>
where
    R: Record,
    C: Send + 'static,
    U: Send + 'static,
{
    /// Build the controller, restore the persisted quick filter and issue the
    /// initial load.
    pub fn mount(builder: ListControllerBuilder<R, C, U>) -> ListResult<Self> {
        Ok(Self::attach(builder.build()?))
    }

    /// Mount around an already built controller.
    pub fn attach(mut controller: ListController<R, C, U>) -> Self {
        let restored = controller.mount();
        let mut presenter = GridPresenter::from_config(controller.grid());
        presenter.restore_quick_filter(restored);
        tracing::debug!(title = controller.title(), "List view mounted");
        Self {
            presenter,
            controller,
        }
    }

    pub fn presenter(&self) -> &GridPresenter<R> {
        &self.presenter
    }

    pub fn controller(&self) -> &ListController<R, C, U> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ListController<R, C, U> {
        &mut self.controller
    }

    pub fn grid(&self) -> &GridConfig<R> {
        self.controller.grid()
    }

    pub async fn type_quick_filter(&mut self, text: &str) -> ListResult<()> {
        let event = self.presenter.set_quick_filter(text);
        self.send(event).await
    }

    pub async fn clear_quick_filter(&mut self) -> ListResult<()> {
        let event = self.presenter.clear_quick_filter();
        self.send(event).await
    }

    pub async fn edit_filter(
        &mut self,
        field: &str,
        value: Option<serde_json::Value>,
    ) -> ListResult<()> {
        let event = self.presenter.set_filter_value(field, value);
        self.send(event).await
    }

    pub async fn set_filter_operator(
        &mut self,
        field: &str,
        operator: FilterOperator,
    ) -> ListResult<()> {
        let event = self.presenter.set_filter_operator(field, operator);
        self.send(event).await
    }

    pub async fn clear_filters(&mut self) -> ListResult<()> {
        let event = self.presenter.clear_filters();
        self.send(event).await
    }

    pub async fn click_sort(&mut self, field: &str) -> ListResult<()> {
        let event = self.presenter.on_sort_clicked(field);
        self.send(event).await
    }

    /// 0-based.
    pub async fn change_page(&mut self, page: usize) -> ListResult<()> {
        let event = self.presenter.on_page_change(page);
        self.send(event).await
    }

    pub async fn change_page_size(&mut self, page_size: u32) -> ListResult<()> {
        let event = self.presenter.on_page_size_change(page_size);
        self.send(event).await
    }

    pub async fn toggle_select_all(&mut self) -> ListResult<()> {
        let event = self.presenter.toggle_select_all();
        self.send(event).await
    }

    pub async fn toggle_row(&mut self, row: &R) -> ListResult<()> {
        let event = self.presenter.toggle_row(row);
        self.send(event).await
    }

    pub async fn create(&mut self) -> ListResult<()> {
        let event = self.presenter.request_create();
        self.send(Some(event)).await
    }

    pub async fn edit(&mut self, row: &R) -> ListResult<()> {
        let event = self.presenter.request_edit(row);
        self.send(Some(event)).await
    }

    pub async fn delete(&mut self, row: &R) -> ListResult<()> {
        let event = self.presenter.request_delete(row);
        self.send(Some(event)).await
    }

    pub async fn delete_selected(&mut self) -> ListResult<usize> {
        let deleted = self.controller.delete_selected().await?;
        self.sync();
        Ok(deleted)
    }

    pub async fn create_record(&mut self, dto: C) -> ListResult<R> {
        let created = self.controller.create(dto).await?;
        self.sync();
        Ok(created)
    }

    pub async fn update_record(&mut self, id: &RecordId, dto: U) -> ListResult<R> {
        let updated = self.controller.update(id, dto).await?;
        self.sync();
        Ok(updated)
    }

    /// Process one controller message. `false` once torn down.
    pub async fn next_message(&mut self) -> bool {
        let alive = self.controller.next_message().await;
        self.sync();
        alive
    }

    /// Run until nothing is pending or in flight.
    pub async fn settle(&mut self) {
        self.controller.settle().await;
        self.sync();
    }

    /// Cancel timers and fetches. The view is unusable afterwards.
    pub fn teardown(&mut self) {
        self.controller.dispose();
        self.sync();
    }

    async fn send(&mut self, event: Option<GridEvent<R>>) -> ListResult<()> {
        let result = match event {
            Some(event) => self.controller.dispatch(event).await,
            None => Ok(()),
        };
        self.sync();
        result
    }

    fn sync(&mut self) {
        let include_paging = !self.controller.has_pending_change();
        self.presenter
            .apply_config(self.controller.grid(), include_paging);
        self.presenter
            .set_selection(self.controller.selection().to_vec());
    }
}
