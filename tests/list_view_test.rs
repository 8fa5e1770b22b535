//! End-to-end behavior of a mounted list view.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use listgrid::adapters::MemoryCollection;
use listgrid::controller::ListController;
use listgrid::error::{ListError, MutationError};
use listgrid::models::RecordId;
use listgrid::query::{FilterOperator, SortOrder};
use listgrid::view::ListView;
use serde_json::{json, Value};

#[tokio::test(start_paused = true)]
async fn test_mount_issues_one_initial_load() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;

    assert_eq!(t.source.request_count(), 1);
    let request = t.source.last_request().unwrap();
    assert_eq!(request.page, 1);
    assert_eq!(request.limit, 10);
    assert_eq!(request.search, "");
    assert_eq!(t.view.grid().total_pages, 3);
    assert_eq!(t.view.presenter().rows().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_issues_one_fetch() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    t.source.clear_requests();

    for text in ["s", "se", "sea", "seat"] {
        t.view.type_quick_filter(text).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
    }
    t.view.settle().await;

    assert_eq!(t.source.request_count(), 1);
    assert_eq!(t.source.last_request().unwrap().search, "seat");
}

#[tokio::test(start_paused = true)]
async fn test_quick_filter_and_column_filter_share_window() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    t.source.clear_requests();

    t.view.type_quick_filter("seat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    t.view.edit_filter("year", Some(json!(2010))).await.unwrap();
    t.view.settle().await;

    let requests = t.source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].search, "seat");
    assert_eq!(requests[0].filters["year"].value, Some(json!(2010)));
    assert_eq!(requests[0].filters["year"].operator, FilterOperator::Equals);
}

#[tokio::test(start_paused = true)]
async fn test_edits_spaced_beyond_window_fetch_separately() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    t.source.clear_requests();

    t.view.type_quick_filter("se").await.unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;
    t.view.next_message().await;
    t.view.type_quick_filter("seat").await.unwrap();
    t.view.settle().await;

    let searches: Vec<String> = t.source.requests().into_iter().map(|r| r.search).collect();
    assert_eq!(searches, vec!["se", "seat"]);
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_resets_page_sort_does_not() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;

    t.view.change_page(2).await.unwrap();
    assert_eq!(t.view.presenter().current_page(), 2);
    t.view.settle().await;
    t.view.click_sort("year").await.unwrap();
    assert_eq!(t.view.presenter().current_page(), 2);
    t.view.settle().await;
    assert_eq!(t.source.last_request().unwrap().page, 3);

    t.view.type_quick_filter("x").await.unwrap();
    assert_eq!(t.view.presenter().current_page(), 0);
    t.view.settle().await;
    assert_eq!(t.source.last_request().unwrap().page, 1);
}

#[tokio::test(start_paused = true)]
async fn test_page_change_out_of_range_is_noop() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    let before = t.source.request_count();

    t.view.change_page(3).await.unwrap();

    assert_eq!(t.view.presenter().current_page(), 0);
    assert!(t.view.controller().is_idle());
    assert_eq!(t.source.request_count(), before);
}

#[tokio::test(start_paused = true)]
async fn test_page_size_change_resets_page() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    t.view.change_page(1).await.unwrap();
    t.view.settle().await;

    t.view.change_page_size(25).await.unwrap();
    t.view.settle().await;

    let request = t.source.last_request().unwrap();
    assert_eq!(request.limit, 25);
    assert_eq!(request.page, 1);
    assert_eq!(t.view.presenter().current_page(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sort_cycle_reaches_source() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;

    let mut seen = Vec::new();
    for _ in 0..3 {
        t.view.click_sort("plate").await.unwrap();
        t.view.settle().await;
        let request = t.source.last_request().unwrap();
        seen.push((request.sort_by, request.sort_order));
    }

    assert_eq!(
        seen,
        vec![
            (Some("plate".to_string()), Some(SortOrder::Asc)),
            (Some("plate".to_string()), Some(SortOrder::Desc)),
            (None, None),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_immediate_action_folds_pending_filter_edit() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    t.source.clear_requests();

    t.view.type_quick_filter("seat").await.unwrap();
    t.view.click_sort("year").await.unwrap();
    t.view.settle().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let requests = t.source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].search, "seat");
    assert_eq!(requests[0].sort_by.as_deref(), Some("year"));
    assert_eq!(requests[0].page, 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_rejected() {
    let source = Arc::new(ScriptedCollection::<Value>::new());
    source.push_page_after(vehicle_page(23, 1, 10), Duration::from_millis(500));
    source.push_page(vehicle_page(5, 1, 10));
    let mut t = TestListBuilder::new().with_source(source).mount();

    tokio::time::sleep(Duration::from_millis(10)).await;
    t.view.click_sort("plate").await.unwrap();
    t.view.settle().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(t.view.grid().total_items, 5);
    assert_eq!(t.view.presenter().rows().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_persisted_search_round_trip() {
    let mut first = TestListBuilder::new().mount();
    first.view.settle().await;
    first.view.type_quick_filter("abc").await.unwrap();
    first.view.settle().await;
    first.view.teardown();
    assert_eq!(
        first.store.raw("listgrid.quickFilter.vehicles").as_deref(),
        Some("abc")
    );

    let mut second = TestListBuilder::new().with_persisted_search("abc").mount();
    assert_eq!(second.view.presenter().quick_filter(), "abc");
    second.view.settle().await;

    assert_eq!(second.source.request_count(), 1);
    assert_eq!(second.source.last_request().unwrap().search, "abc");
}

#[tokio::test(start_paused = true)]
async fn test_clear_quick_filter_persists_and_reloads_immediately() {
    let mut t = TestListBuilder::new().with_persisted_search("abc").mount();
    t.view.settle().await;
    t.source.clear_requests();

    t.view.clear_quick_filter().await.unwrap();

    assert!(!t.view.controller().has_pending_change());
    assert!(t.view.controller().is_loading());
    t.view.settle().await;
    assert_eq!(t.source.request_count(), 1);
    assert_eq!(t.source.last_request().unwrap().search, "");
    assert_eq!(t.store.raw("listgrid.quickFilter.vehicles").as_deref(), Some(""));
}

#[tokio::test(start_paused = true)]
async fn test_unbound_view_never_persists() {
    let mut t = TestListBuilder::new().without_persistence().mount();
    t.view.type_quick_filter("abc").await.unwrap();
    t.view.settle().await;

    assert!(t.store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_storage_failure_degrades_silently() {
    let mut t = TestListBuilder::new().mount();
    t.store.set_write_should_fail(true);

    t.view.type_quick_filter("abc").await.unwrap();
    t.view.settle().await;

    assert_eq!(t.source.last_request().unwrap().search, "abc");
    assert!(t.store.raw("listgrid.quickFilter.vehicles").is_none());
    assert_eq!(t.notifier.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_keeps_rows() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    t.source.push_error(listgrid::error::FetchError::Status {
        status: 503,
        message: "unavailable".to_string(),
    });

    t.view.change_page(1).await.unwrap();
    t.view.settle().await;

    assert_eq!(t.view.presenter().rows().len(), 10);
    assert!(!t.view.presenter().is_loading());
    assert_eq!(t.notifier.count(), 1);
    assert_eq!(t.notifier.notices()[0].source, "Vehicles");
}

#[tokio::test(start_paused = true)]
async fn test_hung_fetch_times_out() {
    let source = Arc::new(ScriptedCollection::<Value>::new());
    source.push_page_after(vehicle_page(23, 1, 10), Duration::from_secs(3600));
    let mut t = TestListBuilder::new()
        .with_source(source)
        .with_fetch_timeout(Duration::from_secs(2))
        .mount();

    t.view.settle().await;

    assert!(!t.view.presenter().is_loading());
    assert_eq!(t.notifier.notices()[0].error_code, Some("E_FETCH_TIMEOUT"));
    assert!(t.notifier.notices()[0].retryable);
}

#[tokio::test(start_paused = true)]
async fn test_select_all_then_delete_selected() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;

    t.view.toggle_select_all().await.unwrap();
    assert!(t.view.presenter().is_all_selected());
    assert_eq!(t.view.controller().selection().len(), 10);

    assert_eq!(t.view.delete_selected().await.unwrap(), 10);
    t.view.settle().await;

    assert!(t.view.presenter().selection().is_empty());
    assert!(matches!(&t.crud.calls()[0], CrudCall::DeleteMany(ids) if ids.len() == 10));
}

#[tokio::test(start_paused = true)]
async fn test_hooks_receive_intents() {
    let screen = VehicleScreen::new();
    screen.handle_deletes();
    let mut t = TestListBuilder::new().with_screen(screen).mount();
    t.view.settle().await;
    let row = t.view.presenter().rows()[0].clone();

    t.view.create().await.unwrap();
    t.view.edit(&row).await.unwrap();
    t.view.delete(&row).await.unwrap();

    assert_eq!(
        t.screen.calls(),
        vec![
            HookCall::Create,
            HookCall::Edit(row.clone()),
            HookCall::Delete(row)
        ]
    );
    assert!(t.crud.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_delete_failure_leaves_list_unchanged() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;
    let before = t.source.request_count();
    t.crud
        .set_failure(Some(MutationError::NotFound("1".to_string())));

    let row = t.view.presenter().rows()[0].clone();
    let err = t.view.delete(&row).await.unwrap_err();

    assert!(matches!(err, ListError::Mutation(MutationError::NotFound(_))));
    assert_eq!(t.source.request_count(), before);
    assert_eq!(t.view.presenter().rows().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_drops_unapplied_quick_filter() {
    let mut t = TestListBuilder::new().mount();
    t.view.settle().await;

    t.view.type_quick_filter("abc").await.unwrap();
    t.view.teardown();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(t.store.raw("listgrid.quickFilter.vehicles").is_none());
    assert_eq!(t.source.last_request().unwrap().search, "");
}

#[tokio::test(start_paused = true)]
async fn test_teardown_ignores_late_completions() {
    let source = Arc::new(ScriptedCollection::<Value>::new());
    source.push_page_after(vehicle_page(23, 1, 10), Duration::from_millis(300));
    let mut t = TestListBuilder::new().with_source(source).mount();

    t.view.type_quick_filter("late").await.unwrap();
    t.view.teardown();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(!t.view.next_message().await);
    assert!(t.view.presenter().rows().is_empty());
    assert!(t.view.controller().is_disposed());
}

#[tokio::test(start_paused = true)]
async fn test_delete_off_page_row_reduces_total() {
    let collection = Arc::new(MemoryCollection::new(vehicles(23)));
    let builder = ListController::<Value, Value, Value>::builder(
        Arc::new(VehicleScreen::new()),
        collection.clone(),
    )
    .crud(collection.clone());
    let mut view: ListView<Value> = ListView::mount(builder).unwrap();
    view.settle().await;
    assert_eq!(view.grid().total_items, 23);

    let off_page = json!({ "_id": "17" });
    assert!(!view.presenter().rows().iter().any(|r| r["_id"] == "17"));
    view.delete(&off_page).await.unwrap();
    view.settle().await;

    assert_eq!(view.grid().total_items, 22);
    assert_eq!(collection.len(), 22);
}

#[tokio::test(start_paused = true)]
async fn test_deleting_last_row_of_last_page_moves_back() {
    let collection = Arc::new(MemoryCollection::new(vehicles(21)));
    let builder = ListController::<Value, Value, Value>::builder(
        Arc::new(VehicleScreen::new()),
        collection.clone(),
    )
    .crud(collection.clone());
    let mut view: ListView<Value> = ListView::mount(builder).unwrap();
    view.settle().await;

    view.change_page(2).await.unwrap();
    view.settle().await;
    assert_eq!(view.presenter().rows().len(), 1);

    view.delete(&json!({ "_id": "21" })).await.unwrap();
    view.settle().await;

    assert_eq!(view.grid().total_pages, 2);
    assert_eq!(view.presenter().current_page(), 1);
    assert_eq!(view.presenter().rows().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_emptied_collection_returns_to_first_page() {
    let collection = Arc::new(MemoryCollection::new(vehicles(11)));
    let builder = ListController::<Value, Value, Value>::builder(
        Arc::new(VehicleScreen::new()),
        collection.clone(),
    )
    .crud(collection.clone());
    let mut view: ListView<Value> = ListView::mount(builder).unwrap();
    view.settle().await;

    view.change_page(1).await.unwrap();
    view.settle().await;
    assert_eq!(view.presenter().current_page(), 1);

    view.controller_mut()
        .handle_selection_changed(collection.rows());
    assert_eq!(view.delete_selected().await.unwrap(), 11);
    view.settle().await;

    assert_eq!(view.grid().total_items, 0);
    assert_eq!(view.grid().total_pages, 0);
    assert_eq!(view.grid().current_page, 0);
    assert_eq!(view.presenter().current_page(), 0);
    assert_eq!(view.controller().query().page(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_update_record_reloads() {
    let collection = Arc::new(MemoryCollection::new(vehicles(3)));
    let builder = ListController::<Value, Value, Value>::builder(
        Arc::new(VehicleScreen::new()),
        collection.clone(),
    )
    .crud(collection.clone());
    let mut view: ListView<Value> = ListView::mount(builder).unwrap();
    view.settle().await;

    view.update_record(&RecordId::from("2"), json!({ "brand": "Cupra" }))
        .await
        .unwrap();
    view.settle().await;

    let row = view
        .presenter()
        .rows()
        .iter()
        .find(|r| r["_id"] == "2")
        .cloned()
        .unwrap();
    assert_eq!(row["brand"], "Cupra");
}
