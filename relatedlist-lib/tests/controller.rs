//! End-to-end tests for the related-list controller.
//!
//! These drive a controller against an in-memory mock data source and cover
//! the full observation cycle: configure, tick, user actions, and the
//! observable outputs a host renders from.

use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use relatedlist_lib::RelatedListController;
use relatedlist_lib::error::DeleteError;
use relatedlist_lib::error::FetchError;
use relatedlist_lib::model::Record;
use relatedlist_lib::source::ColumnDescriptor;
use relatedlist_lib::source::DataSource;
use relatedlist_lib::source::FetchParams;
use relatedlist_lib::source::FetchResult;

/// In-memory data source with counting spies.
struct MockSource {
    backing: Mutex<Vec<Record>>,
    fetches: AtomicUsize,
    permission_checks: AtomicUsize,
    allow_delete: bool,
    fail_next_delete: bool,
}

impl MockSource {
    fn with_records(count: usize) -> Self {
        let backing = (0..count)
            .map(|n| {
                Record::new("Contact", format!("003x{n:03}")).set("Name", format!("Contact {n:03}"))
            })
            .collect();
        Self {
            backing: Mutex::new(backing),
            fetches: AtomicUsize::new(0),
            permission_checks: AtomicUsize::new(0),
            allow_delete: true,
            fail_next_delete: false,
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch(&self, params: &FetchParams) -> Result<FetchResult, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let backing = self
            .backing
            .lock()
            .map_err(|_| FetchError::transport("mock store poisoned"))?;
        let capped: Vec<Record> = backing.iter().take(params.max_records).cloned().collect();
        let server_has_more = backing.len() > capped.len();
        Ok(FetchResult {
            columns: vec![ColumnDescriptor::new("Name", "Name")],
            records: capped,
            server_has_more,
        })
    }

    async fn can_delete(&self, _object: &str) -> Result<bool, FetchError> {
        self.permission_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.allow_delete)
    }

    async fn delete(&self, _object: &str, record_id: &str) -> Result<(), DeleteError> {
        if self.fail_next_delete {
            return Err(DeleteError::failed("row locked by another user"));
        }
        let mut backing = self
            .backing
            .lock()
            .map_err(|_| DeleteError::failed("mock store poisoned"))?;
        let before = backing.len();
        backing.retain(|record| record.id() != record_id);
        if backing.len() == before {
            return Err(DeleteError::not_found(record_id));
        }
        Ok(())
    }
}

fn controller_over(source: MockSource) -> RelatedListController<MockSource> {
    let mut controller = RelatedListController::new(source);
    controller.configure(
        r#"{"objectApiName":"Contact","relationshipField":"AccountId",
            "fields":["Name"],"pageSize":6,"allowDelete":true}"#,
    );
    controller.set_parent_context("001x000001", "AccountId");
    controller
}

// =============================================================================
// Observation cycle
// =============================================================================

#[tokio::test]
async fn test_initial_load_shows_first_page() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;

    assert_eq!(controller.visible_records().len(), 6);
    assert!(controller.has_more());
    assert_eq!(controller.columns().len(), 1);
    assert_eq!(controller.display_label(), "Contact (9)");
}

#[tokio::test]
async fn test_load_more_reveals_remainder() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;
    controller.request_load_more();

    assert_eq!(controller.visible_records().len(), 9);
    assert!(!controller.has_more());
}

#[tokio::test]
async fn test_quiescent_ticks_do_not_refetch() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;
    controller.process_changes().await;
    controller.process_changes().await;

    assert_eq!(controller.source().fetch_count(), 1);
}

#[tokio::test]
async fn test_display_only_change_skips_fetch() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;

    controller.configure(
        r#"{"objectApiName":"Contact","relationshipField":"AccountId",
            "fields":["Name"],"pageSize":6,"customLabels":["Person"]}"#,
    );
    controller.process_changes().await;

    assert_eq!(controller.source().fetch_count(), 1);
    assert_eq!(controller.columns()[0].label, "Person");
}

#[tokio::test]
async fn test_data_change_fetches_exactly_once() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;

    controller.set_parent_context("001x000002", "AccountId");
    controller.process_changes().await;
    controller.process_changes().await;

    assert_eq!(controller.source().fetch_count(), 2);
}

#[tokio::test]
async fn test_malformed_config_fails_soft() {
    let mut controller = RelatedListController::new(MockSource::with_records(9));
    controller.configure("{this is not json");
    controller.set_parent_context("001x000001", "AccountId");
    controller.process_changes().await;

    // Empty configuration has no object type, so nothing is fetchable and
    // nothing errors.
    assert_eq!(controller.source().fetch_count(), 0);
    assert!(controller.visible_records().is_empty());
    assert!(controller.error_state().is_none());
}

// =============================================================================
// Fetch cap and view all
// =============================================================================

#[tokio::test]
async fn test_fetch_cap_sets_server_more() {
    let mut controller = controller_over(MockSource::with_records(60));
    controller.process_changes().await;

    assert_eq!(controller.total_records(), 50);
    assert_eq!(controller.display_label(), "Contact (50+)");

    controller.request_view_all();
    assert_eq!(controller.visible_records().len(), 50);
    // Everything fetched is shown, but the server still holds more.
    assert!(controller.has_more());
}

#[tokio::test]
async fn test_refresh_refetches_unchanged_inputs() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;
    controller.request_refresh().await;

    assert_eq!(controller.source().fetch_count(), 2);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_success_refetches() {
    let mut controller = controller_over(MockSource::with_records(9));
    controller.process_changes().await;
    assert!(controller.delete_allowed());

    controller.request_delete("003x000").await;

    assert_eq!(controller.total_records(), 8);
    assert!(controller.notice().is_none());
}

#[tokio::test]
async fn test_delete_failure_leaves_records_untouched() {
    let mut source = MockSource::with_records(9);
    source.fail_next_delete = true;
    let mut controller = controller_over(source);
    controller.process_changes().await;

    controller.request_delete("003x000").await;

    assert_eq!(controller.total_records(), 9);
    assert_eq!(
        controller.notice(),
        Some("Delete failed: row locked by another user")
    );
}

#[tokio::test]
async fn test_delete_denied_without_permission() {
    let mut source = MockSource::with_records(9);
    source.allow_delete = false;
    let mut controller = controller_over(source);
    controller.configure(
        r#"{"objectApiName":"Contact","fields":["Name"],"allowDelete":true}"#,
    );
    controller.process_changes().await;
    assert!(!controller.delete_allowed());

    let fetches = controller.source().fetch_count();
    controller.request_delete("003x000").await;

    assert!(controller.notice().is_some());
    assert_eq!(controller.source().fetch_count(), fetches);
}

// =============================================================================
// Infinite scroll
// =============================================================================

#[tokio::test]
async fn test_scroll_trigger_loads_after_debounce() {
    let mut controller = controller_over(MockSource::with_records(20));
    controller.configure(
        r#"{"objectApiName":"Contact","fields":["Name"],"pageSize":6,"infiniteScroll":true}"#,
    );
    controller.process_changes().await;
    assert_eq!(controller.visible_records().len(), 6);

    let token = controller.notify_scroll().expect("trigger should arm");
    assert!(controller.settle_scroll(token).await);
    assert_eq!(controller.visible_records().len(), 12);
}

#[tokio::test]
async fn test_rapid_scroll_triggers_coalesce() {
    let mut controller = controller_over(MockSource::with_records(20));
    controller.configure(
        r#"{"objectApiName":"Contact","fields":["Name"],"pageSize":6,"infiniteScroll":true}"#,
    );
    controller.process_changes().await;

    let first = controller.notify_scroll().expect("first trigger");
    let second = controller.notify_scroll().expect("second trigger");

    // The superseded trigger must not fire; only the latest does.
    assert!(!controller.settle_scroll(first).await);
    assert!(controller.settle_scroll(second).await);
    assert_eq!(controller.visible_records().len(), 12);
}

#[tokio::test]
async fn test_scroll_disabled_without_flag() {
    let mut controller = controller_over(MockSource::with_records(20));
    controller.process_changes().await;
    assert!(controller.notify_scroll().is_none());
}
