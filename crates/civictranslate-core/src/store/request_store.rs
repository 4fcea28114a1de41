// ── Request store ──
//
// Owns the authoritative request collection. Each action calls the data
// access layer, reconciles the collection, and reports the outcome on the
// notification bus. Actions queue on a fair async mutex so they apply in
// issue order; reads never take it.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::collection::{RequestCollection, Snapshot};
use super::filter::RequestFilter;
use crate::backend::{DataAccess, DeleteAck};
use crate::error::CoreError;
use crate::model::{NewRequest, RequestId, RequestStatus, TranslationRequest};
use crate::notify::Notifier;
use crate::stream::Subscription;

/// Retained error message after a failed fetch.
pub const FETCH_FAILED: &str = "Failed to load requests.";

const FETCH_FAILED_TOAST: &str = "Failed to load requests";
const CREATED: &str = "Translation request created successfully!";
const CREATE_FAILED: &str = "Failed to create request. Please try again.";
const UPDATE_FAILED: &str = "Failed to update status";
const DELETED: &str = "Request deleted successfully.";
const DELETE_FAILED: &str = "Failed to delete request";

/// Subscription to the ordered request list.
pub type RequestStream = Subscription<Snapshot>;

/// Aggregate counts derived from the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl RequestStats {
    pub fn count(requests: &[Arc<TranslationRequest>]) -> Self {
        requests.iter().fold(
            Self {
                total: requests.len(),
                ..Self::default()
            },
            |mut acc, r| {
                match r.status {
                    RequestStatus::Pending => acc.pending += 1,
                    RequestStatus::InProgress => acc.in_progress += 1,
                    RequestStatus::Completed => acc.completed += 1,
                }
                acc
            },
        )
    }
}

/// Clears `loading` when dropped, so a cancelled fetch never leaves it set.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

/// Reactive store for translation requests.
///
/// Cheaply cloneable; all clones share state.
#[derive(Clone)]
pub struct RequestStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    backend: Arc<DataAccess>,
    notifier: Notifier,
    collection: RequestCollection,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    last_failure: watch::Sender<Option<CoreError>>,
    stats: watch::Sender<RequestStats>,
    actions: Mutex<()>,
}

impl RequestStore {
    pub fn new(backend: Arc<DataAccess>, notifier: Notifier) -> Self {
        let (loading, _) = watch::channel(false);
        let (error, _) = watch::channel(None);
        let (last_failure, _) = watch::channel(None);
        let (stats, _) = watch::channel(RequestStats::default());

        Self {
            inner: Arc::new(StoreInner {
                backend,
                notifier,
                collection: RequestCollection::new(),
                loading,
                error,
                last_failure,
                stats,
                actions: Mutex::new(()),
            }),
        }
    }

    pub fn backend(&self) -> &Arc<DataAccess> {
        &self.inner.backend
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Reload the whole collection.
    ///
    /// Never fails: on error the collection is left as it was, `error()`
    /// holds a fixed message, and the cause is kept in `last_failure()`.
    pub async fn fetch_requests(&self) {
        let _guard = self.inner.actions.lock().await;
        debug!("fetching requests");

        self.inner.loading.send_replace(true);
        let _loading = LoadingGuard(&self.inner.loading);
        self.inner.error.send_replace(None);
        self.inner.last_failure.send_replace(None);

        match self.inner.backend.list_requests().await {
            Ok(records) => {
                debug!(count = records.len(), "requests loaded");
                self.inner.collection.replace_all(records);
                self.publish_stats();
            }
            Err(e) => {
                warn!(error = %e, "failed to load requests");
                self.inner.error.send_replace(Some(FETCH_FAILED.to_owned()));
                self.inner.last_failure.send_replace(Some(e));
                self.inner.notifier.error(FETCH_FAILED_TOAST);
            }
        }
    }

    /// Create a request and put it at the top of the list.
    pub async fn create_request(
        &self,
        fields: NewRequest,
    ) -> Result<Arc<TranslationRequest>, CoreError> {
        let _guard = self.inner.actions.lock().await;
        debug!(title = %fields.title, "creating request");

        match self.inner.backend.create_request(fields).await {
            Ok(record) => {
                info!(id = %record.id, "request created");
                let record = self.inner.collection.prepend(record);
                self.publish_stats();
                self.inner.notifier.success(CREATED);
                Ok(record)
            }
            Err(e) => {
                warn!(error = %e, "failed to create request");
                self.inner.notifier.error(CREATE_FAILED);
                Err(e)
            }
        }
    }

    /// Change one request's status, replacing it in place.
    pub async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Arc<TranslationRequest>, CoreError> {
        let _guard = self.inner.actions.lock().await;
        debug!(%id, %status, "updating status");

        match self.inner.backend.update_status(id, status).await {
            Ok(record) => {
                info!(%id, %status, "status updated");
                let record = self.inner.collection.replace(record);
                self.publish_stats();
                self.inner
                    .notifier
                    .success(format!("Status updated to \"{status}\""));
                Ok(record)
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to update status");
                self.inner.notifier.error(UPDATE_FAILED);
                Err(e)
            }
        }
    }

    /// Delete one request.
    pub async fn delete_request(&self, id: &RequestId) -> Result<DeleteAck, CoreError> {
        let _guard = self.inner.actions.lock().await;
        debug!(%id, "deleting request");

        match self.inner.backend.delete_request(id).await {
            Ok(ack) => {
                info!(%id, "request deleted");
                self.inner.collection.remove(id);
                self.publish_stats();
                self.inner.notifier.success(DELETED);
                Ok(ack)
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to delete request");
                self.inner.notifier.error(DELETE_FAILED);
                Err(e)
            }
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current ordered list (cheap `Arc` clone).
    pub fn requests(&self) -> Snapshot {
        self.inner.collection.snapshot()
    }

    pub fn get(&self, id: &RequestId) -> Option<Arc<TranslationRequest>> {
        self.inner.collection.get(id)
    }

    /// Records matching `filter`, in list order.
    pub fn filter(&self, filter: &RequestFilter) -> Vec<Arc<TranslationRequest>> {
        self.requests()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collection version, bumped on every mutation.
    pub fn version(&self) -> u64 {
        self.inner.collection.version()
    }

    pub fn stats(&self) -> RequestStats {
        *self.inner.stats.borrow()
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.loading.borrow()
    }

    /// Message retained after a failed fetch.
    pub fn error(&self) -> Option<String> {
        self.inner.error.borrow().clone()
    }

    /// Cause of the last failed fetch, cleared on the next fetch.
    pub fn last_failure(&self) -> Option<CoreError> {
        self.inner.last_failure.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> RequestStream {
        Subscription::new(self.inner.collection.subscribe())
    }

    pub fn subscribe_stats(&self) -> Subscription<RequestStats> {
        Subscription::new(self.inner.stats.subscribe())
    }

    pub fn subscribe_loading(&self) -> Subscription<bool> {
        Subscription::new(self.inner.loading.subscribe())
    }

    pub fn subscribe_error(&self) -> Subscription<Option<String>> {
        Subscription::new(self.inner.error.subscribe())
    }

    fn publish_stats(&self) {
        let stats = RequestStats::count(&self.inner.collection.snapshot());
        self.inner.stats.send_if_modified(|current| {
            let changed = *current != stats;
            *current = stats;
            changed
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::{MockBackend, MockDataset};
    use crate::config::MockLatency;
    use crate::model::{Priority, Severity};

    fn store_with(dataset: MockDataset, latency: MockLatency) -> RequestStore {
        let backend = DataAccess::Mock(MockBackend::new(dataset, latency));
        RequestStore::new(Arc::new(backend), Notifier::default())
    }

    fn seeded() -> RequestStore {
        store_with(MockDataset::seeded(), MockLatency::none())
    }

    fn fields(title: &str) -> NewRequest {
        NewRequest {
            title: title.into(),
            source_language: "English".into(),
            target_language: "Tagalog".into(),
            priority: Priority::Medium,
            description: "Flyer for the farmers market".into(),
            created_by: "James Whitford".into(),
        }
    }

    fn messages(store: &RequestStore) -> Vec<(String, Severity)> {
        store
            .notifier()
            .snapshot()
            .iter()
            .map(|n| (n.message.clone(), n.severity))
            .collect()
    }

    #[tokio::test]
    async fn fetch_loads_seed_and_derives_stats() {
        let store = seeded();
        store.fetch_requests().await;

        assert_eq!(store.len(), 8);
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
        assert_eq!(
            store.stats(),
            RequestStats {
                total: 8,
                pending: 3,
                in_progress: 2,
                completed: 3,
            }
        );

        let stats = store.stats();
        assert_eq!(stats.pending + stats.in_progress + stats.completed, stats.total);
        let pending = store.filter(&RequestFilter::default().with_status(RequestStatus::Pending));
        assert_eq!(pending.len(), stats.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_is_set_while_fetching() {
        let store = store_with(MockDataset::seeded(), MockLatency::default());
        let task = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_requests().await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.is_loading());

        task.await.unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_fetch_clears_loading() {
        let store = store_with(MockDataset::seeded(), MockLatency::default());

        let timed_out = tokio::time::timeout(Duration::from_millis(100), store.fetch_requests())
            .await
            .is_err();
        assert!(timed_out);
        assert!(!store.is_loading());
        assert!(store.is_empty());

        // The action lock was released with the dropped future.
        store.fetch_requests().await;
        assert!(!store.is_loading());
        assert_eq!(store.len(), 8);
    }

    #[tokio::test]
    async fn create_prepends_with_next_id() {
        let store = seeded();
        store.fetch_requests().await;

        let created = store.create_request(fields("Voter Guide")).await.unwrap();
        assert_eq!(created.id, "TRQ-009");
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(store.requests()[0].id, "TRQ-009");
        assert_eq!(store.stats().total, 9);
        assert_eq!(
            messages(&store),
            vec![(CREATED.to_owned(), Severity::Success)]
        );
    }

    #[tokio::test]
    async fn successive_creates_have_increasing_ids() {
        let store = seeded();
        let a = store.create_request(fields("a")).await.unwrap();
        let b = store.create_request(fields("b")).await.unwrap();
        let c = store.create_request(fields("c")).await.unwrap();

        assert!(a.id.sequence() < b.id.sequence());
        assert!(b.id.sequence() < c.id.sequence());
    }

    #[tokio::test]
    async fn update_status_moves_counts() {
        let store = seeded();
        store.fetch_requests().await;
        let before = store.stats();
        let before_list = store.requests();
        let original = store.get(&RequestId::from("TRQ-002")).unwrap();

        let updated = store
            .update_status(&RequestId::from("TRQ-002"), RequestStatus::Completed)
            .await
            .unwrap();

        let after = store.stats();
        assert_eq!(after.completed, before.completed + 1);
        assert_eq!(after.in_progress, before.in_progress - 1);
        assert_eq!(store.requests()[1].status, RequestStatus::Completed);

        // Only status and updatedAt change.
        let mut expected = (*original).clone();
        expected.status = RequestStatus::Completed;
        expected.updated_at = updated.updated_at;
        assert_eq!(*updated, expected);
        assert!(updated.updated_at >= original.updated_at);

        // Every other record is untouched and keeps its position.
        let after_list = store.requests();
        assert_eq!(after_list.len(), before_list.len());
        for (old, new) in before_list.iter().zip(after_list.iter()) {
            if old.id == "TRQ-002" {
                assert_eq!(new.id, old.id);
            } else {
                assert!(Arc::ptr_eq(old, new), "{} was modified", old.id);
            }
        }

        assert_eq!(
            messages(&store),
            vec![(
                "Status updated to \"completed\"".to_owned(),
                Severity::Success
            )]
        );
    }

    #[tokio::test]
    async fn update_missing_id_fails_and_keeps_collection() {
        let store = seeded();
        store.fetch_requests().await;
        let before = store.requests();

        let err = store
            .update_status(&RequestId::from("TRQ-999"), RequestStatus::Completed)
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::NotFound { id: "TRQ-999".into() });
        assert_eq!(store.requests(), before);
        assert_eq!(
            messages(&store),
            vec![(UPDATE_FAILED.to_owned(), Severity::Error)]
        );
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = seeded();
        store.fetch_requests().await;

        let ack = store.delete_request(&RequestId::from("TRQ-001")).await.unwrap();
        assert!(ack.success);
        assert_eq!(store.len(), 7);
        assert!(store.get(&RequestId::from("TRQ-001")).is_none());
        assert_eq!(messages(&store), vec![(DELETED.to_owned(), Severity::Success)]);

        store.delete_request(&RequestId::from("TRQ-001")).await.unwrap();
        assert_eq!(store.len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn actions_apply_in_issue_order() {
        let store = store_with(MockDataset::seeded(), MockLatency::default());

        // The slower fetch is issued first, so the create lands on top of it.
        let fetch = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_requests().await }
        });
        tokio::task::yield_now().await;
        let create = store.create_request(fields("queued")).await.unwrap();
        fetch.await.unwrap();

        assert_eq!(store.len(), 9);
        assert_eq!(store.requests()[0].id, create.id);
    }

    #[tokio::test]
    async fn stats_subscription_fires_on_change() {
        let store = seeded();
        let mut stats = store.subscribe_stats();
        assert_eq!(stats.current().total, 0);

        store.fetch_requests().await;
        let next = stats.changed().await.unwrap();
        assert_eq!(next.total, 8);
    }

    #[tokio::test]
    async fn list_subscription_sees_prepend() {
        let store = seeded();
        store.fetch_requests().await;
        let mut sub = store.subscribe();

        store.create_request(fields("subscribed")).await.unwrap();
        let snap = sub.changed().await.unwrap();
        assert_eq!(snap.len(), 9);
        assert_eq!(snap[0].title, "subscribed");
    }
}
