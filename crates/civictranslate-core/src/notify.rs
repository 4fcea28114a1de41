// ── Notification bus ──
//
// Owned, injectable replacement for a global toast list. Every emitted
// notification gets a removal task guarded by a `CancellationToken`, so an
// early `dismiss()` cancels the timer instead of racing it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::DEFAULT_NOTIFICATION_TTL;
use crate::model::{Notification, NotificationId, Severity};
use crate::stream::Subscription;

/// Subscription to the visible notification list.
pub type NotificationStream = Subscription<Arc<Vec<Notification>>>;

/// Shared, ordered list of transient notifications.
///
/// Cheaply cloneable; all clones publish to the same list.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    items: watch::Sender<Arc<Vec<Notification>>>,
    timers: DashMap<NotificationId, CancellationToken>,
    ttl: Duration,
    last_id: AtomicU64,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        let (items, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            inner: Arc::new(NotifierInner {
                items,
                timers: DashMap::new(),
                ttl,
                last_id: AtomicU64::new(0),
            }),
        }
    }

    /// How long each notification stays visible.
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Append a notification and schedule its removal.
    ///
    /// Must be called from within a tokio runtime for the expiry to be
    /// scheduled; outside one the notification stays until dismissed.
    pub fn emit(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let created_at = Utc::now();
        let id = self.inner.next_id(created_at.timestamp_millis());
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at,
        };
        debug!(%id, %severity, message = %notification.message, "notification emitted");

        self.inner.items.send_modify(|items| {
            Arc::make_mut(items).push(notification);
        });

        self.schedule_removal(id);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.emit(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.emit(message, Severity::Error)
    }

    /// Remove a notification now and cancel its pending expiry.
    /// Returns `true` if it was still visible.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        if let Some((_, token)) = self.inner.timers.remove(&id) {
            token.cancel();
        }
        self.inner.remove(id)
    }

    /// Current notifications, oldest first.
    pub fn snapshot(&self) -> Arc<Vec<Notification>> {
        self.inner.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Subscribe to list changes. Drop the returned handle to unsubscribe.
    pub fn subscribe(&self) -> NotificationStream {
        Subscription::new(self.inner.items.subscribe())
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.items.receiver_count()
    }

    fn schedule_removal(&self, id: NotificationId) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(%id, "no runtime; notification will not expire on its own");
            return;
        };

        let token = CancellationToken::new();
        self.inner.timers.insert(id, token.clone());

        let weak: Weak<NotifierInner> = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        handle.spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(ttl) => {
                    if let Some(inner) = weak.upgrade() {
                        inner.timers.remove(&id);
                        inner.remove(id);
                        trace!(%id, "notification expired");
                    }
                }
            }
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotifierInner {
    /// Millisecond timestamp, bumped past the previous id on collision.
    fn next_id(&self, now_ms: i64) -> NotificationId {
        let candidate = u64::try_from(now_ms).unwrap_or_default();
        let mut prev = self.last_id.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(prev + 1);
            match self
                .last_id
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return NotificationId(next),
                Err(actual) => prev = actual,
            }
        }
    }

    fn remove(&self, id: NotificationId) -> bool {
        let mut removed = false;
        self.items.send_if_modified(|items| {
            if items.iter().any(|n| n.id == id) {
                Arc::make_mut(items).retain(|n| n.id != id);
                removed = true;
            }
            removed
        });
        removed
    }
}

impl Drop for NotifierInner {
    fn drop(&mut self) {
        for entry in &self.timers {
            entry.value().cancel();
        }
    }
}
