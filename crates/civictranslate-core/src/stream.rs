// ── Reactive subscriptions ──
//
// Subscription handle shared by the request store and the notifier.

use tokio::sync::watch;

/// A subscription to a piece of reactive state.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed). Dropping the handle unsubscribes.
pub struct Subscription<S: Clone + Send + Sync + 'static> {
    current: S,
    receiver: watch::Receiver<S>,
}

impl<S: Clone + Send + Sync + 'static> Subscription<S> {
    pub(crate) fn new(receiver: watch::Receiver<S>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The value captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Wait for the next change, returning the new value.
    /// Returns `None` once the owning store has been dropped.
    pub async fn changed(&mut self) -> Option<S> {
        self.receiver.changed().await.ok()?;
        let value = self.receiver.borrow_and_update().clone();
        self.current = value.clone();
        Some(value)
    }
}
