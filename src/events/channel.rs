//! Subscriber lists for event channels.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Handle returned by [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Anything that can report how many subscribers it holds.
pub trait Subscribers {
    fn subscriber_count(&self) -> usize;

    fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }
}

/// A single observable hook carrying payloads of type `A`.
pub struct EventChannel<A> {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(SubscriptionId, Handler<A>)>>,
}

impl<A> EventChannel<A> {
    pub const fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Attach `handler`; it runs on every subsequent [`emit`](Self::emit).
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(handler)));
        id
    }

    /// Detach a subscriber. Returns false if `id` was not attached.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Run every attached handler with `payload`, in subscription order.
    ///
    /// Handlers run outside the lock and may subscribe or unsubscribe.
    pub fn emit(&self, payload: &A) {
        let handlers: Vec<Handler<A>> = self.lock().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(payload);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Handler<A>)>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A> Subscribers for EventChannel<A> {
    fn subscriber_count(&self) -> usize {
        self.lock().len()
    }
}

impl<A> Default for EventChannel<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventChannel<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
