//! Listener fan-out shared by the event router and the connection broker.
//!
//! Both the input side (button → navigation action) and the companion side
//! (connect/disconnect) deliver one event to many independently-registered
//! listeners.  [`ListenerSet`] centralises the two rules they share:
//!
//! 1. **Registration order is delivery order**, exactly preserved —
//!    consumers may depend on it.
//! 2. **Per-listener failure isolation**: one failing listener never
//!    prevents delivery to the rest and never reaches the notify caller.
//!    Failures are reported through `tracing` and otherwise swallowed at
//!    this boundary.
//!
//! # Snapshot semantics
//!
//! `notify` clones the listener sequence before iterating, so a listener
//! that registers further listeners mid-fan-out never extends the in-flight
//! delivery — late registrations only see subsequent events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::warn;

/// Handle identifying one registered listener, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// One registered callback.  Failures are plain strings, logged at the
/// fan-out boundary.
type Listener<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Ordered set of listeners with snapshot-based, failure-isolated delivery.
///
/// Cloning a `ListenerSet` yields a second handle to the same underlying
/// set, so a listener can be handed a handle and register more listeners
/// from inside a callback.
pub struct ListenerSet<T> {
    listeners: Arc<Mutex<Vec<(ListenerId, Listener<T>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListenerSet<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Appends a listener; it will be invoked after all earlier listeners.
    pub fn register(
        &self,
        listener: impl Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .expect("listener list poisoned")
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a previously registered listener.
    ///
    /// Returns `false` when the id was already removed (or never existed).
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().expect("listener list poisoned");
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Number of currently registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().expect("listener list poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `event` to every listener registered at the start of the
    /// call, in registration order.
    ///
    /// `context` labels the fan-out in log output (e.g. `"dispatch"`,
    /// `"connect"`).
    pub fn notify(&self, context: &str, event: &T) {
        // Snapshot before iterating: the lock is not held during callbacks,
        // and registrations made by a callback target later events only.
        let snapshot: Vec<(ListenerId, Listener<T>)> = self
            .listeners
            .lock()
            .expect("listener list poisoned")
            .clone();

        for (id, listener) in snapshot {
            if let Err(reason) = listener(event) {
                warn!("{context} listener {id:?} failed: {reason}");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
