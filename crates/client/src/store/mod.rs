//! Client-side state stores.
//!
//! A [`Store`] owns one [`FetchState`] slice and publishes it through a
//! `tokio::sync::watch` channel so UI code can `subscribe()` to changes or
//! take a `snapshot()`. Every mutation is a [`StoreAction`] applied by
//! [`Store::dispatch`]. Stores never perform network I/O.
//!
//! # Request sequencing
//!
//! Each fetch is bracketed by [`Store::begin`] and [`Store::finish`].
//! `begin` issues a [`RequestTicket`] with a monotonically increasing
//! sequence number and cancels the ticket issued before it. `finish` applies
//! a result only if its ticket is still the latest, so overlapping requests
//! resolve to the one issued last regardless of arrival order.

mod catalog;

pub use catalog::{CategoryStore, ProductStore};

use std::sync::{Arc, Weak};

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Zero-argument callback that re-runs a slice's primary fetch.
pub type Reload = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

// =============================================================================
// State & actions
// =============================================================================

/// The observable state of one store slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub items: Vec<T>,
    /// True for exactly the duration of the latest in-flight request.
    pub loading: bool,
    /// Display string of the last failure; cleared when a request starts.
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// A mutation of a store slice.
pub enum StoreAction<T> {
    SetItems(Vec<T>),
    SetLoading(bool),
    SetError(Option<String>),
    SetReload(Option<Reload>),
    /// A request started: `loading` on, `error` cleared.
    Started,
    /// The latest request succeeded: items replaced wholesale.
    Succeeded(Vec<T>),
    /// The latest request failed: items kept.
    Failed(String),
    /// The in-flight request was dropped.
    Cancelled,
}

impl<T> std::fmt::Debug for StoreAction<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetItems(items) => f.debug_tuple("SetItems").field(&items.len()).finish(),
            Self::SetLoading(loading) => f.debug_tuple("SetLoading").field(loading).finish(),
            Self::SetError(error) => f.debug_tuple("SetError").field(error).finish(),
            Self::SetReload(reload) => f
                .debug_tuple("SetReload")
                .field(&reload.is_some())
                .finish(),
            Self::Started => f.write_str("Started"),
            Self::Succeeded(items) => f.debug_tuple("Succeeded").field(&items.len()).finish(),
            Self::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// What happened to a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the slice's items.
    Applied,
    /// The request failed; the error was stored and items kept.
    Failed,
    /// A newer request (or an unmount) took over; the result was discarded.
    Superseded,
    /// An identical request was already running; nothing was sent.
    AlreadyInFlight,
}

// =============================================================================
// Tickets
// =============================================================================

/// Handle on one issued request.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    seq: u64,
    key: String,
    cancel: CancellationToken,
}

impl RequestTicket {
    /// Sequence number; later tickets have larger numbers.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Request parameters the ticket was issued for.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fires when the ticket is superseded or the store is unmounted.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the ticket has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Default)]
struct Ledger {
    next_seq: u64,
    current: Option<RequestTicket>,
}

// =============================================================================
// Store
// =============================================================================

/// An explicit state container for one slice.
///
/// Cheap to clone; clones share the slice.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

/// Non-owning handle to a [`Store`], for callbacks the store itself holds.
pub struct WeakStore<T> {
    inner: Weak<StoreInner<T>>,
}

struct StoreInner<T> {
    name: &'static str,
    state: watch::Sender<FetchState<T>>,
    ledger: Mutex<Ledger>,
    reload: Mutex<Option<Reload>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Clone for WeakStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakStore<T> {
    /// The store, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Store<T>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<T> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("items", &state.items.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> Store<T> {
    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }
}

impl<T> Store<T> {
    /// An empty slice. `name` labels log lines.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            inner: Arc::new(StoreInner {
                name,
                state,
                ledger: Mutex::new(Ledger::default()),
                reload: Mutex::new(None),
            }),
        }
    }

    /// The slice's label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Receiver notified on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// A handle that does not keep the store alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakStore<T> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Apply an action.
    pub fn dispatch(&self, action: StoreAction<T>) {
        debug!(store = self.inner.name, action = ?action, "Dispatch");
        if let StoreAction::SetReload(reload) = action {
            *self.inner.reload.lock() = reload;
            return;
        }
        self.inner.state.send_modify(|state| apply(state, action));
    }

    pub fn set_items(&self, items: Vec<T>) {
        self.dispatch(StoreAction::SetItems(items));
    }

    pub fn set_loading(&self, loading: bool) {
        self.dispatch(StoreAction::SetLoading(loading));
    }

    pub fn set_error(&self, error: Option<String>) {
        self.dispatch(StoreAction::SetError(error));
    }

    pub fn set_reload(&self, reload: Reload) {
        self.dispatch(StoreAction::SetReload(Some(reload)));
    }

    /// Whether a reload callback is installed.
    #[must_use]
    pub fn has_reload(&self) -> bool {
        self.inner.reload.lock().is_some()
    }

    /// Run the installed reload callback. Returns `false` if none is installed.
    pub async fn reload(&self) -> bool {
        let reload = self.inner.reload.lock().clone();
        match reload {
            Some(reload) => {
                reload().await;
                true
            }
            None => false,
        }
    }

    /// Issue a ticket for a new request, superseding any in-flight one.
    pub fn begin(&self, key: impl Into<String>) -> RequestTicket {
        let mut ledger = self.inner.ledger.lock();
        self.issue(&mut ledger, key.into())
    }

    /// Like [`Store::begin`], but returns `None` if a request with the same
    /// key is already in flight.
    pub fn begin_unless_in_flight(&self, key: impl Into<String>) -> Option<RequestTicket> {
        let key = key.into();
        let mut ledger = self.inner.ledger.lock();
        if ledger.current.as_ref().is_some_and(|current| current.key == key) {
            return None;
        }
        Some(self.issue(&mut ledger, key))
    }

    /// Key of the in-flight request, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<String> {
        self.inner
            .ledger
            .lock()
            .current
            .as_ref()
            .map(|current| current.key.clone())
    }

    /// Settle a request. Applied only if `ticket` is still the latest.
    pub fn finish(&self, ticket: &RequestTicket, result: Result<Vec<T>, String>) -> FetchOutcome {
        let mut ledger = self.inner.ledger.lock();
        if ledger.current.as_ref().map(RequestTicket::seq) != Some(ticket.seq) {
            debug!(
                store = self.inner.name,
                seq = ticket.seq,
                key = %ticket.key,
                "Discarding stale response"
            );
            return FetchOutcome::Superseded;
        }
        ledger.current = None;

        // Applied under the ledger lock so a concurrent `begin` cannot
        // interleave between the check and the update.
        match result {
            Ok(items) => {
                self.dispatch(StoreAction::Succeeded(items));
                FetchOutcome::Applied
            }
            Err(error) => {
                self.dispatch(StoreAction::Failed(error));
                FetchOutcome::Failed
            }
        }
    }

    /// Release `ticket` if it is still the in-flight request, clearing
    /// `loading`. Used when the caller stops waiting before it settles.
    pub fn abandon(&self, ticket: &RequestTicket) {
        let mut ledger = self.inner.ledger.lock();
        if ledger.current.as_ref().map(RequestTicket::seq) != Some(ticket.seq) {
            return;
        }
        ledger.current = None;
        debug!(store = self.inner.name, seq = ticket.seq, "Request abandoned by caller");
        self.dispatch(StoreAction::Cancelled);
    }

    /// Drop the in-flight request, if any, and clear `loading`.
    pub fn cancel(&self) {
        let mut ledger = self.inner.ledger.lock();
        if let Some(current) = ledger.current.take() {
            current.cancel.cancel();
            debug!(store = self.inner.name, seq = current.seq, "Request cancelled");
            self.dispatch(StoreAction::Cancelled);
        }
    }

    fn issue(&self, ledger: &mut Ledger, key: String) -> RequestTicket {
        let ticket = RequestTicket {
            seq: ledger.next_seq,
            key,
            cancel: CancellationToken::new(),
        };
        ledger.next_seq += 1;

        if let Some(previous) = ledger.current.replace(ticket.clone()) {
            previous.cancel.cancel();
            debug!(
                store = self.inner.name,
                superseded = previous.seq,
                by = ticket.seq,
                "Request superseded"
            );
        }
        self.dispatch(StoreAction::Started);
        ticket
    }
}

fn apply<T>(state: &mut FetchState<T>, action: StoreAction<T>) {
    match action {
        StoreAction::SetItems(items) => state.items = items,
        StoreAction::SetLoading(loading) => state.loading = loading,
        StoreAction::SetError(error) => state.error = error,
        StoreAction::SetReload(_) => {}
        StoreAction::Started => {
            state.loading = true;
            state.error = None;
        }
        StoreAction::Succeeded(items) => {
            state.items = items;
            state.loading = false;
            state.error = None;
        }
        StoreAction::Failed(error) => {
            state.loading = false;
            state.error = Some(error);
        }
        StoreAction::Cancelled => state.loading = false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::FutureExt;

    use super::*;

    fn store() -> Store<&'static str> {
        Store::new("test")
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let store = store();
        store.set_error(Some("old".to_string()));

        let _ticket = store.begin("all");
        let state = store.snapshot();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_success_replaces_items_and_clears_loading() {
        let store = store();
        store.set_items(vec!["a", "b", "c"]);

        let ticket = store.begin("category:1");
        assert_eq!(store.finish(&ticket, Ok(vec!["x"])), FetchOutcome::Applied);

        let ticket = store.begin("all");
        assert_eq!(store.finish(&ticket, Ok(vec!["x", "y"])), FetchOutcome::Applied);

        let state = store.snapshot();
        assert_eq!(state.items, vec!["x", "y"]);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_failure_keeps_items() {
        let store = store();
        store.set_items(vec!["a", "b", "c"]);

        let ticket = store.begin("all");
        let outcome = store.finish(&ticket, Err("Network error".to_string()));
        assert_eq!(outcome, FetchOutcome::Failed);

        let state = store.snapshot();
        assert_eq!(state.items, vec!["a", "b", "c"]);
        assert_eq!(state.error.as_deref(), Some("Network error"));
        assert!(!state.loading);
    }

    #[test]
    fn test_latest_ticket_wins_when_older_arrives_last() {
        let store = store();
        let a = store.begin("category:a");
        let b = store.begin("category:b");
        assert!(a.is_cancelled());
        assert!(!b.is_cancelled());
        assert!(b.seq() > a.seq());

        assert_eq!(store.finish(&b, Ok(vec!["b"])), FetchOutcome::Applied);
        assert_eq!(store.finish(&a, Ok(vec!["a"])), FetchOutcome::Superseded);
        assert_eq!(store.snapshot().items, vec!["b"]);
    }

    #[test]
    fn test_latest_ticket_wins_when_older_arrives_first() {
        let store = store();
        let a = store.begin("category:a");
        let b = store.begin("category:b");

        assert_eq!(store.finish(&a, Ok(vec!["a"])), FetchOutcome::Superseded);
        assert!(store.snapshot().loading);
        assert!(store.snapshot().items.is_empty());

        assert_eq!(store.finish(&b, Ok(vec!["b"])), FetchOutcome::Applied);
        let state = store.snapshot();
        assert_eq!(state.items, vec!["b"]);
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_failure_does_not_set_error() {
        let store = store();
        let a = store.begin("all");
        let b = store.begin("featured");
        assert_eq!(
            store.finish(&a, Err("boom".to_string())),
            FetchOutcome::Superseded
        );
        assert!(store.snapshot().error.is_none());
        store.finish(&b, Ok(vec![]));
    }

    #[test]
    fn test_cancel_discards_result() {
        let store = store();
        store.set_items(vec!["kept"]);
        let ticket = store.begin("all");

        store.cancel();
        assert!(ticket.is_cancelled());
        assert!(!store.snapshot().loading);
        assert!(store.in_flight().is_none());

        assert_eq!(
            store.finish(&ticket, Ok(vec!["late"])),
            FetchOutcome::Superseded
        );
        assert_eq!(store.snapshot().items, vec!["kept"]);
    }

    #[test]
    fn test_abandon_only_releases_current_ticket() {
        let store = store();
        let stale = store.begin("a");
        let current = store.begin("b");

        store.abandon(&stale);
        assert_eq!(store.in_flight().as_deref(), Some("b"));
        assert!(store.snapshot().loading);

        store.abandon(&current);
        assert!(store.in_flight().is_none());
        assert!(!store.snapshot().loading);
        assert!(store.begin_unless_in_flight("b").is_some());
    }

    #[test]
    fn test_begin_unless_in_flight_deduplicates_same_key() {
        let store = store();
        let first = store.begin_unless_in_flight("all").unwrap();
        assert!(store.begin_unless_in_flight("all").is_none());
        assert!(!first.is_cancelled());
        assert_eq!(store.in_flight().as_deref(), Some("all"));

        let other = store.begin_unless_in_flight("featured").unwrap();
        assert!(first.is_cancelled());
        assert_eq!(other.key(), "featured");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = store();
        let mut rx = store.subscribe();

        store.set_items(vec!["a"]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().items, vec!["a"]);
    }

    #[tokio::test]
    async fn test_reload_runs_installed_callback() {
        let store = store();
        assert!(!store.reload().await);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.set_reload(Arc::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            .boxed()
        }));

        assert!(store.has_reload());
        assert!(store.reload().await);
        assert!(store.reload().await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_weak_store_does_not_keep_alive() {
        let store = store();
        let weak = store.downgrade();
        assert!(weak.upgrade().is_some());
        drop(store);
        assert!(weak.upgrade().is_none());
    }
}
