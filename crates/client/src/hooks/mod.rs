//! Data-fetching hooks.
//!
//! A hook ties a store slice to a service call: it marks the slice loading,
//! runs the call, and settles the slice with the result. Calls with the same
//! key as the slice's in-flight request are not sent twice. A request whose
//! ticket is cancelled (superseded or unmounted) is abandoned mid-flight,
//! which drops the underlying HTTP request.

mod categories;
mod products;

pub use categories::CategoriesHook;
pub use products::ProductsHook;

use std::future::Future;

use tracing::debug;

use crate::error::{ClientError, Result};
use crate::store::{FetchOutcome, RequestTicket, Store};

/// Run `fetch` against `store` under request key `key`.
pub(crate) async fn run_fetch<T, F, Fut>(store: &Store<T>, key: String, fetch: F) -> FetchOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let Some(ticket) = store.begin_unless_in_flight(key) else {
        debug!(store = store.name(), "Request already in flight");
        return FetchOutcome::AlreadyInFlight;
    };
    let mut pending = Pending {
        store,
        ticket: Some(ticket.clone()),
    };

    let result = tokio::select! {
        biased;
        () = ticket.cancellation().cancelled() => Err(ClientError::Cancelled),
        result = fetch() => result,
    };
    pending.ticket = None;

    match result {
        Err(ClientError::Cancelled) => {
            debug!(store = store.name(), seq = ticket.seq(), "Request abandoned");
            FetchOutcome::Superseded
        }
        result => store.finish(&ticket, result.map_err(|e| e.to_string())),
    }
}

/// Releases the slice if the fetch future is dropped before it settles.
struct Pending<'a, T> {
    store: &'a Store<T>,
    ticket: Option<RequestTicket>,
}

impl<T> Drop for Pending<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.store.abandon(&ticket);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_run_fetch_applies_success() {
        let store: Store<u32> = Store::new("test");
        let outcome = run_fetch(&store, "all".to_string(), || async { Ok(vec![1, 2]) }).await;
        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(store.snapshot().items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_run_fetch_stores_error_display() {
        let store: Store<u32> = Store::new("test");
        store.set_items(vec![7]);
        let outcome = run_fetch(&store, "all".to_string(), || async {
            Err(ClientError::Rejected("Out of stock".to_string()))
        })
        .await;
        assert_eq!(outcome, FetchOutcome::Failed);

        let state = store.snapshot();
        assert_eq!(state.items, vec![7]);
        assert_eq!(state.error.as_deref(), Some("Request rejected: Out of stock"));
    }

    #[tokio::test]
    async fn test_overlapping_fetches_resolve_to_latest() {
        let store: Store<&'static str> = Store::new("test");

        let slow = run_fetch(&store, "a".to_string(), || async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec!["a"])
        });
        let fast = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            run_fetch(&store, "b".to_string(), || async { Ok(vec!["b"]) }).await
        };

        let (a, b) = tokio::join!(slow, fast);
        assert_eq!(a, FetchOutcome::Superseded);
        assert_eq!(b, FetchOutcome::Applied);
        assert_eq!(store.snapshot().items, vec!["b"]);
        assert!(!store.snapshot().loading);
    }

    #[tokio::test]
    async fn test_same_key_is_not_sent_twice() {
        let store: Store<u32> = Store::new("test");

        let first = run_fetch(&store, "all".to_string(), || async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(vec![1])
        });
        let second = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            run_fetch(&store, "all".to_string(), || async { Ok(vec![2]) }).await
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, FetchOutcome::Applied);
        assert_eq!(second, FetchOutcome::AlreadyInFlight);
        assert_eq!(store.snapshot().items, vec![1]);
    }

    #[tokio::test]
    async fn test_dropped_fetch_releases_slice() {
        let store: Store<u32> = Store::new("test");

        let timed_out = tokio::time::timeout(
            Duration::from_millis(20),
            run_fetch(&store, "all".to_string(), || async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(vec![1])
            }),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!store.snapshot().loading);
        assert_eq!(store.in_flight(), None);

        let retry = run_fetch(&store, "all".to_string(), || async { Ok(vec![2]) }).await;
        assert_eq!(retry, FetchOutcome::Applied);
        assert_eq!(store.snapshot().items, vec![2]);
    }

    #[tokio::test]
    async fn test_cancel_abandons_request() {
        let store: Store<u32> = Store::new("test");
        store.set_items(vec![9]);

        let fetch = run_fetch(&store, "all".to_string(), || async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![1])
        });
        let unmount = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            store.cancel();
        };

        let (outcome, ()) = tokio::join!(fetch, unmount);
        assert_eq!(outcome, FetchOutcome::Superseded);
        assert_eq!(store.snapshot().items, vec![9]);
        assert!(!store.snapshot().loading);
    }
}
