//! Store sequencing through real HTTP round trips.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::json;
use shopfront_client::{FetchOutcome, MemoryTokenStore, Shopfront};
use shopfront_core::{CategoryId, ProductId};
use shopfront_integration_tests::{
    FakeBackend, category_json, envelope, list_envelope, product_json,
};

fn shopfront(backend: &FakeBackend) -> Shopfront {
    Shopfront::with_token_store(backend.config(), Arc::new(MemoryTokenStore::new())).unwrap()
}

fn count(backend: &FakeBackend, target: &str) -> usize {
    backend
        .requests()
        .iter()
        .filter(|request| request.target == target)
        .count()
}

#[tokio::test]
async fn test_mount_loads_list_and_featured() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products",
            list_envelope(&[
                product_json("p1", "Dress", 59.99, "c1"),
                product_json("p2", "Hat", 24.99, "c2"),
            ]),
        )
        .route(
            Method::GET,
            "/products/featured",
            list_envelope(&[product_json("p2", "Hat", 24.99, "c2")]),
        )
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    let (all, featured) = hook.mount().await;
    assert_eq!(all, FetchOutcome::Applied);
    assert_eq!(featured, FetchOutcome::Applied);

    let state = hook.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.items.len(), 2);
    assert_eq!(hook.featured_snapshot().items.len(), 1);
}

#[tokio::test]
async fn test_category_then_all_ends_with_all() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products?category=c1",
            list_envelope(&[product_json("p1", "Dress", 59.99, "c1")]),
        )
        .route(
            Method::GET,
            "/products",
            list_envelope(&[
                product_json("p1", "Dress", 59.99, "c1"),
                product_json("p2", "Hat", 24.99, "c2"),
            ]),
        )
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    hook.fetch_by_category(&CategoryId::new("c1")).await;
    assert_eq!(hook.snapshot().items.len(), 1);

    hook.fetch_all().await;
    assert_eq!(hook.snapshot().items.len(), 2);
}

#[tokio::test]
async fn test_slow_earlier_response_does_not_overwrite_later() {
    let backend = FakeBackend::builder()
        .route_delayed(
            Method::GET,
            "/products?category=slow",
            list_envelope(&[product_json("p1", "Dress", 59.99, "slow")]),
            Duration::from_millis(300),
        )
        .route(
            Method::GET,
            "/products?category=fast",
            list_envelope(&[
                product_json("p2", "Hat", 24.99, "fast"),
                product_json("p3", "Scarf", 19.99, "fast"),
            ]),
        )
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    let slow_hook = hook.clone();
    let slow = tokio::spawn(async move {
        slow_hook
            .fetch_by_category(&CategoryId::new("slow"))
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let fast = hook.fetch_by_category(&CategoryId::new("fast")).await;
    assert_eq!(fast, FetchOutcome::Applied);
    assert_eq!(slow.await.unwrap(), FetchOutcome::Superseded);

    let state = hook.snapshot();
    assert!(!state.loading);
    let ids: Vec<_> = state.items.iter().map(|p| p.id.as_str().to_string()).collect();
    assert_eq!(ids, ["p2", "p3"]);
}

#[tokio::test]
async fn test_failure_keeps_previous_items() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products",
            list_envelope(&[product_json("p1", "Dress", 59.99, "c1")]),
        )
        .respond(
            Method::GET,
            "/products?category=broken",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "message": "Database unavailable" }),
            Duration::ZERO,
        )
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    hook.fetch_all().await;
    let outcome = hook.fetch_by_category(&CategoryId::new("broken")).await;
    assert_eq!(outcome, FetchOutcome::Failed);

    let state = hook.snapshot();
    assert!(!state.loading);
    assert_eq!(state.items.len(), 1);
    assert!(state.error.unwrap().contains("Database unavailable"));
}

#[tokio::test]
async fn test_refetch_all_issues_new_request() {
    let backend = FakeBackend::builder()
        .route(Method::GET, "/products", list_envelope(&[]))
        .route(Method::GET, "/products/featured", list_envelope(&[]))
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    assert!(!hook.refetch_all().await);
    hook.mount().await;
    assert_eq!(count(&backend, "/api/products"), 1);

    assert!(hook.refetch_all().await);
    assert_eq!(count(&backend, "/api/products"), 2);
}

#[tokio::test]
async fn test_unmount_cancels_in_flight_fetch() {
    let backend = FakeBackend::builder()
        .route_delayed(
            Method::GET,
            "/products",
            list_envelope(&[product_json("p1", "Dress", 59.99, "c1")]),
            Duration::from_millis(300),
        )
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    let pending_hook = hook.clone();
    let pending = tokio::spawn(async move { pending_hook.fetch_all().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(hook.snapshot().loading);

    hook.unmount();
    assert_eq!(pending.await.unwrap(), FetchOutcome::Superseded);

    let state = hook.snapshot();
    assert!(!state.loading);
    assert!(state.items.is_empty());
    assert!(!hook.refetch_all().await);
}

#[tokio::test]
async fn test_product_detail_slice() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products/p7",
            envelope(product_json("p7", "Trench Coat", 129.0, "c3")),
        )
        .start()
        .await
        .unwrap();
    let hook = shopfront(&backend).products_hook();

    hook.fetch_product(&ProductId::new("p7")).await;
    assert_eq!(hook.product().unwrap().name, "Trench Coat");
    assert!(hook.snapshot().items.is_empty());
}

#[tokio::test]
async fn test_categories_hook_follows_id() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/categories",
            list_envelope(&[category_json("c1", "Women"), category_json("c2", "Men")]),
        )
        .route(Method::GET, "/categories/c2", envelope(category_json("c2", "Men")))
        .start()
        .await
        .unwrap();
    let mut hook = shopfront(&backend).categories_hook(None);

    assert_eq!(hook.mount().await, FetchOutcome::Applied);
    assert_eq!(hook.snapshot().items.len(), 2);

    let outcome = hook.set_id(Some(CategoryId::new("c2"))).await;
    assert_eq!(outcome, Some(FetchOutcome::Applied));
    let state = hook.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Men");

    assert_eq!(hook.set_id(Some(CategoryId::new("c2"))).await, None);
    assert_eq!(count(&backend, "/api/categories/c2"), 1);
}
