//! Method, path and envelope handling per resource service.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::json;
use shopfront_client::services::{LoginRequest, ProductInput, ProductKind};
use shopfront_client::{ClientError, MemoryTokenStore, Shopfront};
use shopfront_core::{
    CategoryId, Email, OrderId, OrderStatus, Price, ProductId, ReviewId, Role, UserId,
};
use shopfront_integration_tests::{
    FakeBackend, category_json, envelope, list_envelope, product_json,
};

fn signed_in(backend: &FakeBackend) -> Shopfront {
    let tokens = Arc::new(MemoryTokenStore::with_token(SecretString::from("admin-token")));
    Shopfront::with_token_store(backend.config(), tokens).unwrap()
}

fn order_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "orderItems": [{ "product": "p1", "name": "Dress", "quantity": 2, "price": 59.99 }],
        "totalPrice": 124.97,
        "status": status,
        "createdAt": "2026-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_products_by_category_uses_query() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products?category=cat-1",
            list_envelope(&[product_json("p1", "Dress", 59.99, "cat-1")]),
        )
        .start()
        .await
        .unwrap();
    let shopfront = signed_in(&backend);

    let products = shopfront
        .products()
        .by_category(&CategoryId::new("cat-1"))
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category.id.as_str(), "cat-1");

    let request = backend.last_request().unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.target, "/api/products?category=cat-1");
}

#[tokio::test]
async fn test_featured_accepts_bare_array() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products/featured",
            json!([
                product_json("p1", "Dress", 59.99, "c1"),
                product_json("p2", "Hat", 24.99, "c2")
            ]),
        )
        .start()
        .await
        .unwrap();

    let featured = signed_in(&backend).products().featured().await.unwrap();
    assert_eq!(featured.len(), 2);
    assert_eq!(featured[1].price, Price::from_cents(2499));
}

#[tokio::test]
async fn test_get_product_unwraps_data() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/products/65f1c0ffee",
            envelope(product_json("65f1c0ffee", "Summer Dress", 59.99, "c1")),
        )
        .start()
        .await
        .unwrap();

    let product = signed_in(&backend)
        .products()
        .get(&ProductId::new("65f1c0ffee"))
        .await
        .unwrap();
    assert_eq!(product.name, "Summer Dress");
    assert_eq!(product.rating().unwrap().count, 3);
}

#[tokio::test]
async fn test_blank_identifier_is_rejected_before_sending() {
    let backend = FakeBackend::builder().start().await.unwrap();

    let err = signed_in(&backend)
        .products()
        .get(&ProductId::new("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidIdentifier(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_status_error_carries_backend_message() {
    let backend = FakeBackend::builder()
        .respond(
            Method::GET,
            "/products/missing",
            StatusCode::NOT_FOUND,
            json!({ "success": false, "message": "Product not found" }),
            Duration::ZERO,
        )
        .start()
        .await
        .unwrap();

    let err = signed_in(&backend)
        .products()
        .get(&ProductId::new("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "HTTP 404 Not Found: Product not found");
}

#[tokio::test]
async fn test_wrong_shape_is_decode_error() {
    let backend = FakeBackend::builder()
        .route(Method::GET, "/categories", json!({ "success": true, "data": "oops" }))
        .start()
        .await
        .unwrap();

    let err = signed_in(&backend).categories().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_rejected_envelope() {
    let backend = FakeBackend::builder()
        .route(
            Method::GET,
            "/categories",
            json!({ "success": false, "message": "Catalog offline" }),
        )
        .start()
        .await
        .unwrap();

    let err = signed_in(&backend).categories().list().await.unwrap_err();
    assert_eq!(err.to_string(), "Request rejected: Catalog offline");
}

#[tokio::test]
async fn test_login_returns_session_without_sending_token() {
    let backend = FakeBackend::builder()
        .route(
            Method::POST,
            "/auth/login",
            json!({
                "success": true,
                "token": "jwt-123",
                "user": { "_id": "u1", "name": "Jane", "email": "jane@example.com" }
            }),
        )
        .start()
        .await
        .unwrap();

    let request = LoginRequest {
        email: Email::parse("jane@example.com").unwrap(),
        password: SecretString::from("hunter2"),
    };
    let session = signed_in(&backend).auth().login(&request).await.unwrap();
    assert_eq!(session.user.unwrap().role, Role::User);

    let recorded = backend.last_request().unwrap();
    assert_eq!(recorded.method, Method::POST);
    assert!(recorded.authorization.is_none());
    assert_eq!(
        recorded.body.unwrap(),
        json!({ "email": "jane@example.com", "password": "hunter2" })
    );
}

#[tokio::test]
async fn test_reset_password_puts_to_token_path() {
    let backend = FakeBackend::builder()
        .route(
            Method::PUT,
            "/auth/resetpassword/reset-abc",
            json!({ "success": true, "token": "jwt-new" }),
        )
        .start()
        .await
        .unwrap();

    let session = signed_in(&backend)
        .auth()
        .reset_password("reset-abc", &SecretString::from("n3w"))
        .await
        .unwrap();
    assert!(session.user.is_none());
    assert_eq!(backend.last_request().unwrap().body.unwrap(), json!({ "password": "n3w" }));
}

#[tokio::test]
async fn test_order_status_update() {
    let backend = FakeBackend::builder()
        .route(
            Method::PUT,
            "/orders/o-7/status",
            envelope(order_json("o-7", "shipped")),
        )
        .start()
        .await
        .unwrap();

    let order = signed_in(&backend)
        .orders()
        .update_status(&OrderId::new("o-7"), OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.unit_count(), 2);

    let request = backend.last_request().unwrap();
    assert_eq!(request.authorization.as_deref(), Some("Bearer admin-token"));
    assert_eq!(request.body.unwrap(), json!({ "status": "shipped" }));
}

#[tokio::test]
async fn test_delete_review_path() {
    let backend = FakeBackend::builder()
        .route(
            Method::DELETE,
            "/products/p1/reviews/r9",
            json!({ "success": true, "data": {} }),
        )
        .start()
        .await
        .unwrap();

    signed_in(&backend)
        .reviews()
        .delete(&ProductId::new("p1"), &ReviewId::new("r9"))
        .await
        .unwrap();

    let request = backend.last_request().unwrap();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.target, "/api/products/p1/reviews/r9");
}

#[tokio::test]
async fn test_create_clothing_product_tags_kind() {
    let backend = FakeBackend::builder()
        .route(
            Method::POST,
            "/api/v1/products",
            envelope(product_json("p9", "Linen Shirt", 39.99, "c1")),
        )
        .start()
        .await
        .unwrap();

    let input = ProductInput::new(
        "Linen Shirt".to_string(),
        Price::from_cents(3999),
        CategoryId::new("c1"),
    );
    let product = signed_in(&backend)
        .products()
        .create_clothing(input)
        .await
        .unwrap();
    assert_eq!(product.id.as_str(), "p9");

    let request = backend.last_request().unwrap();
    assert_eq!(request.target, "/api/api/v1/products");
    let body = request.body.unwrap();
    assert_eq!(body["productType"], json!(ProductKind::Clothing));
    assert_eq!(body["category"], "c1");
}

#[tokio::test]
async fn test_admin_role_update_and_dashboard() {
    let backend = FakeBackend::builder()
        .route(
            Method::PUT,
            "/admin/users/u2/role",
            envelope(json!({ "_id": "u2", "name": "Sam", "email": "sam@example.com", "role": "admin" })),
        )
        .route(
            Method::GET,
            "/admin/dashboard",
            envelope(json!({ "totalUsers": 3, "totalProducts": 8, "totalOrders": 5, "totalRevenue": 310.5 })),
        )
        .start()
        .await
        .unwrap();
    let shopfront = signed_in(&backend);

    let user = shopfront
        .admin()
        .update_user_role(&UserId::new("u2"), Role::Admin)
        .await
        .unwrap();
    assert!(user.is_admin());
    assert_eq!(backend.last_request().unwrap().body.unwrap(), json!({ "role": "admin" }));

    let stats = shopfront.admin().dashboard().await.unwrap();
    assert_eq!(stats.total_products, 8);
    assert_eq!(stats.total_revenue, Price::from_cents(31_050));
}

#[tokio::test]
async fn test_category_crud_paths() {
    let backend = FakeBackend::builder()
        .route(Method::GET, "/categories/c1", envelope(category_json("c1", "Women")))
        .route(Method::DELETE, "/categories/c1", json!({ "success": true }))
        .start()
        .await
        .unwrap();
    let shopfront = signed_in(&backend);

    let category = shopfront.categories().get(&CategoryId::new("c1")).await.unwrap();
    assert_eq!(category.name, "Women");
    assert!(backend.last_request().unwrap().authorization.is_none());

    shopfront.categories().delete(&CategoryId::new("c1")).await.unwrap();
    let request = backend.last_request().unwrap();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.authorization.as_deref(), Some("Bearer admin-token"));
}
