//! Integration tests for the Shopfront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `client_pair` - Bearer header handling on the two clients
//! - `services` - Method, path and envelope handling per resource
//! - `hooks` - Store sequencing through real HTTP round trips
//!
//! Every test starts a [`FakeBackend`]: an `axum` server on an ephemeral
//! port that answers canned JSON per route and records what it received.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use serde_json::{Value, json};
use shopfront_client::ClientConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Mount point of the API on the fake backend.
pub const API_PREFIX: &str = "/api";

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path and query, e.g. `/api/products?category=c1`.
    pub target: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Duration,
}

struct BackendState {
    routes: HashMap<(Method, String), Canned>,
    recorded: Mutex<Vec<RecordedRequest>>,
}

/// Builder for a [`FakeBackend`]. Paths are given without the `/api` prefix.
#[derive(Default)]
pub struct FakeBackendBuilder {
    routes: HashMap<(Method, String), Canned>,
}

impl FakeBackendBuilder {
    /// Answer `method target` with `200` and `body`.
    #[must_use]
    pub fn route(self, method: Method, target: &str, body: Value) -> Self {
        self.respond(method, target, StatusCode::OK, body, Duration::ZERO)
    }

    /// Answer `method target` with `200` and `body` after `delay`.
    #[must_use]
    pub fn route_delayed(self, method: Method, target: &str, body: Value, delay: Duration) -> Self {
        self.respond(method, target, StatusCode::OK, body, delay)
    }

    /// Answer `method target` with an arbitrary status.
    #[must_use]
    pub fn respond(
        mut self,
        method: Method,
        target: &str,
        status: StatusCode,
        body: Value,
        delay: Duration,
    ) -> Self {
        self.routes.insert(
            (method, format!("{API_PREFIX}{target}")),
            Canned {
                status,
                body,
                delay,
            },
        );
        self
    }

    /// Bind an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start(self) -> std::io::Result<FakeBackend> {
        let state = Arc::new(BackendState {
            routes: self.routes,
            recorded: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}{API_PREFIX}"))
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        Ok(FakeBackend {
            base_url,
            state,
            server,
        })
    }
}

/// An in-process backend answering canned responses.
pub struct FakeBackend {
    base_url: Url,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl FakeBackend {
    #[must_use]
    pub fn builder() -> FakeBackendBuilder {
        FakeBackendBuilder::default()
    }

    /// API root, e.g. `http://127.0.0.1:PORT/api`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.base_url.clone());
        config.http_timeout = Duration::from_secs(5);
        config.token_read_timeout = Duration::from_millis(200);
        config
    }

    /// Everything received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().clone()
    }

    /// The last request received.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.recorded.lock().last().cloned()
    }
}

async fn handle(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };

    state.recorded.lock().push(RecordedRequest {
        method: method.clone(),
        target: target.clone(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).ok(),
    });

    let Some(canned) = state.routes.get(&(method, target)).cloned() else {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "success": false, "message": "Route not found" })),
        )
            .into_response();
    };

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }
    (canned.status, axum::Json(canned.body)).into_response()
}

// =============================================================================
// Fixtures
// =============================================================================

/// A backend-shaped product document.
#[must_use]
pub fn product_json(id: &str, name: &str, price: f64, category: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "price": price,
        "images": [{ "url": format!("https://img.example.com/{id}.jpg") }],
        "category": { "_id": category, "name": format!("Category {category}") },
        "sizes": ["S", "M", "L"],
        "averageRating": 4.5,
        "numReviews": 3
    })
}

/// A backend-shaped category document.
#[must_use]
pub fn category_json(id: &str, name: &str) -> Value {
    json!({ "_id": id, "name": name, "itemCount": 2 })
}

/// `{ success: true, count, data }` around a list.
#[must_use]
pub fn list_envelope(items: &[Value]) -> Value {
    json!({ "success": true, "count": items.len(), "data": items })
}

/// `{ success: true, data }` around a single record.
#[must_use]
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}
