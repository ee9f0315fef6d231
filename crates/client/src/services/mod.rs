//! Resource services.
//!
//! One service per backend resource. Every operation is one registry lookup
//! plus one client verb; errors propagate unchanged. Catalog reads go out on
//! the public client, everything else on the authenticated one (see
//! [`Endpoint::requires_auth`]).
//!
//! The backend wraps payloads in an envelope:
//!
//! ```json
//! { "success": true, "count": 2, "data": [ ... ] }
//! ```
//!
//! Operations that unwrap `data` say so in their docs. Decoding goes through
//! [`Envelope`] (or [`Payload`] where the backend is inconsistent), so a
//! response of the wrong shape becomes `ClientError::Decode` instead of an
//! empty list.

mod admin;
mod auth;
mod brands;
mod cart;
mod categories;
mod orders;
mod products;
mod reviews;

pub use admin::{AdminService, DashboardStats};
pub use auth::{
    AuthService, AuthSession, LoginRequest, PasswordUpdate, RegisterRequest,
};
pub use brands::{BrandInput, BrandService};
pub use cart::{CartService, RemoteCart, RemoteCartLine};
pub use categories::{CategoryInput, CategoryService};
pub use orders::{NewOrder, OrderService, ShippingAddress};
pub use products::{ProductInput, ProductKind, ProductService};
pub use reviews::ReviewService;

use secrecy::{ExposeSecret, SecretString};
use serde::de::{self, DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize, Serializer};

use crate::endpoints::Endpoint;
use crate::error::{ClientError, Result};
use crate::http::ApiClient;

// =============================================================================
// Response envelopes
// =============================================================================

const fn default_success() -> bool {
    true
}

/// The backend's response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Missing means success; only an explicit `false` is a rejection.
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    /// Total number of records, on list responses.
    pub count: Option<u64>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap `data`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Rejected` if the envelope says `success: false`
    /// - `ClientError::Decode` if `data` is absent
    pub fn into_data(self, endpoint: &Endpoint) -> Result<T> {
        self.check()?;
        self.data.ok_or_else(|| ClientError::Decode {
            url: endpoint.path(),
            source: de::Error::missing_field("data"),
        })
    }

    /// Check the success flag, ignoring `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Rejected` if the envelope says `success: false`.
    pub fn check(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(
                self.message
                    .clone()
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }
}

/// A payload that arrives either bare or wrapped in an [`Envelope`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Bare(T),
    Wrapped(Envelope<T>),
}

impl<T> Payload<T> {
    /// The payload, unwrapping the envelope if there is one.
    ///
    /// # Errors
    ///
    /// See [`Envelope::into_data`].
    pub fn into_data(self, endpoint: &Endpoint) -> Result<T> {
        match self {
            Self::Bare(data) => Ok(data),
            Self::Wrapped(envelope) => envelope.into_data(endpoint),
        }
    }
}

/// Call `endpoint` and unwrap the envelope's `data`.
async fn fetch_data<T: DeserializeOwned>(api: &ApiClient, endpoint: &Endpoint) -> Result<T> {
    api.call::<Envelope<T>>(endpoint)
        .await?
        .into_data(endpoint)
}

/// Send `body` to `endpoint` and unwrap the envelope's `data`.
async fn send_data<B, T>(api: &ApiClient, endpoint: &Endpoint, body: &B) -> Result<T>
where
    B: Serialize + ?Sized + Sync,
    T: DeserializeOwned,
{
    api.send::<B, Envelope<T>>(endpoint, body)
        .await?
        .into_data(endpoint)
}

/// Call `endpoint` for its side effect; the response only needs to be a
/// successful envelope (or empty).
async fn call_unit(api: &ApiClient, endpoint: &Endpoint) -> Result<()> {
    match api.call::<Option<Envelope<IgnoredAny>>>(endpoint).await? {
        Some(envelope) => envelope.check(),
        None => Ok(()),
    }
}

/// Send `body` to `endpoint` for its side effect.
async fn send_unit<B>(api: &ApiClient, endpoint: &Endpoint, body: &B) -> Result<()>
where
    B: Serialize + ?Sized + Sync,
{
    match api
        .send::<B, Option<Envelope<IgnoredAny>>>(endpoint, body)
        .await?
    {
        Some(envelope) => envelope.check(),
        None => Ok(()),
    }
}

/// Serialize a secret as a plain string. Only used for request bodies.
fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
