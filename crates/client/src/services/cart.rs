//! Server-side cart snapshot.

use serde::Deserialize;
use shopfront_core::{Cart, CartItem, Price, ProductId, Reference};
use tracing::instrument;

use super::fetch_data;
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// A line of the cart the backend holds for the account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCartLine {
    /// Bare id or populated `{ _id, name }`.
    pub product: Reference<ProductId>,
    pub quantity: u32,
    pub price: Price,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// The cart the backend holds for the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteCart {
    #[serde(default)]
    pub items: Vec<RemoteCartLine>,
}

impl RemoteCart {
    /// Rebuild a client-side cart, merging duplicate lines.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        let mut cart = Cart::new();
        for line in self.items {
            cart.add(CartItem {
                product_id: line.product.id,
                name: line.product.name,
                image: line.image,
                quantity: line.quantity,
                size: line.size,
                color: line.color,
                unit_price: line.price,
            });
        }
        cart
    }
}

/// Cart endpoint.
#[derive(Debug, Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The signed-in account's cart. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<RemoteCart> {
        fetch_data(&self.api, &Endpoint::Cart).await
    }
}
