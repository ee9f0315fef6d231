//! Orders for the signed-in account.

use serde::Serialize;
use shopfront_core::{Cart, Order, OrderId, OrderLine, OrderStatus, Price};
use tracing::{info, instrument};

use super::{fetch_data, send_data};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// Delivery address attached to a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// An order about to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(rename = "orderItems")]
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: Price,
    pub shipping_price: Price,
    pub total_price: Price,
}

impl NewOrder {
    /// Snapshot the cart's lines and totals into an order.
    #[must_use]
    pub fn from_cart(cart: &Cart, shipping_address: ShippingAddress, payment_method: String) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product: item.product_id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.unit_price,
                size: item.size.clone(),
                color: item.color.clone(),
            })
            .collect();

        Self {
            items,
            shipping_address,
            payment_method,
            items_price: cart.subtotal(),
            shipping_price: cart.shipping(),
            total_price: cart.total(),
        }
    }
}

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

/// Order endpoints. All of them require a signed-in account.
#[derive(Debug, Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Orders placed by the signed-in account. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>> {
        fetch_data(&self.api, &Endpoint::MyOrders).await
    }

    /// A single order. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order> {
        let id = OrderId::parse(id.as_str())?;
        fetch_data(&self.api, &Endpoint::Order(id)).await
    }

    /// Place an order. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, order), fields(lines = order.items.len(), total = %order.total_price))]
    pub async fn create(&self, order: &NewOrder) -> Result<Order> {
        let order: Order = send_data(&self.api, &Endpoint::CreateOrder, order).await?;
        info!(order_id = %order.id, "Order placed");
        Ok(order)
    }

    /// Move an order to `status`. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        let id = OrderId::parse(id.as_str())?;
        send_data(
            &self.api,
            &Endpoint::UpdateOrderStatus(id),
            &StatusUpdate { status },
        )
        .await
    }
}
