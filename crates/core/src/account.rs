//! Account-scoped records: users and their orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, Price, ProductId, Role, UserId};

/// A storefront account as returned by `/auth/me` and `/admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Whether the account may call `/admin` endpoints.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A single line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(alias = "orderItems")]
    pub items: Vec<OrderLine>,
    pub total_price: Price,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_role_defaults_to_user() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_order_decodes_backend_shape() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "orderItems": [
                { "product": "p1", "name": "Dress", "quantity": 2, "price": 59.99 },
                { "product": "p2", "name": "Hat", "quantity": 1, "price": 24.99, "size": "M" }
            ],
            "totalPrice": 144.97,
            "status": "shipped",
            "createdAt": "2026-03-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.unit_count(), 3);
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total_price, Price::from_cents(14497));
        assert!(order.created_at.is_some());
    }
}
