//! Store administration.

use serde::Deserialize;
use serde_json::{Map, Value};
use shopfront_core::{Price, Role, User, UserId};
use tracing::{info, instrument};

use super::{fetch_data, send_data};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// Headline numbers for the admin dashboard.
///
/// Fields the client does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: Price,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(serde::Serialize)]
struct RoleUpdate {
    role: Role,
}

/// Admin endpoints. The backend answers 403 for non-admin accounts.
#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All accounts. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>> {
        fetch_data(&self.api, &Endpoint::AdminUsers).await
    }

    /// Change an account's role. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(user_id = %id, role = %role))]
    pub async fn update_user_role(&self, id: &UserId, role: Role) -> Result<User> {
        let id = UserId::parse(id.as_str())?;
        let user: User = send_data(&self.api, &Endpoint::UpdateUserRole(id), &RoleUpdate { role }).await?;
        info!("User role updated");
        Ok(user)
    }

    /// Dashboard counters. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        fetch_data(&self.api, &Endpoint::AdminDashboard).await
    }

    /// Sales analytics, passed through as JSON. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn sales_analytics(&self) -> Result<Value> {
        fetch_data(&self.api, &Endpoint::SalesAnalytics).await
    }

    /// Inventory analytics, passed through as JSON. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn inventory_analytics(&self) -> Result<Value> {
        fetch_data(&self.api, &Endpoint::InventoryAnalytics).await
    }
}
