//! Store administration commands.
//!
//! # Usage
//!
//! ```bash
//! sf-cli admin dashboard
//! sf-cli admin set-role 65f1c0ffee admin
//! ```

use shopfront_client::Shopfront;
use shopfront_core::{Role, UserId};

use super::CommandError;

/// Show dashboard counters.
pub async fn dashboard(shopfront: &Shopfront) -> Result<(), CommandError> {
    let stats = shopfront.admin().dashboard().await?;
    tracing::info!("Users:    {}", stats.total_users);
    tracing::info!("Products: {}", stats.total_products);
    tracing::info!("Orders:   {}", stats.total_orders);
    tracing::info!("Revenue:  {}", stats.total_revenue);
    for (key, value) in &stats.extra {
        tracing::info!("{key}: {value}");
    }
    Ok(())
}

/// List accounts.
pub async fn users(shopfront: &Shopfront) -> Result<(), CommandError> {
    let users = shopfront.admin().users().await?;
    for user in &users {
        tracing::info!("{:<26} {:<6} {} <{}>", user.id, user.role, user.name, user.email);
    }
    tracing::info!("{} user(s)", users.len());
    Ok(())
}

/// Change an account's role.
pub async fn set_role(shopfront: &Shopfront, id: &str, role: &str) -> Result<(), CommandError> {
    let role: Role = role
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))?;

    let user = shopfront
        .admin()
        .update_user_role(&UserId::new(id), role)
        .await?;
    tracing::info!("{} is now {}", user.email, user.role);
    Ok(())
}

/// Show sales analytics.
pub async fn sales(shopfront: &Shopfront) -> Result<(), CommandError> {
    let report = shopfront.admin().sales_analytics().await?;
    tracing::info!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    Ok(())
}

/// Show inventory analytics.
pub async fn inventory(shopfront: &Shopfront) -> Result<(), CommandError> {
    let report = shopfront.admin().inventory_analytics().await?;
    tracing::info!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    Ok(())
}
