//! Order commands.

use shopfront_client::Shopfront;
use shopfront_core::{Order, OrderId};

use super::CommandError;

fn log_order(order: &Order) {
    let placed = order
        .created_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    tracing::info!(
        "{:<26} {:<10} {:>3} unit(s) {:>10} {placed}",
        order.id,
        order.status,
        order.unit_count(),
        order.total_price
    );
}

/// List the signed-in account's orders.
pub async fn list(shopfront: &Shopfront) -> Result<(), CommandError> {
    let orders = shopfront.orders().my_orders().await?;
    for order in &orders {
        log_order(order);
    }
    tracing::info!("{} order(s)", orders.len());
    Ok(())
}

/// Show one order with its lines.
pub async fn show(shopfront: &Shopfront, id: &str) -> Result<(), CommandError> {
    let order = shopfront.orders().get(&OrderId::new(id)).await?;
    log_order(&order);
    for line in &order.items {
        tracing::info!("  {} x{} @ {}", line.name, line.quantity, line.price);
    }
    Ok(())
}
