//! Catalog commands. Lists go through the hooks so the same store logic the
//! screens use is exercised here.

use shopfront_client::Shopfront;
use shopfront_core::{CategoryId, Product, ProductId, search_products};

use super::{CommandError, settle};

fn log_product(product: &Product) {
    let price = match product.sale_price {
        Some(sale) => format!("{sale} (was {})", product.price),
        None => product.price.to_string(),
    };
    tracing::info!(
        "{:<26} {:<32} {:<14} {}",
        product.id,
        product.name,
        price,
        product.category.name
    );
}

fn log_products(products: &[Product]) {
    for product in products {
        log_product(product);
    }
    tracing::info!("{} product(s)", products.len());
}

/// List all products.
pub async fn list_products(shopfront: &Shopfront) -> Result<(), CommandError> {
    let hook = shopfront.products_hook();
    let outcome = hook.fetch_all().await;
    let state = hook.snapshot();
    settle(outcome, &state)?;
    log_products(&state.items);
    Ok(())
}

/// Show one product.
pub async fn show_product(shopfront: &Shopfront, id: &str) -> Result<(), CommandError> {
    let hook = shopfront.products_hook();
    let outcome = hook.fetch_product(&ProductId::new(id)).await;
    settle(outcome, &hook.store().selected().snapshot())?;

    if let Some(product) = hook.product() {
        log_product(&product);
        if let Some(percent) = product.discount_percent() {
            tracing::info!("  {percent}% off");
        }
        if let Some(rating) = product.rating() {
            tracing::info!("  rated {:.1} from {} review(s)", rating.average, rating.count);
        }
        if !product.sizes.is_empty() {
            tracing::info!("  sizes: {}", product.sizes.join(", "));
        }
        if let Some(description) = &product.description {
            tracing::info!("  {description}");
        }
        if !product.in_stock() {
            tracing::warn!("  out of stock");
        }
    }
    Ok(())
}

/// List featured products.
pub async fn featured(shopfront: &Shopfront) -> Result<(), CommandError> {
    let hook = shopfront.products_hook();
    let outcome = hook.fetch_featured().await;
    let state = hook.featured_snapshot();
    settle(outcome, &state)?;
    log_products(&state.items);
    Ok(())
}

/// List products related to one product.
pub async fn related(shopfront: &Shopfront, id: &str) -> Result<(), CommandError> {
    let products = shopfront.products().related(&ProductId::new(id)).await?;
    log_products(&products);
    Ok(())
}

/// List one category's products.
pub async fn by_category(shopfront: &Shopfront, id: &str) -> Result<(), CommandError> {
    let hook = shopfront.products_hook();
    let outcome = hook.fetch_by_category(&CategoryId::new(id)).await;
    let state = hook.snapshot();
    settle(outcome, &state)?;
    log_products(&state.items);
    Ok(())
}

/// Fetch all products and filter them locally.
pub async fn search(shopfront: &Shopfront, query: &str) -> Result<(), CommandError> {
    let hook = shopfront.products_hook();
    let outcome = hook.fetch_all().await;
    let state = hook.snapshot();
    settle(outcome, &state)?;

    let matches: Vec<Product> = search_products(&state.items, query)
        .into_iter()
        .cloned()
        .collect();
    log_products(&matches);
    Ok(())
}

/// List categories, or show one.
pub async fn categories(shopfront: &Shopfront, id: Option<&str>) -> Result<(), CommandError> {
    let hook = shopfront.categories_hook(id.map(CategoryId::new));
    let outcome = hook.mount().await;
    let state = hook.snapshot();
    settle(outcome, &state)?;

    for category in &state.items {
        let parent = category
            .parent
            .as_ref()
            .map(|parent| format!(" (in {})", parent.id))
            .unwrap_or_default();
        tracing::info!(
            "{:<26} {:<24} {:>4} item(s){parent}",
            category.id,
            category.name,
            category.item_count
        );
    }
    Ok(())
}
