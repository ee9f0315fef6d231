//! Client-side shopping cart.
//!
//! Lines are keyed by product, size and color; adding the same combination
//! again bumps the quantity. Quantities never drop below one through the
//! quantity controls - removing a line is an explicit operation.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Flat shipping fee charged on any non-empty cart.
pub const FLAT_SHIPPING: Price = Price::from_cents(499);

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// A line in the cart with the unit price captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub unit_price: Price,
}

impl CartItem {
    /// Build a quantity-one line from a product, snapshotting its current price.
    #[must_use]
    pub fn from_product(product: &Product, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.primary_image().map(|image| image.url.clone()),
            quantity: 1,
            size,
            color,
            unit_price: product.effective_price(),
        }
    }

    /// The key identifying this line.
    #[must_use]
    pub fn key(&self) -> CartLineKey {
        CartLineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// `unit_price × quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }

    fn matches(&self, key: &CartLineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line, merging with an existing line for the same key.
    ///
    /// A zero quantity is treated as one.
    pub fn add(&mut self, mut item: CartItem) {
        item.quantity = item.quantity.max(1);
        let key = item.key();
        match self.line_mut(&key) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Increase a line's quantity by one. Returns the new quantity.
    pub fn increment(&mut self, key: &CartLineKey) -> Option<u32> {
        let line = self.line_mut(key)?;
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    /// Decrease a line's quantity by one, never below one. Returns the new quantity.
    pub fn decrement(&mut self, key: &CartLineKey) -> Option<u32> {
        let line = self.line_mut(key)?;
        line.quantity = line.quantity.saturating_sub(1).max(1);
        Some(line.quantity)
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, key: &CartLineKey) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.matches(key))?;
        Some(self.items.remove(index))
    }

    /// Empty the cart (after checkout).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of `unit_price × quantity`, rounded to display precision.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .map(CartItem::line_total)
            .sum::<Price>()
            .rounded()
    }

    /// Shipping fee: flat rate, waived for an empty cart.
    #[must_use]
    pub fn shipping(&self) -> Price {
        if self.is_empty() {
            Price::ZERO
        } else {
            FLAT_SHIPPING
        }
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Price {
        (self.subtotal() + self.shipping()).rounded()
    }

    fn line_mut(&mut self, key: &CartLineKey) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.matches(key))
    }
}
