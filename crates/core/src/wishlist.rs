//! Client-side wishlist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartItem};
use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Errors from wishlist operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WishlistError {
    /// The product is not on the wishlist.
    #[error("product {0} is not in the wishlist")]
    NotFound(ProductId),

    /// The product cannot be moved to the cart.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
}

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.effective_price(),
            image: product.primary_image().map(|image| image.url.clone()),
            in_stock: product.in_stock(),
        }
    }
}

/// Favorited products in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    /// Add the item if absent, remove it if present. Returns whether it is now favorited.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.remove(&item.product_id).is_some() {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Remove an item, keeping the order of the rest.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<WishlistItem> {
        let index = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Move an in-stock item into the cart as a quantity-one line.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::NotFound`] if the product is not favorited and
    /// [`WishlistError::OutOfStock`] if it cannot be bought; the wishlist is
    /// left unchanged in both cases.
    pub fn move_to_cart(
        &mut self,
        product_id: &ProductId,
        size: Option<String>,
        color: Option<String>,
        cart: &mut Cart,
    ) -> Result<(), WishlistError> {
        let item = self
            .items
            .iter()
            .find(|item| &item.product_id == product_id)
            .ok_or_else(|| WishlistError::NotFound(product_id.clone()))?;
        if !item.in_stock {
            return Err(WishlistError::OutOfStock(product_id.clone()));
        }

        let item = self
            .remove(product_id)
            .ok_or_else(|| WishlistError::NotFound(product_id.clone()))?;
        cart.add(CartItem {
            product_id: item.product_id,
            name: item.name,
            image: item.image,
            quantity: 1,
            size,
            color,
            unit_price: item.price,
        });
        Ok(())
    }
}
