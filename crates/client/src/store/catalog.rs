//! Catalog stores.

use shopfront_core::{Category, Product};

use super::Store;

/// Product slices: the full list, the featured rail, and the product detail.
#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Store<Product>,
    featured: Store<Product>,
    selected: Store<Product>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Store::new("products"),
            featured: Store::new("featured_products"),
            selected: Store::new("product"),
        }
    }

    /// All products, or the current category's products. Holds the reload
    /// callback.
    #[must_use]
    pub const fn products(&self) -> &Store<Product> {
        &self.products
    }

    #[must_use]
    pub const fn featured(&self) -> &Store<Product> {
        &self.featured
    }

    /// Product detail; holds at most one item.
    #[must_use]
    pub const fn selected(&self) -> &Store<Product> {
        &self.selected
    }

    /// The product currently shown in detail, if any.
    #[must_use]
    pub fn selected_product(&self) -> Option<Product> {
        self.selected.with_state(|state| state.items.first().cloned())
    }

    /// Cancel every slice's in-flight request.
    pub fn cancel_all(&self) {
        self.products.cancel();
        self.featured.cancel();
        self.selected.cancel();
    }
}

/// Category slice.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Store<Category>,
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Store::new("categories"),
        }
    }

    #[must_use]
    pub const fn categories(&self) -> &Store<Category> {
        &self.categories
    }
}
