//! Catalog entities as returned by the storefront backend.
//!
//! The client never owns authoritative copies of these records; it keeps
//! snapshots that are replaced wholesale on every successful fetch.
//!
//! Decoding is strict about the invariants the UI relies on: a product whose
//! sale price is not strictly below its price is rejected instead of being
//! shown with a negative discount.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BrandId, CategoryId, Price, ProductId};

/// Errors raised while validating a decoded catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Price is negative.
    #[error("product {id}: price must not be negative")]
    NegativePrice { id: ProductId },

    /// Sale price is not strictly below the regular price.
    #[error("product {id}: sale price {sale} must be below price {price}")]
    SalePriceNotBelowPrice {
        id: ProductId,
        price: Price,
        sale: Price,
    },
}

// =============================================================================
// Shared reference types
// =============================================================================

/// Image reference hosted by a media provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public image URL.
    pub url: String,
    /// Provider-side identifier (e.g., Cloudinary public ID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

/// Reference to another entity: its identifier plus a display name.
///
/// The backend sends either a bare identifier or a populated object; both
/// decode into this type. A bare identifier yields an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReferenceWire<I>")]
pub struct Reference<I> {
    pub id: I,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReferenceWire<I> {
    Id(I),
    Populated {
        #[serde(alias = "_id")]
        id: I,
        #[serde(default)]
        name: String,
    },
}

impl<I> From<ReferenceWire<I>> for Reference<I> {
    fn from(wire: ReferenceWire<I>) -> Self {
        match wire {
            ReferenceWire::Id(id) => Self {
                id,
                name: String::new(),
            },
            ReferenceWire::Populated { id, name } => Self { id, name },
        }
    }
}

/// Reference to a category.
pub type CategoryRef = Reference<CategoryId>;

/// Reference to a brand.
pub type BrandRef = Reference<BrandId>;

// =============================================================================
// Product
// =============================================================================

/// A color swatch offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    /// CSS color code (e.g., `#1e3a8a`).
    pub code: String,
}

/// A named product specification row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

/// Aggregated review rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    /// Average rating value (e.g., 4.5).
    pub average: f64,
    /// Total number of reviews.
    pub count: u32,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProductWire")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    pub images: Vec<ImageRef>,
    pub category: CategoryRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<ColorOption>,
    pub specifications: Vec<Specification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_reviews: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    pub is_new: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductWire {
    #[serde(alias = "_id")]
    id: ProductId,
    name: String,
    price: Price,
    #[serde(default)]
    sale_price: Option<Price>,
    #[serde(default)]
    images: Vec<ImageRef>,
    category: CategoryRef,
    #[serde(default)]
    brand: Option<BrandRef>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    sizes: Vec<String>,
    #[serde(default)]
    colors: Vec<ColorOption>,
    #[serde(default)]
    specifications: Vec<Specification>,
    #[serde(default)]
    average_rating: Option<f64>,
    #[serde(default)]
    num_reviews: Option<u32>,
    #[serde(default)]
    stock: Option<u32>,
    #[serde(default)]
    is_new: bool,
}

impl TryFrom<ProductWire> for Product {
    type Error = CatalogError;

    fn try_from(mut wire: ProductWire) -> Result<Self, Self::Error> {
        // A zero sale price means "not on sale".
        wire.sale_price = wire.sale_price.filter(|sale| !sale.amount().is_zero());

        if wire.price.amount().is_sign_negative() {
            return Err(CatalogError::NegativePrice { id: wire.id });
        }
        if let Some(sale) = wire.sale_price
            && sale >= wire.price
        {
            return Err(CatalogError::SalePriceNotBelowPrice {
                id: wire.id,
                price: wire.price,
                sale,
            });
        }

        Ok(Self {
            id: wire.id,
            name: wire.name,
            price: wire.price,
            sale_price: wire.sale_price,
            images: wire.images,
            category: wire.category,
            brand: wire.brand,
            description: wire.description,
            sizes: wire.sizes,
            colors: wire.colors,
            specifications: wire.specifications,
            average_rating: wire.average_rating,
            num_reviews: wire.num_reviews,
            stock: wire.stock,
            is_new: wire.is_new,
        })
    }
}

impl Product {
    /// Price the shopper pays: the sale price if present, else the price.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whole-percent discount of the sale price, if on sale.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let sale = self.sale_price?;
        if self.price.amount().is_zero() {
            return None;
        }
        let ratio = (self.price.amount() - sale.amount()) / self.price.amount();
        (ratio * Decimal::ONE_HUNDRED).round().to_u32()
    }

    /// The rating aggregate, when the backend sent one.
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        self.average_rating.map(|average| Rating {
            average,
            count: self.num_reviews.unwrap_or(0),
        })
    }

    /// First image, used for cards and cart lines.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ImageRef> {
        self.images.first()
    }

    /// Whether the product can be added to the cart. Unknown stock counts as available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|stock| stock > 0)
    }
}

// =============================================================================
// Category & Brand
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    /// Denormalized product count maintained by the backend.
    #[serde(default)]
    pub item_count: u32,
    /// Parent category; `None` for top-level categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryRef>,
}

impl Category {
    /// Whether this category has no parent.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// A product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(alias = "_id")]
    pub id: BrandId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_json() -> serde_json::Value {
        json!({
            "_id": "p1",
            "name": "Summer Floral Dress",
            "price": 59.99,
            "salePrice": 44.99,
            "images": [{ "url": "https://img/1.jpg", "public_id": "shop/1" }],
            "category": { "_id": "cat-1", "name": "Dresses" },
            "sizes": ["S", "M"],
            "colors": [{ "name": "Blue", "code": "#1e3a8a" }],
            "averageRating": 4.5,
            "numReviews": 12,
            "isNew": true
        })
    }

    #[test]
    fn test_product_decodes_backend_shape() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.category.id.as_str(), "cat-1");
        assert_eq!(product.category.name, "Dresses");
        assert_eq!(product.effective_price(), Price::from_cents(4499));
        assert_eq!(product.discount_percent(), Some(25));
        assert_eq!(product.rating().unwrap().count, 12);
        assert_eq!(product.primary_image().unwrap().public_id.as_deref(), Some("shop/1"));
        assert!(product.is_new);
        assert!(product.in_stock());
    }

    #[test]
    fn test_product_accepts_bare_category_id() {
        let mut value = product_json();
        value["category"] = json!("cat-9");
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.category.id.as_str(), "cat-9");
        assert!(product.category.name.is_empty());
    }

    #[test]
    fn test_product_rejects_sale_price_not_below_price() {
        let mut value = product_json();
        value["salePrice"] = json!(59.99);
        let err = serde_json::from_value::<Product>(value).unwrap_err();
        assert!(err.to_string().contains("sale price"));
    }

    #[test]
    fn test_zero_sale_price_means_not_on_sale() {
        let mut value = product_json();
        value["salePrice"] = json!(0);
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.sale_price.is_none());
        assert_eq!(product.effective_price(), Price::from_cents(5999));
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_product_defaults_optional_lists() {
        let product: Product = serde_json::from_value(json!({
            "id": "p2",
            "name": "Hat",
            "price": 24.99,
            "category": "cat-2",
            "stock": 0
        }))
        .unwrap();
        assert!(product.sizes.is_empty());
        assert!(product.sale_price.is_none());
        assert_eq!(product.discount_percent(), None);
        assert!(!product.in_stock());
    }

    #[test]
    fn test_category_parent_is_optional() {
        let top: Category =
            serde_json::from_value(json!({ "_id": "c1", "name": "Women", "itemCount": 42 })).unwrap();
        assert!(top.is_top_level());
        assert_eq!(top.item_count, 42);

        let child: Category = serde_json::from_value(
            json!({ "_id": "c2", "name": "Dresses", "parent": "c1" }),
        )
        .unwrap();
        assert_eq!(child.parent.unwrap().id.as_str(), "c1");
        assert_eq!(child.item_count, 0);
    }
}
