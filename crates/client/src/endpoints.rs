//! Endpoint registry.
//!
//! Maps every logical backend operation to an HTTP method and a URL under the
//! configured API root. Resolution is pure: no I/O, no validation of the
//! identifiers carried by a variant. Services reject blank identifiers before
//! they get here.

use reqwest::Method;
use shopfront_core::{BrandId, CategoryId, OrderId, ProductId, ReviewId, UserId};
use url::Url;

use crate::error::{ClientError, Result};

/// A backend operation, carrying the identifiers its path needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    // Auth
    Register,
    Login,
    Logout,
    Me,
    UpdatePassword,
    ForgotPassword,
    ResetPassword(String),

    // Products
    Products,
    Product(ProductId),
    FeaturedProducts,
    RelatedProducts(ProductId),
    ProductsByCategory(CategoryId),
    CreateProduct,
    UpdateProduct(ProductId),
    DeleteProduct(ProductId),
    CreateProductsBulk,
    /// Shared by the material and clothing creation flows.
    CreateTypedProduct,

    // Categories
    Categories,
    Category(CategoryId),
    CreateCategory,
    UpdateCategory(CategoryId),
    DeleteCategory(CategoryId),

    // Brands
    Brands,
    Brand(BrandId),
    CreateBrand,
    UpdateBrand(BrandId),
    DeleteBrand(BrandId),

    // Orders
    MyOrders,
    Order(OrderId),
    CreateOrder,
    UpdateOrderStatus(OrderId),

    // Cart
    Cart,

    // Reviews
    DeleteReview {
        product: ProductId,
        review: ReviewId,
    },

    // Admin
    AdminUsers,
    UpdateUserRole(UserId),
    AdminDashboard,
    SalesAnalytics,
    InventoryAnalytics,
}

impl Endpoint {
    /// HTTP method the backend expects for this operation.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Register
            | Self::Login
            | Self::ForgotPassword
            | Self::CreateProduct
            | Self::CreateProductsBulk
            | Self::CreateTypedProduct
            | Self::CreateCategory
            | Self::CreateBrand
            | Self::CreateOrder => Method::POST,

            Self::UpdatePassword
            | Self::ResetPassword(_)
            | Self::UpdateProduct(_)
            | Self::UpdateCategory(_)
            | Self::UpdateBrand(_)
            | Self::UpdateOrderStatus(_)
            | Self::UpdateUserRole(_) => Method::PUT,

            Self::DeleteProduct(_)
            | Self::DeleteCategory(_)
            | Self::DeleteBrand(_)
            | Self::DeleteReview { .. } => Method::DELETE,

            _ => Method::GET,
        }
    }

    /// Whether the operation is sent through the bearer-attaching client.
    ///
    /// Public catalog reads and the pre-login auth flows go out anonymously;
    /// everything that mutates or reads personal data carries the token.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Register
                | Self::Login
                | Self::ForgotPassword
                | Self::ResetPassword(_)
                | Self::Products
                | Self::Product(_)
                | Self::FeaturedProducts
                | Self::RelatedProducts(_)
                | Self::ProductsByCategory(_)
                | Self::Categories
                | Self::Category(_)
                | Self::Brands
                | Self::Brand(_)
        )
    }

    /// Path segments below the API root.
    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Register => vec!["auth", "register"],
            Self::Login => vec!["auth", "login"],
            Self::Logout => vec!["auth", "logout"],
            Self::Me => vec!["auth", "me"],
            Self::UpdatePassword => vec!["auth", "updatepassword"],
            Self::ForgotPassword => vec!["auth", "forgotpassword"],
            Self::ResetPassword(token) => vec!["auth", "resetpassword", token.as_str()],

            Self::Products | Self::CreateProduct | Self::ProductsByCategory(_) => vec!["products"],
            Self::Product(id) | Self::UpdateProduct(id) | Self::DeleteProduct(id) => {
                vec!["products", id.as_str()]
            }
            Self::FeaturedProducts => vec!["products", "featured"],
            Self::RelatedProducts(id) => vec!["products", id.as_str(), "related"],
            Self::CreateProductsBulk => vec!["api", "v1", "products", "bulk"],
            Self::CreateTypedProduct => vec!["api", "v1", "products"],

            Self::Categories | Self::CreateCategory => vec!["categories"],
            Self::Category(id) | Self::UpdateCategory(id) | Self::DeleteCategory(id) => {
                vec!["categories", id.as_str()]
            }

            Self::Brands | Self::CreateBrand => vec!["brands"],
            Self::Brand(id) | Self::UpdateBrand(id) | Self::DeleteBrand(id) => {
                vec!["brands", id.as_str()]
            }

            Self::MyOrders | Self::CreateOrder => vec!["orders"],
            Self::Order(id) => vec!["orders", id.as_str()],
            Self::UpdateOrderStatus(id) => vec!["orders", id.as_str(), "status"],

            Self::Cart => vec!["cart"],

            Self::DeleteReview { product, review } => {
                vec!["products", product.as_str(), "reviews", review.as_str()]
            }

            Self::AdminUsers => vec!["admin", "users"],
            Self::UpdateUserRole(id) => vec!["admin", "users", id.as_str(), "role"],
            Self::AdminDashboard => vec!["admin", "dashboard"],
            Self::SalesAnalytics => vec!["admin", "analytics", "sales"],
            Self::InventoryAnalytics => vec!["admin", "analytics", "inventory"],
        }
    }

    fn query(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::ProductsByCategory(id) => Some(("category", id.as_str())),
            _ => None,
        }
    }

    /// Unescaped path for logs (e.g., `/products/p1/related`).
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in self.segments() {
            path.push('/');
            path.push_str(segment);
        }
        if let Some((key, value)) = self.query() {
            path.push('?');
            path.push_str(key);
            path.push('=');
            path.push_str(value);
        }
        path
    }
}

/// Resolves [`Endpoint`]s against the API root.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create a registry rooted at `base` (e.g., `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Setup` if `base` cannot have path segments appended.
    pub fn new(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ClientError::Setup(format!(
                "API base URL cannot be a base: {base}"
            )));
        }
        Ok(Self { base })
    }

    /// The configured API root.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for `endpoint`. Identifiers are percent-encoded as path
    /// segments or query values.
    #[must_use]
    pub fn url(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        if let Some((key, value)) = endpoint.query() {
            url.query_pairs_mut().append_pair(key, value);
        }
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registry() -> Endpoints {
        Endpoints::new(Url::parse("http://localhost:5000/api").unwrap()).unwrap()
    }

    #[test]
    fn test_fixed_paths() {
        let endpoints = registry();
        assert_eq!(
            endpoints.url(&Endpoint::Login).as_str(),
            "http://localhost:5000/api/auth/login"
        );
        assert_eq!(
            endpoints.url(&Endpoint::FeaturedProducts).as_str(),
            "http://localhost:5000/api/products/featured"
        );
        assert_eq!(
            endpoints.url(&Endpoint::InventoryAnalytics).as_str(),
            "http://localhost:5000/api/admin/analytics/inventory"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let endpoints =
            Endpoints::new(Url::parse("https://shop.example.com/api/").unwrap()).unwrap();
        assert_eq!(
            endpoints.url(&Endpoint::Cart).as_str(),
            "https://shop.example.com/api/cart"
        );
    }

    #[test]
    fn test_single_parameter_paths_contain_identifier() {
        let endpoints = registry();
        let url = endpoints.url(&Endpoint::RelatedProducts(ProductId::new("65f1c0ffee")));
        assert_eq!(url.path(), "/api/products/65f1c0ffee/related");

        let url = endpoints.url(&Endpoint::UpdateOrderStatus(OrderId::new("o-42")));
        assert_eq!(url.path(), "/api/orders/o-42/status");

        let url = endpoints.url(&Endpoint::ResetPassword("abc123".to_string()));
        assert_eq!(url.path(), "/api/auth/resetpassword/abc123");
    }

    #[test]
    fn test_multi_parameter_path() {
        let url = registry().url(&Endpoint::DeleteReview {
            product: ProductId::new("p1"),
            review: ReviewId::new("r9"),
        });
        assert_eq!(url.path(), "/api/products/p1/reviews/r9");
    }

    #[test]
    fn test_products_by_category_uses_query() {
        let url = registry().url(&Endpoint::ProductsByCategory(CategoryId::new("cat-1")));
        assert_eq!(url.path(), "/api/products");
        assert_eq!(url.query(), Some("category=cat-1"));
    }

    #[test]
    fn test_identifiers_are_escaped_not_split() {
        let url = registry().url(&Endpoint::Product(ProductId::new("a/b c")));
        assert_eq!(url.path(), "/api/products/a%2Fb%20c");
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_versioned_product_paths() {
        let endpoints = registry();
        assert_eq!(
            endpoints.url(&Endpoint::CreateProductsBulk).path(),
            "/api/api/v1/products/bulk"
        );
        assert_eq!(
            endpoints.url(&Endpoint::CreateTypedProduct).path(),
            "/api/api/v1/products"
        );
    }

    #[test]
    fn test_methods_and_auth() {
        assert_eq!(Endpoint::Products.method(), Method::GET);
        assert_eq!(Endpoint::CreateOrder.method(), Method::POST);
        assert_eq!(Endpoint::UpdateUserRole(UserId::new("u1")).method(), Method::PUT);
        assert_eq!(
            Endpoint::DeleteCategory(CategoryId::new("c1")).method(),
            Method::DELETE
        );
        assert_eq!(Endpoint::Logout.method(), Method::GET);

        assert!(!Endpoint::Products.requires_auth());
        assert!(!Endpoint::Login.requires_auth());
        assert!(Endpoint::Me.requires_auth());
        assert!(Endpoint::CreateCategory.requires_auth());
        assert!(Endpoint::Cart.requires_auth());
    }

    #[test]
    fn test_display_path() {
        assert_eq!(
            Endpoint::ProductsByCategory(CategoryId::new("c1")).path(),
            "/products?category=c1"
        );
        assert_eq!(Endpoint::AdminUsers.path(), "/admin/users");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let err = Endpoints::new(Url::parse("mailto:shop@example.com").unwrap()).unwrap_err();
        assert!(matches!(err, ClientError::Setup(_)));
    }
}
