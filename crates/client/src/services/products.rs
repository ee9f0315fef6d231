//! Product catalog.

use serde::{Deserialize, Serialize};
use shopfront_core::{
    BrandId, CategoryId, ColorOption, ImageRef, Price, Product, ProductId, Specification,
};
use tracing::{info, instrument};

use super::{Payload, call_unit, fetch_data, send_data};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// Which creation flow a product goes through on the versioned endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Material,
    Clothing,
}

/// Fields an admin submits to create or update a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    pub category: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<Specification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    pub is_new: bool,
    #[serde(rename = "productType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductKind>,
}

impl ProductInput {
    /// Minimal input: name, price and category.
    #[must_use]
    pub const fn new(name: String, price: Price, category: CategoryId) -> Self {
        Self {
            name,
            price,
            sale_price: None,
            category,
            brand: None,
            description: None,
            images: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            specifications: Vec::new(),
            stock: None,
            is_new: false,
            kind: None,
        }
    }
}

/// Product endpoints.
#[derive(Debug, Clone)]
pub struct ProductService {
    api: ApiClient,
}

impl ProductService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All products. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>> {
        fetch_data(&self.api, &Endpoint::Products).await
    }

    /// A single product. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product> {
        let id = ProductId::parse(id.as_str())?;
        fetch_data(&self.api, &Endpoint::Product(id)).await
    }

    /// Featured products. The backend sends these either as a bare array or
    /// wrapped; both are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Product>> {
        let endpoint = Endpoint::FeaturedProducts;
        self.api
            .call::<Payload<Vec<Product>>>(&endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// Products related to `id`. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn related(&self, id: &ProductId) -> Result<Vec<Product>> {
        let id = ProductId::parse(id.as_str())?;
        fetch_data(&self.api, &Endpoint::RelatedProducts(id)).await
    }

    /// Products in a category. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(category_id = %category))]
    pub async fn by_category(&self, category: &CategoryId) -> Result<Vec<Product>> {
        let category = CategoryId::parse(category.as_str())?;
        fetch_data(&self.api, &Endpoint::ProductsByCategory(category)).await
    }

    /// Create a product. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product> {
        let product: Product = send_data(&self.api, &Endpoint::CreateProduct, input).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace a product's fields. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<Product> {
        let id = ProductId::parse(id.as_str())?;
        send_data(&self.api, &Endpoint::UpdateProduct(id), input).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        let id = ProductId::parse(id.as_str())?;
        call_unit(&self.api, &Endpoint::DeleteProduct(id)).await?;
        info!("Product deleted");
        Ok(())
    }

    /// Create many products in one request. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn create_bulk(&self, inputs: &[ProductInput]) -> Result<Vec<Product>> {
        send_data(&self.api, &Endpoint::CreateProductsBulk, inputs).await
    }

    /// Create a material product. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_material(&self, input: ProductInput) -> Result<Product> {
        self.create_typed(input, ProductKind::Material).await
    }

    /// Create a clothing product. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_clothing(&self, input: ProductInput) -> Result<Product> {
        self.create_typed(input, ProductKind::Clothing).await
    }

    async fn create_typed(&self, mut input: ProductInput, kind: ProductKind) -> Result<Product> {
        input.kind = Some(kind);
        send_data(&self.api, &Endpoint::CreateTypedProduct, &input).await
    }
}
