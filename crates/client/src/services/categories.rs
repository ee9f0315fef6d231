//! Product categories.

use serde::Serialize;
use shopfront_core::{Category, CategoryId, ImageRef};
use tracing::{info, instrument};

use super::{call_unit, fetch_data, send_data};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// Fields an admin submits to create or update a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryId>,
}

/// Category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All categories. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>> {
        fetch_data(&self.api, &Endpoint::Categories).await
    }

    /// A single category. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get(&self, id: &CategoryId) -> Result<Category> {
        let id = CategoryId::parse(id.as_str())?;
        fetch_data(&self.api, &Endpoint::Category(id)).await
    }

    /// Create a category. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CategoryInput) -> Result<Category> {
        let category: Category = send_data(&self.api, &Endpoint::CreateCategory, input).await?;
        info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Update a category. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update(&self, id: &CategoryId, input: &CategoryInput) -> Result<Category> {
        let id = CategoryId::parse(id.as_str())?;
        send_data(&self.api, &Endpoint::UpdateCategory(id), input).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: &CategoryId) -> Result<()> {
        let id = CategoryId::parse(id.as_str())?;
        call_unit(&self.api, &Endpoint::DeleteCategory(id)).await
    }
}
