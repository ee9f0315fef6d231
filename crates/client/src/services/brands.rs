//! Product brands.

use serde::Serialize;
use shopfront_core::{Brand, BrandId, ImageRef};
use tracing::instrument;

use super::{call_unit, fetch_data, send_data};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// Fields an admin submits to create or update a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Brand endpoints. Same shape as categories.
#[derive(Debug, Clone)]
pub struct BrandService {
    api: ApiClient,
}

impl BrandService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All brands. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Brand>> {
        fetch_data(&self.api, &Endpoint::Brands).await
    }

    /// A single brand. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn get(&self, id: &BrandId) -> Result<Brand> {
        let id = BrandId::parse(id.as_str())?;
        fetch_data(&self.api, &Endpoint::Brand(id)).await
    }

    /// Create a brand. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on request failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &BrandInput) -> Result<Brand> {
        send_data(&self.api, &Endpoint::CreateBrand, input).await
    }

    /// Update a brand. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self, input), fields(brand_id = %id))]
    pub async fn update(&self, id: &BrandId, input: &BrandInput) -> Result<Brand> {
        let id = BrandId::parse(id.as_str())?;
        send_data(&self.api, &Endpoint::UpdateBrand(id), input).await
    }

    /// Delete a brand.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank id, otherwise
    /// `ClientError` on request failure.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn delete(&self, id: &BrandId) -> Result<()> {
        let id = BrandId::parse(id.as_str())?;
        call_unit(&self.api, &Endpoint::DeleteBrand(id)).await
    }
}
