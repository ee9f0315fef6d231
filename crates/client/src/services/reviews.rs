//! Product reviews.

use shopfront_core::{ProductId, ReviewId};
use tracing::instrument;

use super::call_unit;
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::ApiClient;

/// Review endpoints.
#[derive(Debug, Clone)]
pub struct ReviewService {
    api: ApiClient,
}

impl ReviewService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Delete a review on a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` if either id is blank,
    /// otherwise `ClientError` on request failure.
    #[instrument(skip(self), fields(product_id = %product, review_id = %review))]
    pub async fn delete(&self, product: &ProductId, review: &ReviewId) -> Result<()> {
        let endpoint = Endpoint::DeleteReview {
            product: ProductId::parse(product.as_str())?,
            review: ReviewId::parse(review.as_str())?,
        };
        call_unit(&self.api, &endpoint).await
    }
}
