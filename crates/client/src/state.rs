//! The handle screens share.

use std::sync::Arc;

use shopfront_core::CategoryId;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::hooks::{CategoriesHook, ProductsHook};
use crate::http::{ApiClient, FileTokenStore, MemoryTokenStore, TokenStore};
use crate::services::{
    AdminService, AuthService, BrandService, CartService, CategoryService, OrderService,
    ProductService, ReviewService,
};
use crate::store::{CategoryStore, ProductStore};

/// Services, stores and hook constructors wired to one API client.
///
/// This struct is cheaply cloneable via `Arc`. Stores are shared: every hook
/// built from the same `Shopfront` writes to the same slices.
#[derive(Clone)]
pub struct Shopfront {
    inner: Arc<ShopfrontInner>,
}

struct ShopfrontInner {
    config: ClientConfig,
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    product_store: ProductStore,
    category_store: CategoryStore,
}

impl std::fmt::Debug for Shopfront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shopfront")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Shopfront {
    /// Wire everything up from `config`.
    ///
    /// Tokens come from `config.token_dir` when set, otherwise from memory
    /// seeded with `config.access_token`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Setup` if the HTTP transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = match (&config.token_dir, &config.access_token) {
            (Some(dir), _) => {
                debug!(dir = %dir.display(), "Using file token store");
                Arc::new(FileTokenStore::new(dir))
            }
            (None, Some(token)) => Arc::new(MemoryTokenStore::with_token(token.clone())),
            (None, None) => Arc::new(MemoryTokenStore::new()),
        };
        Self::with_token_store(config, tokens)
    }

    /// Wire everything up with a caller-provided token store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Setup` if the HTTP transport cannot be built.
    pub fn with_token_store(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let api = ApiClient::new(&config, Arc::clone(&tokens))?;

        Ok(Self {
            inner: Arc::new(ShopfrontInner {
                config,
                api,
                tokens,
                product_store: ProductStore::new(),
                category_store: CategoryStore::new(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The endpoint registry and client pair.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The token store the authenticated client reads from.
    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    // -------------------------------------------------------------------------
    // Services
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn products(&self) -> ProductService {
        ProductService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn brands(&self) -> BrandService {
        BrandService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn cart(&self) -> CartService {
        CartService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn orders(&self) -> OrderService {
        OrderService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn admin(&self) -> AdminService {
        AdminService::new(self.inner.api.clone())
    }

    // -------------------------------------------------------------------------
    // Stores & hooks
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn product_store(&self) -> &ProductStore {
        &self.inner.product_store
    }

    #[must_use]
    pub fn category_store(&self) -> &CategoryStore {
        &self.inner.category_store
    }

    /// A products hook over the shared product store.
    #[must_use]
    pub fn products_hook(&self) -> ProductsHook {
        ProductsHook::new(self.products(), self.inner.product_store.clone())
    }

    /// A categories hook over the shared category store.
    #[must_use]
    pub fn categories_hook(&self, id: Option<CategoryId>) -> CategoriesHook {
        CategoriesHook::new(self.categories(), self.inner.category_store.clone(), id)
    }
}
