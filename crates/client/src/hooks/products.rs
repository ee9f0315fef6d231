use std::sync::Arc;

use futures::FutureExt;
use shopfront_core::{CategoryId, Product, ProductId};
use tokio::sync::watch;
use tracing::instrument;

use super::run_fetch;
use crate::services::ProductService;
use crate::store::{FetchOutcome, FetchState, ProductStore, Store, StoreAction};

const ALL_PRODUCTS: &str = "all";

/// Product fetching for catalog screens.
///
/// `mount()` loads the full list and the featured rail and installs the
/// reload callback; `unmount()` abandons whatever is still in flight.
#[derive(Debug, Clone)]
pub struct ProductsHook {
    service: ProductService,
    store: ProductStore,
}

impl ProductsHook {
    #[must_use]
    pub const fn new(service: ProductService, store: ProductStore) -> Self {
        Self { service, store }
    }

    /// The slices this hook writes to.
    #[must_use]
    pub const fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Current state of the product list.
    #[must_use]
    pub fn snapshot(&self) -> FetchState<Product> {
        self.store.products().snapshot()
    }

    /// Current state of the featured rail.
    #[must_use]
    pub fn featured_snapshot(&self) -> FetchState<Product> {
        self.store.featured().snapshot()
    }

    /// The product shown in detail, if loaded.
    #[must_use]
    pub fn product(&self) -> Option<Product> {
        self.store.selected_product()
    }

    /// Changes to the product list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Product>> {
        self.store.products().subscribe()
    }

    /// Install the reload callback and load the list and the featured rail
    /// concurrently.
    #[instrument(skip(self))]
    pub async fn mount(&self) -> (FetchOutcome, FetchOutcome) {
        let service = self.service.clone();
        let weak = self.store.products().downgrade();
        self.store.products().set_reload(Arc::new(move || {
            let service = service.clone();
            let weak = weak.clone();
            async move {
                if let Some(store) = weak.upgrade() {
                    fetch_all_into(&service, &store).await;
                }
            }
            .boxed()
        }));

        tokio::join!(self.fetch_all(), self.fetch_featured())
    }

    /// Replace the product list with all products.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> FetchOutcome {
        fetch_all_into(&self.service, self.store.products()).await
    }

    /// Replace the featured rail.
    #[instrument(skip(self))]
    pub async fn fetch_featured(&self) -> FetchOutcome {
        run_fetch(self.store.featured(), "featured".to_string(), || {
            self.service.featured()
        })
        .await
    }

    /// Replace the product list with one category's products.
    #[instrument(skip(self), fields(category_id = %category))]
    pub async fn fetch_by_category(&self, category: &CategoryId) -> FetchOutcome {
        run_fetch(
            self.store.products(),
            format!("category:{category}"),
            || self.service.by_category(category),
        )
        .await
    }

    /// Load one product into the detail slice.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: &ProductId) -> FetchOutcome {
        run_fetch(self.store.selected(), format!("product:{id}"), || async {
            self.service.get(id).await.map(|product| vec![product])
        })
        .await
    }

    /// Re-run the list fetch through the installed reload callback.
    ///
    /// Returns `false` before `mount()` has installed one.
    pub async fn refetch_all(&self) -> bool {
        self.store.products().reload().await
    }

    /// Abandon in-flight requests on every slice and drop the reload callback.
    pub fn unmount(&self) {
        self.store.cancel_all();
        self.store.products().dispatch(StoreAction::SetReload(None));
    }
}

async fn fetch_all_into(service: &ProductService, store: &Store<Product>) -> FetchOutcome {
    run_fetch(store, ALL_PRODUCTS.to_string(), || service.list()).await
}
