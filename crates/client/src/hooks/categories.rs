use shopfront_core::{Category, CategoryId};
use tokio::sync::watch;
use tracing::instrument;

use super::run_fetch;
use crate::services::CategoryService;
use crate::store::{CategoryStore, FetchOutcome, FetchState};

/// Category fetching, parameterised by an optional category id.
///
/// With no id the slice holds every category; with an id it holds just that
/// one. Changing the id refetches.
#[derive(Debug, Clone)]
pub struct CategoriesHook {
    service: CategoryService,
    store: CategoryStore,
    id: Option<CategoryId>,
}

impl CategoriesHook {
    #[must_use]
    pub const fn new(service: CategoryService, store: CategoryStore, id: Option<CategoryId>) -> Self {
        Self { service, store, id }
    }

    /// The current dependency.
    #[must_use]
    pub const fn id(&self) -> Option<&CategoryId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchState<Category> {
        self.store.categories().snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Category>> {
        self.store.categories().subscribe()
    }

    /// Fetch for the current id.
    pub async fn mount(&self) -> FetchOutcome {
        self.fetch(self.id.as_ref()).await
    }

    /// Switch to `id`, refetching if it changed.
    pub async fn set_id(&mut self, id: Option<CategoryId>) -> Option<FetchOutcome> {
        if self.id == id {
            return None;
        }
        self.id = id;
        Some(self.mount().await)
    }

    /// One category when `id` is given, all categories otherwise.
    #[instrument(skip(self))]
    pub async fn fetch(&self, id: Option<&CategoryId>) -> FetchOutcome {
        let store = self.store.categories();
        match id {
            Some(id) => {
                run_fetch(store, format!("category:{id}"), || async {
                    self.service.get(id).await.map(|category| vec![category])
                })
                .await
            }
            None => run_fetch(store, "all".to_string(), || self.service.list()).await,
        }
    }

    /// Abandon the in-flight request.
    pub fn unmount(&self) {
        self.store.categories().cancel();
    }
}
