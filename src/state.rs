use crate::catalog::store::CatalogStore;

/// Shared application state: a handle to the catalog cache.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
}

impl AppState {
    pub fn new(catalog: CatalogStore) -> Self {
        Self { catalog }
    }
}
