//! Fixed, in-memory catalog repository

use std::sync::Arc;

use shipquote_domain::model::ServiceCatalog;
use shipquote_domain::repository::ServiceCatalogRepository;
use shipquote_types::Error;

/// Catalog that never changes (built-in defaults, tests)
#[derive(Debug, Clone)]
pub struct InMemoryCatalogRepository {
    catalog: Arc<ServiceCatalog>,
}

impl InMemoryCatalogRepository {
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl ServiceCatalogRepository for InMemoryCatalogRepository {
    fn snapshot(&self) -> Result<Arc<ServiceCatalog>, Error> {
        Ok(Arc::clone(&self.catalog))
    }
}
