//! Repository trait definitions for catalog access

use std::sync::Arc;

use crate::model::{ServiceCatalog, ServiceTier};
use shipquote_types::Error;

/// Read access to the service tier catalog
///
/// `snapshot` hands out an immutable catalog; a reload never changes a
/// snapshot already taken.
pub trait ServiceCatalogRepository {
    /// Current catalog snapshot
    fn snapshot(&self) -> Result<Arc<ServiceCatalog>, Error>;

    /// Find a tier by its id
    fn find_tier(&self, id: &str) -> Result<Option<ServiceTier>, Error> {
        Ok(self.snapshot()?.find(id).cloned())
    }
}
