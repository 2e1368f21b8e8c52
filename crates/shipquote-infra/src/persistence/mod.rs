//! Catalog repository implementations

mod file_catalog_repo;
mod memory_catalog_repo;

pub use file_catalog_repo::FileServiceCatalogRepository;
pub use memory_catalog_repo::InMemoryCatalogRepository;
