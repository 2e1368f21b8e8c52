//! Repository adapters for catalog access

use std::path::PathBuf;

use shipquote_domain::repository::ServiceCatalogRepository;
use shipquote_infra::persistence::{FileServiceCatalogRepository, InMemoryCatalogRepository};
use shipquote_types::Result;

use crate::config::Config;
use crate::constants::default_catalog;

/// Open the configured catalog, or the built-in one
pub fn open_catalog_repo(config: &Config) -> Result<Box<dyn ServiceCatalogRepository>> {
    match &config.catalog_path {
        Some(path) => Ok(Box::new(open_catalog_repo_at(path.clone())?)),
        None => Ok(Box::new(open_builtin_catalog_repo())),
    }
}

/// Open a TOML catalog at a custom path
pub fn open_catalog_repo_at(toml_path: PathBuf) -> Result<FileServiceCatalogRepository> {
    FileServiceCatalogRepository::new(toml_path)
}

pub fn open_builtin_catalog_repo() -> InMemoryCatalogRepository {
    InMemoryCatalogRepository::new(default_catalog())
}
