//! File-based implementation of ServiceCatalogRepository

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use shipquote_domain::model::ServiceCatalog;
use shipquote_domain::repository::ServiceCatalogRepository;
use shipquote_types::Error;

use crate::catalog_loader::CatalogLoader;

/// Catalog backed by a TOML file, reloadable at runtime
///
/// A reload parses the whole file before swapping the shared pointer, so
/// readers see either the old or the new catalog and never a partial one.
pub struct FileServiceCatalogRepository {
    toml_path: PathBuf,
    current: RwLock<Arc<ServiceCatalog>>,
}

impl FileServiceCatalogRepository {
    /// Create a new repository from a TOML file path
    pub fn new(toml_path: PathBuf) -> Result<Self, Error> {
        let catalog = CatalogLoader::load_from_file(&toml_path)?.into_catalog();
        tracing::info!(
            path = %toml_path.display(),
            services = catalog.len(),
            "Loaded service catalog"
        );
        Ok(Self {
            toml_path,
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    /// Reload data from TOML; the previous catalog stays on failure
    pub fn reload(&self) -> Result<(), Error> {
        let catalog = CatalogLoader::load_from_file(&self.toml_path)?.into_catalog();
        let services = catalog.len();
        let mut current = self
            .current
            .write()
            .map_err(|_| Error::Catalog("catalog lock poisoned".to_string()))?;
        *current = Arc::new(catalog);
        tracing::info!(path = %self.toml_path.display(), services, "Reloaded service catalog");
        Ok(())
    }
}

impl ServiceCatalogRepository for FileServiceCatalogRepository {
    fn snapshot(&self) -> Result<Arc<ServiceCatalog>, Error> {
        let current = self
            .current
            .read()
            .map_err(|_| Error::Catalog("catalog lock poisoned".to_string()))?;
        Ok(Arc::clone(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ONE_SERVICE: &str = r#"
[[services]]
id = "standard"
name = "Standard"
base_rate_per_unit_weight = 3.0
estimated_transit_days = 3
"#;

    const TWO_SERVICES: &str = r#"
[[services]]
id = "standard"
name = "Standard"
base_rate_per_unit_weight = 3.5
estimated_transit_days = 3

[[services]]
id = "express"
name = "Express"
base_rate_per_unit_weight = 7.0
estimated_transit_days = 1
"#;

    #[test]
    fn test_reload_swaps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, ONE_SERVICE).unwrap();

        let repo = FileServiceCatalogRepository::new(path.clone()).unwrap();
        let before = repo.snapshot().unwrap();
        assert_eq!(before.len(), 1);

        fs::write(&path, TWO_SERVICES).unwrap();
        repo.reload().unwrap();

        // snapshot taken before the reload is unchanged
        assert_eq!(before.len(), 1);
        assert_eq!(repo.snapshot().unwrap().len(), 2);
        let standard = repo.find_tier("standard").unwrap().unwrap();
        assert!((standard.base_rate_per_unit_weight - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_reload_keeps_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, ONE_SERVICE).unwrap();

        let repo = FileServiceCatalogRepository::new(path.clone()).unwrap();
        fs::write(&path, "[[services]]\nid = ").unwrap();

        assert!(repo.reload().is_err());
        assert_eq!(repo.snapshot().unwrap().len(), 1);
        assert!(repo.find_tier("express").unwrap().is_none());
    }
}
