//! Service catalog loader from TOML

use shipquote_domain::model::{ServiceCatalog, TransitDays};
use shipquote_types::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Service catalog parsed from a catalog TOML file
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog: ServiceCatalog,
}

impl CatalogLoader {
    /// Load a catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read catalog file {}: {}", path.display(), e))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let catalog: ServiceCatalog = toml::from_str(toml_content)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog TOML: {}", e)))?;

        validate_catalog(&catalog)?;
        Ok(Self { catalog })
    }

    pub fn into_catalog(self) -> ServiceCatalog {
        self.catalog
    }
}

/// Check a catalog before it is handed to the engine
pub fn validate_catalog(catalog: &ServiceCatalog) -> Result<()> {
    if catalog.is_empty() {
        return Err(Error::Catalog("catalog defines no services".to_string()));
    }

    let mut seen = HashSet::new();
    for tier in &catalog.tiers {
        if tier.id.trim().is_empty() {
            return Err(Error::Catalog(format!("service '{}' has an empty id", tier.name)));
        }
        if !seen.insert(tier.id.as_str()) {
            return Err(Error::Catalog(format!("duplicate service id '{}'", tier.id)));
        }
        let rate = tier.base_rate_per_unit_weight;
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::Catalog(format!(
                "service '{}' has invalid base rate {}",
                tier.id, rate
            )));
        }
        if let TransitDays::Range { min, max } = tier.estimated_transit_days {
            if min > max {
                return Err(Error::Catalog(format!(
                    "service '{}' has transit range {}-{}",
                    tier.id, min, max
                )));
            }
        }
        if let Some(divisor) = tier.volumetric_divisor {
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(Error::Catalog(format!(
                    "service '{}' has invalid volumetric divisor {}",
                    tier.id, divisor
                )));
            }
        }
    }

    for zone in catalog.zones.entries() {
        if !zone.multiplier.is_finite() || zone.multiplier < 0.0 {
            return Err(Error::Catalog(format!(
                "zone {} -> {} has invalid multiplier {}",
                zone.origin_zone, zone.destination_zone, zone.multiplier
            )));
        }
    }

    Ok(())
}
