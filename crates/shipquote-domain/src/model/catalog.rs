use serde::{Deserialize, Serialize};

use super::{ServiceTier, ZoneTable};

/// Ordered set of service tiers plus the zone table they are priced with
///
/// Tier order is the catalog order used to break price ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    #[serde(rename = "services")]
    pub tiers: Vec<ServiceTier>,
    #[serde(default)]
    pub zones: ZoneTable,
}

impl ServiceCatalog {
    pub fn new(tiers: Vec<ServiceTier>, zones: ZoneTable) -> Self {
        Self { tiers, zones }
    }

    pub fn find(&self, id: &str) -> Option<&ServiceTier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn international_tiers(&self) -> impl Iterator<Item = &ServiceTier> {
        self.tiers.iter().filter(|t| t.international)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
