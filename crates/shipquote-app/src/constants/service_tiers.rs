//! Built-in service tiers, used when no catalog file is configured

use shipquote_domain::model::{ServiceCatalog, ServiceTier, TransitDays, ZoneTable};
use std::sync::LazyLock;

/// Standard domestic tiers in display order
pub static DEFAULT_SERVICE_TIERS: LazyLock<Vec<ServiceTier>> = LazyLock::new(|| {
    vec![
        ServiceTier::new("economy", "Economy", 2.25, TransitDays::Range { min: 5, max: 7 })
            .with_description("Ground delivery at the lowest price")
            .with_features(&["Tracking"]),
        ServiceTier::new("standard", "Standard", 3.00, TransitDays::Fixed(3))
            .with_description("Reliable delivery for everyday shipments")
            .with_features(&["Tracking", "Insurance available"]),
        ServiceTier::new("express", "Express", 5.75, TransitDays::Fixed(1))
            .with_description("Next-day delivery")
            .with_features(&["Tracking", "Priority handling", "Signature available"]),
    ]
});

/// Added to international quotes when the tier set has no international tier
pub static INTERNATIONAL_FALLBACK_TIER: LazyLock<ServiceTier> = LazyLock::new(|| {
    ServiceTier::new("international", "International", 8.50, TransitDays::Range { min: 6, max: 10 })
        .with_description("Cross-border delivery with customs clearance")
        .with_features(&["Tracking", "Customs clearance"])
        .international()
});

pub fn default_catalog() -> ServiceCatalog {
    ServiceCatalog::new(DEFAULT_SERVICE_TIERS.clone(), ZoneTable::default())
}

pub fn international_fallback_tier() -> &'static ServiceTier {
    &INTERNATIONAL_FALLBACK_TIER
}
