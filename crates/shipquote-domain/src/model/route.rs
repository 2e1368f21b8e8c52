//! Route description and zone-based distance multipliers

use serde::{Deserialize, Serialize};

/// Origin and destination of a shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin_country: String,
    pub destination_country: String,
    #[serde(default)]
    pub origin_zone: Option<String>,
    #[serde(default)]
    pub destination_zone: Option<String>,
}

impl Route {
    pub fn new(origin_country: &str, destination_country: &str) -> Self {
        Self {
            origin_country: origin_country.to_string(),
            destination_country: destination_country.to_string(),
            origin_zone: None,
            destination_zone: None,
        }
    }

    pub fn with_zones(mut self, origin_zone: &str, destination_zone: &str) -> Self {
        self.origin_zone = Some(origin_zone.to_string());
        self.destination_zone = Some(destination_zone.to_string());
        self
    }

    pub fn is_international(&self) -> bool {
        !self
            .origin_country
            .trim()
            .eq_ignore_ascii_case(self.destination_country.trim())
    }
}

/// Base cost multiplier for one origin/destination zone pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMultiplier {
    pub origin_zone: String,
    pub destination_zone: String,
    pub multiplier: f64,
}

/// Deterministic zone-pair lookup, 1.0 when no entry applies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneTable {
    entries: Vec<ZoneMultiplier>,
}

impl ZoneTable {
    pub fn new(entries: Vec<ZoneMultiplier>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ZoneMultiplier] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact pair first, then the reversed pair
    pub fn multiplier(&self, origin_zone: &str, destination_zone: &str) -> f64 {
        let matches = |entry: &ZoneMultiplier, from: &str, to: &str| {
            entry.origin_zone.eq_ignore_ascii_case(from) && entry.destination_zone.eq_ignore_ascii_case(to)
        };
        self.entries
            .iter()
            .find(|e| matches(e, origin_zone, destination_zone))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| matches(e, destination_zone, origin_zone))
            })
            .map(|e| e.multiplier)
            .unwrap_or(1.0)
    }

    pub fn multiplier_for_route(&self, route: &Route) -> f64 {
        match (&route.origin_zone, &route.destination_zone) {
            (Some(from), Some(to)) => self.multiplier(from.trim(), to.trim()),
            _ => 1.0,
        }
    }
}
