//! Service tier type definitions

use serde::{Deserialize, Serialize};

/// Transit estimate in calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitDays {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

impl TransitDays {
    /// Days used for the displayed "by" date
    pub fn earliest(&self) -> u32 {
        match self {
            TransitDays::Fixed(days) => *days,
            TransitDays::Range { min, .. } => *min,
        }
    }

    pub fn latest(&self) -> u32 {
        match self {
            TransitDays::Fixed(days) => *days,
            TransitDays::Range { max, .. } => *max,
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, TransitDays::Range { .. })
    }

    pub fn label(&self) -> String {
        match self {
            TransitDays::Fixed(1) => "1 day".to_string(),
            TransitDays::Fixed(days) => format!("{} days", days),
            TransitDays::Range { min, max } => format!("{}-{} days", min, max),
        }
    }
}

/// A named shipping product (Economy, Standard, Express, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Currency per unit of billable weight
    pub base_rate_per_unit_weight: f64,
    pub estimated_transit_days: TransitDays,
    /// Display-only, never priced
    #[serde(default)]
    pub features: Vec<String>,
    /// International-designated tier
    #[serde(default)]
    pub international: bool,
    /// Overrides the engine's divisor selection for this tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumetric_divisor: Option<f64>,
}

impl ServiceTier {
    pub fn new(id: &str, name: &str, base_rate_per_unit_weight: f64, transit: TransitDays) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            base_rate_per_unit_weight,
            estimated_transit_days: transit,
            features: Vec::new(),
            international: false,
            volumetric_divisor: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn international(mut self) -> Self {
        self.international = true;
        self
    }

    pub fn with_volumetric_divisor(mut self, divisor: f64) -> Self {
        self.volumetric_divisor = Some(divisor);
        self
    }
}
