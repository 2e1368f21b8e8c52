use serde::{Deserialize, Serialize};
use shipquote_types::{LengthUnit, MassUnit};

/// Physical description of the package being shipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub weight: f64,
    #[serde(default)]
    pub mass_unit: MassUnit,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub length_unit: LengthUnit,
    /// Currency amount used for insurance and customs
    #[serde(default)]
    pub declared_value: f64,
}

impl PackageSpec {
    pub fn new(weight: f64, mass_unit: MassUnit) -> Self {
        Self {
            weight,
            mass_unit,
            length: None,
            width: None,
            height: None,
            length_unit: LengthUnit::default(),
            declared_value: 0.0,
        }
    }

    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64, unit: LengthUnit) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self.height = Some(height);
        self.length_unit = unit;
        self
    }

    pub fn with_declared_value(mut self, declared_value: f64) -> Self {
        self.declared_value = declared_value;
        self
    }

    /// All three dimensions, when each is present, finite and positive
    pub fn dimensions(&self) -> Option<(f64, f64, f64)> {
        let usable = |d: Option<f64>| d.filter(|v| v.is_finite() && *v > 0.0);
        Some((usable(self.length)?, usable(self.width)?, usable(self.height)?))
    }
}
