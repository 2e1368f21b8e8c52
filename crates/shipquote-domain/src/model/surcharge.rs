//! Optional add-ons and the fees they carry

use serde::{Deserialize, Serialize};

pub const DEFAULT_FUEL_SURCHARGE_RATE: f64 = 0.15;
pub const DEFAULT_INSURANCE_RATE: f64 = 0.01;
pub const DEFAULT_SIGNATURE_FEE: f64 = 5.50;
pub const DEFAULT_SPECIAL_HANDLING_FEE: f64 = 10.00;

/// Add-ons selected by the customer for one shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRequest {
    #[serde(default)]
    pub insurance_required: bool,
    #[serde(default)]
    pub signature_required: bool,
    /// Number of special-handling flags (fragile, hazardous, ...)
    #[serde(default)]
    pub special_handling_count: u32,
    /// Fraction of the base cost, in [0, 1)
    #[serde(default = "default_fuel_surcharge_rate")]
    pub fuel_surcharge_rate: f64,
}

fn default_fuel_surcharge_rate() -> f64 {
    DEFAULT_FUEL_SURCHARGE_RATE
}

impl Default for SurchargeRequest {
    fn default() -> Self {
        Self {
            insurance_required: false,
            signature_required: false,
            special_handling_count: 0,
            fuel_surcharge_rate: DEFAULT_FUEL_SURCHARGE_RATE,
        }
    }
}

impl SurchargeRequest {
    pub fn with_insurance(mut self) -> Self {
        self.insurance_required = true;
        self
    }

    pub fn with_signature(mut self) -> Self {
        self.signature_required = true;
        self
    }

    pub fn with_special_handling(mut self, count: u32) -> Self {
        self.special_handling_count = count;
        self
    }

    pub fn with_fuel_rate(mut self, rate: f64) -> Self {
        self.fuel_surcharge_rate = rate;
        self
    }
}

/// Fee schedule applied to the add-ons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurchargeSchedule {
    /// Fraction of the declared value
    pub insurance_rate: f64,
    pub signature_fee: f64,
    /// Per special-handling flag
    pub special_handling_fee: f64,
}

impl Default for SurchargeSchedule {
    fn default() -> Self {
        Self {
            insurance_rate: DEFAULT_INSURANCE_RATE,
            signature_fee: DEFAULT_SIGNATURE_FEE,
            special_handling_fee: DEFAULT_SPECIAL_HANDLING_FEE,
        }
    }
}
