use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fully priced option for one service tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub service_id: String,
    pub service_name: String,
    pub billable_weight: f64,
    pub base_cost: f64,
    pub fuel_surcharge: f64,
    pub insurance_cost: f64,
    pub signature_cost: f64,
    pub special_handling_cost: f64,
    /// Sum of base cost and every surcharge, at currency precision
    pub total_cost: f64,
    pub estimated_delivery_date: NaiveDate,
    /// Upper bound when the tier quotes a transit range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl QuoteResult {
    pub fn surcharge_total(&self) -> f64 {
        self.fuel_surcharge + self.insurance_cost + self.signature_cost + self.special_handling_cost
    }
}
