//! Domain services

mod money;

pub mod comparison;
pub mod rate_engine;
pub mod volumetric;

pub use comparison::{badges_for, cheapest, fastest, generate_quote_report, QuoteBadge};
pub use rate_engine::{DivisorPolicy, QuoteContext, RateEngine, RateSettings};
pub use volumetric::{
    compute_billable_weight, compute_billable_weight_with_divisor, compute_volumetric_weight,
    compute_volumetric_weight_with_divisor,
};
