//! Built-in reference data

pub mod service_tiers;

pub use service_tiers::{default_catalog, international_fallback_tier};
