//! Domain model types

pub mod catalog;
pub mod package;
pub mod quote;
pub mod route;
pub mod service_tier;
pub mod surcharge;

pub use catalog::ServiceCatalog;
pub use package::PackageSpec;
pub use quote::QuoteResult;
pub use route::{Route, ZoneMultiplier, ZoneTable};
pub use service_tier::{ServiceTier, TransitDays};
pub use surcharge::{SurchargeRequest, SurchargeSchedule};
