//! Quoting use case
//!
//! Resolves the tier set for a request (catalog, explicit tiers, service
//! filter, international augmentation) and runs the rate engine.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shipquote_domain::model::{
    PackageSpec, QuoteResult, Route, ServiceCatalog, ServiceTier, SurchargeRequest,
};
use shipquote_domain::repository::ServiceCatalogRepository;
use shipquote_domain::service::{cheapest, RateEngine};
use shipquote_types::{Error, Result};

use crate::config::Config;
use crate::constants::international_fallback_tier;

/// Wire shape of a quote request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub package: PackageSpec,
    #[serde(default)]
    pub surcharges: SurchargeRequest,
    /// Explicit tier set, used as given instead of the catalog
    #[serde(default)]
    pub tiers: Option<Vec<ServiceTier>>,
    #[serde(default)]
    pub route: Option<Route>,
    /// Restrict catalog tiers to these ids
    #[serde(default)]
    pub services: Vec<String>,
}

impl QuoteRequest {
    pub fn new(package: PackageSpec, surcharges: SurchargeRequest) -> Self {
        Self {
            package,
            surcharges,
            tiers: None,
            route: None,
            services: Vec::new(),
        }
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<ServiceTier>) -> Self {
        self.tiers = Some(tiers);
        self
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }

    pub fn is_international(&self) -> bool {
        self.route.as_ref().is_some_and(Route::is_international)
    }
}

/// Ranked quotes for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quoted_on: NaiveDate,
    pub international: bool,
    pub quotes: Vec<QuoteResult>,
}

impl QuoteResponse {
    /// Cheapest quote, catalog order on ties
    pub fn recommended(&self) -> Option<&QuoteResult> {
        cheapest(&self.quotes)
    }
}

pub struct QuoteService {
    engine: RateEngine,
    catalog: Arc<ServiceCatalog>,
}

impl QuoteService {
    pub fn new(engine: RateEngine, catalog: Arc<ServiceCatalog>) -> Self {
        Self { engine, catalog }
    }

    /// Build from config, taking one catalog snapshot for the service's lifetime
    pub fn from_config(config: &Config, repo: &dyn ServiceCatalogRepository) -> Result<Self> {
        let engine = RateEngine::new(config.rate_settings())?;
        Ok(Self::new(engine, repo.snapshot()?))
    }

    /// Tier set a request is priced against, in tie-break order
    pub fn resolve_tiers(&self, request: &QuoteRequest) -> Result<Vec<ServiceTier>> {
        if let Some(tiers) = &request.tiers {
            return Ok(tiers.clone());
        }

        let international = request.is_international();
        let mut tiers: Vec<ServiceTier> = if request.services.is_empty() {
            self.catalog
                .tiers
                .iter()
                .filter(|t| international || !t.international)
                .cloned()
                .collect()
        } else {
            let fallback = international_fallback_tier();
            let wants_fallback = self.catalog.find(&fallback.id).is_none()
                && request.services.iter().any(|id| id == &fallback.id);
            for id in &request.services {
                if self.catalog.find(id).is_none() && id != &fallback.id {
                    return Err(Error::Catalog(format!("unknown service '{}'", id)));
                }
            }
            let mut selected: Vec<ServiceTier> = self
                .catalog
                .tiers
                .iter()
                .filter(|t| request.services.iter().any(|id| id == &t.id))
                .cloned()
                .collect();
            if wants_fallback {
                selected.push(fallback.clone());
            }
            selected
        };

        if international && !tiers.iter().any(|t| t.international) {
            let catalog_intl: Vec<ServiceTier> =
                self.catalog.international_tiers().cloned().collect();
            if catalog_intl.is_empty() {
                tracing::debug!("No international tier in catalog, adding built-in tier");
                tiers.push(international_fallback_tier().clone());
            } else {
                tiers.extend(catalog_intl);
            }
        }

        Ok(tiers)
    }

    pub fn quote(&self, request: &QuoteRequest, today: NaiveDate) -> Result<QuoteResponse> {
        let tiers = self.resolve_tiers(request)?;
        let international = request.is_international();

        tracing::debug!(
            weight = request.package.weight,
            tiers = tiers.len(),
            international,
            "Quoting shipment"
        );

        let quotes = match &request.route {
            Some(route) => self.engine.quote_for_route(
                &request.package,
                &request.surcharges,
                &tiers,
                route,
                &self.catalog.zones,
                today,
            )?,
            None => self
                .engine
                .quote_on(&request.package, &request.surcharges, &tiers, false, today)?,
        };

        Ok(QuoteResponse {
            quoted_on: today,
            international,
            quotes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::default_catalog;
    use shipquote_domain::model::TransitDays;
    use shipquote_types::{MassUnit, QuoteError};

    fn service() -> QuoteService {
        QuoteService::new(RateEngine::default(), Arc::new(default_catalog()))
    }

    fn request() -> QuoteRequest {
        QuoteRequest::new(PackageSpec::new(2.0, MassUnit::Lb), SurchargeRequest::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn ids(tiers: &[ServiceTier]) -> Vec<&str> {
        tiers.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_domestic_uses_catalog_order() {
        let tiers = service().resolve_tiers(&request()).unwrap();
        assert_eq!(ids(&tiers), vec!["economy", "standard", "express"]);
    }

    #[test]
    fn test_international_adds_fallback_tier() {
        let req = request().with_route(Route::new("US", "MX"));
        let tiers = service().resolve_tiers(&req).unwrap();
        assert_eq!(ids(&tiers), vec!["economy", "standard", "express", "international"]);
    }

    #[test]
    fn test_international_prefers_catalog_tier() {
        let mut catalog = default_catalog();
        catalog.tiers.push(
            ServiceTier::new("global", "Global Priority", 11.0, TransitDays::Fixed(4)).international(),
        );
        let svc = QuoteService::new(RateEngine::default(), Arc::new(catalog));

        let domestic = svc.resolve_tiers(&request()).unwrap();
        assert!(!ids(&domestic).contains(&"global"));

        let req = request().with_route(Route::new("US", "DE"));
        let international = svc.resolve_tiers(&req).unwrap();
        assert_eq!(ids(&international), vec!["economy", "standard", "express", "global"]);
    }

    #[test]
    fn test_service_filter() {
        let req = request().with_services(vec!["express".to_string(), "economy".to_string()]);
        let tiers = service().resolve_tiers(&req).unwrap();
        assert_eq!(ids(&tiers), vec!["economy", "express"]);

        let bad = request().with_services(vec!["teleport".to_string()]);
        assert!(matches!(service().resolve_tiers(&bad), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_service_filter_builtin_international() {
        let req = request().with_services(vec!["international".to_string()]);
        let tiers = service().resolve_tiers(&req).unwrap();
        assert_eq!(ids(&tiers), vec!["international"]);

        let response = service().quote(&req, today()).unwrap();
        assert_eq!(response.quotes.len(), 1);
        assert_eq!(response.quotes[0].service_id, "international");

        let mixed = request()
            .with_route(Route::new("US", "JP"))
            .with_services(vec!["international".to_string(), "economy".to_string()]);
        let tiers = service().resolve_tiers(&mixed).unwrap();
        assert_eq!(ids(&tiers), vec!["economy", "international"]);
    }

    #[test]
    fn test_explicit_tiers_used_as_given() {
        let tier = ServiceTier::new("custom", "Custom", 1.0, TransitDays::Fixed(2));
        let req = request()
            .with_route(Route::new("US", "CA"))
            .with_tiers(vec![tier]);
        let tiers = service().resolve_tiers(&req).unwrap();
        assert_eq!(ids(&tiers), vec!["custom"]);
    }

    #[test]
    fn test_explicit_empty_tiers_is_empty_catalog() {
        let req = request().with_tiers(Vec::new());
        let result = service().quote(&req, today());
        assert!(matches!(result, Err(Error::Quote(QuoteError::EmptyCatalog))));
    }

    #[test]
    fn test_quote_response() {
        let response = service().quote(&request(), today()).unwrap();
        assert_eq!(response.quoted_on, today());
        assert!(!response.international);
        assert_eq!(response.quotes.len(), 3);
        assert_eq!(response.recommended().unwrap().service_id, "economy");
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "package": {"weight": 5.0, "length": 10, "width": 10, "height": 10, "declared_value": 100},
            "surcharges": {"insurance_required": true},
            "tiers": [{"id": "standard", "name": "Standard", "base_rate_per_unit_weight": 3.0, "estimated_transit_days": 3}]
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert!((req.surcharges.fuel_surcharge_rate - 0.15).abs() < f64::EPSILON);

        let response = service().quote(&req, today()).unwrap();
        assert!((response.quotes[0].total_cost - 21.77).abs() < 1e-9);

        let out = serde_json::to_value(&response).unwrap();
        assert_eq!(out["quoted_on"], "2024-06-03");
        assert_eq!(out["quotes"][0]["estimated_delivery_date"], "2024-06-06");
    }
}
