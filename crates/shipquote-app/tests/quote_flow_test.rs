//! End-to-end quoting through config, catalog repository, and batch fan-out

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use shipquote_app::app::{quote_batch, QuoteRequest, QuoteService};
use shipquote_app::config::Config;
use shipquote_app::repository::{open_builtin_catalog_repo, open_catalog_repo};
use shipquote_domain::model::{PackageSpec, Route, ServiceTier, SurchargeRequest, TransitDays};
use shipquote_domain::service::{compute_billable_weight, compute_volumetric_weight};
use shipquote_infra::shipment_csv::load_shipments_from_reader;
use shipquote_types::{Error, LengthUnit, MassUnit, QuoteError};

const CATALOG_TOML: &str = r#"
[[services]]
id = "economy"
name = "Economy"
base_rate_per_unit_weight = 2.0
estimated_transit_days = { min = 5, max = 7 }

[[services]]
id = "standard"
name = "Standard"
base_rate_per_unit_weight = 3.0
estimated_transit_days = 3
features = ["Tracking"]

[[services]]
id = "world"
name = "World Express"
base_rate_per_unit_weight = 9.0
estimated_transit_days = { min = 4, max = 6 }
international = true

[[zones]]
origin_zone = "1"
destination_zone = "8"
multiplier = 1.2
"#;

const SHIPMENTS_CSV: &str = "\
reference,weight,length,width,height,declared_value,origin_country,destination_country,origin_zone,destination_zone,insurance
A-100,5.0,10,10,10,100,US,US,1,8,yes
A-101,0,10,10,10,100,US,US,,,
A-102,3.0,,,,50,US,GB,,,no
A-103,12.0,20,12,8,-5,US,US,,,yes
A-104,1.0,30,20,10,,US,US,,,
";

fn ship_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn service_with_catalog(config: &mut Config) -> (tempfile::TempDir, QuoteService) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CATALOG_TOML).unwrap();
    config.catalog_path = Some(path);
    let repo = open_catalog_repo(config).unwrap();
    let service = QuoteService::from_config(config, repo.as_ref()).unwrap();
    (dir, service)
}

#[test]
fn test_worked_example() {
    let package = PackageSpec::new(5.0, MassUnit::Lb)
        .with_dimensions(10.0, 10.0, 10.0, LengthUnit::In)
        .with_declared_value(100.0);
    let tier = ServiceTier::new("standard", "Standard", 3.0, TransitDays::Fixed(3));
    let request = QuoteRequest::new(package, SurchargeRequest::default().with_insurance())
        .with_tiers(vec![tier]);

    let repo = open_builtin_catalog_repo();
    let service = QuoteService::from_config(&Config::default(), &repo).unwrap();
    let response = service.quote(&request, ship_date()).unwrap();

    let q = &response.quotes[0];
    assert!((q.billable_weight - 6.02).abs() < 1e-9);
    assert!((q.base_cost - 18.06).abs() < 1e-9);
    assert!((q.fuel_surcharge - 2.71).abs() < 1e-9);
    assert!((q.insurance_cost - 1.00).abs() < 1e-9);
    assert!((q.total_cost - 21.77).abs() < 1e-9);
    assert_eq!(q.estimated_delivery_date, NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());
}

#[test]
fn test_billable_weight_properties() {
    let sizes = [0.0, 2.5, 10.0, 18.0, 40.0];
    for weight in [0.5, 3.0, 6.02, 25.0] {
        for l in sizes {
            for h in sizes {
                let pkg = PackageSpec::new(weight, MassUnit::Kg).with_dimensions(l, 12.0, h, LengthUnit::Cm);
                let billable = compute_billable_weight(&pkg).unwrap();
                assert!(billable >= weight);
                if l == 0.0 || h == 0.0 {
                    assert_eq!(compute_volumetric_weight(&pkg), 0.0);
                    assert_eq!(billable, weight);
                }
            }
        }
    }
}

#[test]
fn test_metric_package_volumetric_weight() {
    let pkg = PackageSpec::new(1.0, MassUnit::Kg).with_dimensions(30.0, 20.0, 10.0, LengthUnit::Cm);
    let expected = ((30.0 * 20.0 * 10.0 / 16.387) / 166.0 * 100.0_f64).round() / 100.0;
    assert!((compute_volumetric_weight(&pkg) - expected).abs() < 1e-9);
}

#[test]
fn test_error_taxonomy() {
    let repo = open_builtin_catalog_repo();
    let service = QuoteService::from_config(&Config::default(), &repo).unwrap();

    let negative_value = QuoteRequest::new(
        PackageSpec::new(2.0, MassUnit::Lb).with_declared_value(-1.0),
        SurchargeRequest::default(),
    );
    assert!(matches!(
        service.quote(&negative_value, ship_date()),
        Err(Error::Quote(QuoteError::InvalidInput(_)))
    ));

    let weightless = QuoteRequest::new(PackageSpec::new(0.0, MassUnit::Lb), SurchargeRequest::default());
    assert!(matches!(
        service.quote(&weightless, ship_date()),
        Err(Error::Quote(QuoteError::InvalidPackage(_)))
    ));

    let no_tiers = QuoteRequest::new(PackageSpec::new(2.0, MassUnit::Lb), SurchargeRequest::default())
        .with_tiers(Vec::new());
    assert!(matches!(
        service.quote(&no_tiers, ship_date()),
        Err(Error::Quote(QuoteError::EmptyCatalog))
    ));
}

#[test]
fn test_catalog_file_with_zone_and_international_route() {
    let mut config = Config::default();
    let (_dir, service) = service_with_catalog(&mut config);
    let package = PackageSpec::new(5.0, MassUnit::Lb).with_dimensions(10.0, 10.0, 10.0, LengthUnit::In);
    let no_fuel = SurchargeRequest::default().with_fuel_rate(0.0);

    let zoned = QuoteRequest::new(package.clone(), no_fuel.clone())
        .with_route(Route::new("US", "US").with_zones("8", "1"));
    let response = service.quote(&zoned, ship_date()).unwrap();
    assert!(!response.international);
    let ids: Vec<&str> = response.quotes.iter().map(|q| q.service_id.as_str()).collect();
    assert_eq!(ids, vec!["economy", "standard"]);
    // 2.0 * 6.02 * 1.2 (reverse zone pair)
    assert!((response.quotes[0].base_cost - 14.45).abs() < 1e-9);

    let abroad = QuoteRequest::new(package, no_fuel).with_route(Route::new("US", "JP"));
    let response = service.quote(&abroad, ship_date()).unwrap();
    assert!(response.international);
    assert_eq!(response.quotes.last().unwrap().service_id, "world");
}

#[test]
fn test_by_route_divisor_from_config() {
    let mut config = Config {
        international_divisor_by_route: true,
        ..Config::default()
    };
    let (_dir, service) = service_with_catalog(&mut config);
    let package = PackageSpec::new(1.0, MassUnit::Lb).with_dimensions(10.0, 10.0, 10.0, LengthUnit::In);

    let abroad = QuoteRequest::new(package.clone(), SurchargeRequest::default())
        .with_route(Route::new("US", "FR"));
    let response = service.quote(&abroad, ship_date()).unwrap();
    assert!(response.quotes.iter().all(|q| (q.billable_weight - 7.19).abs() < 1e-9));

    let domestic = QuoteRequest::new(package, SurchargeRequest::default()).with_route(Route::new("US", "US"));
    let response = service.quote(&domestic, ship_date()).unwrap();
    assert!(response.quotes.iter().all(|q| (q.billable_weight - 6.02).abs() < 1e-9));
}

#[test]
fn test_batch_keeps_input_order_and_isolates_failures() {
    let mut config = Config::default();
    let (_dir, service) = service_with_catalog(&mut config);
    let service = Arc::new(service);
    let shipments = load_shipments_from_reader(SHIPMENTS_CSV.as_bytes()).unwrap();

    let done = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&done);
    let results = quote_batch(
        Arc::clone(&service),
        shipments.clone(),
        4,
        config.fuel_surcharge_rate,
        ship_date(),
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    assert_eq!(done.load(Ordering::SeqCst), 5);
    assert_eq!(results.total, 5);
    assert_eq!(results.successful, 3);
    assert_eq!(results.failed, 2);

    let refs: Vec<&str> = results.entries.iter().map(|e| e.reference.as_str()).collect();
    assert_eq!(refs, vec!["A-100", "A-101", "A-102", "A-103", "A-104"]);
    assert!(results.entries[1].error.as_deref().unwrap().contains("Invalid package"));
    assert!(results.entries[3].error.as_deref().unwrap().contains("Invalid input"));

    let international = results.entries[2].response.as_ref().unwrap();
    assert!(international.international);

    // parallel fan-out gives the same answers as a single worker
    let sequential = quote_batch(service, shipments, 1, config.fuel_surcharge_rate, ship_date(), |_| {});
    assert_eq!(sequential.entries, results.entries);
}
