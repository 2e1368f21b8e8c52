//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_batch_summary, output_quotes, output_services};
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use shipquote_app::app::{quote_batch, QuoteRequest, QuoteService};
use shipquote_app::config::Config;
use shipquote_app::logging::init_logging;
use shipquote_app::repository::open_catalog_repo;
use shipquote_domain::model::{PackageSpec, Route, SurchargeRequest};
use shipquote_infra::shipment_csv::load_shipments;
use shipquote_types::{Error, LengthUnit, MassUnit, OutputFormat, QuoteError, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Package and surcharge options of the `quote` command
struct QuoteArgs {
    package: PackageSpec,
    surcharges: SurchargeRequest,
    route: Option<Route>,
    services: Vec<String>,
    date: Option<NaiveDate>,
}

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    init_logging(&level, cli.log_json || config.log_json);

    // Override from CLI args
    if let Some(ref catalog) = cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Quote {
            weight,
            weight_unit,
            length,
            width,
            height,
            dim_unit,
            declared_value,
            insurance,
            signature,
            special_handling,
            fuel_rate,
            origin,
            destination,
            origin_zone,
            destination_zone,
            services,
            date,
        } => {
            let args = QuoteArgs {
                package: build_package(
                    *weight,
                    *weight_unit,
                    (*length, *width, *height),
                    *dim_unit,
                    *declared_value,
                ),
                surcharges: SurchargeRequest {
                    insurance_required: *insurance,
                    signature_required: *signature,
                    special_handling_count: *special_handling,
                    fuel_surcharge_rate: fuel_rate.unwrap_or(config.fuel_surcharge_rate),
                },
                route: build_route(
                    origin.as_deref(),
                    destination.as_deref(),
                    origin_zone.as_deref(),
                    destination_zone.as_deref(),
                )?,
                services: services.clone(),
                date: date.as_deref().map(parse_date).transpose()?,
            };
            cmd_quote(&config, args, output_format)
        }

        Commands::Batch { csv, output, jobs } => {
            // Use CLI jobs if specified, otherwise default 4. 0 = auto CPU count.
            let job_count = match jobs {
                Some(0) => num_cpus::get(),
                Some(n) => *n,
                None => 4,
            };
            cmd_batch(&cli, &config, csv.clone(), output.clone(), job_count, output_format)
        }

        Commands::Services => cmd_services(&config, output_format),

        Commands::Config {
            show,
            set_catalog,
            set_output,
            set_fuel_rate,
            set_divisor_by_route,
            set_log_level,
            reset,
        } => cmd_config(
            *show,
            set_catalog.clone(),
            *set_output,
            *set_fuel_rate,
            *set_divisor_by_route,
            set_log_level.clone(),
            *reset,
        ),
    }
}

fn build_package(
    weight: f64,
    mass_unit: MassUnit,
    (length, width, height): (Option<f64>, Option<f64>, Option<f64>),
    length_unit: LengthUnit,
    declared_value: f64,
) -> PackageSpec {
    PackageSpec {
        weight,
        mass_unit,
        length,
        width,
        height,
        length_unit,
        declared_value,
    }
}

fn build_route(
    origin: Option<&str>,
    destination: Option<&str>,
    origin_zone: Option<&str>,
    destination_zone: Option<&str>,
) -> Result<Option<Route>> {
    match (origin, destination) {
        (Some(origin), Some(destination)) => Ok(Some(Route {
            origin_country: origin.to_string(),
            destination_country: destination.to_string(),
            origin_zone: origin_zone.map(str::to_string),
            destination_zone: destination_zone.map(str::to_string),
        })),
        (None, None) if origin_zone.is_none() && destination_zone.is_none() => Ok(None),
        _ => Err(QuoteError::InvalidInput(
            "route needs both --origin and --destination".to_string(),
        )
        .into()),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        QuoteError::InvalidInput(format!("invalid date '{}': {}", value, e)).into()
    })
}

fn open_service(config: &Config) -> Result<QuoteService> {
    tracing::debug!(catalog = ?config.catalog_path, "Opening service catalog");
    let repo = open_catalog_repo(config)?;
    QuoteService::from_config(config, repo.as_ref())
}

fn cmd_quote(config: &Config, args: QuoteArgs, output_format: OutputFormat) -> Result<()> {
    let service = open_service(config)?;

    let mut request = QuoteRequest::new(args.package, args.surcharges).with_services(args.services);
    request.route = args.route;

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let response = service.quote(&request, today)?;

    output_quotes(output_format, &response)
}

fn cmd_batch(
    cli: &Cli,
    config: &Config,
    csv_path: PathBuf,
    output: Option<PathBuf>,
    jobs: usize,
    output_format: OutputFormat,
) -> Result<()> {
    if !csv_path.exists() {
        return Err(Error::FileNotFound(format!(
            "CSV file not found: {}",
            csv_path.display()
        )));
    }

    let shipments = load_shipments(&csv_path)?;
    if shipments.is_empty() {
        return Err(Error::FileNotFound(format!(
            "No shipments found in {}",
            csv_path.display()
        )));
    }

    let total = shipments.len();
    if cli.verbose {
        eprintln!("Found {} shipments to quote with {} parallel jobs", total, jobs);
    }

    let service = Arc::new(open_service(config)?);

    // Setup progress bar
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let worker_pb = pb.clone();
    let verbose = cli.verbose;
    let results = quote_batch(
        service,
        shipments,
        jobs,
        config.fuel_surcharge_rate,
        Local::now().date_naive(),
        move |entry| {
            if verbose {
                worker_pb.set_message(entry.reference.clone());
            }
            worker_pb.inc(1);
        },
    );
    pb.finish_with_message("Complete");

    if let Some(output_path) = output {
        let content = serde_json::to_string_pretty(&results)?;
        std::fs::write(&output_path, content)?;
        eprintln!("Results saved to: {}", output_path.display());
    }

    output_batch_summary(output_format, &results)
}

fn cmd_services(config: &Config, output_format: OutputFormat) -> Result<()> {
    let repo = open_catalog_repo(config)?;
    let catalog = repo.snapshot()?;
    output_services(output_format, &catalog)
}

fn cmd_config(
    show: bool,
    set_catalog: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_fuel_rate: Option<f64>,
    set_divisor_by_route: Option<bool>,
    set_log_level: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_catalog {
        // validate before persisting
        open_catalog_repo(&Config {
            catalog_path: Some(path.clone()),
            ..Config::default()
        })?;
        config.catalog_path = Some(path);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(rate) = set_fuel_rate {
        if !(0.0..1.0).contains(&rate) {
            return Err(QuoteError::InvalidInput(format!(
                "fuel surcharge rate must be in [0, 1), got {}",
                rate
            ))
            .into());
        }
        config.fuel_surcharge_rate = rate;
        modified = true;
    }

    if let Some(by_route) = set_divisor_by_route {
        config.international_divisor_by_route = by_route;
        modified = true;
    }

    if let Some(level) = set_log_level {
        config.log_level = level;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
