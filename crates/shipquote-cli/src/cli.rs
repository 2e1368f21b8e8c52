//! CLI definition using clap

use clap::{Parser, Subcommand};
use shipquote_types::{LengthUnit, MassUnit, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shipquote")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Multi-tier shipping rate quotes with volumetric weight and surcharges")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Service catalog TOML. Uses config value if not specified.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quote one package against every service tier
    Quote {
        /// Actual package weight
        #[arg(long, short = 'w')]
        weight: f64,

        #[arg(long, value_enum, default_value_t = MassUnit::Lb)]
        weight_unit: MassUnit,

        #[arg(long)]
        length: Option<f64>,

        #[arg(long)]
        width: Option<f64>,

        #[arg(long)]
        height: Option<f64>,

        #[arg(long, value_enum, default_value_t = LengthUnit::In)]
        dim_unit: LengthUnit,

        /// Declared value for insurance
        #[arg(long, default_value_t = 0.0)]
        declared_value: f64,

        /// Add insurance (percentage of declared value)
        #[arg(long)]
        insurance: bool,

        /// Require signature on delivery
        #[arg(long)]
        signature: bool,

        /// Number of special handling units
        #[arg(long, default_value_t = 0)]
        special_handling: u32,

        /// Fuel surcharge rate (e.g. 0.15). Uses config value if not specified.
        #[arg(long)]
        fuel_rate: Option<f64>,

        /// Origin country code
        #[arg(long)]
        origin: Option<String>,

        /// Destination country code
        #[arg(long)]
        destination: Option<String>,

        #[arg(long)]
        origin_zone: Option<String>,

        #[arg(long)]
        destination_zone: Option<String>,

        /// Only quote these service ids (repeatable)
        #[arg(long = "service", short = 's')]
        services: Vec<String>,

        /// Ship date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Quote every shipment in a CSV file
    Batch {
        /// Path to shipments CSV
        csv: PathBuf,

        /// Output file for results (JSON)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of parallel workers. 0 = auto (CPU count). Uses 4 if not specified.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
    },

    /// List service tiers in the catalog
    Services,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set service catalog path
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default fuel surcharge rate
        #[arg(long)]
        set_fuel_rate: Option<f64>,

        /// Use the international divisor for cross-border quotes
        #[arg(long)]
        set_divisor_by_route: Option<bool>,

        /// Set log level (error, warn, info, debug, trace)
        #[arg(long)]
        set_log_level: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
