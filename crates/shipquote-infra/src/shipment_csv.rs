//! CSV loader for batch shipment quoting
//!
//! Expected header (order free, only `reference` and `weight` required):
//! reference,weight,weight_unit,length,width,height,dimension_unit,declared_value,
//! origin_country,destination_country,origin_zone,destination_zone,
//! insurance,signature,special_handling,fuel_rate

use std::path::Path;

use shipquote_domain::model::{PackageSpec, Route, SurchargeRequest};
use shipquote_types::{Error, LengthUnit, MassUnit};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipmentCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid number in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid value in row {row}, column {column}: {value}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

impl From<ShipmentCsvError> for Error {
    fn from(e: ShipmentCsvError) -> Self {
        Error::Csv(e.to_string())
    }
}

/// One shipment row to be quoted
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    pub reference: String,
    pub package: PackageSpec,
    pub insurance_required: bool,
    pub signature_required: bool,
    pub special_handling_count: u32,
    pub fuel_surcharge_rate: Option<f64>,
    pub route: Option<Route>,
}

impl ShipmentRecord {
    /// Surcharges for this row, falling back to the given fuel rate
    pub fn surcharges(&self, default_fuel_rate: f64) -> SurchargeRequest {
        SurchargeRequest {
            insurance_required: self.insurance_required,
            signature_required: self.signature_required,
            special_handling_count: self.special_handling_count,
            fuel_surcharge_rate: self.fuel_surcharge_rate.unwrap_or(default_fuel_rate),
        }
    }
}

/// Column positions resolved from the header row
struct Columns {
    headers: csv::StringRecord,
}

impl Columns {
    fn index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Trimmed, non-empty cell value
    fn get<'r>(&self, record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        self.index(name)
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

pub fn load_shipments<P: AsRef<Path>>(path: P) -> Result<Vec<ShipmentRecord>, ShipmentCsvError> {
    let file = std::fs::File::open(path)?;
    load_shipments_from_reader(file)
}

pub fn load_shipments_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ShipmentRecord>, ShipmentCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns {
        headers: reader.headers()?.clone(),
    };
    for required in ["reference", "weight"] {
        if columns.index(required).is_none() {
            return Err(ShipmentCsvError::MissingColumn(required.to_string()));
        }
    }

    let mut shipments = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2; // header is row 1

        match parse_record(&columns, &record, row_num)? {
            Some(shipment) => shipments.push(shipment),
            None => tracing::warn!(row = row_num, "Skipping row without a reference"),
        }
    }

    Ok(shipments)
}

fn parse_record(
    columns: &Columns,
    record: &csv::StringRecord,
    row: usize,
) -> Result<Option<ShipmentRecord>, ShipmentCsvError> {
    let Some(reference) = columns.get(record, "reference") else {
        return Ok(None);
    };

    let weight = columns
        .get(record, "weight")
        .map(|v| parse_f64(v, row, "weight"))
        .transpose()?
        .ok_or_else(|| ShipmentCsvError::InvalidNumber {
            row,
            column: "weight".to_string(),
            value: String::new(),
        })?;

    let mass_unit = parse_unit::<MassUnit>(columns.get(record, "weight_unit"), row, "weight_unit")?;
    let length_unit =
        parse_unit::<LengthUnit>(columns.get(record, "dimension_unit"), row, "dimension_unit")?;

    let optional_f64 = |name: &str| -> Result<Option<f64>, ShipmentCsvError> {
        columns
            .get(record, name)
            .map(|v| parse_f64(v, row, name))
            .transpose()
    };

    let package = PackageSpec {
        weight,
        mass_unit,
        length: optional_f64("length")?,
        width: optional_f64("width")?,
        height: optional_f64("height")?,
        length_unit,
        declared_value: optional_f64("declared_value")?.unwrap_or(0.0),
    };

    let route = match (
        columns.get(record, "origin_country"),
        columns.get(record, "destination_country"),
    ) {
        (Some(origin), Some(destination)) => Some(Route {
            origin_country: origin.to_string(),
            destination_country: destination.to_string(),
            origin_zone: columns.get(record, "origin_zone").map(str::to_string),
            destination_zone: columns.get(record, "destination_zone").map(str::to_string),
        }),
        _ => None,
    };

    let special_handling_count = columns
        .get(record, "special_handling")
        .map(|v| {
            v.parse::<u32>().map_err(|_| ShipmentCsvError::InvalidNumber {
                row,
                column: "special_handling".to_string(),
                value: v.to_string(),
            })
        })
        .transpose()?
        .unwrap_or(0);

    Ok(Some(ShipmentRecord {
        reference: reference.to_string(),
        package,
        insurance_required: parse_flag(columns.get(record, "insurance"), row, "insurance")?,
        signature_required: parse_flag(columns.get(record, "signature"), row, "signature")?,
        special_handling_count,
        fuel_surcharge_rate: optional_f64("fuel_rate")?,
        route,
    }))
}

fn parse_f64(value: &str, row: usize, column: &str) -> Result<f64, ShipmentCsvError> {
    value
        .parse::<f64>()
        .map_err(|_| ShipmentCsvError::InvalidNumber {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

fn parse_unit<U>(value: Option<&str>, row: usize, column: &str) -> Result<U, ShipmentCsvError>
where
    U: std::str::FromStr + Default,
{
    match value {
        None => Ok(U::default()),
        Some(v) => v.parse::<U>().map_err(|_| ShipmentCsvError::InvalidValue {
            row,
            column: column.to_string(),
            value: v.to_string(),
        }),
    }
}

fn parse_flag(value: Option<&str>, row: usize, column: &str) -> Result<bool, ShipmentCsvError> {
    let Some(v) = value else {
        return Ok(false);
    };
    match v.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(ShipmentCsvError::InvalidValue {
            row,
            column: column.to_string(),
            value: v.to_string(),
        }),
    }
}
