//! Measurement units shared across crates

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit the package weight is declared in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    Lb,
    Kg,
}

impl MassUnit {
    pub fn label(&self) -> &'static str {
        match self {
            MassUnit::Lb => "lb",
            MassUnit::Kg => "kg",
        }
    }
}

impl FromStr for MassUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Ok(MassUnit::Lb),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(MassUnit::Kg),
            other => Err(format!("unknown mass unit: {}", other)),
        }
    }
}

impl std::fmt::Display for MassUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Unit the package dimensions are declared in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    In,
    Cm,
}

impl LengthUnit {
    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(LengthUnit::In),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Cm),
            other => Err(format!("unknown length unit: {}", other)),
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
