//! Configuration management for shipquote
//!
//! Config stored at: ~/.config/shipquote/config.json

use serde::{Deserialize, Serialize};
use shipquote_domain::model::surcharge::{
    DEFAULT_FUEL_SURCHARGE_RATE, DEFAULT_INSURANCE_RATE, DEFAULT_SIGNATURE_FEE,
    DEFAULT_SPECIAL_HANDLING_FEE,
};
use shipquote_domain::model::SurchargeSchedule;
use shipquote_domain::service::volumetric::{
    DOMESTIC_VOLUMETRIC_DIVISOR, INTERNATIONAL_VOLUMETRIC_DIVISOR,
};
use shipquote_domain::service::{DivisorPolicy, RateSettings};
use shipquote_types::{ConfigError, OutputFormat, Result};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Service catalog TOML (built-in catalog when unset)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Fuel surcharge applied when a request does not set one
    #[serde(default = "default_fuel_surcharge_rate")]
    pub fuel_surcharge_rate: f64,

    #[serde(default = "default_insurance_rate")]
    pub insurance_rate: f64,

    #[serde(default = "default_signature_fee")]
    pub signature_fee: f64,

    #[serde(default = "default_special_handling_fee")]
    pub special_handling_fee: f64,

    #[serde(default = "default_domestic_divisor")]
    pub domestic_divisor: f64,

    #[serde(default = "default_international_divisor")]
    pub international_divisor: f64,

    /// Use the international divisor for cross-border quotes
    #[serde(default)]
    pub international_divisor_by_route: bool,

    /// Log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

fn default_fuel_surcharge_rate() -> f64 {
    DEFAULT_FUEL_SURCHARGE_RATE
}

fn default_insurance_rate() -> f64 {
    DEFAULT_INSURANCE_RATE
}

fn default_signature_fee() -> f64 {
    DEFAULT_SIGNATURE_FEE
}

fn default_special_handling_fee() -> f64 {
    DEFAULT_SPECIAL_HANDLING_FEE
}

fn default_domestic_divisor() -> f64 {
    DOMESTIC_VOLUMETRIC_DIVISOR
}

fn default_international_divisor() -> f64 {
    INTERNATIONAL_VOLUMETRIC_DIVISOR
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            output_format: OutputFormat::default(),
            fuel_surcharge_rate: default_fuel_surcharge_rate(),
            insurance_rate: default_insurance_rate(),
            signature_fee: default_signature_fee(),
            special_handling_fee: default_special_handling_fee(),
            domestic_divisor: default_domestic_divisor(),
            international_divisor: default_international_divisor(),
            international_divisor_by_route: false,
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("shipquote");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Engine settings derived from this config
    pub fn rate_settings(&self) -> RateSettings {
        RateSettings {
            domestic_divisor: self.domestic_divisor,
            international_divisor: self.international_divisor,
            divisor_policy: if self.international_divisor_by_route {
                DivisorPolicy::ByRoute
            } else {
                DivisorPolicy::Uniform
            },
            surcharges: SurchargeSchedule {
                insurance_rate: self.insurance_rate,
                signature_fee: self.signature_fee,
                special_handling_fee: self.special_handling_fee,
            },
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Shipquote Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Catalog:              {}",
            self.catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Output format:        {}", self.output_format)?;
        writeln!(f, "Fuel surcharge:       {:.1}%", self.fuel_surcharge_rate * 100.0)?;
        writeln!(f, "Insurance rate:       {:.2}%", self.insurance_rate * 100.0)?;
        writeln!(f, "Signature fee:        {:.2}", self.signature_fee)?;
        writeln!(f, "Special handling fee: {:.2}", self.special_handling_fee)?;
        writeln!(f, "Domestic divisor:     {}", self.domestic_divisor)?;
        writeln!(
            f,
            "Intl divisor:         {} ({})",
            self.international_divisor,
            if self.international_divisor_by_route {
                "applied to international routes"
            } else {
                "not applied"
            }
        )?;
        writeln!(f, "Log level:            {}", self.log_level)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:          {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_observed_pricing() {
        let config = Config::default();
        let settings = config.rate_settings();
        assert_eq!(settings, RateSettings::default());
        assert!((config.fuel_surcharge_rate - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"signature_fee": 7.0, "output_format": "json"}"#).unwrap();
        assert!((config.signature_fee - 7.0).abs() < f64::EPSILON);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!((config.domestic_divisor - 166.0).abs() < f64::EPSILON);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_by_route_policy() {
        let config = Config {
            international_divisor_by_route: true,
            ..Config::default()
        };
        assert_eq!(config.rate_settings().divisor_policy, DivisorPolicy::ByRoute);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            catalog_path: Some(PathBuf::from("/etc/shipquote/catalog.toml")),
            fuel_surcharge_rate: 0.2,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(shipquote_types::Error::Config(ConfigError::ParseError(_)))
        ));
    }
}
