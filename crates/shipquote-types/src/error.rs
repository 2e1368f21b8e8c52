//! Error types for shipquote

use thiserror::Error;

/// Validation failures raised by the rate engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No service tiers supplied")]
    EmptyCatalog,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
