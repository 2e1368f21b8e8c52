//! Application service layer - quoting use cases, config, logging

pub mod app;
pub mod config;
pub mod constants;
pub mod logging;
pub mod repository;
