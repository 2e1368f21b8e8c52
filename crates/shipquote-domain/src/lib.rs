//! Shipment pricing domain: models, the rate engine, and repository traits

pub mod model;
pub mod repository;
pub mod service;
