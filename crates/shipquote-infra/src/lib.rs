//! Infrastructure layer - catalog and shipment loaders, catalog repositories

pub mod catalog_loader;
pub mod persistence;
pub mod shipment_csv;
