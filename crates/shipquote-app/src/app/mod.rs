//! Use cases

mod batch_service;
mod quote_service;

pub use batch_service::{quote_batch, BatchQuoteEntry, BatchQuoteResults};
pub use quote_service::{QuoteRequest, QuoteResponse, QuoteService};
