//! Batch quoting across worker threads
//!
//! Every worker shares one `QuoteService` and therefore one immutable
//! catalog snapshot for the whole batch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shipquote_infra::shipment_csv::ShipmentRecord;

use super::quote_service::{QuoteRequest, QuoteResponse, QuoteService};

/// Outcome for one shipment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchQuoteEntry {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<QuoteResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchQuoteEntry {
    pub fn is_success(&self) -> bool {
        self.response.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchQuoteResults {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// In input order
    pub entries: Vec<BatchQuoteEntry>,
}

/// Quote every shipment using `jobs` worker threads
///
/// `on_done` is called from the worker threads as each row finishes.
pub fn quote_batch<F>(
    service: Arc<QuoteService>,
    shipments: Vec<ShipmentRecord>,
    jobs: usize,
    default_fuel_rate: f64,
    today: NaiveDate,
    on_done: F,
) -> BatchQuoteResults
where
    F: Fn(&BatchQuoteEntry) + Send + Sync + 'static,
{
    let started_at = Utc::now();
    let total = shipments.len();
    let jobs = jobs.clamp(1, total.max(1));

    let shipments = Arc::new(shipments);
    let next_index = Arc::new(AtomicUsize::new(0));
    let results: Arc<Mutex<Vec<(usize, BatchQuoteEntry)>>> =
        Arc::new(Mutex::new(Vec::with_capacity(total)));
    let on_done = Arc::new(on_done);

    let mut handles = Vec::new();
    for _ in 0..jobs {
        let service = Arc::clone(&service);
        let shipments = Arc::clone(&shipments);
        let next_index = Arc::clone(&next_index);
        let results = Arc::clone(&results);
        let on_done = Arc::clone(&on_done);

        handles.push(thread::spawn(move || loop {
            let idx = next_index.fetch_add(1, Ordering::SeqCst);
            if idx >= shipments.len() {
                break;
            }

            let entry = quote_one(&service, &shipments[idx], default_fuel_rate, today);
            on_done(&entry);
            results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((idx, entry));
        }));
    }

    for handle in handles {
        if handle.join().is_err() {
            tracing::warn!("Batch worker panicked");
        }
    }

    let mut indexed = std::mem::take(&mut *results.lock().unwrap_or_else(PoisonError::into_inner));
    indexed.sort_by_key(|(idx, _)| *idx);
    let entries: Vec<BatchQuoteEntry> = indexed.into_iter().map(|(_, entry)| entry).collect();

    let successful = entries.iter().filter(|e| e.is_success()).count();
    let failed = entries.len() - successful;
    tracing::info!(total, successful, failed, jobs, "Batch quoting complete");

    BatchQuoteResults {
        started_at,
        completed_at: Utc::now(),
        total,
        successful,
        failed,
        entries,
    }
}

fn quote_one(
    service: &QuoteService,
    shipment: &ShipmentRecord,
    default_fuel_rate: f64,
    today: NaiveDate,
) -> BatchQuoteEntry {
    let mut request = QuoteRequest::new(
        shipment.package.clone(),
        shipment.surcharges(default_fuel_rate),
    );
    request.route = shipment.route.clone();

    match service.quote(&request, today) {
        Ok(response) => BatchQuoteEntry {
            reference: shipment.reference.clone(),
            response: Some(response),
            error: None,
        },
        Err(e) => {
            tracing::warn!(reference = %shipment.reference, error = %e, "Failed to quote shipment");
            BatchQuoteEntry {
                reference: shipment.reference.clone(),
                response: None,
                error: Some(e.to_string()),
            }
        }
    }
}
