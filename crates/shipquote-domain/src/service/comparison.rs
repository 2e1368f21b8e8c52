//! Multi-service rate comparison

use serde::{Deserialize, Serialize};

use crate::model::QuoteResult;

/// Highlight a quote earns within a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteBadge {
    Cheapest,
    Fastest,
}

impl QuoteBadge {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteBadge::Cheapest => "Best price",
            QuoteBadge::Fastest => "Fastest",
        }
    }
}

/// Lowest total, first in order on ties (the recommended quote)
pub fn cheapest(quotes: &[QuoteResult]) -> Option<&QuoteResult> {
    quotes.iter().reduce(|best, q| {
        if q.total_cost < best.total_cost {
            q
        } else {
            best
        }
    })
}

/// Earliest delivery, then lowest total, then first in order
pub fn fastest(quotes: &[QuoteResult]) -> Option<&QuoteResult> {
    quotes.iter().reduce(|best, q| {
        let earlier = q.estimated_delivery_date < best.estimated_delivery_date;
        let same_day_cheaper = q.estimated_delivery_date == best.estimated_delivery_date
            && q.total_cost < best.total_cost;
        if earlier || same_day_cheaper {
            q
        } else {
            best
        }
    })
}

pub fn badges_for(quote: &QuoteResult, quotes: &[QuoteResult]) -> Vec<QuoteBadge> {
    let mut badges = Vec::new();
    if cheapest(quotes).is_some_and(|c| c.service_id == quote.service_id) {
        badges.push(QuoteBadge::Cheapest);
    }
    if fastest(quotes).is_some_and(|f| f.service_id == quote.service_id) {
        badges.push(QuoteBadge::Fastest);
    }
    badges
}

pub fn generate_quote_report(quotes: &[QuoteResult]) -> String {
    let mut report = String::new();
    report.push_str("==========================================================================\n");
    report.push_str("                            Shipping Quotes                               \n");
    report.push_str("==========================================================================\n\n");

    if quotes.is_empty() {
        report.push_str("  No quotes available.\n");
        return report;
    }

    report.push_str(&format!(
        "{:<18} {:>9} {:>9} {:>10} {:>10} {:>12}  {}\n",
        "Service", "Billable", "Base", "Surcharge", "Total", "Delivery by", "Notes"
    ));
    report.push_str("-".repeat(74).as_str());
    report.push('\n');

    for quote in quotes {
        let notes: Vec<&str> = badges_for(quote, quotes).iter().map(|b| b.label()).collect();
        report.push_str(&format!(
            "{:<18} {:>9.2} {:>9.2} {:>10.2} {:>10.2} {:>12}  {}\n",
            truncate_str(&quote.service_name, 17),
            quote.billable_weight,
            quote.base_cost,
            quote.surcharge_total(),
            quote.total_cost,
            quote.estimated_delivery_date.format("%Y-%m-%d").to_string(),
            notes.join(", ")
        ));
    }

    report.push('\n');
    report.push_str("==========================================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
