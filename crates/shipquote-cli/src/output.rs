//! Output formatting module

use shipquote_app::app::{BatchQuoteResults, QuoteResponse};
use shipquote_domain::model::ServiceCatalog;
use shipquote_domain::service::generate_quote_report;
use shipquote_types::{OutputFormat, Result};

pub fn output_quotes(output_format: OutputFormat, response: &QuoteResponse) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(response)?;
        println!("{}", content);
        return Ok(());
    }

    println!(
        "\nShip date: {} ({})",
        response.quoted_on,
        if response.international {
            "international"
        } else {
            "domestic"
        }
    );
    println!("{}", generate_quote_report(&response.quotes));

    if let Some(best) = response.recommended() {
        println!("Recommended: {} at {:.2}", best.service_name, best.total_cost);
        if best.fuel_surcharge > 0.0 {
            println!("  Fuel:             {:.2}", best.fuel_surcharge);
        }
        if best.insurance_cost > 0.0 {
            println!("  Insurance:        {:.2}", best.insurance_cost);
        }
        if best.signature_cost > 0.0 {
            println!("  Signature:        {:.2}", best.signature_cost);
        }
        if best.special_handling_cost > 0.0 {
            println!("  Special handling: {:.2}", best.special_handling_cost);
        }
        if !best.features.is_empty() {
            println!("  Features:         {}", best.features.join(", "));
        }
    }

    Ok(())
}

pub fn output_batch_summary(output_format: OutputFormat, results: &BatchQuoteResults) -> Result<()> {
    print!("{}", render_batch(output_format, results)?);
    Ok(())
}

/// Batch output for stdout; JSON mode emits nothing but the JSON document
fn render_batch(output_format: OutputFormat, results: &BatchQuoteResults) -> Result<String> {
    if output_format == OutputFormat::Json {
        let mut content = serde_json::to_string_pretty(results)?;
        content.push('\n');
        return Ok(content);
    }

    let mut out = String::new();
    out.push_str("\nBatch Quoting Complete\n");
    out.push_str("======================\n");
    out.push_str(&format!("Total:      {}\n", results.total));
    out.push_str(&format!("Successful: {}\n", results.successful));
    out.push_str(&format!("Failed:     {}\n", results.failed));
    out.push_str(&format!(
        "Duration:   {:.1}s\n\n",
        (results.completed_at - results.started_at).num_milliseconds() as f64 / 1000.0
    ));

    out.push_str(&format!(
        "{:<16} {:<20} {:>10}  {}\n",
        "Reference", "Best service", "Total", "Status"
    ));
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for entry in &results.entries {
        let line = match (&entry.response, &entry.error) {
            (Some(response), _) => match response.recommended() {
                Some(best) => format!(
                    "{:<16} {:<20} {:>10.2}  ok",
                    entry.reference, best.service_name, best.total_cost
                ),
                None => format!("{:<16} {:<20} {:>10}  ok", entry.reference, "-", "-"),
            },
            (None, Some(error)) => format!("{:<16} {:<20} {:>10}  {}", entry.reference, "-", "-", error),
            (None, None) => continue,
        };
        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}

pub fn output_services(output_format: OutputFormat, catalog: &ServiceCatalog) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(catalog)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nService Tiers");
    println!("=============");
    println!("{:<14} {:<22} {:>8} {:>10}  {}", "ID", "Name", "Rate", "Transit", "Scope");
    for tier in &catalog.tiers {
        println!(
            "{:<14} {:<22} {:>8.2} {:>10}  {}",
            tier.id,
            tier.name,
            tier.base_rate_per_unit_weight,
            tier.estimated_transit_days.label(),
            if tier.international {
                "international"
            } else {
                "domestic"
            }
        );
    }

    if !catalog.zones.is_empty() {
        println!("\nZone Multipliers");
        println!("================");
        for zone in catalog.zones.entries() {
            println!(
                "{:>6} -> {:<6} x{:.2}",
                zone.origin_zone, zone.destination_zone, zone.multiplier
            );
        }
    }

    Ok(())
}
