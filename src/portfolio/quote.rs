//! Parallel quoting and aggregate reporting over a register

use super::PortfolioEntry;
use crate::calculator::{PremiumCalculator, PremiumResult};
use crate::error::PricingError;
use crate::property::SizeCategory;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Outcome of quoting one pagoda
#[derive(Debug, Clone)]
pub struct PortfolioQuote {
    pub pagoda_id: u32,
    pub name: String,
    pub outcome: Result<PremiumResult, PricingError>,
}

/// Quote every entry in parallel, returning quotes in register order
pub fn quote_portfolio(
    calculator: &PremiumCalculator,
    entries: &[PortfolioEntry],
    as_of: DateTime<Utc>,
) -> Vec<PortfolioQuote> {
    let quotes: Vec<PortfolioQuote> = entries
        .par_iter()
        .map(|entry| PortfolioQuote {
            pagoda_id: entry.pagoda_id,
            name: entry.name.clone(),
            outcome: calculator.calculate_request_at(&entry.request, as_of),
        })
        .collect();

    for quote in &quotes {
        if let Err(err) = &quote.outcome {
            log::warn!("Pagoda {} ({}) rejected: {}", quote.pagoda_id, quote.name, err);
        }
    }

    quotes
}

/// Count and premium for one size tier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierSummary {
    pub count: usize,
    pub total_premium: f64,
}

/// Aggregate figures across a quoted register
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub quoted: usize,
    pub rejected: usize,
    pub total_premium: f64,
    /// Quoted premiums outside the persistable bounds
    pub out_of_bounds: usize,
    pub by_size: BTreeMap<SizeCategory, TierSummary>,
}

impl PortfolioSummary {
    pub fn from_quotes(quotes: &[PortfolioQuote], calculator: &PremiumCalculator) -> Self {
        let mut summary = PortfolioSummary::default();

        for quote in quotes {
            match &quote.outcome {
                Ok(result) => {
                    summary.quoted += 1;
                    summary.total_premium += result.total_premium;
                    if !calculator.validate_premium(result.total_premium) {
                        summary.out_of_bounds += 1;
                    }
                    let tier = summary.by_size.entry(result.metadata.pagoda_size).or_default();
                    tier.count += 1;
                    tier.total_premium += result.total_premium;
                }
                Err(_) => summary.rejected += 1,
            }
        }

        summary
    }

    pub fn average_premium(&self) -> Option<f64> {
        if self.quoted == 0 {
            None
        } else {
            Some(self.total_premium / self.quoted as f64)
        }
    }
}

/// Write the summary as pretty-printed JSON
pub fn write_summary<W: Write>(writer: W, summary: &PortfolioSummary) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, summary)
}

/// One output row per pagoda
#[derive(Debug, Serialize)]
struct QuoteRow<'a> {
    pagoda_id: u32,
    name: &'a str,
    size: Option<&'static str>,
    buildings: Option<usize>,
    base_premium: Option<f64>,
    building_premium: Option<f64>,
    age_factor: Option<f64>,
    total_premium: Option<f64>,
    within_bounds: Option<bool>,
    error: Option<String>,
}

/// Write quotes as CSV, leaving pricing columns empty for rejected pagodas
pub fn write_quotes<W: Write>(
    writer: W,
    quotes: &[PortfolioQuote],
    calculator: &PremiumCalculator,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for quote in quotes {
        let row = match &quote.outcome {
            Ok(result) => QuoteRow {
                pagoda_id: quote.pagoda_id,
                name: &quote.name,
                size: Some(result.metadata.pagoda_size.as_str()),
                buildings: Some(result.metadata.number_of_buildings),
                base_premium: Some(result.breakdown.base_premium),
                building_premium: Some(result.breakdown.building_premium),
                age_factor: Some(result.breakdown.factors.age_factor),
                total_premium: Some(result.total_premium),
                within_bounds: Some(calculator.validate_premium(result.total_premium)),
                error: None,
            },
            Err(err) => QuoteRow {
                pagoda_id: quote.pagoda_id,
                name: &quote.name,
                size: None,
                buildings: None,
                base_premium: None,
                building_premium: None,
                age_factor: None,
                total_premium: None,
                within_bounds: None,
                error: Some(err.to_string()),
            },
        };
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
