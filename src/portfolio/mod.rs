//! Portfolio quoting over a register of pagodas
//!
//! Loads pagodas and their buildings from CSV, prices each pagoda in
//! parallel and aggregates the results for reporting.

pub mod loader;
mod quote;

pub use loader::{load_register, load_register_from_readers, LoadError};
pub use quote::{quote_portfolio, write_quotes, write_summary, PortfolioQuote, PortfolioSummary, TierSummary};

use crate::property::PremiumRequest;

/// One registered pagoda and the request used to price it
#[derive(Debug, Clone)]
pub struct PortfolioEntry {
    pub pagoda_id: u32,
    pub name: String,
    pub request: PremiumRequest,
}
