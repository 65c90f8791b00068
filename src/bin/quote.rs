//! Price a single premium request
//!
//! Reads request JSON from a file (or stdin) and prints the priced result.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::Parser;
use pagoda_premium::{PremiumCalculator, PremiumRequest, RateTables};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quote", about = "Price a pagoda fire-insurance premium request")]
struct Args {
    /// Request JSON file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Rate table overrides (JSON)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Valuation year used to age buildings (defaults to today)
    #[arg(long)]
    year: Option<i32>,

    /// Price pagodas without buildings at their base premium
    #[arg(long)]
    allow_empty: bool,

    /// Also show the annual payment for a monthly premium equal to the total
    #[arg(long)]
    annual: bool,
}

fn valuation_instant(year: Option<i32>) -> Result<DateTime<Utc>> {
    match year {
        Some(year) => Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .with_context(|| format!("invalid valuation year {year}")),
        None => Ok(Utc::now()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rates = match &args.rates {
        Some(path) => RateTables::from_json_file(path)?,
        None => RateTables::default(),
    };
    let calculator = PremiumCalculator::new(rates).allow_empty_buildings(args.allow_empty);

    let raw = match &args.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
            buffer
        }
    };
    let request: PremiumRequest = serde_json::from_str(&raw).context("request is not valid JSON")?;

    let as_of = valuation_instant(args.year)?;
    let result = calculator.calculate_request_at(&request, as_of)?;

    if !calculator.validate_premium(result.total_premium) {
        log::warn!(
            "Premium {:.0} is outside the bounds [{:.0}, {:.0}]",
            result.total_premium,
            calculator.rates().bounds.min,
            calculator.rates().bounds.max
        );
    }

    println!("{}", serde_json::to_string_pretty(&result)?);

    if args.annual {
        let discount = calculator.calculate_annual_discount(result.total_premium)?;
        println!("{}", serde_json::to_string_pretty(&discount)?);
    }

    Ok(())
}
