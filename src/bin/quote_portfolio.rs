//! Quote every pagoda in a CSV register
//!
//! Outputs one priced row per pagoda and prints a block summary, optionally
//! also writing the summary as JSON

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::Parser;
use pagoda_premium::portfolio::{load_register, quote_portfolio, write_quotes, write_summary, PortfolioSummary};
use pagoda_premium::{PremiumCalculator, RateTables};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "quote_portfolio", about = "Quote a register of pagodas from CSV")]
struct Args {
    /// Pagoda register (pagoda_id,name,size,zone,year_built)
    pagodas: PathBuf,

    /// Building register (pagoda_id,building_name,building_type)
    buildings: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "portfolio_quotes.csv")]
    output: PathBuf,

    /// Also write the portfolio summary as JSON to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Rate table overrides (JSON)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Valuation year used to age buildings (defaults to today)
    #[arg(long)]
    year: Option<i32>,

    /// Price pagodas without buildings at their base premium
    #[arg(long)]
    allow_empty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let rates = match &args.rates {
        Some(path) => RateTables::from_json_file(path)?,
        None => RateTables::default(),
    };
    let calculator = PremiumCalculator::new(rates).allow_empty_buildings(args.allow_empty);

    let as_of = match args.year {
        Some(year) => Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .with_context(|| format!("invalid valuation year {year}"))?,
        None => Utc::now(),
    };

    println!("Loading register from {} and {}...", args.pagodas.display(), args.buildings.display());
    let entries = load_register(&args.pagodas, &args.buildings)?;
    println!("Loaded {} pagodas in {:?}", entries.len(), start.elapsed());

    let quote_start = Instant::now();
    let quotes = quote_portfolio(&calculator, &entries, as_of);
    println!("Quoting complete in {:?}", quote_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_quotes(file, &quotes, &calculator)?;
    println!("Output written to {}", args.output.display());

    let summary = PortfolioSummary::from_quotes(&quotes, &calculator);
    println!("\nPortfolio Summary:");
    println!("  Quoted:        {}", summary.quoted);
    println!("  Rejected:      {}", summary.rejected);
    println!("  Out of bounds: {}", summary.out_of_bounds);
    println!("  Total premium: {:.0}", summary.total_premium);
    if let Some(average) = summary.average_premium() {
        println!("  Average:       {:.2}", average);
    }
    for (size, tier) in &summary.by_size {
        println!("  {:<7} {:>5} pagodas, premium {:.0}", size.as_str(), tier.count, tier.total_premium);
    }

    if let Some(path) = &args.summary_json {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        write_summary(file, &summary)?;
        println!("Summary written to {}", path.display());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
