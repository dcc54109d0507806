//! Interest cost sensitivity table
//!
//! Projects the debt to one instant and writes the interest breakdown for a
//! grid of average interest rates to CSV.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use debt_clock::format::Formatter;
use debt_clock::projection::InterestPeriod;
use debt_clock::scenario::rate_grid;
use debt_clock::{DebtConfig, DerivedMetrics, Language, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "rate_sensitivity", about = "Interest cost of the debt across a range of rates")]
struct Args {
    /// JSON file overriding the built-in baseline figures
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lowest rate in percent
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Highest rate in percent
    #[arg(long, default_value_t = 6.0)]
    to: f64,

    /// Rate increment in percentage points
    #[arg(long, default_value_t = 0.25)]
    step: f64,

    /// Projection instant (RFC 3339), defaults to now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Language of the summary printed to stdout
    #[arg(long, default_value = "en")]
    lang: Language,

    #[arg(long, default_value = "rate_sensitivity.csv")]
    output: PathBuf,
}

/// One CSV line, amounts in the base currency
#[derive(Debug, Serialize)]
struct SensitivityRow {
    rate_pct: f64,
    total_debt: f64,
    annual_interest: f64,
    annual_per_capita: f64,
    annual_per_household: f64,
    monthly_interest: f64,
    daily_interest: f64,
    daily_per_capita: f64,
}

impl SensitivityRow {
    fn new(rate: f64, metrics: &DerivedMetrics) -> Self {
        let year = metrics.interest_row(InterestPeriod::Year);
        let month = metrics.interest_row(InterestPeriod::Month);
        let day = metrics.interest_row(InterestPeriod::Day);

        Self {
            rate_pct: rate,
            total_debt: metrics.total,
            annual_interest: year.total,
            annual_per_capita: year.per_capita,
            annual_per_household: year.per_household,
            monthly_interest: month.total,
            daily_interest: day.total,
            daily_per_capita: day.per_capita,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DebtConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DebtConfig::default_france(),
    };

    let rates = rate_grid(args.from, args.to, args.step);
    if rates.is_empty() {
        bail!("empty rate grid: from={} to={} step={}", args.from, args.to, args.step);
    }

    let at = args.at.unwrap_or_else(Utc::now);
    let formatter = Formatter::from_config(&config);
    let runner = ScenarioRunner::new(config);

    let start = Instant::now();
    println!("Projecting debt to {} for {} rates...", at.to_rfc3339(), rates.len());

    let rows: Vec<SensitivityRow> = rates
        .par_iter()
        .map(|&rate| SensitivityRow::new(rate, &runner.run(at, rate)))
        .collect();

    println!("Computed in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("\nResults written to: {}", args.output.display());

    // Print summary
    let lang = args.lang;
    println!("\nProjected debt: {}", formatter.currency(runner.value_at(at), lang));
    let currency = formatter.currency_for(lang).code();
    println!(
        "{:>8} {:>24} {:>16}",
        "Rate",
        format!("Annual interest ({currency})"),
        "Per capita"
    );
    println!("{}", "-".repeat(50));
    for row in &rows {
        println!(
            "{:>8} {:>24} {:>16}",
            Formatter::percent(row.rate_pct),
            formatter.currency(row.annual_interest, lang),
            formatter.currency(row.annual_per_capita, lang),
        );
    }

    Ok(())
}
