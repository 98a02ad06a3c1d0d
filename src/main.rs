//! Radiation Flyover Analysis CLI
//!
//! Fetches the current element set for a fleet satellite, samples its
//! ground track around "now", and prints two reports: upcoming
//! hazard/safe periods with schedule advisories, and past hazard
//! flyovers tagged by zone.
//!
//! Usage:
//!   analyze-flyovers <satellite> [-d <hours>] [--json] [--verbose]

use anyhow::{anyhow, Result};
use chrono::{Timelike, Utc};
use clap::Parser;
use radiation_windows::ephemeris::Sgp4Provider;
use radiation_windows::{analyze_window, catalog, elements, report, AnalysisConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "analyze-flyovers",
    about = "Radiation hazard flyover windows and safe-period advisories"
)]
struct Args {
    /// Satellite name from the fleet table
    satellite: String,

    /// Lookahead/lookback horizon in hours
    #[arg(short = 'd', long = "duration-hours", default_value_t = 6)]
    hours: i64,

    /// Emit the two analyses as one JSON document instead of the
    /// text reports
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AnalysisConfig {
        horizon_hours: args.hours,
        ..AnalysisConfig::default()
    };
    config.validate()?;

    let catnr = catalog::lookup(&args.satellite).map_err(|e| {
        anyhow!("{} (known satellites: {})", e, catalog::known_names().join(", "))
    })?;
    info!("Satellite {} -> catalog number {}", args.satellite, catnr);

    let element_set = elements::fetch_elements(catnr)?;
    let provider = Sgp4Provider::from_element_set(&element_set)?;

    // Whole-minute reference instant, matching the sample cadence.
    let now = Utc::now()
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or_else(Utc::now);

    let horizon = config.horizon();

    info!("Analyzing forward window of {} hours", args.hours);
    let future = analyze_window(&provider, now, now + horizon, &config)?;

    info!("Analyzing backward window of {} hours", args.hours);
    let past = analyze_window(&provider, now - horizon, now, &config)?;

    if args.json {
        let document = serde_json::json!({
            "satellite": args.satellite,
            "catalog_number": catnr,
            "element_set": element_set,
            "generated_at": report::format_instant(now),
            "future": future,
            "past": past,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("{}", element_set.name);
    println!("{}", element_set.line1);
    println!("{}", element_set.line2);
    println!("{}", report::format_instant(now));

    println!();
    print!("{}", report::render_future_report(&future));

    println!();
    print!("{}", report::render_past_report(&past, args.hours));

    Ok(())
}
