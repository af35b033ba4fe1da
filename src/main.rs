use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use weightcast::excel::load_records;
use weightcast::forecast::{MAX_HISTORICAL_ANCHORS, MAX_HORIZON_DAYS};
use weightcast::{
    DailyRecord, ForecastConfig, ForecastReport, Metric, ModelParams, RecordBook, Scenario,
    run_forecast,
};

/// Bodyweight forecasting from logged nutrition and activity.
#[derive(Parser, Debug)]
#[command(name = "weightcast")]
#[command(about = "Projects bodyweight from an energy-balance model backtested on your own history")]
#[command(version)]
struct Args {
    /// Path to the Excel file containing daily records.
    /// Can also be set via WEIGHTCAST_FILE environment variable.
    #[arg(value_name = "FILE", env = "WEIGHTCAST_FILE")]
    file: PathBuf,

    /// Days to project past the last weigh-in.
    #[arg(
        long,
        env = "WEIGHTCAST_HORIZON",
        default_value = "90",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_HORIZON_DAYS))
    )]
    horizon: u32,

    /// Number of re-anchored projections (1..=N days before the last weigh-in).
    #[arg(
        long,
        env = "WEIGHTCAST_ANCHORS",
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_HISTORICAL_ANCHORS))
    )]
    anchors: u32,

    /// Date used by the today scenario (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let records = load_records(&args.file)
        .with_context(|| format!("Failed to load records from {}", args.file.display()))?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let config = ForecastConfig {
        horizon_days: args.horizon,
        historical_anchors: args.anchors,
        ..Default::default()
    };

    if !args.json {
        print_data_summary(&records);
    }

    let report = match run_forecast(&records, today, &ModelParams::default(), &config) {
        Ok(report) => report,
        Err(e) => {
            // Not enough data is an expected outcome, not a failure
            if args.json {
                println!("{}", serde_json::to_string_pretty(&e)?);
            } else {
                println!();
                println!("Forecast unavailable: {}", e);
            }
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &config);
    }

    Ok(())
}

/// Prints per-metric record counts.
fn print_data_summary(records: &[DailyRecord]) {
    let book = RecordBook::from_records(records);

    println!();
    println!("=== Daily Records Summary ===");
    println!();
    println!("Days logged: {}", book.len());

    if let Some((min_date, max_date)) = book.date_range() {
        println!("Date range: {} to {}", min_date, max_date);
    }

    println!();
    for metric in Metric::all() {
        println!("{:10} {:4} days", metric.display_name(), book.count(*metric));
    }
}

/// Prints the backtest and per-scenario projections.
fn print_report(report: &ForecastReport, config: &ForecastConfig) {
    let forecast = &report.forecast;

    println!();
    println!("=== Backtest ===");
    println!();
    match &report.backtest {
        Ok(bt) => {
            println!(
                "MAE {:.2} kg, RMSE {:.2} kg, std {:.2} kg (n={})",
                bt.mae,
                bt.rmse,
                bt.std,
                bt.samples()
            );
        }
        Err(e) => println!("Unavailable: {} (no confidence bands)", e),
    }

    println!();
    println!("=== Forecast ({} days) ===", config.horizon_days);
    println!();
    println!(
        "Last weigh-in: {:.1} kg on {}",
        forecast.last_weight, forecast.last_date
    );
    println!();

    for scenario in forecast.scenarios.values() {
        let Some(last) = scenario.points.last() else {
            continue;
        };
        let band = match (last.lower, last.upper) {
            (Some(lower), Some(upper)) => format!("  [{:.1} .. {:.1}]", lower, upper),
            _ => String::new(),
        };
        println!(
            "{:16} from {:.1} kg on {} -> {:.1} kg on {}{}",
            scenario.scenario.to_string(),
            scenario.anchor_weight,
            scenario.anchor_date,
            last.weight,
            last.date,
            band
        );
    }

    let summary = &forecast.summary;
    println!();
    println!(
        "Projected {:.1} kg ({:+.1}) under {} drivers",
        summary.projected,
        summary.change,
        match summary.scenario {
            Scenario::Today => "today's",
            Scenario::WeeklyAverage => "last week's average",
            Scenario::DaysAgo(_) => "earlier",
        }
    );

    if let Some(label) = report.backtest_label() {
        println!("{}", label);
    }
}
