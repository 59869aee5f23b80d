use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;

use census_report::{calculate_demographic_data, AnalyzerConfig, DemographicReport};

/// Demographic statistics over a census CSV extract
#[derive(Parser, Debug)]
#[command(name = "census-report")]
#[command(about = "Compute demographic statistics from a census CSV file", long_about = None)]
#[command(version)]
struct Args {
    /// Dataset to read (default: adult.data.csv)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// TOML file with analysis parameters
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not print the text transcript
    #[arg(short, long)]
    quiet: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    generated_at: DateTime<Utc>,
    source: &'a PathBuf,
    report: &'a DemographicReport,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(data) = args.data {
        config = config.with_data_path(data);
    }
    if args.quiet || args.json {
        config.print_output = false;
    }
    tracing::info!(path = %config.data_path.display(), "computing demographic report");

    let report = calculate_demographic_data(&config)
        .with_context(|| format!("failed to build report from {}", config.data_path.display()))?;

    if args.json {
        let output = JsonOutput {
            generated_at: Utc::now(),
            source: &config.data_path,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
