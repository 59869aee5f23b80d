//! Demographic report over a census-style CSV extract.
//!
//! Loads the table once, computes ten fixed statistics and returns them as a
//! [`DemographicReport`], optionally printing a transcript to stdout.

pub mod analyzer;
pub mod config;
pub mod csv_reader;
pub mod dataset;
pub mod error;

pub use analyzer::{compute_demographics, CategoryCounts, DemographicReport};
pub use config::AnalyzerConfig;
pub use dataset::CensusDataset;
pub use error::{ReportError, Result};

/// Load `config.data_path`, compute the report and print it when
/// `config.print_output` is set. The file is re-read on every call.
pub fn calculate_demographic_data(config: &AnalyzerConfig) -> Result<DemographicReport> {
    let dataset = CensusDataset::load(&config.data_path)?;
    let report = compute_demographics(&dataset, config)?;
    if config.print_output {
        print!("{}", report.transcript(&config.focus_country));
    }
    Ok(report)
}
