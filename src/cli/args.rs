//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{DataSource, EdaConfig, DEFAULT_TARGET};
use crate::report::SinkKind;

/// Dataset analyzed when no source is configured
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/evgpat/edu_stepik_practical_ml/main/datasets/cars_prices.csv";

/// autoeda - Exploratory data analysis for automotive pricing datasets
#[derive(Parser, Debug)]
#[command(name = "autoeda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dataset location: an http(s) URL or a local CSV path
    #[arg(short, long, env = "AUTOEDA_DATA_URL", default_value = DEFAULT_DATA_URL)]
    pub source: String,

    /// Directory receiving the JSON artifacts and the prepared CSV
    #[arg(short, long, default_value = "eda_output")]
    pub out_dir: PathBuf,

    /// Where artifacts are published.
    /// "auto" writes to --out-dir when it can be created and keeps results in memory otherwise.
    #[arg(long, value_enum, default_value_t = SinkKind::Auto)]
    pub sink: SinkKind,

    /// Target column analyzed for correlations (rows without it are dropped)
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Number of features in the top correlation list
    #[arg(long, default_value = "8", value_parser = validate_positive)]
    pub top_k: usize,

    /// Number of categories kept per frequency table
    #[arg(long, default_value = "15", value_parser = validate_positive)]
    pub category_top: usize,

    /// Number of enriched rows in the preview artifact
    #[arg(long, default_value = "10")]
    pub head_rows: usize,

    /// Also package every published file into a zip bundle
    #[arg(long, default_value = "false")]
    pub bundle: bool,

    /// Prompt for the source and offer to re-run after each run
    #[arg(short, long, default_value = "false")]
    pub interactive: bool,

    /// Plain output only: no banner, spinners or tables
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Log informational diagnostics to stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// The configured dataset location
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    /// Run tunables derived from the arguments
    pub fn eda_config(&self) -> EdaConfig {
        EdaConfig {
            target: self.target.clone(),
            top_k: self.top_k,
            category_top: self.category_top,
            head_rows: self.head_rows,
            show_progress: !self.quiet,
        }
    }
}

/// Validator for counts that must be at least 1
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
