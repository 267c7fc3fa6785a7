//! The linear EDA run: load, impute, engineer, analyze, publish

use std::time::{Duration, Instant};

use anyhow::Result;
use polars::prelude::*;
use serde_json::{Map, Value};

use super::correlation::{corr_matrix, top_correlations, CorrelationMatrix, FeatureCorrelation};
use super::distribution::{cat_frequencies, numeric_distributions, CategoryCount};
use super::features::{engineer_features, new_feature_names};
use super::impute::impute_values;
use super::loader::{load_and_clean, DataSource};
use super::missing::missing_summary;
use super::ordered::OrderedMap;
use super::overview::{dataset_overview, DatasetOverview};
use super::schema::{
    DEFAULT_CATEGORY_TOP, DEFAULT_HEAD_ROWS, DEFAULT_TARGET, DEFAULT_TOP_K, DISTRIBUTION_COLUMNS,
};
use crate::report::{artifact_payloads, head_records, make_conclusions, ArtifactId, ArtifactSink};
use crate::utils::{create_spinner, finish_with_success, finish_with_warning};

/// Tunables of a run
#[derive(Debug, Clone)]
pub struct EdaConfig {
    pub target: String,
    pub top_k: usize,
    pub category_top: usize,
    pub head_rows: usize,
    pub show_progress: bool,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            top_k: DEFAULT_TOP_K,
            category_top: DEFAULT_CATEGORY_TOP,
            head_rows: DEFAULT_HEAD_ROWS,
            show_progress: false,
        }
    }
}

/// Wall time spent in each stage
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub load: Duration,
    pub impute: Duration,
    pub features: Duration,
    pub analyze: Duration,
    pub publish: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.load + self.impute + self.features + self.analyze + self.publish
    }
}

/// Everything a run computed
#[derive(Debug, Clone)]
pub struct EdaReport {
    pub source: String,
    pub target: String,
    /// Overview of the loaded dataset, before imputation
    pub overview: DatasetOverview,
    /// Missing counts of the loaded dataset, before imputation
    pub missing: OrderedMap<usize>,
    pub distributions: OrderedMap<Vec<f64>>,
    pub categories: Vec<(ArtifactId, Vec<CategoryCount>)>,
    pub correlation: CorrelationMatrix,
    pub top_correlations: Vec<FeatureCorrelation>,
    pub conclusions: Vec<String>,
    pub engineered: Vec<String>,
    pub head: Vec<Map<String, Value>>,
    /// Imputed and enriched dataset
    pub dataset: DataFrame,
    pub timings: StageTimings,
}

/// Run every stage after loading. Nothing is published.
pub fn analyze_dataset(source: &str, loaded: &DataFrame, config: &EdaConfig) -> Result<EdaReport> {
    let mut timings = StageTimings::default();

    let overview = dataset_overview(loaded);
    let missing = missing_summary(loaded)?;

    let step_start = Instant::now();
    let spinner = create_spinner("Imputing missing values...", config.show_progress);
    let imputed = impute_values(loaded)?;
    finish_with_success(&spinner, "Missing values imputed");
    timings.impute = step_start.elapsed();

    let step_start = Instant::now();
    let spinner = create_spinner("Engineering features...", config.show_progress);
    let enriched = engineer_features(&imputed)?;
    let engineered = new_feature_names(loaded, &enriched);
    finish_with_success(&spinner, &format!("{} feature(s) engineered", engineered.len()));
    timings.features = step_start.elapsed();

    let step_start = Instant::now();
    let spinner = create_spinner("Computing statistics...", config.show_progress);
    let distributions = numeric_distributions(&enriched, DISTRIBUTION_COLUMNS)?;

    let mut categories = Vec::new();
    for id in [ArtifactId::CatBody, ArtifactId::CatDrive, ArtifactId::CatMake] {
        if let Some(column) = id.category_column() {
            categories.push((id, cat_frequencies(&enriched, column, config.category_top)?));
        }
    }

    let correlation = corr_matrix(&enriched, &config.target, true)?;
    let top = top_correlations(&enriched, &config.target, config.top_k)?;
    let conclusions = make_conclusions(&top, &config.target);
    let head = head_records(&enriched, config.head_rows)?;
    finish_with_success(
        &spinner,
        &format!("Correlations computed over {} numeric columns", correlation.columns.len()),
    );
    timings.analyze = step_start.elapsed();

    Ok(EdaReport {
        source: source.to_string(),
        target: config.target.clone(),
        overview,
        missing,
        distributions,
        categories,
        correlation,
        top_correlations: top,
        conclusions,
        engineered,
        head,
        dataset: enriched,
        timings,
    })
}

/// Hand every artifact and the enriched CSV to the sink
pub fn publish_report(report: &EdaReport, sink: &mut dyn ArtifactSink) -> Result<()> {
    for (id, payload) in artifact_payloads(report)? {
        sink.publish(id, &payload)?;
    }
    sink.publish_csv(&report.dataset)?;
    sink.finish()
}

/// Full run against a source.
///
/// A load failure is logged with its cause chain and returned; in that case
/// nothing reaches the sink. Artifacts are only published once every
/// statistic has been computed.
pub fn run_eda(source: &DataSource, config: &EdaConfig, sink: &mut dyn ArtifactSink) -> Result<EdaReport> {
    let origin = source.to_string();
    tracing::info!(source = %origin, "starting EDA run");

    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...", config.show_progress);
    let loaded = match load_and_clean(source, &config.target) {
        Ok(df) => df,
        Err(err) => {
            finish_with_warning(&spinner, "Dataset could not be loaded");
            tracing::error!(error = ?err, source = %origin, "load failed");
            return Err(err);
        }
    };
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows × {} columns", loaded.height(), loaded.width()),
    );
    let load_elapsed = step_start.elapsed();

    let mut report = analyze_dataset(&origin, &loaded, config)?;
    report.timings.load = load_elapsed;

    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Publishing to {} sink...", sink.name()), config.show_progress);
    publish_report(&report, sink)?;
    finish_with_success(&spinner, &format!("Artifacts published ({})", sink.name()));
    report.timings.publish = step_start.elapsed();

    tracing::info!(elapsed_ms = report.timings.total().as_millis() as u64, "EDA run complete");
    Ok(report)
}
