//! Missing value analysis

use anyhow::Result;
use polars::prelude::*;

use super::ordered::OrderedMap;

/// Count missing values per column, sorted by count descending.
///
/// Columns with equal counts keep dataset order.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<(String, usize)>> {
    // Handle empty DataFrame
    if df.width() == 0 {
        return Ok(Vec::new());
    }

    let mut missing_counts: Vec<(String, usize)> = df
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect();

    // Stable sort by missing count descending
    missing_counts.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(missing_counts)
}

/// Column -> missing count for columns with at least one missing value
pub fn missing_summary(df: &DataFrame) -> Result<OrderedMap<usize>> {
    Ok(analyze_missing_values(df)?
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect())
}

/// Total number of missing cells across the dataset
pub fn total_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}
