//! Numeric value distributions and categorical frequency tables

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::frame::{display_values, float_values, has_column, is_numeric};
use super::ordered::OrderedMap;

/// Label used for missing cells in frequency tables
pub const MISSING_LABEL: &str = "nan";

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Present values of each requested numeric column, in row order.
///
/// Absent and non-numeric columns are skipped.
pub fn numeric_distributions(df: &DataFrame, columns: &[&str]) -> Result<OrderedMap<Vec<f64>>> {
    let mut out = OrderedMap::new();

    for name in columns {
        if !has_column(df, name) || !is_numeric(df.column(name)?) {
            continue;
        }
        let values: Vec<f64> = float_values(df, name)?.into_iter().flatten().collect();
        out.insert(*name, values);
    }

    Ok(out)
}

/// The `top` most frequent text renderings of a column.
///
/// Missing cells count under [`MISSING_LABEL`]. Ties keep the order in
/// which values first appear. An absent column yields an empty table.
pub fn cat_frequencies(df: &DataFrame, column: &str, top: usize) -> Result<Vec<CategoryCount>> {
    if !has_column(df, column) {
        return Ok(Vec::new());
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for value in display_values(df.column(column)?) {
        let label = value.unwrap_or_else(|| MISSING_LABEL.to_string());
        let count = counts.entry(label.clone()).or_insert_with(|| {
            order.push(label);
            0
        });
        *count += 1;
    }

    let mut table: Vec<CategoryCount> = order
        .into_iter()
        .map(|category| {
            let count = counts[&category];
            CategoryCount { category, count }
        })
        .collect();

    // Stable sort keeps first-seen order among equal counts
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(top);

    Ok(table)
}
