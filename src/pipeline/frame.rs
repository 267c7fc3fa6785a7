//! Column helpers shared by the pipeline stages

use anyhow::Result;
use polars::prelude::*;

/// Check whether the dataset has a column with this name
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Check whether every named column is present
pub fn has_all_columns(df: &DataFrame, names: &[&str]) -> bool {
    names.iter().all(|name| has_column(df, name))
}

/// Column names in dataset order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Whether a column holds numbers (booleans and strings excluded)
pub fn is_numeric(column: &Column) -> bool {
    column.dtype().is_primitive_numeric()
}

/// Names of numeric columns in dataset order
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric(col))
        .map(|col| col.name().to_string())
        .collect()
}

/// Read a column as floats. Nulls and non-finite values come back as `None`.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(values)
}

/// Render every cell of a column as text, keeping nulls as `None`.
///
/// Floats keep a trailing `.0` when integral so `2.0` and `2` stay
/// distinguishable between float and integer columns.
pub fn display_values(column: &Column) -> Vec<Option<String>> {
    column
        .as_materialized_series()
        .iter()
        .map(render_value)
        .collect()
}

/// Render a single cell as text
pub fn render_value(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float64(f) => Some(format!("{:?}", f)),
        AnyValue::Float32(f) => Some(format!("{:?}", f)),
        other => Some(other.to_string()),
    }
}

/// Parse one raw cell as a number. Blank, unparseable and non-finite cells are `None`.
fn parse_cell(raw: Option<&str>) -> (Option<i64>, Option<f64>) {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return (None, None);
    };
    match text.parse::<i64>() {
        Ok(i) => (Some(i), Some(i as f64)),
        Err(_) => (None, text.parse::<f64>().ok().filter(|f| f.is_finite())),
    }
}

/// Coerce raw text cells into a numeric series.
///
/// The result is `Int64` when every cell is an integer literal and none is
/// missing, otherwise `Float64` with unparseable cells set to null.
pub fn coerce_numeric<'a>(name: &str, values: impl Iterator<Item = Option<&'a str>>) -> Series {
    let mut ints: Vec<Option<i64>> = Vec::new();
    let mut floats: Vec<Option<f64>> = Vec::new();
    let mut integral = true;

    for raw in values {
        let (int, float) = parse_cell(raw);
        integral &= int.is_some();
        ints.push(int);
        floats.push(float);
    }

    if integral && !ints.is_empty() {
        Series::new(name.into(), ints)
    } else {
        Series::new(name.into(), floats)
    }
}

/// Whether every non-missing cell parses as a number (and at least one exists)
pub fn all_numeric<'a>(values: impl Iterator<Item = Option<&'a str>>) -> bool {
    let mut seen = false;
    for raw in values.flatten() {
        if raw.trim().is_empty() {
            continue;
        }
        if parse_cell(Some(raw)).1.is_none() {
            return false;
        }
        seen = true;
    }
    seen
}
