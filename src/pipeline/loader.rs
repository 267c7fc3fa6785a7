//! Dataset loader: fetch, parse and clean the raw CSV

use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::frame::{all_numeric, coerce_numeric, has_column};
use super::schema::{MISSING_TOKEN, NUMERIC_GUESS};
use crate::error::LoadError;

/// Where the raw CSV comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied location. `http://` and `https://` are URLs,
    /// everything else is a local path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw bytes of a source. Blocks until the whole body is read.
pub fn fetch_bytes(source: &DataSource) -> Result<Vec<u8>, LoadError> {
    match source {
        DataSource::Url(url) => {
            let unreachable = |source| LoadError::Unreachable {
                url: url.clone(),
                source,
            };
            let response = reqwest::blocking::get(url.as_str()).map_err(unreachable)?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::HttpStatus {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            let body = response.bytes().map_err(unreachable)?;
            Ok(body.to_vec())
        }
        DataSource::Path(path) => std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Parse CSV bytes with every column read as text.
///
/// Schema inference is disabled so no cell is typed before the cleaning
/// steps decide what is numeric.
pub fn read_raw_csv(bytes: Vec<u8>, origin: &str) -> Result<DataFrame, LoadError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| LoadError::Malformed {
            origin: origin.to_string(),
            source,
        })
}

/// Replace the placeholder token with null in every text column
pub fn replace_missing_token(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            continue;
        }
        let ca = column.as_materialized_series().str()?;
        if !ca.into_iter().any(|v| v == Some(MISSING_TOKEN)) {
            continue;
        }
        let cleaned: Vec<Option<&str>> = ca
            .into_iter()
            .map(|v| v.filter(|s| *s != MISSING_TOKEN))
            .collect();
        out.with_column(Series::new(column.name().clone(), cleaned))?;
    }

    Ok(out)
}

/// Coerce the named text columns to numbers. Absent columns are skipped and
/// unparseable cells become null.
pub fn coerce_numeric_columns(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();

    for name in columns {
        if !has_column(df, name) {
            continue;
        }
        let column = df.column(name)?;
        if column.dtype().is_primitive_numeric() {
            continue;
        }
        let text = column.cast(&DataType::String)?;
        let series = coerce_numeric(name, text.as_materialized_series().str()?.into_iter());
        out.with_column(series)?;
    }

    Ok(out)
}

/// Coerce any remaining text column whose values are all numbers
pub fn infer_numeric_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            continue;
        }
        let ca = column.as_materialized_series().str()?;
        if !all_numeric(ca.into_iter()) {
            continue;
        }
        let series = coerce_numeric(column.name().as_str(), ca.into_iter());
        out.with_column(series)?;
    }

    Ok(out)
}

/// Remove every row whose target is null. No-op when the target is absent.
pub fn drop_missing_target(df: &DataFrame, target: &str) -> Result<DataFrame> {
    if !has_column(df, target) {
        tracing::warn!(target_column = target, "target column absent, keeping all rows");
        return Ok(df.clone());
    }
    let mask = df.column(target)?.is_not_null();
    Ok(df.filter(&mask)?)
}

/// Remove every row whose target is missing or not a number.
///
/// Text targets are parsed with the same rule as numeric coercion, so the
/// column itself is left as text for the coercion step that follows.
pub fn drop_unparseable_target(df: &DataFrame, target: &str) -> Result<DataFrame> {
    if !has_column(df, target) {
        return drop_missing_target(df, target);
    }
    let column = df.column(target)?;
    let mask = if column.dtype().is_primitive_numeric() {
        column.is_not_null()
    } else {
        let text = column.cast(&DataType::String)?;
        coerce_numeric(target, text.as_materialized_series().str()?.into_iter()).is_not_null()
    };
    Ok(df.filter(&mask)?)
}

/// Clean a raw text table: placeholder removal, target filtering, numeric
/// coercion and type inference for the remaining columns.
///
/// Rows are filtered before coercion so a column whose only gaps sat in
/// dropped rows still comes out as `Int64`. A numeric target also loses the
/// rows whose value does not parse.
pub fn clean_raw(raw: &DataFrame, target: &str) -> Result<DataFrame> {
    let df = replace_missing_token(raw)?;
    let before = df.height();
    let df = if NUMERIC_GUESS.iter().any(|name| *name == target) {
        drop_unparseable_target(&df, target)?
    } else {
        drop_missing_target(&df, target)?
    };
    if df.height() < before {
        tracing::info!(
            dropped = before - df.height(),
            "removed rows without a {} value",
            target
        );
    }
    let df = coerce_numeric_columns(&df, NUMERIC_GUESS)?;
    infer_numeric_columns(&df)
}

/// Fetch, parse and clean the dataset in one step
pub fn load_and_clean(source: &DataSource, target: &str) -> Result<DataFrame> {
    let origin = source.to_string();
    let bytes = fetch_bytes(source)?;
    let raw = read_raw_csv(bytes, &origin)?;
    clean_raw(&raw, target).with_context(|| format!("Failed to clean dataset from {}", origin))
}
