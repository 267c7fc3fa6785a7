//! Missing value imputation: mean for numeric columns, mode for categorical ones

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::*;

use super::frame::{float_values, has_column};
use super::schema::{MEAN_IMPUTED, MODE_IMPUTED};

/// Impute the fixed mean and mode column lists. The input is left untouched.
pub fn impute_values(df: &DataFrame) -> Result<DataFrame> {
    impute_columns(df, MEAN_IMPUTED, MODE_IMPUTED)
}

/// Impute arbitrary column lists. Absent columns are skipped.
///
/// Columns without missing cells keep their dtype. A mean-imputed column with
/// no value at all is cast to `Float64` and left entirely missing.
pub fn impute_columns(df: &DataFrame, mean_columns: &[&str], mode_columns: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();

    for name in mean_columns {
        if !has_column(df, name) || df.column(name)?.null_count() == 0 {
            continue;
        }
        let values = float_values(df, name)?;
        let filled: Vec<Option<f64>> = match column_mean(&values) {
            Some(mean) => values.iter().map(|v| Some(v.unwrap_or(mean))).collect(),
            None => {
                tracing::warn!(column = *name, "column has no values, mean imputation skipped");
                values
            }
        };
        out.with_column(Series::new((*name).into(), filled))?;
    }

    for name in mode_columns {
        if !has_column(df, name) {
            continue;
        }
        let column = df.column(name)?;
        if column.null_count() == 0 {
            continue;
        }

        if column.dtype() == &DataType::String {
            let ca = column.as_materialized_series().str()?;
            let Some(mode) = mode_of(ca.into_iter()) else {
                continue;
            };
            let filled: Vec<&str> = ca.into_iter().map(|v| v.unwrap_or(mode)).collect();
            out.with_column(Series::new((*name).into(), filled))?;
        } else if column.dtype().is_primitive_numeric() {
            let values = float_values(df, name)?;
            let Some(TotalF64(mode)) = mode_of(values.iter().map(|v| v.map(TotalF64::new))) else {
                continue;
            };
            let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(mode)).collect();
            out.with_column(Series::new((*name).into(), filled))?;
        } else {
            tracing::warn!(column = *name, dtype = %column.dtype(), "unsupported dtype for mode imputation");
        }
    }

    Ok(out)
}

/// Arithmetic mean of the present values, `None` when there are none
pub fn column_mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Most frequent present value. Ties go to the smallest value.
pub fn mode_of<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = Option<T>>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    // Keys ascend, so only a strictly higher count replaces the best
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Float key ordered by value, with `-0.0` folded into `0.0`
#[derive(Debug, Clone, Copy)]
struct TotalF64(f64);

impl TotalF64 {
    fn new(value: f64) -> Self {
        Self(value + 0.0)
    }
}

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
