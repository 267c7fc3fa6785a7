//! Dataset shape and column type overview

use polars::prelude::*;
use serde::Serialize;

use super::frame::column_names;
use super::ordered::OrderedMap;

/// Shape, column order and type label of every column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<String>,
    pub dtypes: OrderedMap<String>,
}

pub fn dataset_overview(df: &DataFrame) -> DatasetOverview {
    let (n_rows, n_cols) = df.shape();
    let dtypes = df
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.dtype().to_string()))
        .collect();

    DatasetOverview {
        n_rows,
        n_cols,
        columns: column_names(df),
        dtypes,
    }
}
