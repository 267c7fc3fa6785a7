//! Published artifact identifiers and their JSON payloads

use std::fmt;

use anyhow::Result;
use polars::prelude::*;
use serde_json::{json, Map, Number, Value};

use crate::pipeline::EdaReport;

/// Stable identifiers of the artifacts handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactId {
    Overview,
    Missing,
    Dists,
    CatBody,
    CatDrive,
    CatMake,
    Corr,
    Conclusions,
    Engineered,
    Head,
}

impl ArtifactId {
    pub const ALL: [ArtifactId; 10] = [
        ArtifactId::Overview,
        ArtifactId::Missing,
        ArtifactId::Dists,
        ArtifactId::CatBody,
        ArtifactId::CatDrive,
        ArtifactId::CatMake,
        ArtifactId::Corr,
        ArtifactId::Conclusions,
        ArtifactId::Engineered,
        ArtifactId::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactId::Overview => "overview",
            ArtifactId::Missing => "missing",
            ArtifactId::Dists => "dists",
            ArtifactId::CatBody => "cat-body",
            ArtifactId::CatDrive => "cat-drive",
            ArtifactId::CatMake => "cat-make",
            ArtifactId::Corr => "corr",
            ArtifactId::Conclusions => "conclusions",
            ArtifactId::Engineered => "engineered",
            ArtifactId::Head => "head",
        }
    }

    /// Source column of a categorical frequency artifact
    pub fn category_column(&self) -> Option<&'static str> {
        match self {
            ArtifactId::CatBody => Some("body-style"),
            ArtifactId::CatDrive => Some("drive-wheels"),
            ArtifactId::CatMake => Some("make"),
            _ => None,
        }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every artifact of a report, in publication order
pub fn artifact_payloads(report: &EdaReport) -> Result<Vec<(ArtifactId, Value)>> {
    let mut payloads = vec![
        (ArtifactId::Overview, serde_json::to_value(&report.overview)?),
        (ArtifactId::Missing, serde_json::to_value(&report.missing)?),
        (ArtifactId::Dists, serde_json::to_value(&report.distributions)?),
    ];

    for (id, table) in &report.categories {
        payloads.push((*id, serde_json::to_value(table)?));
    }

    payloads.extend([
        (ArtifactId::Corr, serde_json::to_value(&report.correlation)?),
        (ArtifactId::Conclusions, json!({ "bullets": report.conclusions })),
        (ArtifactId::Engineered, json!({ "new_features": report.engineered })),
        (ArtifactId::Head, json!({ "rows": report.head })),
    ]);

    Ok(payloads)
}

/// First `n` rows as JSON records keyed by column name
pub fn head_records(df: &DataFrame, n: usize) -> Result<Vec<Map<String, Value>>> {
    let head = df.head(Some(n));
    let mut rows = Vec::with_capacity(head.height());

    for idx in 0..head.height() {
        let mut row = Map::new();
        for column in head.get_columns() {
            row.insert(column.name().to_string(), json_value(column.get(idx)?));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Convert a cell to JSON. Non-finite floats become `null`.
pub fn json_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => v.into(),
        AnyValue::Int16(v) => v.into(),
        AnyValue::Int32(v) => v.into(),
        AnyValue::Int64(v) => v.into(),
        AnyValue::UInt8(v) => v.into(),
        AnyValue::UInt16(v) => v.into(),
        AnyValue::UInt32(v) => v.into(),
        AnyValue::UInt64(v) => v.into(),
        AnyValue::Float32(f) => float_value(f as f64),
        AnyValue::Float64(f) => float_value(f),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        let ids: Vec<&str> = ArtifactId::ALL.iter().map(|id| id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "overview",
                "missing",
                "dists",
                "cat-body",
                "cat-drive",
                "cat-make",
                "corr",
                "conclusions",
                "engineered",
                "head"
            ]
        );
    }

    #[test]
    fn test_json_value_nan_is_null() {
        assert_eq!(json_value(AnyValue::Float64(f64::NAN)), Value::Null);
        assert_eq!(json_value(AnyValue::Int64(3)), json!(3));
        assert_eq!(json_value(AnyValue::String("std")), json!("std"));
    }

    #[test]
    fn test_head_records_keep_column_order() {
        let df = df! {
            "price" => [Some(1000i64), Some(2000), Some(3000)],
            "make" => ["audi", "bmw", "audi"],
        }
        .unwrap();
        let rows = head_records(&df, 2).unwrap();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["price", "make"]);
        assert_eq!(rows[1]["make"], json!("bmw"));
    }
}
