//! Engineered features derived from the cleaned dataset

use anyhow::Result;
use polars::prelude::*;

use super::frame::{display_values, float_values, has_all_columns, has_column};

/// How a derived column is computed from its source columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// First source divided by the second
    Ratio,
    /// Product of every source
    Product,
    /// 1 when the lowercased text equals the pattern, else 0
    Equals(&'static str),
    /// 1 when the lowercased text contains the pattern, else 0
    Contains(&'static str),
}

/// A named derived column and the columns it needs
#[derive(Debug, Clone, Copy)]
pub struct FeatureRule {
    pub name: &'static str,
    pub sources: &'static [&'static str],
    pub derivation: Derivation,
}

/// Fixed derivation rules, applied in order
pub const FEATURE_RULES: &[FeatureRule] = &[
    FeatureRule {
        name: "power_to_weight",
        sources: &["horsepower", "curb-weight"],
        derivation: Derivation::Ratio,
    },
    FeatureRule {
        name: "car_volume",
        sources: &["length", "width", "height"],
        derivation: Derivation::Product,
    },
    FeatureRule {
        name: "displacement_proxy",
        sources: &["engine-size", "bore", "stroke"],
        derivation: Derivation::Product,
    },
    FeatureRule {
        name: "is_turbo",
        sources: &["aspiration"],
        derivation: Derivation::Equals("turbo"),
    },
    FeatureRule {
        name: "is_two_door",
        sources: &["num-of-doors"],
        derivation: Derivation::Contains("two"),
    },
];

/// Add every engineered feature whose sources are present. The input is left untouched.
pub fn engineer_features(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    for rule in FEATURE_RULES {
        if !has_all_columns(df, rule.sources) {
            tracing::debug!(feature = rule.name, "sources missing, feature skipped");
            continue;
        }
        out.with_column(derive(df, rule)?)?;
    }

    Ok(out)
}

/// Names of columns present in `enriched` but not in `base`, in enriched order
pub fn new_feature_names(base: &DataFrame, enriched: &DataFrame) -> Vec<String> {
    enriched
        .get_column_names()
        .iter()
        .filter(|name| !has_column(base, name.as_str()))
        .map(|name| name.to_string())
        .collect()
}

fn derive(df: &DataFrame, rule: &FeatureRule) -> Result<Series> {
    let series = match rule.derivation {
        Derivation::Ratio => {
            let numerator = float_values(df, rule.sources[0])?;
            let denominator = float_values(df, rule.sources[1])?;
            let values: Vec<Option<f64>> = numerator
                .iter()
                .zip(denominator.iter())
                .map(|(n, d)| match (n, d) {
                    (Some(n), Some(d)) if *d != 0.0 => Some(n / d),
                    _ => None,
                })
                .collect();
            Series::new(rule.name.into(), values)
        }
        Derivation::Product => {
            let mut values = vec![Some(1.0); df.height()];
            for source in rule.sources {
                let factor = float_values(df, source)?;
                for (acc, f) in values.iter_mut().zip(factor) {
                    *acc = acc.zip(f).map(|(a, b)| a * b);
                }
            }
            let values: Vec<Option<f64>> = values
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect();
            Series::new(rule.name.into(), values)
        }
        Derivation::Equals(pattern) => flag_series(df, rule, |text| text == pattern)?,
        Derivation::Contains(pattern) => flag_series(df, rule, |text| text.contains(pattern))?,
    };
    Ok(series)
}

/// 0/1 indicator over the lowercased text of the first source. Missing is 0.
fn flag_series(df: &DataFrame, rule: &FeatureRule, matches: impl Fn(&str) -> bool) -> Result<Series> {
    let column = df.column(rule.sources[0])?;
    let flags: Vec<i64> = display_values(column)
        .into_iter()
        .map(|v| match v {
            Some(text) if matches(&text.to_lowercase()) => 1,
            _ => 0,
        })
        .collect();
    Ok(Series::new(rule.name.into(), flags))
}
