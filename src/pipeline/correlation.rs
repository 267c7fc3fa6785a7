//! Pearson correlation matrix and target correlation ranking

use anyhow::Result;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::frame::{float_values, has_column, numeric_column_names};

/// Square correlation table over the numeric columns.
///
/// Undefined cells (fewer than two paired observations, or no variance)
/// are `None` and serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub matrix: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        self.matrix[i][j]
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Move one column to the front of both axes, keeping the others in order
    pub fn with_first(self, name: &str) -> Self {
        let Some(first) = self.position(name) else {
            return self;
        };
        let order: Vec<usize> = std::iter::once(first)
            .chain((0..self.columns.len()).filter(|&i| i != first))
            .collect();

        let columns = order.iter().map(|&i| self.columns[i].clone()).collect();
        let matrix = order
            .iter()
            .map(|&i| order.iter().map(|&j| self.matrix[i][j]).collect())
            .collect();

        Self { columns, matrix }
    }
}

/// A feature and its correlation with the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCorrelation {
    pub feature: String,
    pub correlation: f64,
}

/// Pearson correlation over pairwise-complete observations.
///
/// Only rows where both values are present take part. Returns `None` with
/// fewer than two such rows or when either side has no variance.
pub fn pearson_pairwise(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    let r = sxy / (sxx * syy).sqrt();
    if r.is_nan() {
        return None;
    }
    Some(r.clamp(-1.0, 1.0))
}

/// Numeric columns with at least one present value, with their values
fn correlation_inputs(df: &DataFrame) -> Result<Vec<(String, Vec<Option<f64>>)>> {
    let mut inputs = Vec::new();
    for name in numeric_column_names(df) {
        let values = float_values(df, &name)?;
        if values.iter().any(Option::is_some) {
            inputs.push((name, values));
        }
    }
    Ok(inputs)
}

/// Pairwise Pearson correlation over every numeric column with data.
///
/// The matrix is symmetric by construction: only the upper triangle is
/// computed. When `target_first` is set and the target is present it is
/// moved to the first row and column.
pub fn corr_matrix(df: &DataFrame, target: &str, target_first: bool) -> Result<CorrelationMatrix> {
    let inputs = correlation_inputs(df)?;
    let n = inputs.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    // Process pairs in parallel using Rayon
    let upper: Vec<(usize, usize, Option<f64>)> = pairs
        .par_iter()
        .map(|&(i, j)| (i, j, pearson_pairwise(&inputs[i].1, &inputs[j].1)))
        .collect();

    let mut matrix = vec![vec![None; n]; n];
    for (i, (_, values)) in inputs.iter().enumerate() {
        matrix[i][i] = pearson_pairwise(values, values).map(|_| 1.0);
    }
    for (i, j, corr) in upper {
        matrix[i][j] = corr;
        matrix[j][i] = corr;
    }

    let result = CorrelationMatrix {
        columns: inputs.into_iter().map(|(name, _)| name).collect(),
        matrix,
    };

    if target_first {
        Ok(result.with_first(target))
    } else {
        Ok(result)
    }
}

/// Features ranked by absolute correlation with the target, top `k`.
///
/// Undefined correlations are dropped and the target itself never appears.
/// Equal magnitudes keep column order. Empty when the target is absent.
pub fn top_correlations(df: &DataFrame, target: &str, k: usize) -> Result<Vec<FeatureCorrelation>> {
    if !has_column(df, target) {
        return Ok(Vec::new());
    }
    let target_values = float_values(df, target)?;

    let mut ranked: Vec<FeatureCorrelation> = Vec::new();
    for name in numeric_column_names(df) {
        if name == target {
            continue;
        }
        let values = float_values(df, &name)?;
        if let Some(correlation) = pearson_pairwise(&target_values, &values) {
            ranked.push(FeatureCorrelation {
                feature: name,
                correlation,
            });
        }
    }

    // Sort by absolute correlation descending
    ranked.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(k);

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_negative() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(3.0), Some(2.0), Some(1.0)];
        let r = pearson_pairwise(&x, &y).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_skips_incomplete_pairs() {
        let x = [Some(1.0), None, Some(2.0), Some(3.0)];
        let y = [Some(2.0), Some(100.0), Some(4.0), None];
        // Only rows 0 and 2 are complete
        let r = pearson_pairwise(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_undefined() {
        let x = [Some(1.0), Some(1.0), Some(1.0)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson_pairwise(&x, &y), None);
    }

    #[test]
    fn test_with_first_moves_row_and_column() {
        let m = CorrelationMatrix {
            columns: vec!["a".into(), "b".into(), "price".into()],
            matrix: vec![
                vec![Some(1.0), Some(0.1), Some(0.2)],
                vec![Some(0.1), Some(1.0), Some(0.3)],
                vec![Some(0.2), Some(0.3), Some(1.0)],
            ],
        };
        let m = m.with_first("price");
        assert_eq!(m.columns, vec!["price", "a", "b"]);
        assert_eq!(m.matrix[0], vec![Some(1.0), Some(0.2), Some(0.3)]);
        assert_eq!(m.matrix[2], vec![Some(0.3), Some(0.1), Some(1.0)]);
    }
}
