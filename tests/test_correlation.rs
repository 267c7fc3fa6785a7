//! Unit tests for correlation analysis

use autoeda::pipeline::{
    corr_matrix, engineer_features, impute_values, pearson_pairwise, top_correlations,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_matrix_covers_numeric_columns_only() {
    let df = create_correlation_test_dataframe();

    let m = corr_matrix(&df, "price", false).unwrap();

    assert_eq!(m.columns, vec!["price", "a", "c", "d", "constant"]);
    assert_eq!(m.matrix.len(), 5);
    assert!(m.matrix.iter().all(|row| row.len() == 5));
}

#[test]
fn test_matrix_is_symmetric_with_unit_diagonal() {
    let enriched = engineer_features(&impute_values(&loaded_frame(CARS_CSV)).unwrap()).unwrap();

    let m = corr_matrix(&enriched, "price", true).unwrap();
    let n = m.columns.len();

    for i in 0..n {
        for j in 0..n {
            assert_eq!(m.matrix[i][j], m.matrix[j][i], "matrix[{i}][{j}] != matrix[{j}][{i}]");
            if let Some(v) = m.matrix[i][j] {
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }
    for (i, name) in m.columns.iter().enumerate() {
        if let Some(v) = m.matrix[i][i] {
            assert_eq!(v, 1.0, "diagonal of {name} should be 1");
        }
    }
    assert_eq!(m.get("price", "price"), Some(1.0));
}

#[test]
fn test_target_first_ordering() {
    let df = df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0],
        "b" => [4.0f64, 1.0, 3.0, 2.0],
        "price" => [2.0f64, 4.0, 6.0, 9.0],
    }
    .unwrap();

    let plain = corr_matrix(&df, "price", false).unwrap();
    let first = corr_matrix(&df, "price", true).unwrap();

    assert_eq!(plain.columns, vec!["a", "b", "price"]);
    assert_eq!(first.columns, vec!["price", "a", "b"]);
    for x in ["a", "b", "price"] {
        for y in ["a", "b", "price"] {
            assert_eq!(plain.get(x, y), first.get(x, y));
        }
    }
}

#[test]
fn test_target_first_without_target_keeps_order() {
    let df = df! {
        "a" => [1.0f64, 2.0, 3.0],
        "b" => [3.0f64, 1.0, 2.0],
    }
    .unwrap();

    let m = corr_matrix(&df, "price", true).unwrap();
    assert_eq!(m.columns, vec!["a", "b"]);
}

#[test]
fn test_all_missing_column_is_excluded() {
    let df = df! {
        "a" => [1.0f64, 2.0, 3.0],
        "empty" => [None::<f64>, None, None],
    }
    .unwrap();

    let m = corr_matrix(&df, "price", true).unwrap();
    assert_eq!(m.columns, vec!["a"]);
}

#[test]
fn test_constant_column_is_undefined() {
    let df = create_correlation_test_dataframe();
    let m = corr_matrix(&df, "price", true).unwrap();

    assert_eq!(m.get("constant", "constant"), None);
    assert_eq!(m.get("constant", "a"), None);

    let json = serde_json::to_value(&m).unwrap();
    let idx = m.position("constant").unwrap();
    assert!(json["matrix"][idx][idx].is_null());
}

#[test]
fn test_pairwise_complete_observations() {
    let df = df! {
        "price" => [Some(1.0f64), Some(2.0), Some(3.0), Some(4.0)],
        "x" => [Some(10.0f64), None, Some(30.0), Some(40.0)],
    }
    .unwrap();

    let m = corr_matrix(&df, "price", true).unwrap();
    let r = m.get("price", "x").unwrap();
    assert_close(r, 1.0);
}

#[test]
fn test_top_correlations_ranking() {
    let df = create_correlation_test_dataframe();

    let top = top_correlations(&df, "price", 8).unwrap();

    let names: Vec<&str> = top.iter().map(|t| t.feature.as_str()).collect();
    // a and c are perfectly correlated, constant is undefined, label is text
    assert_eq!(&names[..2], &["a", "c"]);
    assert!(names.contains(&"d"));
    assert!(!names.contains(&"constant"));
    assert!(!names.contains(&"label"));
    assert!(!names.contains(&"price"));
    assert_close(top[0].correlation, 1.0);
    assert_close(top[1].correlation, -1.0);
}

#[test]
fn test_top_correlations_sorted_and_truncated() {
    let enriched = engineer_features(&impute_values(&loaded_frame(CARS_CSV)).unwrap()).unwrap();

    for k in [1, 3, 8, 100] {
        let top = top_correlations(&enriched, "price", k).unwrap();
        assert!(top.len() <= k);
        for pair in top.windows(2) {
            assert!(pair[0].correlation.abs() >= pair[1].correlation.abs());
        }
        assert!(top.iter().all(|t| t.feature != "price"));
    }
}

#[test]
fn test_top_correlations_without_target() {
    let df = df! { "a" => [1.0f64, 2.0], "b" => [2.0f64, 1.0] }.unwrap();
    assert!(top_correlations(&df, "price", 8).unwrap().is_empty());
}

#[test]
fn test_matches_pearson_on_known_values() {
    let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
    let y = [Some(2.0), Some(4.0), Some(5.0), Some(4.0), Some(5.0)];
    // r = 6 / sqrt(10 * 6)
    assert_close(pearson_pairwise(&x, &y).unwrap(), 6.0 / 60f64.sqrt());
}
