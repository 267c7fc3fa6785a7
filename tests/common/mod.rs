//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// The worked example: three rows, the last one without a price
pub const EXAMPLE_CSV: &str = "\
price,horsepower,curb-weight,aspiration
1000,100,?,turbo
2000,?,2000,std
?,150,2500,turbo
";

/// A small slice of the automotive schema with known characteristics:
/// - row 5 has no price and is dropped on load (7 rows remain)
/// - `normalized-losses` is missing in 3 kept rows
/// - `num-of-doors` is missing in 1 kept row, `two`/`four` tie at 3 each
///   so the mode is `four`
/// - `price` and `horsepower` are integral once row 5 is gone
/// - `horsepower` is only missing in the dropped row
pub const CARS_CSV: &str = "\
symboling,normalized-losses,make,aspiration,num-of-doors,body-style,drive-wheels,length,width,height,curb-weight,engine-size,bore,stroke,horsepower,city-mpg,highway-mpg,price
3,?,alfa-romero,std,two,convertible,rwd,168.8,64.1,48.8,2548,130,3.47,2.68,111,21,27,13495
1,?,alfa-romero,std,two,hatchback,rwd,171.2,65.5,52.4,2823,152,2.68,3.47,154,19,26,16500
2,164,audi,std,four,sedan,fwd,176.6,66.2,54.3,2337,109,3.19,3.40,102,24,30,13950
2,164,audi,std,four,sedan,4wd,176.6,66.4,54.3,2824,136,3.19,3.40,115,18,22,17450
0,?,audi,turbo,?,sedan,fwd,192.7,71.4,55.9,3086,131,3.13,3.40,?,17,20,?
1,158,audi,turbo,four,sedan,fwd,192.7,71.4,55.9,3086,131,3.13,3.40,140,17,20,23875
0,?,bmw,std,two,sedan,rwd,176.8,64.8,54.3,2395,108,3.50,2.80,101,23,29,16430
2,192,bmw,std,?,sedan,rwd,176.8,64.8,54.3,2395,108,3.50,2.80,101,23,29,16925
";

/// Write CSV text into a fresh temporary directory
pub fn create_temp_csv(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("cars.csv");
    std::fs::write(&csv_path, content).unwrap();
    (temp_dir, csv_path)
}

/// Parse CSV text the way the loader does, without cleaning
pub fn raw_frame(content: &str) -> DataFrame {
    autoeda::pipeline::read_raw_csv(content.as_bytes().to_vec(), "fixture").unwrap()
}

/// Parse and clean CSV text with `price` as target
pub fn loaded_frame(content: &str) -> DataFrame {
    autoeda::pipeline::clean_raw(&raw_frame(content), "price").unwrap()
}

/// A DataFrame with known correlation patterns
pub fn create_correlation_test_dataframe() -> DataFrame {
    df! {
        "price" => [10.0f64, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0],
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "c" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0], // Perfect negative with price
        "d" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0], // Uncorrelated noise
        "constant" => [5.0f64; 10], // Zero variance
        "label" => ["x", "y", "x", "y", "x", "y", "x", "y", "x", "y"], // Non-numeric
    }
    .unwrap()
}

/// Float values of a column, nulls kept
pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    autoeda::pipeline::frame::float_values(df, name).unwrap()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column present: '{}'",
            col
        );
    }
}

/// Assert two floats agree within tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
