//! Fixed column lists of the automotive pricing schema
//!
//! Every list is best-effort: columns missing from a dataset are skipped
//! by the stage that consumes them.

/// Column analyzed as the prediction target
pub const DEFAULT_TARGET: &str = "price";

/// Literal token the source data uses for unknown values
pub const MISSING_TOKEN: &str = "?";

/// Columns expected to hold numbers once the placeholder token is removed
pub const NUMERIC_GUESS: &[&str] = &[
    "symboling",
    "normalized-losses",
    "wheel-base",
    "length",
    "width",
    "height",
    "curb-weight",
    "engine-size",
    "bore",
    "stroke",
    "compression-ratio",
    "horsepower",
    "peak-rpm",
    "city-mpg",
    "highway-mpg",
    "price",
];

/// Numeric columns whose gaps are filled with the column mean
pub const MEAN_IMPUTED: &[&str] = &["bore", "stroke", "horsepower", "peak-rpm", "normalized-losses"];

/// Categorical columns whose gaps are filled with the column mode
pub const MODE_IMPUTED: &[&str] = &["num-of-doors"];

/// Columns published as value distributions
pub const DISTRIBUTION_COLUMNS: &[&str] = &[
    "price",
    "horsepower",
    "engine-size",
    "curb-weight",
    "city-mpg",
    "highway-mpg",
];

/// Default number of categories kept per frequency table
pub const DEFAULT_CATEGORY_TOP: usize = 15;

/// Default number of features in the top correlation list
pub const DEFAULT_TOP_K: usize = 8;

/// Default number of preview rows
pub const DEFAULT_HEAD_ROWS: usize = 10;
