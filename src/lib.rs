//! autoeda: Exploratory Data Analysis Library
//!
//! Loads an automotive pricing CSV, cleans and imputes it, derives
//! engineered features, computes descriptive and correlation statistics
//! and publishes them as JSON artifacts plus a prepared CSV.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
