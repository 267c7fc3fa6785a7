//! Error types for loading the source dataset.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while fetching or parsing the source CSV.
///
/// Everything after the loader propagates with `anyhow`, so this is the
/// only typed error surface of the crate.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The resource could not be reached (DNS, connection, TLS, ...).
    #[error("failed to fetch {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("failed to fetch {url}: HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// A local file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were fetched but are not a readable CSV table.
    #[error("malformed CSV from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: PolarsError,
    },
}
