//! Diagnostic logging to stderr
//!
//! Styled progress goes to stdout; this is the channel for warnings about
//! degraded steps and for load failures with their cause chain. The level
//! defaults to `warn` and can be overridden with `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `verbose` raises the default level to `info`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
