//! Tracing setup for the strive binary
//!
//! Environment variables:
//!   RUST_LOG    # Log filter; wins over everything else
//!   DEBUG       # Settings flag; selects `debug` instead of `info`

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Debug logging unless RUST_LOG is explicitly set
    pub debug: bool,
}

/// Initialize console tracing. Safe to call once per process.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = if config.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug,hyper=info,mongodb=info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
