//! HTTP server command
//!
//! Startup is all-or-nothing: configuration and connection errors abort
//! before the listener is bound.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use strive_server::db::{ConnectOptions, ConnectionManager, MongoConnector};
use strive_server::http::{run_server, ServerConfig};
use strive_server::config::read_env_file;
use strive_server::Settings;

use crate::tracing_setup::{init_tracing, TracingConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "STRIVE_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Local override file; process environment wins over its values
    #[arg(long, value_name = "PATH", default_value = strive_server::config::DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Seconds allowed for connecting and the startup ping
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout: u64,

    /// Seconds allowed for a single database operation
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub operation_timeout: u64,
}

impl ServeArgs {
    fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            operation_timeout: Duration::from_secs(self.operation_timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, force_debug: bool) -> Result<()> {
    let overrides = read_env_file(&args.env_file).context("Failed to load settings")?;
    let settings = Settings::from_sources(|key| std::env::var(key).ok(), &overrides)
        .context("Failed to load settings")?;

    init_tracing(&TracingConfig {
        debug: force_debug || settings.debug,
    })
    .context("Failed to initialize logging")?;

    if args.env_file.is_file() {
        tracing::debug!(path = %args.env_file.display(), entries = overrides.len(), "loaded env file");
    } else {
        tracing::debug!(path = %args.env_file.display(), "no env file found, using environment only");
    }

    tracing::info!(
        environment = %settings.environment,
        database = %settings.database_name,
        "Starting Strive API on {}",
        args.bind
    );

    let manager = Arc::new(ConnectionManager::new(
        MongoConnector::new(args.connect_options()),
        settings,
    ));
    manager
        .connect()
        .await
        .context("Failed to connect to MongoDB")?;

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Run server (blocks until shutdown, closes the connection on exit)
    run_server(manager, config).await.context("Server error")?;

    Ok(())
}
