//! Widget router service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ routing::Dispatcher       │
//!                           │   (axum, layers)        │                    │
//!                           │                         ▼                    │
//!                           │                  routing::Router             │
//!                           │                  (pattern + matcher)         │
//!                           │                         │                    │
//!     Client Response       │                         ▼                    │
//!     ◀─────────────────────┼── http::response ◀── handler | 404 | 405     │
//!                           │                                              │
//!                           │  config · observability · lifecycle          │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use widget_router::config::{load_config, validate_config, ConfigError, ServerConfig};
use widget_router::lifecycle::{signals, startup, Shutdown};
use widget_router::observability::{logging, metrics};
use widget_router::routing::MatchStrategy;

#[derive(Parser)]
#[command(name = "widget-router")]
#[command(about = "Serves the widget site's fixed route table", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `routing.strategy`.
    #[arg(short, long, value_enum)]
    strategy: Option<MatchStrategy>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(strategy) = self.strategy {
            config.routing.strategy = strategy;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "widget-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        strategy = %config.routing.strategy,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let (server, listener) = startup::prepare(config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
