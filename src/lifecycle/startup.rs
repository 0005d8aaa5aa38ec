//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes compile before the listener binds (traffic only when ready)

use tokio::net::TcpListener;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::routing::RouteError;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table failed to compile: {0}")]
    Routes(#[from] RouteError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the server and bind its listener.
pub async fn prepare(config: ServerConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let server = HttpServer::from_config(config)?;
    let addr = server.config().listener.bind_address.clone();

    let listener = match TcpListener::bind(addr.as_str()).await {
        Ok(listener) => listener,
        Err(source) => return Err(StartupError::Bind { addr, source }),
    };

    tracing::info!(
        address = %addr,
        max_connections = server.config().listener.max_connections,
        "Listener bound"
    );
    Ok((server, listener))
}
