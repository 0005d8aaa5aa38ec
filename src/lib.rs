//! HTTP method + path router for the widget site.
//!
//! Compiles a fixed route table into an immutable [`routing::Router`], resolves
//! each request to a handler, a 405 with `Allow`, or a 404, and serves it over
//! Axum.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Dispatcher, Router};
