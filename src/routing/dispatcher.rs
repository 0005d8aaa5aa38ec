//! Turns a routing outcome into a reply.
//!
//! # Responsibilities
//! - Invoke the matched handler with its bound parameters
//! - Build 404 and 405 replies, including the `Allow` value
//! - Percent-decode request paths before matching
//! - Record per-request logs and metrics
//!
//! The transport layer owns everything else: headers it adds, HEAD body
//! suppression, timeouts.

use std::time::Instant;

use axum::http::{Method, StatusCode};

use crate::observability::metrics;
use crate::routing::router::{Handler, Outcome, Router};

/// Body sent with every 404.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Body sent with every 405.
pub const METHOD_NOT_ALLOWED_BODY: &str = "405 method not allowed\n";

/// Transport-independent response produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    /// `Allow` header value; only set on 405.
    pub allow: Option<String>,
    pub body: String,
}

impl Reply {
    pub fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            allow: None,
            body,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            allow: None,
            body: NOT_FOUND_BODY.to_string(),
        }
    }

    pub fn method_not_allowed(allow: String) -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            allow: Some(allow),
            body: METHOD_NOT_ALLOWED_BODY.to_string(),
        }
    }
}

/// Stateless adapter between the router and the transport.
#[derive(Debug)]
pub struct Dispatcher {
    router: Router,
}

impl Dispatcher {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Route and handle a request whose path is still percent-encoded, as
    /// it appears in the request line. Paths that do not decode to UTF-8
    /// get a 404.
    pub fn handle_encoded(&self, method: &Method, raw_path: &str) -> Reply {
        match urlencoding::decode(raw_path) {
            Ok(path) => self.handle(method, &path),
            Err(e) => {
                tracing::debug!(
                    method = %method,
                    path = %raw_path,
                    error = %e,
                    "Path is not valid UTF-8 after decoding"
                );
                metrics::record_dispatch(method, "not_found", "none", Instant::now());
                Reply::not_found()
            }
        }
    }

    /// Route and handle one request. `path` is already decoded.
    pub fn handle(&self, method: &Method, path: &str) -> Reply {
        let start_time = Instant::now();

        match self.router.resolve(method, path) {
            Outcome::Matched { route, params } => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    route = %route.name(),
                    "Route matched"
                );
                let reply = Reply::ok(route.handler().call(&params));
                metrics::record_dispatch(method, "matched", route.name(), start_time);
                reply
            }
            Outcome::MethodNotAllowed(allow) => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    allow = %allow,
                    "Method not allowed"
                );
                metrics::record_dispatch(method, "method_not_allowed", "none", start_time);
                Reply::method_not_allowed(allow.header_value())
            }
            Outcome::NotFound => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                metrics::record_dispatch(method, "not_found", "none", start_time);
                Reply::not_found()
            }
        }
    }
}
