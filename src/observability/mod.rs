//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher / HTTP server produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID attached to every request span by the HTTP layer
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
