//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     WIDGET_ROUTES (table.rs)
//!     → pattern.rs (parse templates, type params)
//!     → router.rs (freeze as immutable Router, optional prefix index)
//!
//! Incoming Request (method, path)
//!     → dispatcher.rs
//!     → router.rs (candidate scan, Allow accumulation)
//!     → matcher.rs (segment walk, param binding)
//!     → Reply: handler body | 405 + Allow | 404
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always resolves the same way
//! - First match wins (registration order)
//! - HEAD is served by GET routes everywhere

pub mod dispatcher;
pub mod matcher;
pub mod pattern;
pub mod router;
pub mod table;

pub use dispatcher::{Dispatcher, Reply, METHOD_NOT_ALLOWED_BODY, NOT_FOUND_BODY};
pub use matcher::{Matcher, ParamValue, Params, MIN_INT_PARAM};
pub use pattern::{Method, Pattern, RouteError, Segment};
pub use router::{AllowList, Handler, MatchStrategy, Outcome, Route, RouteSpec, Router};
pub use table::{widget_router, WIDGET_ROUTES};
