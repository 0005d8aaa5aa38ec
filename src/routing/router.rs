//! Route lookup and resolution.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Resolve (method, path) to a handler, 405 or 404
//! - Accumulate the `Allow` set for method mismatches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins, in registration order
//! - Prefix strategy buckets by leading literal but scans candidates in
//!   registration order, so it resolves exactly like the linear scan

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::http;
use serde::{Deserialize, Serialize};

use crate::routing::matcher::{Matcher, Params};
use crate::routing::pattern::{Method, Pattern, RouteError};

/// Produces a response body from bound parameters. Handlers never fail.
pub trait Handler: Send + Sync {
    fn call(&self, params: &Params) -> String;
}

impl<F> Handler for F
where
    F: Fn(&Params) -> String + Send + Sync,
{
    fn call(&self, params: &Params) -> String {
        self(params)
    }
}

/// Static description of one route, compiled by [`Router::from_specs`].
#[derive(Clone, Copy)]
pub struct RouteSpec {
    pub method: Method,
    pub template: &'static str,
    pub name: &'static str,
    pub handler: fn(&Params) -> String,
}

/// A compiled route: pattern, handler, and a name for logs and metrics.
#[derive(Clone)]
pub struct Route {
    name: String,
    pattern: Pattern,
    handler: Arc<dyn Handler>,
}

impl Route {
    pub fn new(name: impl Into<String>, pattern: Pattern, handler: Arc<dyn Handler>) -> Self {
        Self {
            name: name.into(),
            pattern,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

// Handlers are opaque, so Debug is written by hand.
impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.pattern.method())
            .field("template", &self.pattern.template())
            .finish()
    }
}

/// Methods registered for a path shape, deduplicated, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(Vec<Method>);

impl AllowList {
    pub fn push(&mut self, method: Method) {
        if !self.0.contains(&method) {
            self.0.push(method);
        }
    }

    pub fn methods(&self) -> &[Method] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for the `Allow` response header.
    pub fn header_value(&self) -> String {
        self.0
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

/// Result of resolving one request.
#[derive(Debug)]
pub enum Outcome<'r> {
    Matched { route: &'r Route, params: Params },
    MethodNotAllowed(AllowList),
    NotFound,
}

/// How the router finds candidate routes for a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Try every route in registration order.
    #[default]
    Linear,
    /// Only try routes whose leading literal equals the path's first segment,
    /// plus routes that start with a parameter.
    Prefix,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Linear => f.write_str("linear"),
            MatchStrategy::Prefix => f.write_str("prefix"),
        }
    }
}

/// Route indices bucketed by leading literal.
#[derive(Debug, Default)]
struct PrefixIndex {
    by_literal: HashMap<String, Vec<usize>>,
    dynamic: Vec<usize>,
}

impl PrefixIndex {
    fn build(routes: &[Route]) -> Self {
        let mut index = Self::default();
        for (i, route) in routes.iter().enumerate() {
            match route.pattern().leading_literal() {
                Some(literal) => index
                    .by_literal
                    .entry(literal.to_string())
                    .or_default()
                    .push(i),
                None => index.dynamic.push(i),
            }
        }
        index
    }

    fn candidates(&self, path: &str) -> Merged<'_> {
        let literal = path
            .strip_prefix('/')
            .and_then(|rest| rest.split('/').next())
            .and_then(|first| self.by_literal.get(first))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Merged {
            left: literal,
            right: &self.dynamic,
        }
    }
}

/// Merges two ascending index lists back into registration order.
struct Merged<'a> {
    left: &'a [usize],
    right: &'a [usize],
}

impl Iterator for Merged<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match (self.left.first(), self.right.first()) {
            (Some(&l), Some(&r)) if l <= r => {
                self.left = &self.left[1..];
                Some(l)
            }
            (_, Some(&r)) => {
                self.right = &self.right[1..];
                Some(r)
            }
            (Some(&l), None) => {
                self.left = &self.left[1..];
                Some(l)
            }
            (None, None) => None,
        }
    }
}

/// Immutable, ordered route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    strategy: MatchStrategy,
    index: PrefixIndex,
}

impl Router {
    /// Build a router from already-compiled routes.
    pub fn new(routes: Vec<Route>, strategy: MatchStrategy) -> Self {
        let index = match strategy {
            MatchStrategy::Linear => PrefixIndex::default(),
            MatchStrategy::Prefix => PrefixIndex::build(&routes),
        };
        Self {
            routes,
            strategy,
            index,
        }
    }

    /// Compile a static route table.
    pub fn from_specs(specs: &[RouteSpec], strategy: MatchStrategy) -> Result<Self, RouteError> {
        let routes = specs
            .iter()
            .map(|spec| {
                let pattern = Pattern::parse(spec.method, spec.template)?;
                Ok(Route::new(spec.name, pattern, Arc::new(spec.handler)))
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        tracing::debug!(routes = routes.len(), strategy = %strategy, "Route table compiled");
        Ok(Self::new(routes, strategy))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Resolve a request.
    pub fn resolve(&self, method: &http::Method, path: &str) -> Outcome<'_> {
        match self.strategy {
            MatchStrategy::Linear => self.scan(0..self.routes.len(), method, path),
            MatchStrategy::Prefix => self.scan(self.index.candidates(path), method, path),
        }
    }

    fn scan<I>(&self, candidates: I, method: &http::Method, path: &str) -> Outcome<'_>
    where
        I: Iterator<Item = usize>,
    {
        let mut allow = AllowList::default();

        for i in candidates {
            let route = &self.routes[i];
            let Some(params) = route.pattern.match_path(path) else {
                continue;
            };
            if route.pattern.method().accepts(method) {
                return Outcome::Matched { route, params };
            }
            allow.push(route.pattern.method());
        }

        if allow.is_empty() {
            Outcome::NotFound
        } else {
            Outcome::MethodNotAllowed(allow)
        }
    }
}
