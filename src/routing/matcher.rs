//! Path matching against compiled patterns.
//!
//! # Responsibilities
//! - Split a request path into segments
//! - Walk segments pairwise with a pattern's specifiers
//! - Bind typed parameter values on success
//!
//! # Design Decisions
//! - Method-agnostic: the router decides what a method mismatch means
//! - No regex; one pass over the path, no backtracking
//! - Malformed integer segments are a plain no-match, never an error

use std::fmt;

use crate::routing::pattern::{Pattern, Segment};

/// Smallest value an integer parameter may bind to. Ids are strictly positive.
pub const MIN_INT_PARAM: u64 = 1;

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(u64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Parameters bound by a successful match, in template order.
///
/// Lives for one request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Value of a string parameter.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ParamValue::Str(s) => Some(s.as_str()),
            ParamValue::Int(_) => None,
        }
    }

    /// Value of an integer parameter.
    pub fn get_int(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Anything that can bind a concrete path.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the bound parameters if the path matches structurally.
    fn match_path(&self, path: &str) -> Option<Params>;
}

impl Matcher for Pattern {
    fn match_path(&self, path: &str) -> Option<Params> {
        match_segments(self.segments(), path)
    }
}

/// Split a path into segments after its leading slash.
///
/// `/` yields one empty segment; a path without a leading slash yields `None`.
pub fn split_path(path: &str) -> Option<std::str::Split<'_, char>> {
    path.strip_prefix('/').map(|rest| rest.split('/'))
}

/// Parse an integer parameter segment.
///
/// The whole segment must be ASCII digits: no sign, no whitespace.
pub fn parse_int_segment(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = segment.parse().ok()?;
    (value >= MIN_INT_PARAM).then_some(value)
}

fn match_segments(specs: &[Segment], path: &str) -> Option<Params> {
    let mut parts = split_path(path)?;
    let mut params = Params::new();

    for spec in specs {
        let part = parts.next()?;
        match spec {
            Segment::Literal(text) => {
                if part != text {
                    return None;
                }
            }
            Segment::Str(name) => {
                if part.is_empty() {
                    return None;
                }
                params.insert(name.as_str(), ParamValue::Str(part.to_string()));
            }
            Segment::Int(name) => {
                let value = parse_int_segment(part)?;
                params.insert(name.as_str(), ParamValue::Int(value));
            }
        }
    }

    // Segment counts must agree.
    if parts.next().is_some() {
        return None;
    }
    Some(params)
}
