//! Route pattern compilation.
//!
//! # Responsibilities
//! - Parse a path template into ordered segment specifiers
//! - Type each parameter slot (string or integer)
//! - Reject malformed templates before the router is built
//!
//! # Template Syntax
//! ```text
//! /api/widgets/{slug}/parts/{id:int}/update
//!  ^^^ literal  ^^^^^^ string param  ^^^^^^^^ integer param
//! ```
//! `{name}` and `{name:str}` are equivalent.

use std::fmt;

use axum::http;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while compiling a route template. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("template `{0}` must start with '/'")]
    MissingLeadingSlash(String),

    #[error("template `{template}` has malformed segment `{segment}`")]
    InvalidSegment { template: String, segment: String },

    #[error("template `{template}` uses unknown parameter type `{tag}`")]
    UnknownParamType { template: String, tag: String },

    #[error("template `{template}` declares parameter `{name}` more than once")]
    DuplicateParam { template: String, name: String },
}

/// Methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Returns true if a request with the given method is served by a route
    /// registered for `self`. HEAD is served by GET routes.
    pub fn accepts(&self, request: &http::Method) -> bool {
        match self {
            Method::Get => *request == http::Method::GET || *request == http::Method::HEAD,
            Method::Post => *request == http::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment specifier of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Any non-empty segment, captured as text.
    Str(String),
    /// A full-segment unsigned decimal integer.
    Int(String),
}

impl Segment {
    /// Parameter name, if this segment captures one.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Str(name) | Segment::Int(name) => Some(name.as_str()),
        }
    }
}

/// A compiled route pattern: method plus fixed-length segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    method: Method,
    template: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a template for the given method.
    ///
    /// The root template `/` compiles to a single empty literal segment, so it
    /// only matches the root path.
    pub fn parse(method: Method, template: &str) -> Result<Self, RouteError> {
        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| RouteError::MissingLeadingSlash(template.to_string()))?;

        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();

        for part in rest.split('/') {
            let invalid = || RouteError::InvalidSegment {
                template: template.to_string(),
                segment: part.to_string(),
            };

            let Some(inner) = part.strip_prefix('{') else {
                if part.contains(['{', '}']) {
                    return Err(invalid());
                }
                segments.push(Segment::Literal(part.to_string()));
                continue;
            };

            let inner = inner.strip_suffix('}').ok_or_else(invalid)?;
            let (name, tag) = match inner.split_once(':') {
                Some((name, tag)) => (name, Some(tag)),
                None => (inner, None),
            };
            if name.is_empty() || name.contains(['{', '}']) {
                return Err(invalid());
            }
            if names.contains(&name) {
                return Err(RouteError::DuplicateParam {
                    template: template.to_string(),
                    name: name.to_string(),
                });
            }
            names.push(name);

            let segment = match tag {
                None | Some("str") => Segment::Str(name.to_string()),
                Some("int") => Segment::Int(name.to_string()),
                Some(other) => {
                    return Err(RouteError::UnknownParamType {
                        template: template.to_string(),
                        tag: other.to_string(),
                    })
                }
            };
            segments.push(segment);
        }

        Ok(Self {
            method,
            template: template.to_string(),
            segments,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// The first segment, if it is a literal. Used to bucket patterns.
    pub fn leading_literal(&self) -> Option<&str> {
        match self.segments.first() {
            Some(Segment::Literal(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}
