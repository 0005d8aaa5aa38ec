//! Reply to HTTP response conversion.
//!
//! # Design Decisions
//! - Plain-text bodies only
//! - HEAD carries GET's status, headers and `content-length`; hyper never
//!   writes the body of a HEAD response

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::Response,
};

use crate::routing::Reply;

/// Build the HTTP response for a reply.
pub fn into_http_response(reply: Reply) -> Response {
    let content_length = HeaderValue::from(reply.body.len());

    let mut response = Response::new(Body::from(reply.body));
    *response.status_mut() = reply.status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(header::CONTENT_LENGTH, content_length);

    if let Some(allow) = reply.allow {
        match HeaderValue::from_str(&allow) {
            Ok(value) => {
                headers.insert(header::ALLOW, value);
            }
            Err(e) => tracing::warn!(allow = %allow, error = %e, "Dropping invalid Allow header"),
        }
    }

    response
}
