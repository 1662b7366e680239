//! Request spans.
//!
//! # Responsibilities
//! - Create one span per HTTP request carrying method, path and request ID
//!
//! # Design Decisions
//! - The request ID is set by the outer request-id layer before this span is made

use axum::body::Body;
use axum::http::Request;
use ::tracing::Span;

/// Span factory for tower-http's `TraceLayer`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    ::tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
