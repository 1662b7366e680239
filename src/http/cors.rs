//! Cross-origin policy.
//!
//! # Design Decisions
//! - Off unless `security.cors_allowed_origins` lists at least one origin
//! - Explicit origin allowlist only, with credentials allowed; a wildcard
//!   origin is rejected by config validation
//! - Preflights are answered here and never reach the route table

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer for `allowed_origins`, or `None` when the list is empty.
pub fn cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!(origin = %origin, "Ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true),
    )
}
