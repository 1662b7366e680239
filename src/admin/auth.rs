use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::admin::handlers::AdminState;

/// True when the request carries `Authorization: Bearer <api_key>`.
pub fn is_authorized(headers: &HeaderMap, api_key: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| !api_key.is_empty() && token == api_key)
        .unwrap_or(false)
}

pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))],
        "Unauthorized",
    )
        .into_response()
}

/// Route layer guarding every admin endpoint except login.
pub async fn admin_auth_middleware(
    State(state): State<Arc<AdminState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_authorized(request.headers(), &state.api_key) {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "Admin request without valid credentials");
    unauthorized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_check() {
        assert!(is_authorized(&with_auth("Bearer s3cret"), "s3cret"));
        assert!(!is_authorized(&with_auth("Bearer wrong"), "s3cret"));
        assert!(!is_authorized(&with_auth("Basic s3cret"), "s3cret"));
        assert!(!is_authorized(&HeaderMap::new(), "s3cret"));
        assert!(!is_authorized(&with_auth("Bearer "), ""));
    }
}
