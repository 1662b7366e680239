//! Liveness/readiness responder.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::future::BoxFuture;

use crate::config::HealthConfig;
use crate::health::state::HealthStatus;
use crate::routing::{Handler, RouteContext};

/// Answers every request with a fixed success response.
#[derive(Debug, Clone)]
pub struct HealthHandler {
    body: Bytes,
}

impl HealthHandler {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    pub fn from_config(config: &HealthConfig) -> Self {
        Self::new(config.body.clone())
    }

    /// Build the probe response. Never blocks and never fails.
    pub fn respond(&self, wants_json: bool) -> Response {
        let status = HealthStatus::current();
        if wants_json {
            return (
                status.status_code(),
                Json(serde_json::json!({ "status": status })),
            )
                .into_response();
        }

        (
            status.status_code(),
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            self.body.clone(),
        )
            .into_response()
    }
}

impl Default for HealthHandler {
    fn default() -> Self {
        Self::from_config(&HealthConfig::default())
    }
}

fn wants_json(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

impl Handler for HealthHandler {
    fn call(&self, request: Request<Body>, _ctx: RouteContext) -> BoxFuture<'static, Response> {
        let response = self.respond(wants_json(&request));
        Box::pin(async move { response })
    }
}
