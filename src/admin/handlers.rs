use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::admin::auth::is_authorized;
use crate::config::RouteConfig;

/// Shared state behind every admin endpoint.
#[derive(Debug)]
pub struct AdminState {
    pub api_key: String,
    pub started_at: Instant,
    pub routes: Vec<RouteConfig>,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
pub struct LoginResult {
    pub authenticated: bool,
}

pub async fn get_status(State(state): State<Arc<AdminState>>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub async fn get_routes(State(state): State<Arc<AdminState>>) -> Json<Vec<RouteConfig>> {
    Json(state.routes.clone())
}

pub async fn post_login(State(state): State<Arc<AdminState>>, headers: HeaderMap) -> Response {
    if is_authorized(&headers, &state.api_key) {
        tracing::info!("Admin login succeeded");
        Json(LoginResult { authenticated: true }).into_response()
    } else {
        tracing::warn!("Admin login rejected");
        (StatusCode::UNAUTHORIZED, Json(LoginResult { authenticated: false })).into_response()
    }
}

pub async fn admin_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
        .into_response()
}
