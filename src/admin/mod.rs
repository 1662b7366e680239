//! Administrative site.
//!
//! Mounted as one opaque prefix route. Its own axum [`Router`] serves the
//! path remainder below the mount point. Login is the only public endpoint;
//! everything else, unknown paths included, sits behind bearer auth.

pub mod auth;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::uri::InvalidUri;
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Router};
use futures_util::future::BoxFuture;
use tower::ServiceExt;

use self::auth::admin_auth_middleware;
use self::handlers::{admin_not_found, get_routes, get_status, post_login, AdminState};
use crate::config::{AdminConfig, RouteConfig};
use crate::routing::{Handler, RouteContext};

pub struct AdminSite {
    router: Router,
}

impl AdminSite {
    /// Build the admin site. `routes` is the site table it reports on.
    pub fn new(config: &AdminConfig, routes: Vec<RouteConfig>) -> Self {
        let state = Arc::new(AdminState {
            api_key: config.api_key.clone(),
            started_at: Instant::now(),
            routes,
        });

        let protected = Router::new()
            .route("/", get(get_status))
            .route("/status", get(get_status))
            .route("/routes", get(get_routes))
            .fallback(admin_not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                admin_auth_middleware,
            ))
            .with_state(state.clone());

        let router = Router::new()
            .route("/login", post(post_login))
            .fallback_service(protected)
            .with_state(state);

        Self { router }
    }
}

/// `uri` with its path replaced by `path`, query kept.
fn rebase_uri(uri: &Uri, path: &str) -> Result<Uri, InvalidUri> {
    match uri.query() {
        Some(query) => format!("{}?{}", path, query).parse(),
        None => path.parse(),
    }
}

impl Handler for AdminSite {
    fn call(&self, mut request: Request<Body>, ctx: RouteContext) -> BoxFuture<'static, Response> {
        let router = self.router.clone();

        Box::pin(async move {
            match rebase_uri(request.uri(), &ctx.remainder) {
                Ok(uri) => *request.uri_mut() = uri,
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        remainder = %ctx.remainder,
                        "Unroutable admin path"
                    );
                    return StatusCode::BAD_REQUEST.into_response();
                }
            }

            match router.oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            }
        })
    }
}
