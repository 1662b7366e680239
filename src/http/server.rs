//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router whose only handler is the site route table
//! - Wire up middleware (tracing, request ID, timeout, body limit, CORS,
//!   headers, panic recovery)
//! - Bind server to listener, plain or TLS
//! - Dispatch requests and record metrics
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SiteConfig;
use crate::http::cors::cors_layer;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{internal_error, not_found, with_security_headers};
use crate::lifecycle::{build_route_table, wait_for_shutdown, StartupError};
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::observability::tracing::make_request_span;
use crate::routing::{HandlerResult, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
}

impl HttpServer {
    /// Create a server around an already built route table.
    pub fn new(config: SiteConfig, table: RouteTable) -> Self {
        let state = AppState {
            table: Arc::new(table),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the route table from `config` and wrap it in a server.
    pub fn from_config(config: SiteConfig) -> Result<Self, StartupError> {
        let table = build_route_table(&config)?;
        Ok(Self::new(config, table))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(CatchPanicLayer::custom(internal_error))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if let Some(cors) = cors_layer(&config.security.cors_allowed_origins) {
            router = router.layer(cors);
        }

        if config.security.enable_headers {
            router = with_security_headers(router);
        }

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), StartupError> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);

        match &self.config.listener.tls {
            Some(tls) => {
                let rustls = load_tls_config(tls).await.map_err(StartupError::Tls)?;
                tracing::info!(address = %addr, "HTTPS server starting");

                let handle = axum_server::Handle::new();
                let shutdown_handle = handle.clone();
                tokio::spawn(async move {
                    wait_for_shutdown(shutdown).await;
                    shutdown_handle.graceful_shutdown(Some(grace));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                    .handle(handle)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                tracing::info!(address = %addr, "HTTP server starting");
                axum::serve(listener, self.router.into_make_service())
                    .with_graceful_shutdown(wait_for_shutdown(shutdown))
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Sole handler: hands every request to the route table.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();
    let request_id = request_id(&request).unwrap_or("unknown").to_owned();

    match state.table.dispatch(request).await {
        HandlerResult::Handled { route, response } => {
            tracing::debug!(
                request_id = %request_id,
                route = %route,
                path = %path,
                status = %response.status(),
                "Request dispatched"
            );
            metrics::record_request(&method, response.status().as_u16(), &route, start_time);
            response
        }
        HandlerResult::NotFound => {
            tracing::debug!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request(&method, 404, "none", start_time);
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    use crate::config::{RouteConfig, RouteTarget};
    use crate::http::X_REQUEST_ID;
    use crate::routing::{handler_fn, MatchKind};

    fn server(config: SiteConfig) -> Router {
        HttpServer::from_config(config).unwrap().router()
    }

    async fn send(router: Router, method: Method, path: &str, key: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(key) = key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }
        router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_catch_all_health() {
        let router = server(SiteConfig::default());
        for path in ["/", "/health", "/nonexistent/path", "/admin"] {
            let response = send(router.clone(), Method::GET, path, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert_eq!(text(response).await, "OK");
        }
    }

    #[tokio::test]
    async fn test_admin_prefix_goes_to_admin() {
        let mut config = SiteConfig::default();
        config.admin.api_key = "k".into();
        let router = server(config);

        let response = send(router.clone(), Method::GET, "/admin/status", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(router.clone(), Method::GET, "/admin/status", Some("k")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(router, Method::POST, "/admin/login", Some("k")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_found_without_catch_all() {
        let mut config = SiteConfig::default();
        config.routes = vec![RouteConfig::new(
            "ping",
            "/ping",
            MatchKind::Exact,
            RouteTarget::Health,
        )];
        let router = server(config);

        let response = send(router.clone(), Method::GET, "/ping", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(router, Method::GET, "/elsewhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_and_security_headers() {
        let router = server(SiteConfig::default());
        let response = send(router, Method::GET, "/", None).await;

        assert!(response.headers().contains_key(X_REQUEST_ID));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let router = server(SiteConfig::default());
        let request = Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "abc-123");
    }

    #[tokio::test]
    async fn test_security_headers_can_be_disabled() {
        let mut config = SiteConfig::default();
        config.security.enable_headers = false;
        let response = send(server(config), Method::GET, "/", None).await;
        assert!(!response.headers().contains_key(header::X_FRAME_OPTIONS));
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let mut config = SiteConfig::default();
        config.security.cors_allowed_origins = vec!["http://localhost:3000".into()];
        let router = server(config);

        let preflight = |origin: &'static str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/admin/status")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                .body(Body::empty())
                .unwrap()
        };

        let response = router
            .clone()
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let response = router.oneshot(preflight("https://evil.example")).await.unwrap();
        assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_no_cors_headers_by_default() {
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = server(SiteConfig::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    fn failing_handler() -> Response {
        panic!("handler failed")
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_500() {
        let mut table = RouteTable::new();
        table
            .mount("broken", "/", handler_fn(|_req, _ctx| async move { failing_handler() }))
            .unwrap();
        let router = HttpServer::new(SiteConfig::default(), table).router();

        let response = send(router, Method::GET, "/anything", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(X_REQUEST_ID));
        assert_eq!(text(response).await, r#"{"error":"Internal server error"}"#);
    }
}
