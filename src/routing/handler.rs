//! Handler abstraction shared by every routed sub-application.

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::routing::matcher::PathParams;

/// What the router learned about a request before handing it off.
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// Name of the route that matched.
    pub route: Arc<str>,
    /// Parameters captured from the route pattern.
    pub params: PathParams,
    /// Path below the matched pattern, rooted at `/`.
    pub remainder: String,
}

/// Anything that turns a request into a response.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>, ctx: RouteContext) -> BoxFuture<'static, Response>;
}

/// Shared, type-erased handler stored in a route table.
pub type BoxedHandler = Arc<dyn Handler>;

/// Adapter turning an async closure into a [`Handler`].
#[derive(Clone)]
pub struct FnHandler<F> {
    f: F,
}

/// Wrap an async closure as a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Request<Body>, RouteContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    FnHandler { f }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request<Body>, RouteContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>, ctx: RouteContext) -> BoxFuture<'static, Response> {
        Box::pin((self.f)(request, ctx))
    }
}
