//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Reject duplicate patterns at registration time
//! - Embed sub-tables under a prefix (`include`)
//! - Look up the first matching route and invoke its handler
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan (acceptable for typical route counts)
//! - Explicit NotFound rather than silent default

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::routing::handler::{BoxedHandler, Handler, RouteContext};
use crate::routing::matcher::{MatchKind, PathParams, RoutePattern};
use crate::routing::RoutingError;

/// A binding from a pattern to a handler.
pub struct Route {
    name: Arc<str>,
    pattern: RoutePattern,
    handler: BoxedHandler,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn kind(&self) -> MatchKind {
        self.pattern.kind()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("kind", &self.pattern.kind())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16} {:<7} {}", self.name, self.pattern.kind(), self.pattern)
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: PathParams,
    pub remainder: String,
}

/// Outcome of dispatching a request.
#[derive(Debug)]
pub enum HandlerResult {
    /// A route matched and its handler produced a response.
    Handled { route: Arc<str>, response: Response },
    /// No registered pattern matches the path.
    NotFound,
}

impl HandlerResult {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HandlerResult::NotFound)
    }

    /// Name of the route that handled the request, if any.
    pub fn route(&self) -> Option<&str> {
        match self {
            HandlerResult::Handled { route, .. } => Some(&**route),
            HandlerResult::NotFound => None,
        }
    }
}

/// Ordered, first-match-wins route table.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Fails if another route already claims the same pattern.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        pattern: RoutePattern,
        handler: BoxedHandler,
    ) -> Result<(), RoutingError> {
        let name: String = name.into();
        let key = pattern.canonical();

        if let Some(existing) = self.routes.iter().find(|r| r.pattern.canonical() == key) {
            return Err(RoutingError::DuplicatePattern {
                route: name,
                pattern: pattern.as_str().to_string(),
                existing: existing.name.to_string(),
            });
        }

        tracing::debug!(
            route = %name,
            pattern = %pattern,
            kind = %pattern.kind(),
            "Route registered"
        );

        self.routes.push(Route {
            name: name.into(),
            pattern,
            handler,
        });
        Ok(())
    }

    /// Register `handler` as a delegated sub-application under `prefix`.
    pub fn mount(
        &mut self,
        name: impl Into<String>,
        prefix: &str,
        handler: impl Handler,
    ) -> Result<(), RoutingError> {
        self.register(name, RoutePattern::prefix(prefix)?, Arc::new(handler))
    }

    /// Register `handler` for exactly `path`.
    pub fn exact(
        &mut self,
        name: impl Into<String>,
        path: &str,
        handler: impl Handler,
    ) -> Result<(), RoutingError> {
        self.register(name, RoutePattern::exact(path)?, Arc::new(handler))
    }

    /// Embed every route of `sub` below `prefix`, preserving its order.
    pub fn include(&mut self, prefix: &str, sub: RouteTable) -> Result<(), RoutingError> {
        let prefix = RoutePattern::prefix(prefix)?;
        for route in sub.routes {
            let pattern = prefix.join(&route.pattern)?;
            self.register(route.name.to_string(), pattern, route.handler)?;
        }
        Ok(())
    }

    /// Find the first route matching `path`. Pure: no state is touched.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|m| RouteMatch {
                route,
                params: m.params,
                remainder: m.remainder,
            })
        })
    }

    /// Dispatch on the request's own path.
    pub async fn dispatch(&self, request: Request<Body>) -> HandlerResult {
        let path = request.uri().path().to_owned();
        self.dispatch_at(&path, request).await
    }

    /// Dispatch using `path` instead of the request URI, for mounted
    /// sub-applications routing on the remainder.
    pub async fn dispatch_at(&self, path: &str, request: Request<Body>) -> HandlerResult {
        let Some(found) = self.resolve(path) else {
            return HandlerResult::NotFound;
        };

        let route = Arc::clone(&found.route.name);
        let ctx = RouteContext {
            route: Arc::clone(&route),
            params: found.params,
            remainder: found.remainder,
        };
        let response = found.route.handler.call(request, ctx).await;

        HandlerResult::Handled { route, response }
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
